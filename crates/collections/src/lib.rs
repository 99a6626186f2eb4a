pub mod hashmap;
mod macros;

pub use hashmap::{
    Bucket, DEFAULT_SLOT_COUNT, Dict, DictError, DictStats, Entry, KeyHasher, SeededHasher,
    bit_width, slot_for,
};
