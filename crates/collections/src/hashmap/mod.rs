use std::collections::TryReserveError;

use thiserror::Error;

mod bucket;
mod dict;
mod hash;
mod hash_table;

#[derive(Error, Debug)]
pub enum DictError {
    #[error("Invalid slot count {got}, expected a power of two of at least 2")]
    InvalidSlotCount { got: usize },

    #[error("Cannot grow past {slot_count} slots without overflowing usize")]
    CapacityOverflow { slot_count: usize },

    /// The slot array could not be allocated, the dict is left untouched
    #[error("Couldnt allocate slot array: {0}")]
    Alloc(#[from] TryReserveError),
}

pub use bucket::{Bucket, Entry};
pub use dict::{DEFAULT_SLOT_COUNT, Dict, DictStats};
pub use hash_table::Iter;
pub use hash::{KeyHasher, SeededHasher, bit_width, slot_for};
