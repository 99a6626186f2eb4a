use std::hash::{BuildHasher, Hasher};

use foldhash::fast::FixedState;

/// Anything that can turn the raw bytes of a key into a 32 bit hash.
///
/// Implemented for plain closures too, so a test can force two keys
/// into the same slot:
///
/// ```
/// use collections::{Dict, KeyHasher};
///
/// let stub = |key: &[u8]| key.len() as u32;
/// assert_eq!(stub.hash(b"abc"), 3);
///
/// let mut d = Dict::with_hasher(4, stub).unwrap();
/// d.insert("ab", "1");
/// d.insert("cd", "2");
/// assert_eq!(d.collision_count(), 1);
/// ```
pub trait KeyHasher {
    fn hash(&self, key: &[u8]) -> u32;
}

impl<F> KeyHasher for F
where
    F: Fn(&[u8]) -> u32,
{
    fn hash(&self, key: &[u8]) -> u32 {
        self(key)
    }
}

/// Default hasher of a [`Dict`](super::Dict): foldhash with a fixed seed,
/// so the same key lands in the same slot across runs.
#[derive(Debug, Clone)]
pub struct SeededHasher {
    state: FixedState,
}

impl SeededHasher {
    pub const DEFAULT_SEED: u64 = 42;

    pub fn with_seed(seed: u64) -> Self {
        Self {
            state: FixedState::with_seed(seed),
        }
    }
}

impl Default for SeededHasher {
    fn default() -> Self {
        Self::with_seed(Self::DEFAULT_SEED)
    }
}

impl KeyHasher for SeededHasher {
    fn hash(&self, key: &[u8]) -> u32 {
        let mut h = self.state.build_hasher();
        h.write(key);
        let full = h.finish();
        // fold the high half in, masking only ever looks at the low bits
        (full ^ (full >> 32)) as u32
    }
}

/// Number of bits needed to index `value` slots.
///
/// Returns the smallest `b` with `2^b >= value`, except that a single
/// slot still gets one bit: `bit_width(1) == 1`.
pub fn bit_width(value: usize) -> u32 {
    if value == 1 {
        return 1;
    }

    let mut bits = 0;
    while 1usize.checked_shl(bits).is_some_and(|pow| pow < value) {
        bits += 1;
    }
    bits
}

/// Masks `hash` down to its lowest `bit_width` bits
#[inline]
pub fn slot_for(hash: u32, bit_width: u32) -> usize {
    let mask = 1usize
        .checked_shl(bit_width)
        .map_or(usize::MAX, |pow| pow - 1);
    hash as usize & mask
}
