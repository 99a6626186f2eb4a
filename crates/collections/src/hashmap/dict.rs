use log::trace;

use super::{
    DictError,
    bucket::Entry,
    hash::{KeyHasher, SeededHasher},
    hash_table::{HashTable, Iter},
};

/// Slot count used by [`Dict::default`]
pub const DEFAULT_SLOT_COUNT: usize = 64;

/// String to string dictionary using separate chaining.
///
/// The dict never resizes on its own: [`Dict::grow`] is the only way to get
/// more slots. Inserting a key twice keeps both entries and [`Dict::get`]
/// keeps returning the first one, there is no overwrite.
///
/// ```
/// use collections::Dict;
///
/// let mut d = Dict::new(8).unwrap();
/// d.insert("root", "root");
/// d.insert("daemon", "daemon");
/// assert_eq!(d.get("root"), Some("root"));
///
/// d.grow().unwrap();
/// assert_eq!(d.slot_count(), 16);
/// assert_eq!(d.get("daemon"), Some("daemon"));
/// assert_eq!(d.get("nobody"), None);
/// ```
pub struct Dict<H = SeededHasher> {
    table: HashTable,
    hasher: H,
}

/// Point-in-time numbers about a dict's layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictStats {
    pub slot_count: usize,
    pub bit_width: u32,
    pub items: usize,
    pub occupied_slots: usize,
    pub collisions: usize,
    pub longest_chain: usize,
}

impl Default for Dict {
    fn default() -> Self {
        Self::new(DEFAULT_SLOT_COUNT).expect("DEFAULT_SLOT_COUNT is a valid slot count")
    }
}

impl Dict {
    /// Creates a dict with `slot_count` slots using [`SeededHasher`].
    ///
    /// # Errors
    ///
    /// [`DictError::InvalidSlotCount`] unless `slot_count` is a power of two
    /// of at least 2, [`DictError::Alloc`] if the slot array can't be allocated.
    pub fn new(slot_count: usize) -> Result<Self, DictError> {
        Self::with_hasher(slot_count, SeededHasher::default())
    }
}

impl<H: KeyHasher> Dict<H> {
    pub fn with_hasher(slot_count: usize, hasher: H) -> Result<Self, DictError> {
        Ok(Self {
            table: HashTable::new_with_slots(slot_count)?,
            hasher,
        })
    }

    /// Number of stored entries, a key inserted twice counts twice
    pub fn len(&self) -> usize {
        self.table.used()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn slot_count(&self) -> usize {
        self.table.slot_count()
    }

    pub fn bit_width(&self) -> u32 {
        self.table.bit_width
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Stores a copy of `key` and `value`.
    ///
    /// Does not look for an existing entry with the same key: a second
    /// insert of `key` adds another entry behind the first one, and
    /// [`Dict::get`] keeps returning the first value.
    pub fn insert(&mut self, key: &str, value: &str) {
        self.insert_entry(Entry::new(key, value));
    }

    pub fn insert_entry(&mut self, entry: Entry) {
        let i = self.slot_of(&entry.key);
        trace!(target: "insert", "{entry:?} -> slot {i}");
        self.table.insert_at(i, entry);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.get_entry(key).map(Entry::value)
    }

    /// First entry stored under `key`: the bucket's primary if it matches,
    /// else the first match in its overflow
    pub fn get_entry(&self, key: &str) -> Option<&Entry> {
        self.table.bucket(self.slot_of(key))?.find(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get_entry(key).is_some()
    }

    /// Number of entries that did not get a slot to themselves.
    /// Walks every slot on each call.
    pub fn collision_count(&self) -> usize {
        self.table.collision_count()
    }

    /// Doubles the slot count and moves every entry to its slot under the
    /// new bit width. Lookups give the same answers before and after.
    ///
    /// # Errors
    ///
    /// If the larger slot array can't be allocated (or its size overflows)
    /// an error is returned and the dict is unchanged.
    pub fn grow(&mut self) -> Result<(), DictError> {
        self.table.grow(&self.hasher)
    }

    pub fn stats(&self) -> DictStats {
        DictStats {
            slot_count: self.slot_count(),
            bit_width: self.bit_width(),
            items: self.len(),
            occupied_slots: self.table.occupied(),
            collisions: self.collision_count(),
            longest_chain: self.table.longest_chain(),
        }
    }

    // [adapters]

    /// Every entry in slot order, each chain primary first
    pub fn iter(&self) -> Iter<'_> {
        self.table.iter()
    }

    /// Tears the dict down, handing back ownership of every entry
    pub fn into_entries(self) -> impl Iterator<Item = Entry> {
        self.table.into_entries()
    }

    // [private]

    fn slot_of(&self, key: &str) -> usize {
        self.table.idx(self.hasher.hash(key.as_bytes()))
    }
}

impl<H> std::fmt::Debug for Dict<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dict")
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

impl<'a, H: KeyHasher> IntoIterator for &'a Dict<H> {
    type Item = &'a Entry;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::fmt::Display for DictStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "slots: {}, bits: {}, items: {}, occupied: {}, collisions: {}, longest chain: {}",
            self.slot_count,
            self.bit_width,
            self.items,
            self.occupied_slots,
            self.collisions,
            self.longest_chain
        )
    }
}

#[cfg(test)]
mod test {
    use crate::hashmap::{DEFAULT_SLOT_COUNT, Dict, DictError};

    /// Sends "a".."e" to slots 0..4, so with 4 slots "a" and "e" share slot 0
    fn letters(key: &[u8]) -> u32 {
        match key {
            b"a" => 0,
            b"b" => 1,
            b"c" => 2,
            b"d" => 3,
            b"e" => 4,
            _ => 0,
        }
    }

    #[test]
    fn insert_and_get() {
        let mut d = Dict::default();
        assert_eq!(d.slot_count(), DEFAULT_SLOT_COUNT);
        assert_eq!(d.bit_width(), 6);

        d.insert("hi", "baby");
        d.insert("hello", "yellow");

        assert_eq!(d.len(), 2);
        assert_eq!(d.get("hi"), Some("baby"));
        assert_eq!(d.get("hello"), Some("yellow"));
        assert_eq!(d.get("???"), None);
        assert!(d.contains_key("hi"));
        assert!(!d.contains_key("hey"));
    }

    #[test]
    fn rejects_invalid_slot_counts() {
        assert!(matches!(
            Dict::new(0),
            Err(DictError::InvalidSlotCount { got: 0 })
        ));
        assert!(matches!(
            Dict::new(1),
            Err(DictError::InvalidSlotCount { got: 1 })
        ));
        assert!(matches!(
            Dict::new(12),
            Err(DictError::InvalidSlotCount { got: 12 })
        ));
        assert!(Dict::new(2).is_ok());
    }

    #[test]
    fn colliding_letters() {
        let mut d = Dict::with_hasher(4, letters).unwrap();

        for (k, v) in [("a", "1"), ("b", "2"), ("c", "3"), ("d", "4"), ("e", "5")] {
            d.insert(k, v);
        }

        assert_eq!(d.collision_count(), 1);
        assert_eq!(d.get("e"), Some("5"));
        assert_eq!(d.get("a"), Some("1"));
        dbg!(&d);
    }

    #[test]
    fn colliding_letters_split_on_grow() {
        let mut d = Dict::with_hasher(4, letters).unwrap();
        for (k, v) in [("a", "1"), ("b", "2"), ("c", "3"), ("d", "4"), ("e", "5")] {
            d.insert(k, v);
        }

        d.grow().unwrap();

        // with 3 bits "e" gets slot 4 to itself
        assert_eq!(d.slot_count(), 8);
        assert_eq!(d.collision_count(), 0);
        assert_eq!(d.get("e"), Some("5"));
        assert_eq!(d.get("a"), Some("1"));
    }

    #[test]
    fn distinct_slots_have_no_collisions() {
        let mut d = Dict::with_hasher(256, |key: &[u8]| key[0] as u32).unwrap();

        for b in b'a'..=b'z' {
            let key = (b as char).to_string();
            d.insert(&key, &key.to_uppercase());
        }

        assert_eq!(d.len(), 26);
        assert_eq!(d.collision_count(), 0);
        assert_eq!(d.get("q"), Some("Q"));
    }

    #[test]
    fn same_slot_collides_m_minus_one() {
        let mut d = Dict::with_hasher(16, |_: &[u8]| 7u32).unwrap();

        for i in 0..10 {
            d.insert(&format!("k{i}"), &format!("v{i}"));
        }

        assert_eq!(d.collision_count(), 9);
        let stats = d.stats();
        assert_eq!(stats.occupied_slots, 1);
        assert_eq!(stats.longest_chain, 10);
        for i in 0..10 {
            assert_eq!(d.get(&format!("k{i}")), Some(format!("v{i}").as_str()));
        }
    }

    #[test]
    fn grow_twice_keeps_every_key() {
        let mut d = Dict::new(2).unwrap();
        let pairs: Vec<(String, String)> =
            (0..10).map(|i| (format!("key{i}"), format!("value{i}"))).collect();

        for (k, v) in &pairs {
            d.insert(k, v);
        }

        d.grow().unwrap();
        assert_eq!(d.slot_count(), 4);
        d.grow().unwrap();
        assert_eq!(d.slot_count(), 8);
        assert_eq!(d.bit_width(), 3);
        assert_eq!(d.len(), 10);

        for (k, v) in &pairs {
            assert_eq!(d.get(k), Some(v.as_str()));
        }
        dbg!(&d);
    }

    /// Inserting a key again does not replace its value: both entries are
    /// kept and the one inserted first is the one `get` sees.
    #[test]
    fn duplicate_key_keeps_first_value() {
        let mut d = Dict::with_hasher(4, |_: &[u8]| 1u32).unwrap();

        d.insert("x", "first");
        d.insert("x", "second");

        assert_eq!(d.get("x"), Some("first"));
        assert_eq!(d.len(), 2);
        assert_eq!(d.collision_count(), 1);

        d.grow().unwrap();
        assert_eq!(d.get("x"), Some("first"));
        assert_eq!(d.len(), 2);
    }

    #[test]
    fn duplicate_behind_other_key() {
        let mut d = Dict::with_hasher(2, |_: &[u8]| 0u32).unwrap();

        d.insert("y", "primary");
        d.insert("x", "first");
        d.insert("x", "second");

        assert_eq!(d.get("x"), Some("first"));
        assert_eq!(d.get("y"), Some("primary"));
    }

    #[test]
    fn get_on_empty_slot() {
        let d = Dict::with_hasher(8, |key: &[u8]| key.len() as u32).unwrap();
        assert_eq!(d.get("abc"), None);
        assert!(d.is_empty());
    }

    #[test]
    fn iter_and_into_entries() {
        let mut d = Dict::with_hasher(4, |key: &[u8]| key[0] as u32).unwrap();
        d.insert("c", "3");
        d.insert("a", "1");
        d.insert("e", "5");

        // "a" (97) and "e" (101) share slot 1, "c" (99) is alone in slot 3
        let seen: Vec<&str> = d.iter().map(|e| e.key()).collect();
        assert_eq!(seen, ["a", "e", "c"]);

        let owned: Vec<String> = d.into_entries().map(|e| e.value().to_string()).collect();
        assert_eq!(owned, ["1", "5", "3"]);
    }

    #[test]
    fn stats_display() {
        let mut d = Dict::with_hasher(4, |_: &[u8]| 2u32).unwrap();
        d.insert("a", "1");
        d.insert("b", "2");

        assert_eq!(
            d.stats().to_string(),
            "slots: 4, bits: 2, items: 2, occupied: 1, collisions: 1, longest chain: 2"
        );
    }
}
