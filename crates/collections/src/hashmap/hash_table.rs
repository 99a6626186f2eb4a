use log::{debug, trace};

use super::{
    DictError,
    bucket::{self, Bucket, Entry},
    hash::{KeyHasher, bit_width, slot_for},
};

/// Slot array of a dict. Every slot is either empty (`None`) or holds a
/// bucket with at least one entry.
#[derive(Debug)]
pub(crate) struct HashTable {
    pub(crate) slots: Vec<Option<Bucket>>,
    pub(crate) items: usize,
    pub(crate) bit_width: u32,
}

#[derive(Debug)]
pub struct Iter<'a> {
    ht: &'a HashTable,
    bucket: Option<bucket::Iter<'a>>,
    slot_idx: usize,
}

impl HashTable {
    /// Smallest slot count accepted. One slot would get a one bit mask
    /// (see [`bit_width`]) and index past the end of the array.
    pub const MIN_SLOTS: usize = 2;

    /// Creates a new `HashTable` with `slot_count` empty slots.
    ///
    /// `slot_count` must be a power of two and at least [`Self::MIN_SLOTS`].
    /// The slot array is reserved fallibly, so running out of memory is an
    /// error here rather than an abort.
    pub fn new_with_slots(slot_count: usize) -> Result<Self, DictError> {
        if slot_count < Self::MIN_SLOTS || !slot_count.is_power_of_two() {
            return Err(DictError::InvalidSlotCount { got: slot_count });
        }

        let mut slots = Vec::new();
        slots.try_reserve_exact(slot_count)?;
        slots.resize_with(slot_count, || None);

        Ok(Self {
            slots,
            items: 0,
            bit_width: bit_width(slot_count),
        })
    }

    /// Returns the number of entries, duplicates included
    pub fn used(&self) -> usize {
        self.items
    }

    /// Shorthand for `self.used() == 0`
    pub fn is_empty(&self) -> bool {
        self.used() == 0
    }

    /// Returns the number of slots, always a power of two
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Slot `hash` resolves to under the current bit width
    pub fn idx(&self, hash: u32) -> usize {
        slot_for(hash, self.bit_width)
    }

    pub fn bucket(&self, slot: usize) -> Option<&Bucket> {
        self.slots.get(slot)?.as_ref()
    }

    /// Routes `entry` into `slot`: an empty slot gets a fresh bucket with
    /// `entry` as its primary, otherwise it is appended to the overflow.
    pub fn insert_at(&mut self, slot: usize, entry: Entry) {
        let target = &mut self.slots[slot];
        match target {
            Some(bucket) => bucket.push(entry),
            None => *target = Some(Bucket::new(entry)),
        }
        self.items += 1;
    }

    /// Sum of overflow lengths over every bucket. Not cached, walks all slots.
    pub fn collision_count(&self) -> usize {
        self.buckets().map(Bucket::collisions).sum()
    }

    pub fn occupied(&self) -> usize {
        self.buckets().count()
    }

    pub fn longest_chain(&self) -> usize {
        self.buckets().map(Bucket::len).max().unwrap_or(0)
    }

    /// Doubles the slot count and re-slots every entry under the new bit width.
    ///
    /// The new slot array is allocated before anything moves, on error `self`
    /// is left exactly as it was. Buckets are visited in slot order, each one
    /// primary first, then overflow, and entries are moved, never cloned.
    pub fn grow<H: KeyHasher>(&mut self, hasher: &H) -> Result<(), DictError> {
        let old_count = self.slot_count();
        let new_count = old_count
            .checked_mul(2)
            .ok_or(DictError::CapacityOverflow {
                slot_count: old_count,
            })?;

        let new_table = Self::new_with_slots(new_count)?;
        let old = std::mem::replace(self, new_table);
        let moved = old.used();

        for entry in old.into_entries() {
            let i = self.idx(hasher.hash(entry.key.as_bytes()));
            trace!(target: "grow", "moving {entry:?} into slot {i}");
            self.insert_at(i, entry);
        }

        debug_assert_eq!(moved, self.used(), "grow lost or duplicated entries");
        debug!(
            target: "grow",
            "grew from {old_count} to {new_count} slots, {} bits, moved {moved} entries",
            self.bit_width
        );
        Ok(())
    }

    // [adapters]

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            ht: self,
            bucket: None,
            slot_idx: 0,
        }
    }

    /// Consumes the table, yielding every entry in slot order
    pub fn into_entries(self) -> impl Iterator<Item = Entry> {
        self.slots.into_iter().flatten().flatten()
    }

    // [private]

    fn buckets(&self) -> impl Iterator<Item = &Bucket> {
        self.slots.iter().flatten()
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.bucket.as_mut().and_then(Iterator::next) {
                return Some(entry);
            }

            let slot = self.ht.slots.get(self.slot_idx)?;
            self.slot_idx += 1;
            self.bucket = slot.as_ref().map(Bucket::iter);
        }
    }
}
