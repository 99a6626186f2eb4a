/// An owned key-value pair. Never mutated once created, only moved
/// between buckets when the dict grows.
#[derive(Clone, Hash, PartialEq, Eq)]
pub struct Entry {
    pub(crate) key: String,
    pub(crate) value: String,
}

impl Entry {
    pub fn new<K: Into<String>, V: Into<String>>(key: K, value: V) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Debug for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}, {}>", self.key, self.value)
    }
}

/// Chain of entries that landed in the same slot.
///
/// A bucket always holds at least its `primary` entry; an empty slot is
/// a `None` in the table, never an empty bucket. Every entry after the
/// first goes to `overflow` in insertion order and counts as one collision.
pub struct Bucket {
    primary: Entry,
    overflow: Vec<Entry>,
}

impl Bucket {
    pub fn new(primary: Entry) -> Self {
        Self {
            primary,
            overflow: Vec::new(),
        }
    }

    /// Appends `entry` to the overflow list. Keys are not checked for
    /// uniqueness, a repeated key simply adds another entry.
    pub fn push(&mut self, entry: Entry) {
        self.overflow.push(entry);
    }

    pub fn primary(&self) -> &Entry {
        &self.primary
    }

    pub fn overflow(&self) -> &[Entry] {
        &self.overflow
    }

    /// First entry matching `key`, primary first, then overflow in insertion order
    pub fn find(&self, key: &str) -> Option<&Entry> {
        self.iter().find(|e| e.key == key)
    }

    pub fn collisions(&self) -> usize {
        self.overflow.len()
    }

    pub fn len(&self) -> usize {
        1 + self.overflow.len()
    }

    // [adapters]

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            primary: Some(&self.primary),
            overflow: self.overflow.iter(),
        }
    }
}

impl std::fmt::Debug for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl IntoIterator for Bucket {
    type Item = Entry;
    type IntoIter = IterOwn;

    fn into_iter(self) -> Self::IntoIter {
        IterOwn {
            primary: Some(self.primary),
            overflow: self.overflow.into_iter(),
        }
    }
}

impl<'a> IntoIterator for &'a Bucket {
    type Item = &'a Entry;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// [iterators]

#[derive(Debug)]
pub struct Iter<'a> {
    primary: Option<&'a Entry>,
    overflow: std::slice::Iter<'a, Entry>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        self.primary.take().or_else(|| self.overflow.next())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.primary.is_some() as usize + self.overflow.len();
        (len, Some(len))
    }
}

impl ExactSizeIterator for Iter<'_> {}

/// Moves entries out of a bucket, primary first
pub struct IterOwn {
    primary: Option<Entry>,
    overflow: std::vec::IntoIter<Entry>,
}

impl Iterator for IterOwn {
    type Item = Entry;

    fn next(&mut self) -> Option<Self::Item> {
        self.primary.take().or_else(|| self.overflow.next())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.primary.is_some() as usize + self.overflow.len();
        (len, Some(len))
    }
}

#[cfg(test)]
mod tests {
    use super::Bucket;
    use crate::entry;

    #[test]
    fn push() {
        let mut bucket = Bucket::new(entry!("k0", "v0"));

        for i in 1..10 {
            bucket.push(entry!(format!("key{i}"), format!("value{i}")));
        }

        assert_eq!(bucket.len(), 10);
        assert_eq!(bucket.collisions(), 9);
        assert_eq!(bucket.primary(), &entry!("k0", "v0"));
    }

    #[test]
    fn find_prefers_primary_then_insertion_order() {
        let mut bucket = Bucket::new(entry!("x", "first"));
        bucket.push(entry!("y", "one"));
        bucket.push(entry!("x", "second"));
        bucket.push(entry!("y", "two"));

        assert_eq!(bucket.find("x").map(|e| e.value()), Some("first"));
        assert_eq!(bucket.find("y").map(|e| e.value()), Some("one"));
        assert!(bucket.find("z").is_none());
    }

    #[test]
    fn iter() {
        let mut bucket = Bucket::new(entry!("key0", "value0"));
        for i in 1..10 {
            bucket.push(entry!(format!("key{i}"), format!("value{i}")));
        }

        for (i, e) in bucket.iter().enumerate() {
            assert_eq!(e, &entry!(format!("key{i}"), format!("value{i}")));
        }

        assert_eq!(bucket.iter().len(), 10);

        for (i, e) in bucket.into_iter().enumerate() {
            assert_eq!(e, entry!(format!("key{i}"), format!("value{i}")));
        }
    }

    #[test]
    fn debug_fmt() {
        let mut bucket = Bucket::new(entry!("a", "1"));
        bucket.push(entry!("b", "2"));
        assert_eq!(format!("{bucket:?}"), "[<a, 1>, <b, 2>]");
    }
}
