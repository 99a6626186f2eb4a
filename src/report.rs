use std::io::{self, Write};

use collections::{Dict, KeyHasher};

/// Writes `key: value` for every key, `key: (null)` when the dict has no entry
pub fn write_lookups<W, H, S>(out: &mut W, dict: &Dict<H>, keys: &[S]) -> io::Result<()>
where
    W: Write,
    H: KeyHasher,
    S: AsRef<str>,
{
    for key in keys {
        let key = key.as_ref();
        writeln!(out, "{}: {}", key, dict.get(key).unwrap_or("(null)"))?;
    }
    Ok(())
}

pub fn write_summary<W: Write, H: KeyHasher>(out: &mut W, dict: &Dict<H>) -> io::Result<()> {
    writeln!(
        out,
        "Size: {}, Key bits: {}, Collisions: {}",
        dict.slot_count(),
        dict.bit_width(),
        dict.collision_count()
    )
}
