use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use collections::{Dict, KeyHasher};
use log::{info, warn};

use crate::LoadError;

/// One key-value pair pulled out of a line
#[derive(Debug, PartialEq, Eq)]
pub struct Record<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub inserted: usize,
    pub skipped: usize,
}

/// Splits `line` on ':' and ',' the way `strtok` does, so runs of
/// separators count as one and empty fields are dropped. The first field
/// is the key and field number `name_field` the value.
///
/// ```
/// use chaindict::passwd::split_record;
///
/// let r = split_record("graham:x:1000:1000:Graham King,,,:/home/graham:/bin/bash", 4).unwrap();
/// assert_eq!(r.key, "graham");
/// assert_eq!(r.value, "Graham King");
/// ```
pub fn split_record(line: &str, name_field: usize) -> Option<Record<'_>> {
    let mut fields = line.split([':', ',']).filter(|f| !f.is_empty());
    let key = fields.next()?;
    let value = if name_field == 0 {
        key
    } else {
        fields.nth(name_field - 1)?
    };
    Some(Record { key, value })
}

/// Reads `reader` line by line, inserting one entry per record.
///
/// Blank lines are ignored and lines without a value field are skipped
/// with a warning, they never abort the load.
pub fn load_into<R, H>(
    reader: R,
    dict: &mut Dict<H>,
    name_field: usize,
) -> Result<LoadSummary, LoadError>
where
    R: BufRead,
    H: KeyHasher,
{
    let mut summary = LoadSummary::default();

    for (n, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match split_record(&line, name_field) {
            Some(Record { key, value }) => {
                dict.insert(key, value);
                summary.inserted += 1;
            }
            None => {
                let err = LoadError::MissingField {
                    line: n + 1,
                    field: name_field,
                };
                warn!(target: "load", "skipping record: {err}");
                summary.skipped += 1;
            }
        }
    }

    info!(
        target: "load",
        "inserted {} records, skipped {}",
        summary.inserted, summary.skipped
    );
    Ok(summary)
}

/// Shorthand for [`load_into`] on a file
pub fn load_file<H: KeyHasher>(
    path: &Path,
    dict: &mut Dict<H>,
    name_field: usize,
) -> Result<LoadSummary, LoadError> {
    let file = File::open(path)?;
    info!(target: "load", "reading {}", path.display());
    load_into(BufReader::new(file), dict, name_field)
}
