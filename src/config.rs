use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_INITIAL_SIZE: usize = 64;
pub const DEFAULT_NAME_FIELD: usize = 4;
pub const DEFAULT_FILE: &str = "/etc/passwd";
pub const DEFAULT_LOOKUPS: [&str; 10] = [
    "graham", "postgres", "mysql", "redis", "mongodb", "root", "backup", "daemon", "news", "uucp",
];

/// Loads a passwd style file into a dict and reports lookups and collisions
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Config {
    /// Initial number of slots, must be a power of two
    #[arg(default_value_t = DEFAULT_INITIAL_SIZE)]
    pub initial_size: usize,

    /// File to read records from
    #[arg(short, long, default_value = DEFAULT_FILE)]
    pub file: PathBuf,

    /// Index of the field used as the value, after splitting on ':' and ','
    #[arg(short, long, default_value_t = DEFAULT_NAME_FIELD)]
    pub name_field: usize,

    /// Keys to look up after loading (repeatable)
    #[arg(short, long = "lookup", default_values_t = DEFAULT_LOOKUPS.map(String::from))]
    pub lookups: Vec<String>,

    /// How many times to grow the dict after loading
    #[arg(short, long, default_value_t = 0)]
    pub grow: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_size: DEFAULT_INITIAL_SIZE,
            file: PathBuf::from(DEFAULT_FILE),
            name_field: DEFAULT_NAME_FIELD,
            lookups: DEFAULT_LOOKUPS.map(String::from).to_vec(),
            grow: 0,
        }
    }
}
