pub mod config;
pub mod passwd;
pub mod report;

use thiserror::Error;

pub use config::Config;

#[derive(Debug, Error)]
pub enum LoadError {
    /// Derived IO error
    #[error("Io error: {0}")]
    Io(#[from] std::io::Error),

    /// The line has fewer fields than the configured name field needs
    #[error("Line {line} has no field #{field}")]
    MissingField { line: usize, field: usize },

    /// The dict could not be created or grown
    #[error("Dict error: {0}")]
    Dict(#[from] collections::DictError),
}
