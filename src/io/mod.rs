pub mod csv_export;
pub mod csv_import;
pub mod file;

pub use file::{load_dataset, save_dataset};

use thiserror::Error;

/// Errors from the file and CSV layer. The app surfaces these as
/// status-bar messages.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{0}")]
    Format(String),
}
