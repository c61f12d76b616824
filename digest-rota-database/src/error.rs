use std::path::PathBuf;

use thiserror::Error;

#[allow(clippy::module_name_repetitions)]
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Failed to read datastore {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write datastore {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse datastore {0}")]
    Parse(#[from] serde_path_to_error::Error<serde_json::Error>),
    #[error("Failed to serialize datastore {0}")]
    Serialize(#[from] serde_json::Error),
}
