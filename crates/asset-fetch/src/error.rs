use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetError {
    // Network errors
    #[error("Failed to download \"{url}\" ({status} {reason})")]
    Download {
        url: String,
        status: u16,
        reason: String,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Archive errors
    #[error("Archive extraction failed: {0}")]
    Archive(String),

    #[error("Failed to write {path}: {reason}")]
    EntryWrite { path: String, reason: String },
}

pub type Result<T> = std::result::Result<T, AssetError>;
