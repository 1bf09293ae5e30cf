use inkdict_core::error::LookupError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DictdError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The index file is structurally broken (bad fields, bad numbers,
    /// or entries out of order for every known collation).
    #[error("invalid index: {0}")]
    InvalidIndex(String),

    /// The data file is not a gzip member at all.
    #[error("not compressed dictionary data: {0}")]
    NotGzip(String),

    /// The data file's chunk table is malformed or unsupported.
    #[error("invalid dictzip chunk table: {0}")]
    InvalidChunkTable(String),

    #[error("decompression failed: {0}")]
    Decompression(String),

    /// An index entry points outside the decompressed data.
    #[error("entry out of range: offset {offset} + size {size}")]
    OutOfRange { offset: u64, size: u64 },

    #[error("data file lock poisoned")]
    LockPoisoned,
}

pub type Result<T> = std::result::Result<T, DictdError>;

impl From<DictdError> for LookupError {
    fn from(e: DictdError) -> Self {
        match e {
            DictdError::Io(e) => LookupError::Io(e),
            other => LookupError::Corrupt(other.to_string()),
        }
    }
}
