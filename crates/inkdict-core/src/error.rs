use thiserror::Error;

/// Errors surfaced by a dictionary while producing search results.
///
/// These never escalate past the dictionary that produced them; the
/// aggregator logs and moves on to the next dictionary.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt dictionary data: {0}")]
    Corrupt(String),
}
