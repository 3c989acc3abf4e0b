/// Error type shared by every core operation.
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EloError {
    /// The same item was given as both sides of a comparison.
    #[error("cannot compare \"{0}\" against itself")]
    InvalidComparison(String),

    /// The reported winner is not one of the two compared items.
    #[error("winner \"{winner}\" is neither \"{a}\" nor \"{b}\"")]
    InvalidWinner { a: String, b: String, winner: String },

    /// Fewer than two items to pick a pair from.
    #[error("need at least 2 items to select a pair, table has {0}")]
    InsufficientItems(usize),

    /// A name that is not in the rating table.
    #[error("unknown item \"{0}\"")]
    UnknownItem(String),

    /// The persisted table does not have the `name -> {rating, rounds}` shape.
    #[error("rating data at {} is corrupt: {reason}", path.display())]
    DataCorruption { path: PathBuf, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, EloError>;
