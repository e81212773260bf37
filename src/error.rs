//! Error type for the fallible edges of the crate: config loading and the
//! terminal host. The state machines themselves never fail.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FolioError {
    #[error("navigation needs at least one item")]
    EmptyNavigation,

    #[error("rotation timing `{0}` must be at least 1 ms")]
    ZeroTiming(&'static str),

    #[error("invalid site config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, FolioError>;
