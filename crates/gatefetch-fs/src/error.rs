use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to create staging file for {path}")]
    Create {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to commit {path}")]
    Commit {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to remove {path}")]
    Remove {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("destination has no file name: {0}")]
    NoFileName(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
