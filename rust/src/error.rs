use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure that aborts indexing as a whole.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("failed to resolve root directory {}: {source}", .root.display())]
    ResolveRoot {
        root: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("root {} is not a directory", .root.display())]
    NotADirectory { root: PathBuf },
    #[error("failed to list root directory {}: {source}", .root.display())]
    ListRoot {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Failure confined to a single collection directory.
#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{}: path {value:?} must be relative and stay inside the collection", .path.display())]
    InvalidPath { path: PathBuf, value: String },
    #[error("failed to inspect entry: {0}")]
    Entry(#[source] walkdir::Error),
}
