//! Error kinds for the object store core.
//!
//! Each component gets its own `thiserror` enum (mirroring how `gix-object`
//! and `gix-odb` structure their errors); [`Error`] unifies them for callers
//! that don't care which layer failed. The CLI adds `anyhow::Context` on top
//! of this at the command-dispatch boundary.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Object(#[from] ObjectError),

    #[error(transparent)]
    Kvlm(#[from] KvlmError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("not a git repository (or any parent up to mount point): {0}")]
    NotARepository(PathBuf),

    #[error("unsupported repository format version {0}, expected 0")]
    UnsupportedFormat(i64),

    #[error("{0} is not empty")]
    NotEmpty(PathBuf),

    #[error("{0} exists and is not a directory")]
    NotADirectory(PathBuf),
}

#[derive(Debug, Error)]
pub enum ObjectError {
    #[error("corrupted object {0}: {1}")]
    Corrupted(String, String),

    #[error("unknown object kind {0:?}")]
    UnknownKind(String),

    #[error("malformed tree object: {0}")]
    MalformedTree(String),

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}

#[derive(Debug, Error)]
pub enum KvlmError {
    #[error("malformed key-value-list message: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("invalid object name: {0}")]
    InvalidName(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("ambiguous object name {0}: {1} candidates")]
    Ambiguous(String, usize),
}
