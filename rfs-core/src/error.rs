//! Error types for the remote node filesystem.

use thiserror::Error;

use crate::node::Handle;

/// Errors raised by the node registry and the shell plumbing around it.
///
/// The first three variants are the named remote failures the interpreter
/// handles at the call site. Everything else aborts the current command.
#[derive(Error, Debug)]
pub enum RfsError {
    #[error("name in use: {0}")]
    NameInUse(String),

    #[error("no such name: {0}")]
    NoSuchName(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("object does not exist: {0}")]
    ObjectNotExist(Handle),

    #[error("wrong node kind for {0}")]
    WrongKind(Handle),

    #[error("Lock poisoned")]
    LockPoisoned,

    #[error("Invalid seed: {0}")]
    Seed(String),

    #[error("Input error: {0}")]
    Input(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for registry and shell operations.
pub type RfsResult<T> = Result<T, RfsError>;
