//! Error types for patchmail modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from running external commands.
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Failed to spawn '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Executable '{0}' not found in PATH")]
    NotInstalled(String),
}

/// Errors from building the recipient list.
#[derive(Error, Debug)]
pub enum RecipientError {
    #[error("Maintainer lookup failed: {0}")]
    Lookup(#[source] ShellError),
}

/// Errors from assembling or saving a patch.
#[derive(Error, Debug)]
pub enum PatchError {
    #[error(
        "Recipient lookup failed and no previously rendered recipient list is available: {0}"
    )]
    RecipientsUnavailable(#[source] RecipientError),

    #[error("Failed to create patch directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write patch: {0}")]
    WriteFailed(#[source] std::io::Error),

    #[error("Failed to move patch into place at {path}: {source}")]
    PersistFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
