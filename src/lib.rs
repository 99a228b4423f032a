//! patchmail - formats a kernel diff into a patch mail ready for `git send-email`.
//!
//! # Overview
//!
//! patchmail guesses the subject prefix from the history of the changed
//! file, the touched functions from the diff hunk headers, and the To/Cc
//! recipients from `scripts/get_maintainer.pl`, then fills in the title and
//! description templates and writes `0001-<subject>.patch` next to the tree.

pub mod config;
pub mod error;
pub mod infer;
pub mod patch;
pub mod recipients;
pub mod shell;

// Re-export commonly used types
pub use config::ToolConfig;
pub use error::{PatchError, RecipientError, ShellError};
pub use infer::FunctionNameList;
pub use patch::{Patch, PatchContext, PatchFormatter, PatchMetadata, Recipients};
pub use recipients::RecipientSet;
pub use shell::{CommandRunner, ShellCommand, SystemRunner};
