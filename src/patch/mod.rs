//! Patch mail assembly.

pub mod assemble;
pub mod save;
pub mod template;

pub use assemble::{
    Patch, PatchContext, PatchFormatter, PatchMetadata, Recipients, format_date,
    resolve_recipients,
};
pub use save::{patch_dir, sanitize_title, save_patch};
pub use template::{TemplateTarget, substitute};
