//! Writing patches into the `PATCH` directory next to the tree.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::PatchError;

use super::assemble::Patch;

/// Longest sanitized subject used in a file name.
pub const MAX_TITLE_LEN: usize = 52;

/// Characters that become a hyphen in file names; runs collapse to one.
const SEPARATORS: [char; 4] = [' ', '.', ':', '/'];

/// Turn a subject into a file name stem.
///
/// Each run of separators becomes a single `-` and the result is cut to
/// [`MAX_TITLE_LEN`] characters.
pub fn sanitize_title(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut in_run = false;
    for c in title.chars() {
        if SEPARATORS.contains(&c) {
            if !in_run {
                out.push('-');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out.chars().take(MAX_TITLE_LEN).collect()
}

/// `<repo>/../PATCH`
pub fn patch_dir(repo: &Path) -> PathBuf {
    repo.join("..").join("PATCH")
}

/// Write `patch` into the patch directory of `repo` and return its path.
///
/// The file is written to a temporary file in the same directory first and
/// then moved into place, so a failed write never leaves half a patch.
pub fn save_patch(patch: &Patch, repo: &Path) -> Result<PathBuf, PatchError> {
    let dir = patch_dir(repo);
    std::fs::create_dir_all(&dir).map_err(|source| PatchError::CreateDir {
        path: dir.clone(),
        source,
    })?;

    let path = dir.join(patch.file_name());
    let mut file = NamedTempFile::new_in(&dir).map_err(PatchError::WriteFailed)?;
    file.write_all(patch.text.as_bytes())
        .map_err(PatchError::WriteFailed)?;
    file.persist(&path).map_err(|e| PatchError::PersistFailed {
        path: path.clone(),
        source: e.error,
    })?;

    debug!("Wrote {} bytes to {}", patch.text.len(), path.display());
    Ok(path)
}
