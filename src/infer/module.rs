//! Module name inference from commit subjects.
//!
//! Kernel subjects look like `subsystem: driver: what changed`. Everything
//! before the last colon is the module prefix; the most frequent prefix in
//! the recent history of a file is the one used for a new patch.

use std::path::Path;

use tracing::{debug, warn};

use crate::config::ToolConfig;
use crate::shell::{CommandRunner, history_command};

/// Occurrence counts per module prefix, in first-seen order.
///
/// The leader only changes when another entry's count strictly exceeds
/// the leader's count, so on a tie the entry that reached that count first
/// stays in front.
#[derive(Debug, Default, Clone)]
pub struct ModuleFrequencyTable {
    entries: Vec<(String, usize)>,
    leader: Option<usize>,
}

impl ModuleFrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `module` and return its new count.
    pub fn record(&mut self, module: &str) -> usize {
        let idx = match self.entries.iter().position(|(name, _)| name == module) {
            Some(idx) => {
                self.entries[idx].1 += 1;
                idx
            }
            None => {
                self.entries.push((module.to_string(), 1));
                self.entries.len() - 1
            }
        };

        let count = self.entries[idx].1;
        match self.leader {
            None => self.leader = Some(idx),
            Some(leader) if count > self.entries[leader].1 => self.leader = Some(idx),
            Some(_) => {}
        }
        count
    }

    pub fn count(&self, module: &str) -> usize {
        self.entries
            .iter()
            .find(|(name, _)| name == module)
            .map_or(0, |(_, count)| *count)
    }

    pub fn leader(&self) -> Option<&str> {
        self.leader.map(|idx| self.entries[idx].0.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Extract the module prefix from a commit subject.
///
/// Returns `None` for subjects without a colon, with nothing before the
/// colon, or for merge commits.
pub fn module_candidate(subject: &str) -> Option<&str> {
    let colon = subject.rfind(':')?;
    let candidate = subject[..colon].trim();
    if candidate.is_empty() || candidate.starts_with("Merge ") {
        return None;
    }
    Some(candidate)
}

/// Pick the most frequent module prefix among `subjects`.
pub fn guess_module_name<I, S>(subjects: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut table = ModuleFrequencyTable::new();
    for subject in subjects {
        if let Some(candidate) = module_candidate(subject.as_ref()) {
            table.record(candidate);
        }
    }
    table.leader().map(str::to_string)
}

/// Name of the directory the change lives in.
///
/// `path` itself when it is a directory under `repo`, otherwise its parent.
pub fn fallback_module_name(repo: &Path, path: &str) -> String {
    let changed = Path::new(path);
    let dir = if repo.join(changed).is_dir() {
        Some(changed)
    } else {
        changed.parent()
    };
    dir.and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Infer the module name for `path` from its git history.
///
/// A failed history query counts as an empty history.
pub fn infer_module_name<R: CommandRunner>(
    runner: &R,
    config: &ToolConfig,
    repo: &Path,
    path: &str,
) -> String {
    let subjects = match runner.run(repo, &history_command(config, path)) {
        Ok(lines) => lines,
        Err(e) => {
            warn!("Could not read history for {}: {}", path, e);
            Vec::new()
        }
    };

    match guess_module_name(&subjects) {
        Some(module) => {
            debug!("Module '{}' inferred from {} subjects", module, subjects.len());
            module
        }
        None => {
            let module = fallback_module_name(repo, path);
            debug!("No module prefix in history, using directory '{}'", module);
            module
        }
    }
}
