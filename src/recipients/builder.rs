//! Classification of maintainer script output into To and Cc.
//!
//! `get_maintainer.pl` prints one entry per line:
//!
//! ```text
//! Jane Maintainer <jane@example.org> (maintainer:FOO DRIVER)
//! Joe Signer <joe@example.org> (commit_signer:3/15=20%)
//! netdev@vger.kernel.org (open list:NETWORKING DRIVERS)
//! linux-kernel@vger.kernel.org (open list)
//! ```
//!
//! People go to To, lists go to Cc. Commit signers are only used when
//! nobody else qualifies for To.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ToolConfig;
use crate::error::RecipientError;
use crate::shell::{CommandRunner, maintainer_command};

/// The catch-all kernel mailing list.
pub const KERNEL_LIST: &str = "linux-kernel@vger.kernel.org";

/// The networking mailing list.
pub const NETDEV_LIST: &str = "netdev@vger.kernel.org";

/// Domain hosting the subsystem mailing lists.
pub const LIST_DOMAIN: &str = "@vger.kernel.org";

/// Default To for networking patches without a listed maintainer.
pub const NETDEV_MAINTAINER: &str = "David S. Miller <davem@davemloft.net>";

const COMMIT_SIGNER_TAG: &str = "(commit_signer:";

/// Inferred recipients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecipientSet {
    pub to: Vec<String>,
    pub cc: Vec<String>,
    /// First commit signer seen, used as To when nothing else is.
    pub weak_signer: Option<String>,
}

impl RecipientSet {
    /// Classify every line with a fresh [`RecipientListBuilder`].
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = RecipientListBuilder::new();
        for line in lines {
            builder.push_line(line.as_ref());
        }
        builder.finish()
    }

    pub fn is_empty(&self) -> bool {
        self.to.is_empty() && self.cc.is_empty()
    }
}

/// Whether the line carries a `(commit_signer:N/M=P%)` annotation.
pub fn is_commit_signer(line: &str) -> bool {
    line.contains(COMMIT_SIGNER_TAG)
}

/// Remove the parenthetical annotation spanning the first `(` to the last `)`.
pub fn strip_annotation(line: &str) -> String {
    match (line.find('('), line.rfind(')')) {
        (Some(open), Some(close)) if open < close => {
            format!("{}{}", &line[..open], &line[close + 1..])
        }
        _ => line.to_string(),
    }
}

/// Whether the text holds a `<address>` part.
pub fn has_angle_address(text: &str) -> bool {
    text.find('<')
        .is_some_and(|open| text[open + 1..].contains('>'))
}

/// Accumulates recipients line by line.
#[derive(Debug)]
pub struct RecipientListBuilder {
    set: RecipientSet,
    /// No subsystem list on the list domain has been seen yet.
    saw_no_list: bool,
    /// A kernel list entry was dropped because Cc already had entries.
    skipped_kernel_list: bool,
}

impl Default for RecipientListBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipientListBuilder {
    pub fn new() -> Self {
        Self {
            set: RecipientSet::default(),
            saw_no_list: true,
            skipped_kernel_list: false,
        }
    }

    /// Classify one line of maintainer output.
    pub fn push_line(&mut self, line: &str) {
        if is_commit_signer(line) {
            if self.set.weak_signer.is_none() {
                self.set.weak_signer = Some(strip_annotation(line).trim().to_string());
            }
            return;
        }

        let stripped = strip_annotation(line);
        let entry = stripped.trim();

        if has_angle_address(entry) {
            self.set.to.push(entry.to_string());
        } else if entry == KERNEL_LIST {
            if self.set.cc.is_empty() {
                self.set.cc.push(entry.to_string());
            } else {
                self.skipped_kernel_list = true;
            }
        } else {
            if entry.contains(LIST_DOMAIN) {
                self.saw_no_list = false;
            }
            if !entry.is_empty() {
                self.set.cc.push(entry.to_string());
            }
        }
    }

    /// Apply the fallbacks and return the final set.
    ///
    /// 1. A dropped kernel list is re-added at the end of Cc when no
    ///    subsystem list was seen.
    /// 2. Networking patches without a person in To go to the netdev
    ///    maintainer.
    /// 3. Otherwise an empty To takes the first commit signer.
    pub fn finish(mut self) -> RecipientSet {
        if self.saw_no_list && self.skipped_kernel_list {
            self.set.cc.push(KERNEL_LIST.to_string());
        }

        if self.set.to.is_empty() && self.set.cc.iter().any(|cc| cc == NETDEV_LIST) {
            self.set.to.push(NETDEV_MAINTAINER.to_string());
        }

        if self.set.to.is_empty() {
            if let Some(signer) = &self.set.weak_signer {
                self.set.to.push(signer.clone());
            }
        }

        self.set
    }
}

/// Run the maintainer script for `path` and classify its output.
///
/// A missing script is only logged: the command still runs and whatever it
/// prints, usually nothing, is classified. Only a failure to spawn is an error.
pub fn lookup_recipients<R: CommandRunner>(
    runner: &R,
    config: &ToolConfig,
    repo: &Path,
    path: &str,
) -> Result<RecipientSet, RecipientError> {
    let script = repo.join(&config.maintainer_script);
    if !script.is_file() {
        warn!("Maintainer script not found at {}", script.display());
    }

    let lines = runner
        .run(repo, &maintainer_command(config, path))
        .map_err(RecipientError::Lookup)?;
    debug!("Maintainer script returned {} lines for {}", lines.len(), path);

    Ok(RecipientSet::from_lines(&lines))
}
