//! Composition of the patch mail.
//!
//! Produces:
//! ```text
//! Content-Type: text/plain; charset=ISO-8859-1
//! Content-Transfer-Encoding: 7bit
//! From: Jane Hacker <jane@example.org>
//! Date: Fri, 16 Oct 2026 09:30:00 +0000
//! Subject: [PATCH] net: tun: fix leak in tun_open()
//! To: ...
//! Cc: ...
//!
//! Description.
//!
//! Signed-off-by: Jane Hacker <jane@example.org>
//! ---
//! <diff>
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ToolConfig;
use crate::error::{PatchError, RecipientError};
use crate::infer::{FunctionNameList, guess_function_names, infer_module_name};
use crate::recipients::{RecipientSet, lookup_recipients, render_recipients, strip_display_names};
use crate::shell::CommandRunner;

use super::save::sanitize_title;
use super::template::{TemplateTarget, substitute};

const CONTENT_TYPE: &str = "text/plain; charset=ISO-8859-1";
const TRANSFER_ENCODING: &str = "7bit";
const DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S +0000";

/// Everything the user supplies for one patch.
#[derive(Debug, Clone)]
pub struct PatchContext {
    /// Root of the kernel tree.
    pub repo: PathBuf,
    /// Changed file or directory, relative to `repo`.
    pub path: String,
    pub author: String,
    pub email: String,
    pub title: String,
    pub description: String,
    pub diff: Option<String>,
}

impl PatchContext {
    pub fn new(
        repo: impl Into<PathBuf>,
        path: impl Into<String>,
        author: impl Into<String>,
        email: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        diff: Option<String>,
    ) -> Self {
        Self {
            repo: repo.into(),
            path: path.into(),
            author: author.into(),
            email: email.into(),
            title: title.into(),
            description: description.into(),
            diff,
        }
    }

    pub fn full_path(&self) -> PathBuf {
        self.repo.join(&self.path)
    }

    pub fn is_dir(&self) -> bool {
        self.full_path().is_dir()
    }

    /// Last component of the changed path.
    pub fn file_name(&self) -> String {
        Path::new(&self.path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    fn signature(&self) -> String {
        format!("{} <{}>", self.author, self.email)
    }
}

/// The rendered To/Cc block and how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipients {
    /// Fresh output of the maintainer lookup.
    Primary(String),
    /// Addresses stripped out of a previously rendered block.
    Degraded(String),
}

impl Recipients {
    pub fn text(&self) -> &str {
        match self {
            Recipients::Primary(text) | Recipients::Degraded(text) => text,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Recipients::Degraded(_))
    }
}

/// Pick the recipient block for a patch.
///
/// A failed lookup falls back to the bare addresses of `previous`; with no
/// previous block there is nothing to send to and the error is returned.
pub fn resolve_recipients(
    primary: Result<String, RecipientError>,
    previous: Option<&str>,
) -> Result<Recipients, PatchError> {
    match (primary, previous) {
        (Ok(text), _) => Ok(Recipients::Primary(text)),
        (Err(e), Some(previous)) => {
            warn!("Recipient lookup failed, reusing previous addresses: {}", e);
            Ok(Recipients::Degraded(strip_display_names(previous)))
        }
        (Err(e), None) => Err(PatchError::RecipientsUnavailable(e)),
    }
}

/// The assembled mail.
#[derive(Debug, Clone)]
pub struct Patch {
    pub subject: String,
    pub recipients: Recipients,
    pub text: String,
}

impl Patch {
    /// `0001-<sanitized subject>.patch`
    pub fn file_name(&self) -> String {
        format!("0001-{}.patch", sanitize_title(&self.subject))
    }
}

/// Summary of what was inferred for a patch, for `--inspect`.
#[derive(Debug, Clone, Serialize)]
pub struct PatchMetadata {
    pub module: String,
    pub functions: FunctionNameList,
    pub title: String,
    pub description: String,
    pub recipients: Option<RecipientSet>,
}

/// Header date in the fixed mail format, always UTC.
pub fn format_date(now: DateTime<Utc>) -> String {
    now.format(DATE_FORMAT).to_string()
}

/// Builds a [`Patch`] for one [`PatchContext`].
pub struct PatchFormatter<'a, R: CommandRunner> {
    ctx: &'a PatchContext,
    runner: &'a R,
    config: &'a ToolConfig,
}

impl<'a, R: CommandRunner> PatchFormatter<'a, R> {
    pub fn new(ctx: &'a PatchContext, runner: &'a R, config: &'a ToolConfig) -> Self {
        Self {
            ctx,
            runner,
            config,
        }
    }

    /// Module prefix from the history of the changed path.
    pub fn module_name(&self) -> String {
        infer_module_name(self.runner, self.config, &self.ctx.repo, &self.ctx.path)
    }

    pub fn function_names(&self) -> FunctionNameList {
        guess_function_names(self.ctx.diff.as_deref())
    }

    /// Recipients for the changed path.
    pub fn recipient_set(&self) -> Result<RecipientSet, RecipientError> {
        lookup_recipients(self.runner, self.config, &self.ctx.repo, &self.ctx.path)
    }

    /// Rendered To/Cc block from a fresh maintainer lookup.
    pub fn mail_list(&self) -> Result<String, RecipientError> {
        self.recipient_set().map(|set| render_recipients(&set))
    }

    fn expand(&self, template: &str) -> String {
        let file_name = self.ctx.file_name();
        let target = TemplateTarget {
            is_dir: self.ctx.is_dir(),
            file_name: &file_name,
        };
        substitute(template, target, || self.function_names())
    }

    /// Subject line; prefixed with `[PATCH] <module>: ` unless the title
    /// already carries a `[PATCH...]` tag.
    pub fn format_title(&self, module: &str) -> String {
        let title = self.expand(&self.ctx.title);
        if title.contains("[PATCH") {
            title
        } else {
            format!("[PATCH] {}: {}", module, title)
        }
    }

    pub fn format_desc(&self) -> String {
        self.expand(&self.ctx.description)
    }

    /// Assemble the patch dated now.
    pub fn format_patch(&self, previous: Option<&str>) -> Result<Patch, PatchError> {
        self.format_patch_at(Utc::now(), previous)
    }

    /// Assemble the patch with a fixed date.
    ///
    /// `previous` is a recipient block rendered by an earlier run, used
    /// only if the maintainer lookup fails.
    pub fn format_patch_at(
        &self,
        now: DateTime<Utc>,
        previous: Option<&str>,
    ) -> Result<Patch, PatchError> {
        let module = self.module_name();
        let subject = self.format_title(&module);
        let recipients = resolve_recipients(self.mail_list(), previous)?;
        debug!(
            "Assembling '{}' (degraded recipients: {})",
            subject,
            recipients.is_degraded()
        );

        let signature = self.ctx.signature();
        let mut text = String::new();
        text.push_str(&format!("Content-Type: {}\n", CONTENT_TYPE));
        text.push_str(&format!("Content-Transfer-Encoding: {}\n", TRANSFER_ENCODING));
        text.push_str(&format!("From: {}\n", signature));
        text.push_str(&format!("Date: {}\n", format_date(now)));
        text.push_str(&format!("Subject: {}\n", subject));
        text.push_str(recipients.text());
        text.push_str(&format!("\n{}\n\n", self.format_desc()));
        text.push_str(&format!("Signed-off-by: {}\n", signature));
        text.push_str("---\n");
        text.push_str(self.ctx.diff.as_deref().unwrap_or_default());

        Ok(Patch {
            subject,
            recipients,
            text,
        })
    }

    /// Everything inferred for the patch, without composing it.
    ///
    /// A failed recipient lookup is logged and reported as `None`.
    pub fn metadata(&self) -> PatchMetadata {
        let module = self.module_name();
        let recipients = match self.recipient_set() {
            Ok(set) => Some(set),
            Err(e) => {
                warn!("Recipient lookup failed: {}", e);
                None
            }
        };

        PatchMetadata {
            title: self.format_title(&module),
            description: self.format_desc(),
            functions: self.function_names(),
            module,
            recipients,
        }
    }
}
