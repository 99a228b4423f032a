//! Running git and the maintainer script.
//!
//! Commands run with their working directory set to the repository; nothing
//! is passed through a shell. Exit codes are not checked: whatever the
//! command printed to stdout is what the caller gets.

use std::fmt;
use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::config::ToolConfig;
use crate::error::ShellError;

/// A program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ShellCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for ShellCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Trait for executing external commands.
///
/// This abstraction allows replacing git and the maintainer script with
/// canned output in tests.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner {
    /// Run `command` in `workdir` and return its stdout as lines.
    fn run(&self, workdir: &Path, command: &ShellCommand) -> Result<Vec<String>, ShellError>;
}

/// Default runner that spawns real processes.
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, workdir: &Path, command: &ShellCommand) -> Result<Vec<String>, ShellError> {
        let output = Command::new(&command.program)
            .args(&command.args)
            .current_dir(workdir)
            .output()
            .map_err(|source| ShellError::SpawnFailed {
                command: command.to_string(),
                source,
            })?;

        if !output.status.success() {
            debug!(
                "'{}' exited with {}: {}",
                command,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(split_output_lines(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Split command output into lines, dropping the empty element left by a
/// trailing newline.
pub fn split_output_lines(stdout: &str) -> Vec<String> {
    let mut lines: Vec<String> = stdout
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect();
    if lines.last().is_some_and(|last| last.is_empty()) {
        lines.pop();
    }
    lines
}

/// `git log` query listing the most recent commit subjects touching `path`.
pub fn history_command(config: &ToolConfig, path: &str) -> ShellCommand {
    ShellCommand::new(
        config.git.clone(),
        [
            "log".to_string(),
            "-n".to_string(),
            config.history_depth.to_string(),
            "--pretty=format:%s".to_string(),
            "--".to_string(),
            path.to_string(),
        ],
    )
}

/// Maintainer script query listing reviewers and lists for `path`.
pub fn maintainer_command(config: &ToolConfig, path: &str) -> ShellCommand {
    ShellCommand::new(
        config.perl.clone(),
        [
            config.maintainer_script.as_str(),
            "-f",
            path,
            "--remove-duplicates",
            "--nogit",
        ],
    )
}

/// Check that `program` can be found, either as a path or in `PATH`.
///
/// Uses the `which` crate for cross-platform executable detection.
pub fn check_installed(program: &str) -> Result<(), ShellError> {
    which::which(program)
        .map(|_| ())
        .map_err(|_| ShellError::NotInstalled(program.to_string()))
}

/// Read `user.name` and `user.email` from the repository's git config.
///
/// Missing or empty values come back as `None`.
pub fn git_identity<R: CommandRunner>(
    runner: &R,
    config: &ToolConfig,
    repo: &Path,
) -> (Option<String>, Option<String>) {
    let read = |key: &str| {
        let command = ShellCommand::new(config.git.clone(), ["config", key]);
        runner
            .run(repo, &command)
            .ok()
            .and_then(|lines| lines.into_iter().next())
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    };
    (read("user.name"), read("user.email"))
}
