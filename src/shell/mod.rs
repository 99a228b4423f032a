//! External command execution.

pub mod runner;

pub use runner::{
    CommandRunner, ShellCommand, SystemRunner, check_installed, git_identity, history_command,
    maintainer_command, split_output_lines,
};
