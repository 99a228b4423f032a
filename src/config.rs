//! Tool configuration read from the environment.

use std::env;

use tracing::warn;

/// Default version control binary.
pub const DEFAULT_GIT: &str = "git";

/// Default interpreter for the maintainer script.
pub const DEFAULT_PERL: &str = "/usr/bin/perl";

/// Default maintainer script, relative to the repository root.
pub const DEFAULT_MAINTAINER_SCRIPT: &str = "./scripts/get_maintainer.pl";

/// Number of commit subjects scanned for the module name.
pub const DEFAULT_HISTORY_DEPTH: usize = 20;

const GIT_ENV_VAR: &str = "PATCHMAIL_GIT";
const PERL_ENV_VAR: &str = "PATCHMAIL_PERL";
const SCRIPT_ENV_VAR: &str = "PATCHMAIL_MAINTAINER_SCRIPT";
const DEPTH_ENV_VAR: &str = "PATCHMAIL_HISTORY_DEPTH";

/// Locations of the external tools and how much history to scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    pub git: String,
    pub perl: String,
    pub maintainer_script: String,
    pub history_depth: usize,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            git: DEFAULT_GIT.to_string(),
            perl: DEFAULT_PERL.to_string(),
            maintainer_script: DEFAULT_MAINTAINER_SCRIPT.to_string(),
            history_depth: DEFAULT_HISTORY_DEPTH,
        }
    }
}

impl ToolConfig {
    /// Build the configuration from `PATCHMAIL_*` environment variables.
    ///
    /// Unset or empty variables keep their defaults. An invalid history
    /// depth logs a warning and uses the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            git: string_var(GIT_ENV_VAR).unwrap_or(defaults.git),
            perl: string_var(PERL_ENV_VAR).unwrap_or(defaults.perl),
            maintainer_script: string_var(SCRIPT_ENV_VAR).unwrap_or(defaults.maintainer_script),
            history_depth: history_depth(),
        }
    }
}

fn string_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn history_depth() -> usize {
    match env::var(DEPTH_ENV_VAR) {
        Ok(v) if !v.is_empty() => match v.parse::<usize>() {
            Ok(depth) if depth > 0 => depth,
            _ => {
                warn!(
                    "Invalid {} value '{}', using default {}",
                    DEPTH_ENV_VAR, v, DEFAULT_HISTORY_DEPTH
                );
                DEFAULT_HISTORY_DEPTH
            }
        },
        _ => DEFAULT_HISTORY_DEPTH,
    }
}
