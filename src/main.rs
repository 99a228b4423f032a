//! patchmail - CLI entry point.

use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use dialoguer::Confirm;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use patchmail::patch::{patch_dir, save_patch};
use patchmail::shell::{check_installed, git_identity};
use patchmail::{PatchContext, PatchFormatter, SystemRunner, ToolConfig};

/// Format a kernel diff into a patch mail.
#[derive(Parser, Debug)]
#[command(name = "patchmail")]
#[command(about = "Format a kernel diff into a patch mail with inferred subject and recipients")]
#[command(version)]
struct Cli {
    /// Root of the kernel tree
    #[arg(long, default_value = ".")]
    repo: PathBuf,

    /// Changed file or directory, relative to the tree root
    #[arg(short = 'f', long)]
    file: String,

    /// Title template ({{file}} and {{function}} are expanded)
    #[arg(short = 't', long, default_value = "")]
    title: String,

    /// Description template ({{file}} and {{function}} are expanded)
    #[arg(short = 'd', long, default_value = "")]
    desc: String,

    /// Diff to include, or '-' to read it from stdin
    #[arg(long)]
    diff: Option<PathBuf>,

    /// Author name (defaults to git config user.name)
    #[arg(long)]
    author: Option<String>,

    /// Author email (defaults to git config user.email)
    #[arg(long)]
    email: Option<String>,

    /// Previously printed recipient block to fall back on if the lookup fails
    #[arg(long)]
    fallback_recipients: Option<PathBuf>,

    /// Only print the To/Cc block
    #[arg(long)]
    recipients_only: bool,

    /// Print the inferred module, functions, title and recipients as JSON
    #[arg(long)]
    inspect: bool,

    /// Print the patch instead of writing it
    #[arg(long)]
    dry_run: bool,

    /// Overwrite an existing patch file without asking
    #[arg(long)]
    force: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = ToolConfig::from_env();
    if let Err(e) = check_installed(&config.git) {
        warn!("{}. Module names will fall back to the directory name.", e);
    }

    let runner = SystemRunner;

    let (git_name, git_email) = if cli.author.is_none() || cli.email.is_none() {
        git_identity(&runner, &config, &cli.repo)
    } else {
        (None, None)
    };
    let author = cli
        .author
        .or(git_name)
        .context("No author given. Pass --author or set git config user.name")?;
    let email = cli
        .email
        .or(git_email)
        .context("No email given. Pass --email or set git config user.email")?;

    let diff = cli.diff.as_deref().map(read_diff).transpose()?;

    let ctx = PatchContext::new(&cli.repo, cli.file, author, email, cli.title, cli.desc, diff);
    let formatter = PatchFormatter::new(&ctx, &runner, &config);

    if cli.recipients_only {
        let block = formatter
            .mail_list()
            .context("Failed to look up recipients")?;
        print!("{}", block);
        return Ok(());
    }

    if cli.inspect {
        let metadata = formatter.metadata();
        println!("{}", serde_json::to_string_pretty(&metadata)?);
        return Ok(());
    }

    let previous = cli
        .fallback_recipients
        .as_ref()
        .map(|path| {
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))
        })
        .transpose()?;

    let patch = formatter
        .format_patch(previous.as_deref())
        .context("Failed to format patch")?;

    if patch.recipients.is_degraded() {
        eprintln!("Warning: recipient lookup failed, using addresses from the fallback list");
    }

    if cli.dry_run {
        print!("{}", patch.text);
        return Ok(());
    }

    let target = patch_dir(&cli.repo).join(patch.file_name());
    if target.exists() && !cli.force && !confirm_overwrite(&target)? {
        println!("Kept existing {}", target.display());
        return Ok(());
    }

    let path = save_patch(&patch, &cli.repo).context("Failed to save patch")?;
    println!("✓ Wrote {}", path.display());

    Ok(())
}

/// Log to stderr; `RUST_LOG` overrides the level picked by `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "patchmail=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_diff(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut diff = String::new();
        std::io::stdin()
            .read_to_string(&mut diff)
            .context("Failed to read diff from stdin")?;
        return Ok(diff);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read diff {}", path.display()))
}

/// Ask before replacing an existing patch. Without a terminal, refuse.
fn confirm_overwrite(path: &Path) -> Result<bool> {
    if !std::io::stdin().is_terminal() {
        bail!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        );
    }
    Confirm::new()
        .with_prompt(format!("{} exists. Overwrite?", path.display()))
        .default(false)
        .interact()
        .context("Failed to read confirmation")
}
