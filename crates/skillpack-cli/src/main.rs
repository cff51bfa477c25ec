//! `skillpack`: build, verify and inspect bundles.
//!
//! Usage:
//!   skillpack build --root .
//!   skillpack verify --bundle dist/skillpack.json
//!   skillpack show code-review
//!   skillpack compose code-review "look at src/main.rs"

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use skillpack::BuildConfig;
use skillpack_runtime::ContentIndex;

#[derive(Parser, Debug)]
#[command(name = "skillpack")]
#[command(about = "Bundle skill and subagent documents into a verified artifact")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the bundle and its digest sidecar.
    Build {
        /// TOML build configuration; paths inside resolve against its directory.
        #[arg(long, conflicts_with = "root")]
        config: Option<PathBuf>,
        /// Project root for the default layout.
        #[arg(long)]
        root: Option<PathBuf>,
    },
    /// Check a bundle against its digest sidecar.
    Verify {
        #[arg(long, default_value = "dist/skillpack.json")]
        bundle: PathBuf,
    },
    /// List bundled skills, or subagents with `--subagents`.
    List {
        #[arg(long, default_value = "dist/skillpack.json")]
        bundle: PathBuf,
        #[arg(long)]
        subagents: bool,
    },
    /// Print an entry's full content.
    Show {
        /// Identifier or name.
        key: String,
        #[arg(long, default_value = "dist/skillpack.json")]
        bundle: PathBuf,
        /// Look up a subagent instead of a skill.
        #[arg(long)]
        subagent: bool,
    },
    /// Print an entry's content combined with a message.
    Compose {
        /// Identifier or name.
        key: String,
        /// Free-text request.
        message: String,
        #[arg(long, default_value = "dist/skillpack.json")]
        bundle: PathBuf,
        /// Compose for a subagent instead of a skill.
        #[arg(long)]
        subagent: bool,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries command output.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    match Cli::parse().command {
        Command::Build { config, root } => {
            let config = match (config, root) {
                (Some(path), _) => BuildConfig::load(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                (None, root) => BuildConfig::with_root(root.as_deref().unwrap_or(Path::new("."))),
            };
            let output = skillpack::build(&config).context("building bundle")?;
            println!("{}  {}", output.digest, output.artifact.display());
        }
        Command::Verify { bundle } => {
            let index = open(&bundle)?;
            println!(
                "ok  {} ({} skills, {} subagents)",
                bundle.display(),
                index.list_skills().len(),
                index.list_subagents().len()
            );
        }
        Command::List { bundle, subagents } => {
            let index = open(&bundle)?;
            if subagents {
                for agent in index.list_subagents() {
                    println!("{}\t{}", agent.id, agent.name);
                }
            } else {
                for skill in index.list_skills() {
                    let marker = if skill.has_reference { "\t+reference" } else { "" };
                    println!("{}\t{}{marker}", skill.id, skill.name);
                }
            }
        }
        Command::Show {
            key,
            bundle,
            subagent,
        } => {
            let index = open(&bundle)?;
            if subagent {
                print!("{}", index.get_subagent(&key)?.content);
            } else {
                let skill = index.get_skill(&key)?;
                print!("{}", skill.content);
                if let Some(reference) = &skill.reference {
                    print!("\n{reference}");
                }
            }
        }
        Command::Compose {
            key,
            message,
            bundle,
            subagent,
        } => {
            let index = open(&bundle)?;
            let text = if subagent {
                index.compose_subagent(&key, &message)?
            } else {
                index.compose_skill(&key, &message)?
            };
            println!("{text}");
        }
    }
    Ok(())
}

fn open(bundle: &Path) -> Result<ContentIndex> {
    skillpack_runtime::load(bundle).with_context(|| format!("loading {}", bundle.display()))
}
