// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jason Ish

use std::path::PathBuf;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use product_version::config::{Config, SourceKind};
use product_version::upgrade::{self, UpgradeStatus};
use product_version::version::VERSION;
use product_version::{ConfigSource, EmbeddedSource, Error, FileSource, VersionProvider};

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

type Provider = VersionProvider<Box<dyn ConfigSource + Send + Sync>>;

#[derive(Parser, Debug)]
#[command(name = "product-version")]
#[command(about = "Read the product version from a wails.json configuration document")]
#[command(version = VERSION)]
#[command(styles = STYLES, color = clap::ColorChoice::Always)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    #[arg(long, global = true, help = "Config file to use instead of the default")]
    config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    verbose: bool,
}

#[derive(clap::Args, Debug, Clone, Default)]
struct SourceArgs {
    #[arg(
        short,
        long,
        conflicts_with = "embedded",
        help = "Read the version from this file"
    )]
    file: Option<PathBuf>,

    #[arg(
        long,
        conflicts_with = "file",
        help = "Read the version from the document bundled in this binary"
    )]
    embedded: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the product version (default)
    Get {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Check GitHub for a newer release
    #[command(alias = "update")]
    Check {
        #[command(flatten)]
        source: SourceArgs,

        /// Repository to check, as owner/name
        #[arg(long)]
        repository: Option<String>,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        // RUST_LOG wins; fall back to `default_level` when unset or invalid
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn exit_with(err: Error) -> ! {
    debug!(error = ?err, "product version unavailable");
    eprintln!("Error: {}", err);
    std::process::exit(1);
}

fn load_config(path: Option<&PathBuf>) -> Config {
    let result = match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    result.unwrap_or_else(|e| exit_with(e))
}

/// Command-line flags win over the config file.
fn build_provider(source: &SourceArgs, config: &Config) -> Provider {
    if let Some(path) = &source.file {
        return VersionProvider::boxed(FileSource::new(path.clone()));
    }
    if source.embedded {
        return VersionProvider::boxed(EmbeddedSource::bundled());
    }
    match config.source {
        SourceKind::Embedded => VersionProvider::boxed(EmbeddedSource::bundled()),
        SourceKind::File => VersionProvider::boxed(FileSource::new(config.path.clone())),
    }
}

fn apply_repository_override(config: &mut Config, repository: Option<String>) {
    if let Some(repository) = repository {
        config.update.repository = repository;
    }
}

fn handle_get_command(provider: &Provider) -> std::io::Result<()> {
    debug!(source = %provider.source().describe(), "reading product version");
    let version = provider.get_version().unwrap_or_else(|e| exit_with(e));
    println!("{}", version);
    Ok(())
}

async fn handle_check_command(provider: &Provider, config: &Config) -> std::io::Result<()> {
    let current = provider.get_version().unwrap_or_else(|e| exit_with(e));

    println!("Checking for updates...");

    match upgrade::check_for_upgrade(&current, &config.update).await {
        Ok(UpgradeStatus::Available { latest, url }) => {
            println!();
            println!(
                "A new version is available: {} (current: {})",
                latest,
                display_version(&current)
            );
            println!();
            println!("Release notes: {}", url);
        }
        Ok(UpgradeStatus::UpToDate) => {
            println!(
                "You're on the latest version ({}).",
                display_version(&current)
            );
        }
        Err(e) => {
            debug!(error = ?e, "update check failed");
            eprintln!("Failed to check for updates: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn display_version(version: &str) -> &str {
    if version.is_empty() { "unknown" } else { version }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = load_config(args.config.as_ref());

    match args.command.unwrap_or(Command::Get {
        source: SourceArgs::default(),
    }) {
        Command::Get { source } => {
            let provider = build_provider(&source, &config);
            handle_get_command(&provider)
        }
        Command::Check { source, repository } => {
            apply_repository_override(&mut config, repository);
            let provider = build_provider(&source, &config);
            handle_check_command(&provider, &config).await
        }
    }
}
