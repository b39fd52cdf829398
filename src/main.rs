// src/main.rs

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use qtrepo::{
    ArchiveResolver, FeatureArchiveResolver, FeatureQuery, RepositoryClient, ResolvedArtifact,
    ResolverConfig, ToolArchiveResolver, ToolQuery,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "qtrepo")]
#[command(author, version, about = "Resolve Qt SDK repository packages into archive URLs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Mirror host to use instead of download.qt.io
    #[arg(long, global = true)]
    mirror: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print the resolved archives as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the archives of a Qt release and its modules
    Archives {
        /// Host OS: windows, linux or mac
        os_name: String,
        /// Target platform: desktop, android, ios or winrt
        target: String,
        /// Qt version, e.g. 5.13.1
        version: String,
        /// Architecture, e.g. gcc_64, win64_msvc2017_64, wasm_32
        arch: String,
        /// Additional module, may be repeated (e.g. -m qtcharts -m qtnetworkauth)
        #[arg(short, long = "module")]
        modules: Vec<String>,
    },
    /// Resolve the archives of a tool at an exact version
    Tool {
        /// Host OS: windows, linux or mac
        os_name: String,
        /// Tool directory, e.g. tools_mingw or tools_ifw
        tool_name: String,
        /// Exact tool version, e.g. 4.9.1-3
        version: String,
        /// Tool variant, e.g. win32_mingw491
        arch: String,
        /// Target platform
        #[arg(long, default_value = "desktop")]
        target: String,
    },
}

fn load_config(cli: &Cli) -> Result<ResolverConfig> {
    let config = match &cli.config {
        Some(path) => ResolverConfig::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => ResolverConfig::default(),
    };

    let config = match &cli.mirror {
        Some(mirror) => config.with_mirror(Some(mirror.clone())),
        None => config,
    };

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn print_artifacts(artifacts: &[ResolvedArtifact], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(artifacts)?);
        return Ok(());
    }

    for artifact in artifacts {
        println!("{}  {}  {}", artifact.package_name, artifact.archive, artifact.source_url);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&cli)?;

    let resolver: Box<dyn ArchiveResolver> = match &cli.command {
        Commands::Archives {
            os_name,
            target,
            version,
            arch,
            modules,
        } => {
            let query = FeatureQuery::new(os_name, target, version, arch).with_modules(modules.iter().cloned());
            Box::new(FeatureArchiveResolver::new(query, &config)?)
        }
        Commands::Tool {
            os_name,
            tool_name,
            version,
            arch,
            target,
        } => {
            let query = ToolQuery::new(os_name, tool_name, version, arch).with_target(target);
            Box::new(ToolArchiveResolver::new(query, &config)?)
        }
    };

    let client = RepositoryClient::with_config(&config.http)?;
    let artifacts = match resolver.resolve(&client) {
        Ok(artifacts) => artifacts,
        Err(e) if e.is_no_match() => {
            anyhow::bail!("{e}\nCheck the OS, target, version, arch and module names");
        }
        Err(e) => return Err(e).context("Failed to resolve archives"),
    };

    let target = resolver.target_config();
    info!(
        "{} archives for {}/{}/{}",
        artifacts.len(),
        target.version,
        target.target,
        target.arch
    );

    print_artifacts(&artifacts, cli.json)
}
