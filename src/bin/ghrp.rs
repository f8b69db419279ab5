//! ghrp - install tools from their GitHub releases
//!
//! Usage:
//!   ghrp list <plugin> [--format json|txt] [--with-published-at]
//!   ghrp install <plugin> <version> <path>
//!   ghrp repo <plugin>
//!   ghrp plugins
//!
//! Set `GHRP_LOG=debug` for diagnostic logging.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gh_release_plugins::core::config::{ENV_API_URL, ENV_GITHUB_URL};
use gh_release_plugins::{output, versions, Installer, OutputFormat, Settings, DEFAULT_LIMIT};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter.
const LOG_ENV: &str = "GHRP_LOG";

#[derive(Parser)]
#[command(name = "ghrp")]
#[command(about = "Install tools from their GitHub releases")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// GitHub REST API base URL
    #[arg(long, global = true, env = ENV_API_URL)]
    api_url: Option<String>,

    /// GitHub web base URL used for release downloads
    #[arg(long, global = true, env = ENV_GITHUB_URL)]
    github_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the most recent versions of a tool, newest last
    List {
        /// Plugin name
        plugin: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Append `#<published_at>` to each version
        #[arg(long)]
        with_published_at: bool,
    },

    /// Install a version of a tool into <path>/bin
    Install {
        /// Plugin name
        plugin: String,

        /// Normalized version, as printed by `list`
        version: String,

        /// Installation root
        path: PathBuf,
    },

    /// Print the repository URL of a tool
    Repo {
        /// Plugin name
        plugin: String,
    },

    /// List available plugins
    Plugins,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            // Usage errors go to stdout with a failing status.
            println!("{}", e.render());
            return ExitCode::FAILURE;
        }
    };

    init_tracing();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut settings = Settings::from_env();
    if let Some(url) = cli.api_url {
        settings = settings.with_api_url(url);
    }
    if let Some(url) = cli.github_url {
        settings = settings.with_github_url(url);
    }
    let installer = Installer::new(settings);

    match cli.command {
        Commands::List {
            plugin,
            format,
            with_published_at,
        } => {
            let list = installer
                .list(&plugin, DEFAULT_LIMIT, with_published_at)
                .with_context(|| format!("Failed to list versions of {}", plugin))?;
            println!("{}", versions::render(&list, format));
        }

        Commands::Install {
            plugin,
            version,
            path,
        } => {
            let root = std::path::absolute(&path)
                .with_context(|| format!("Invalid install path: {}", path.display()))?;
            installer
                .install(&plugin, &version, &root)
                .with_context(|| format!("Failed to install {} {}", plugin, version))?;
        }

        Commands::Repo { plugin } => {
            println!("{}", installer.repo_url(&plugin)?);
        }

        Commands::Plugins => {
            for name in installer.registry().names() {
                println!("{}", name);
            }
        }
    }

    Ok(())
}
