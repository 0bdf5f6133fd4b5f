mod commands;
mod render;
mod utils;

use std::net::IpAddr;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use promogen_core::config::PromogenConfig;
use promogen_core::project::Project;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "promogen")]
#[command(about = "Create event folders, rebuild the event index and publish them to the promo site")]
struct Cli {
    /// Site repository root (defaults to the enclosing git repository)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Log every file write and external command
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new event folder with meta.json and cover.jpg
    New(commands::new::NewArgs),
    /// Rebuild events/index.json from the event folders
    Build,
    /// Serve the site root locally for previewing
    Serve {
        #[arg(short, long, default_value_t = 8000)]
        port: u16,

        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1")]
        bind: IpAddr,
    },
    /// Commit new event folders on a branch and open a pull request
    Publish {
        /// Commit message and PR title
        #[arg(short, long)]
        message: Option<String>,

        /// Branch to open the PR against (defaults to publish.base_branch)
        #[arg(long)]
        base: Option<String>,

        /// Skip syncing the fork with its parent first
        #[arg(long)]
        no_sync: bool,

        /// Rebuild the index before publishing
        #[arg(long)]
        build: bool,

        /// Open the pull request in the browser
        #[arg(long)]
        open: bool,
    },
    /// Show the resolved configuration and paths
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = PromogenConfig::load()?;
    let project = resolve_project(&config, cli.root.as_deref())?;

    match cli.command {
        Commands::New(args) => commands::new::run(&project, &config, args),
        Commands::Build => commands::build::run(&project),
        Commands::Serve { port, bind } => commands::serve::run(&project, bind, port).await,
        Commands::Publish {
            message,
            base,
            no_sync,
            build,
            open,
        } => {
            let options = commands::publish::PublishOptions {
                message,
                base,
                sync_fork: config.publish.sync_fork && !no_sync,
                build,
                open,
            };
            commands::publish::run(&project, &config, options).await
        }
        Commands::Config => commands::config::run(&config, &project),
    }
}

fn resolve_project(config: &PromogenConfig, root: Option<&Path>) -> Result<Project> {
    let project = Project::discover(config, root)?;
    debug!(
        root = %project.root().display(),
        events_dir = %project.events_dir().display(),
        "resolved project"
    );
    Ok(project)
}

/// `RUST_LOG` wins; otherwise only warnings unless `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
