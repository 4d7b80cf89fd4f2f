//! CLI entry point for portfolio-rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use portfolio_rs::config::Mode;
use portfolio_rs::Portfolio;

#[derive(Parser)]
#[command(name = "portfolio-rs")]
#[command(author = "Abdullah Zeidan")]
#[command(version)]
#[command(about = "Static generator and dev server for a personal portfolio and blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new portfolio site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new unpublished post
    New {
        /// Title of the new post
        title: String,

        /// Slug for the new post (derived from the title by default)
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate {
        /// Execution mode (defaults to production)
        #[arg(short, long, value_enum)]
        mode: Option<Mode>,

        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Start a local server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Execution mode (defaults to development)
        #[arg(short, long, value_enum)]
        mode: Option<Mode>,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,

        /// Enable static mode (no file watching)
        #[arg(long)]
        r#static: bool,
    },

    /// Clean the public folder
    Clean,

    /// List site information
    List {
        /// Type of content to list (posts, projects, routes)
        #[arg(default_value = "posts")]
        r#type: String,
    },

    /// Display version information
    Version,
}

/// `--mode`, then the environment, then the command's own default
fn resolve_mode(flag: Option<Mode>, default: Mode) -> Mode {
    flag.or_else(Mode::from_env).unwrap_or(default)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "portfolio_rs=debug,info"
    } else {
        "portfolio_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            portfolio_rs::commands::init::init_site(&target_dir)?;
            println!("Initialized portfolio site in {:?}", target_dir);
        }

        Commands::New { title, slug } => {
            let site = Portfolio::new(&base_dir, resolve_mode(None, Mode::Development))?;
            tracing::info!("Creating new post with title: {}", title);
            let path = site.new_post(&title, slug.as_deref())?;
            println!("Created: {:?}", path);
        }

        Commands::Generate { mode, watch } => {
            let site = Portfolio::new(&base_dir, resolve_mode(mode, Mode::Production))?;
            tracing::info!("Generating static files ({} mode)...", site.mode);

            site.generate()?;
            println!("Generated successfully!");

            if watch {
                tracing::info!("Watching for file changes...");
                portfolio_rs::commands::generate::watch(&site).await?;
            }
        }

        Commands::Server {
            port,
            ip,
            mode,
            open,
            r#static,
        } => {
            let site = Portfolio::new(&base_dir, resolve_mode(mode, Mode::Development))?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            portfolio_rs::server::start(&site, &ip, port, !r#static, open).await?;
        }

        Commands::Clean => {
            let site = Portfolio::new(&base_dir, Mode::Production)?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let site = Portfolio::new(&base_dir, resolve_mode(None, Mode::Development))?;
            portfolio_rs::commands::list::run(&site, &r#type)?;
        }

        Commands::Version => {
            println!("portfolio-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
