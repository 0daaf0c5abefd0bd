//! Snipbox CLI - serve and manage snippets from the command line

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{completions, search, serve, snippet};
use config::Config;
use output::OutputFormat;
use snipbox_server::SnippetService;
use snipbox_storage::RedbStorage;

/// Database file inside the data directory
const DB_FILE: &str = "snipbox.redb";

#[derive(Parser)]
#[command(name = "snipbox")]
#[command(author, version, about = "Store, fetch and search text snippets")]
pub struct Cli {
    /// Data directory
    #[arg(short, long, env = "SNIPBOX_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Store namespace
    #[arg(short, long, env = "SNIPBOX_NAMESPACE", global = true)]
    pub namespace: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Store a new snippet
    Add {
        /// Snippet title
        title: String,
        /// Snippet content
        content: String,
    },
    /// Show a snippet
    Get {
        /// Snippet id
        id: String,
    },
    /// Delete a snippet
    Delete {
        /// Snippet id
        id: String,
    },
    /// List every snippet in the namespace
    List,
    /// Rank snippets by title words
    Search(search::SearchArgs),
    /// Delete every snippet in the namespace
    Reset {
        /// Required; there is no confirmation prompt
        #[arg(long)]
        force: bool,
    },
    /// Start the HTTP server
    Serve(serve::ServeArgs),
    /// Manage configuration
    Config(commands::config::ConfigArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Settings after merging flags over the config file
pub struct AppContext {
    pub service: Arc<SnippetService<RedbStorage>>,
    pub format: OutputFormat,
    pub config: Config,
}

impl AppContext {
    pub async fn new(cli: &Cli) -> anyhow::Result<Self> {
        let config = Config::load();

        let data_dir = cli.data_dir.clone().unwrap_or_else(|| config.data_dir.clone());
        std::fs::create_dir_all(&data_dir)?;

        let namespace = cli.namespace.as_deref().unwrap_or(&config.namespace);
        let format = match cli.format {
            Some(format) => format,
            None => config.format.parse()?,
        };

        let db_path = data_dir.join(DB_FILE);
        tracing::debug!("Using database at: {:?} (namespace {})", db_path, namespace);

        let storage = RedbStorage::open_with_namespace(&db_path, namespace)?;

        Ok(Self {
            service: Arc::new(SnippetService::new(Arc::new(storage))),
            format,
            config,
        })
    }

    pub fn print(&self, text: &str, cli: &Cli) {
        if !cli.quiet {
            println!("{}", text);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting snipbox CLI");

    // Commands that never touch the store
    match &cli.command {
        Commands::Config(args) => return commands::config::run(args).await,
        Commands::Completions(args) => return completions::run(args),
        _ => {}
    }

    let ctx = AppContext::new(&cli).await?;

    match &cli.command {
        Commands::Add { title, content } => snippet::add(title, content, &cli, &ctx).await?,
        Commands::Get { id } => snippet::get(id, &cli, &ctx).await?,
        Commands::Delete { id } => snippet::delete(id, &cli, &ctx).await?,
        Commands::List => snippet::list(&cli, &ctx).await?,
        Commands::Reset { force } => snippet::reset(*force, &cli, &ctx).await?,
        Commands::Search(args) => search::run(args, &cli, &ctx).await?,
        Commands::Serve(args) => serve::run(args, &ctx).await?,
        Commands::Config(_) | Commands::Completions(_) => {}
    }

    Ok(())
}
