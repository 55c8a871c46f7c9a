mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{
    contact::ContactSubcommand, document::DocumentSubcommand, section::SectionSubcommand,
    tracking::TrackingSubcommand,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ssdi",
    about = "SSDI case tracker: documents, SSA communications, and what to do next",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .ssdi/)
    #[arg(long, global = true, env = "SSDI_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Act as this user id (default: server.default_user_id from config)
    #[arg(long, global = true, env = "SSDI_USER")]
    user: Option<i64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create .ssdi/ with a config and an empty case store
    Init {
        /// Load the demo claimant and their case file
        #[arg(long)]
        seed: bool,
    },

    /// Show what needs attention and what was recently completed
    ActionItems,

    /// Log and resolve SSA communications
    Tracking {
        #[command(subcommand)]
        subcommand: TrackingSubcommand,
    },

    /// Inspect application sections
    Section {
        #[command(subcommand)]
        subcommand: SectionSubcommand,
    },

    /// Manage documents within sections
    Document {
        #[command(subcommand)]
        subcommand: DocumentSubcommand,
    },

    /// Manage contacts
    Contact {
        #[command(subcommand)]
        subcommand: ContactSubcommand,
    },

    /// Summarize section completion
    Progress,

    /// Run the JSON API server
    Serve {
        /// Port to listen on (default: server.port from config)
        #[arg(long)]
        port: Option<u16>,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } | Commands::Init { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());
    let user = cli.user;

    let result = match cli.command {
        Commands::Init { seed } => cmd::init::run(&root, seed),
        Commands::ActionItems => cmd::action_items::run(&root, user, cli.json),
        Commands::Tracking { subcommand } => cmd::tracking::run(&root, user, subcommand, cli.json),
        Commands::Section { subcommand } => cmd::section::run(&root, user, subcommand, cli.json),
        Commands::Document { subcommand } => cmd::document::run(&root, user, subcommand, cli.json),
        Commands::Contact { subcommand } => cmd::contact::run(&root, user, subcommand, cli.json),
        Commands::Progress => cmd::progress::run(&root, user, cli.json),
        Commands::Serve { port } => cmd::serve::run(&root, port),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
