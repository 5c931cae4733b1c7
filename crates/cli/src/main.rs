mod config;
mod dismiss;
mod login;
mod projects;
mod tag_cmd;
mod upload;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "fwtag",
    about = "fwtag - browse a Flywheel server, label analysis file sets, upload files"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enter the server URL and API key interactively
    Login,

    /// Show or set configuration
    Config {
        /// Set the server URL
        #[arg(long)]
        server: Option<String>,

        /// Set the API key
        #[arg(long)]
        api_key: Option<String>,
    },

    /// List all projects visible to the configured key
    Projects,

    /// Show one project with its sessions and analyses
    Project {
        /// Project identifier
        id: String,
    },

    /// List the acquisitions of a session
    Sessions {
        /// Session identifier
        id: String,
    },

    /// Manage labels on sets of analysis files
    Tag {
        #[command(subcommand)]
        action: TagAction,
    },

    /// Upload a local file to a project
    Upload {
        /// Project identifier
        project_id: String,
        /// Path to the file
        file: PathBuf,
        /// MIME type sent with the upload (guessed from the extension if omitted)
        #[arg(long)]
        content_type: Option<String>,
    },
}

#[derive(Subcommand)]
enum TagAction {
    /// List stored tag records
    List,

    /// Label a set of analysis files
    Set {
        /// The label to apply
        label: String,

        /// File reference as ANALYSIS_ID:NAME (repeatable)
        #[arg(long = "file", value_name = "ANALYSIS_ID:NAME")]
        files: Vec<String>,

        /// Pick files interactively from this project's analyses
        #[arg(long, conflicts_with = "files")]
        project: Option<String>,
    },

    /// Delete all stored tag records
    Clear,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Login => login::run_login(),
        Commands::Config { server, api_key } => {
            if server.is_none() && api_key.is_none() {
                config::show_config()
            } else {
                config::set_config(server, api_key)
            }
        }
        Commands::Projects => projects::run_projects().await,
        Commands::Project { id } => projects::run_project(&id).await,
        Commands::Sessions { id } => projects::run_acquisitions(&id).await,
        Commands::Tag { action } => match action {
            TagAction::List => tag_cmd::run_list(),
            TagAction::Set {
                label,
                files,
                project,
            } => tag_cmd::run_set(&label, &files, project.as_deref()).await,
            TagAction::Clear => tag_cmd::run_clear(),
        },
        Commands::Upload {
            project_id,
            file,
            content_type,
        } => upload::run_upload(&project_id, &file, content_type.as_deref()).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
