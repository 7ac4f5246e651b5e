//! CLI definitions and entry point

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use super::commands;
use repo_importer::api::{ApiError, ApiResponse};
use repo_importer::bootstrap;
use repo_importer::config::ServiceConfig;
use repo_importer::core::services::ProjectService;
use repo_importer::output::OutputMode;

/// repo-importer - Import git repositories as archived projects
#[derive(Parser, Debug)]
#[command(
    name = "repo-importer",
    version,
    about = "Import git repositories as archived projects",
    long_about = "Clone a git repository, archive it without its .git metadata,\n\
                  upload the archive to a blob store and record the project.\n\n\
                  Text files of each import are ingested and can be listed later."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (defaults to ~/.config/repo-importer/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Import a repository as a new project
    Import {
        /// Clone URL of the repository
        url: String,

        /// Display name
        #[arg(short, long)]
        name: Option<String>,

        /// Description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Show a project
    Show {
        /// Project ID
        id: String,
    },

    /// List projects, most recent first
    List,

    /// List the files ingested for a project
    Files {
        /// Project ID
        id: String,
    },

    /// Delete a project and its files
    Delete {
        /// Project ID
        id: String,
    },

    /// Show the effective configuration
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        save: bool,
    },
}

/// Run the CLI
pub async fn run() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    match dispatch(cli, output_mode).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err, output_mode);
            ExitCode::FAILURE
        },
    }
}

async fn dispatch(cli: Cli, mode: OutputMode) -> anyhow::Result<()> {
    let config = ServiceConfig::load(cli.config.as_deref())?;

    let Some(command) = cli.command else {
        if mode == OutputMode::Json {
            println!(
                "{}",
                serde_json::json!({
                    "version": env!("CARGO_PKG_VERSION"),
                    "hint": "Use --help for usage"
                })
            );
        } else {
            println!("repo-importer v{}", env!("CARGO_PKG_VERSION"));
            println!("\nRun 'repo-importer --help' for usage");
        }
        return Ok(());
    };

    match command {
        Command::Import {
            url,
            name,
            description,
        } => commands::import(&service(&config)?, url, name, description, mode).await?,
        Command::Show { id } => commands::show(&service(&config)?, &id, mode).await?,
        Command::List => commands::list(&service(&config)?, mode).await?,
        Command::Files { id } => commands::files(&service(&config)?, &id, mode).await?,
        Command::Delete { id } => commands::delete(&service(&config)?, &id, mode).await?,
        Command::Config { save } => {
            let path = cli.config.unwrap_or_else(ServiceConfig::config_path);
            commands::config(&config, &path, save, mode)?;
        },
    }
    Ok(())
}

fn service(config: &ServiceConfig) -> anyhow::Result<ProjectService> {
    bootstrap::build_service(config)
}

fn report(err: &anyhow::Error, mode: OutputMode) {
    let api = err
        .downcast_ref::<ApiError>()
        .cloned()
        .unwrap_or_else(|| ApiError::internal(format!("{err:#}")));

    match mode {
        OutputMode::Json => {
            let response = ApiResponse::error(api.code.as_str(), &api.message);
            println!("{}", serde_json::to_string_pretty(&response).unwrap_or_default());
        },
        OutputMode::Human => eprintln!("error: {}", api.message),
    }
}
