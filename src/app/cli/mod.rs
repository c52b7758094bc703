//! CLI Adapter.

use std::error::Error;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::app::api::{self, PromoteOptions, ReleaseOptions};
use crate::domain::configuration::loader::present;
use crate::domain::{
    AppError, ConnectionArgs, FileConfig, MissingParameter, ServerConfig, configuration,
};

#[derive(Parser)]
#[command(name = "octorelease")]
#[command(version)]
#[command(about = "Create and promote Octopus Deploy releases", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Default)]
struct ConnectionFlags {
    /// URL of the Octopus Deploy server
    #[arg(short = 's', long, env = "OCTOPUS_SERVER")]
    server: Option<String>,
    /// API Key to use to connect to the Octopus Deploy server
    #[arg(short = 'k', long, env = "OCTOPUS_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    /// TOML file providing server, api_key or timeout_secs
    #[arg(long)]
    config: Option<PathBuf>,
    /// Per-request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Creates an Octopus Deploy release
    Release {
        #[command(flatten)]
        connection: ConnectionFlags,
        /// The Project to interact with
        #[arg(short = 'p', long)]
        project_name: Option<String>,
        /// The Semantic Version to interact with
        #[arg(short = 'v', long)]
        sem_ver: Option<String>,
        /// The Release notes
        #[arg(short = 'n', long)]
        release_notes: Option<String>,
    },
    /// Promotes an Octopus Deploy release
    Promote {
        #[command(flatten)]
        connection: ConnectionFlags,
        /// The Project to interact with
        #[arg(short = 'p', long)]
        project_name: Option<String>,
        /// The Semantic Version to interact with
        #[arg(short = 'v', long)]
        sem_ver: Option<String>,
        /// The environment to promote the release to
        #[arg(short = 'e', long)]
        environment: Option<String>,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();

    let result: Result<i32, AppError> = match cli.command {
        Commands::Release { connection, project_name, sem_ver, release_notes } => {
            run_release(connection, project_name, sem_ver, release_notes)
        }
        Commands::Promote { connection, project_name, sem_ver, environment } => {
            run_promote(connection, project_name, sem_ver, environment)
        }
    };

    match result {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            report(&e);
            std::process::exit(1);
        }
    }
}

fn run_release(
    connection: ConnectionFlags,
    project_name: Option<String>,
    sem_ver: Option<String>,
    release_notes: Option<String>,
) -> Result<i32, AppError> {
    let file = load_file_config(&connection)?;
    let project_name = present(project_name.as_deref());
    let sem_ver = present(sem_ver.as_deref());

    let mut missing = missing_connection(&connection, &file);
    push_if_missing(&mut missing, &project_name, MissingParameter::ProjectName);
    push_if_missing(&mut missing, &sem_ver, MissingParameter::SemVer);
    let (Some(project_name), Some(version), true) = (project_name, sem_ver, missing.is_empty())
    else {
        return Err(AppError::MissingParameters(missing));
    };

    let config = server_config(&connection, &file)?;
    let options = ReleaseOptions { project_name, version, release_notes };
    let release = match api::create_release(&config, &options) {
        Ok(release) => release,
        Err(e) => {
            println!("{}", Failure::Release.message(&e));
            return Ok(1);
        }
    };

    println!(
        "✅ Created release {} ({})",
        release.version,
        release.id.as_deref().unwrap_or("unassigned")
    );
    Ok(0)
}

fn run_promote(
    connection: ConnectionFlags,
    project_name: Option<String>,
    sem_ver: Option<String>,
    environment: Option<String>,
) -> Result<i32, AppError> {
    let file = load_file_config(&connection)?;
    let project_name = present(project_name.as_deref());
    let sem_ver = present(sem_ver.as_deref());
    let environment = present(environment.as_deref());

    let mut missing = missing_connection(&connection, &file);
    push_if_missing(&mut missing, &project_name, MissingParameter::ProjectName);
    push_if_missing(&mut missing, &sem_ver, MissingParameter::SemVer);
    push_if_missing(&mut missing, &environment, MissingParameter::Environment);
    let (Some(project_name), Some(version), Some(environment_name), true) =
        (project_name, sem_ver, environment, missing.is_empty())
    else {
        return Err(AppError::MissingParameters(missing));
    };

    let config = server_config(&connection, &file)?;
    let options = PromoteOptions { project_name, version, environment_name };
    let deployment = match api::promote_release(&config, &options) {
        Ok(deployment) => deployment,
        Err(e) => {
            println!("{}", Failure::Promote.message(&e));
            return Ok(1);
        }
    };

    println!(
        "✅ Created deployment {} of release {}",
        deployment.id.as_deref().unwrap_or("unassigned"),
        deployment.release_id
    );
    Ok(0)
}

fn load_file_config(connection: &ConnectionFlags) -> Result<FileConfig, AppError> {
    match &connection.config {
        Some(path) => configuration::load_config(path),
        None => Ok(FileConfig::default()),
    }
}

fn connection_args(connection: &ConnectionFlags) -> ConnectionArgs {
    ConnectionArgs {
        server: connection.server.clone(),
        api_key: connection.api_key.clone(),
        timeout_secs: connection.timeout_secs,
    }
}

fn missing_connection(connection: &ConnectionFlags, file: &FileConfig) -> Vec<MissingParameter> {
    let (server, api_key) = connection_args(connection).merged(file);
    let mut missing = Vec::new();
    push_if_missing(&mut missing, &server, MissingParameter::Server);
    push_if_missing(&mut missing, &api_key, MissingParameter::ApiKey);
    missing
}

fn server_config(
    connection: &ConnectionFlags,
    file: &FileConfig,
) -> Result<ServerConfig, AppError> {
    connection_args(connection).resolve(file)
}

fn push_if_missing(
    missing: &mut Vec<MissingParameter>,
    value: &Option<String>,
    param: MissingParameter,
) {
    if value.is_none() {
        missing.push(param);
    }
}

/// Workflow whose failure is being reported.
#[derive(Debug, Clone, Copy)]
enum Failure {
    Release,
    Promote,
}

impl Failure {
    fn message(self, error: &AppError) -> String {
        let label = match self {
            Failure::Release => "Create Release",
            Failure::Promote => "Promote Release",
        };
        format!("Octopus Deploy {} failed with message:\n{}", label, render_chain(error))
    }
}

/// Error message followed by each underlying cause on its own line.
fn render_chain(error: &AppError) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        rendered.push_str(&format!("\n  caused by: {}", cause));
        source = cause.source();
    }
    rendered
}

fn report(error: &AppError) {
    match error {
        AppError::MissingParameters(missing) => {
            for param in missing {
                println!("{}", param.message());
            }
        }
        AppError::Configuration(message) => println!("{}", message),
        other => println!("Error: {}", render_chain(other)),
    }
}
