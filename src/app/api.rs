//! API Facade for the application.
//!
//! Each function announces the workflow, opens one HTTP client for the
//! invocation, runs the workflow against it, and drops the client on return.

use crate::adapters::octopus_client_http::HttpOctopusClient;
use crate::app::commands::{promote, release};

pub use crate::app::commands::promote::PromoteOptions;
pub use crate::app::commands::release::ReleaseOptions;
pub use crate::domain::{AppError, Deployment, Release, ServerConfig};

/// Create a release of a project with every package pinned to one version.
pub fn create_release(
    config: &ServerConfig,
    options: &ReleaseOptions,
) -> Result<Release, AppError> {
    println!("{}", options.banner());
    let client = HttpOctopusClient::connect(config)?;
    release::execute(&client, options)
}

/// Deploy an existing release of a project into an environment.
pub fn promote_release(
    config: &ServerConfig,
    options: &PromoteOptions,
) -> Result<Deployment, AppError> {
    println!("{}", options.banner());
    let client = HttpOctopusClient::connect(config)?;
    promote::execute(&client, options)
}
