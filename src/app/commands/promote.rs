//! Release promotion workflow.

use log::info;

use crate::app::resolver;
use crate::domain::{AppError, Deployment, build_deployment};
use crate::ports::OctopusClient;

#[derive(Debug, Clone)]
pub struct PromoteOptions {
    pub project_name: String,
    pub version: String,
    pub environment_name: String,
}

impl PromoteOptions {
    /// Line announcing the promotion before any server contact.
    pub fn banner(&self) -> String {
        format!(
            "Promoting Octopus Deploy Release for project: {} {} to environment: {}",
            self.project_name, self.version, self.environment_name
        )
    }
}

/// Deploy the release of a project at `version` into the named environment.
pub fn execute(
    client: &impl OctopusClient,
    options: &PromoteOptions,
) -> Result<Deployment, AppError> {
    let environment = resolver::find_environment_by_name(client, &options.environment_name)?;
    let project = resolver::find_project_by_name(client, &options.project_name)?;
    let release =
        resolver::find_release_by_project_and_version(client, &project.id, &options.version)?;

    let deployment = build_deployment(&release, &environment)?;
    let created = client.create_deployment(&deployment)?;

    info!(
        "Created deployment {} of {} to {}",
        created.id.as_deref().unwrap_or("no id"),
        deployment.release_id,
        environment.name
    );
    Ok(created)
}
