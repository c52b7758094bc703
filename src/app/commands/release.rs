//! Release creation workflow.

use log::{debug, info};

use crate::app::resolver;
use crate::domain::{AppError, Project, Release};
use crate::ports::OctopusClient;

#[derive(Debug, Clone)]
pub struct ReleaseOptions {
    pub project_name: String,
    pub version: String,
    pub release_notes: Option<String>,
}

impl ReleaseOptions {
    /// Line announcing the release before any server contact.
    pub fn banner(&self) -> String {
        format!(
            "Creating Octopus Deploy Release for project: {} {}",
            self.project_name, self.version
        )
    }
}

/// Resolve the project, build its release, and submit it.
///
/// The server may already hold a release at this version; no existence check is made.
pub fn execute(client: &impl OctopusClient, options: &ReleaseOptions) -> Result<Release, AppError> {
    let project = resolver::find_project_by_name(client, &options.project_name)?;
    let draft =
        build_release(client, &project, &options.version, options.release_notes.as_deref())?;
    let created = client.create_release(&draft)?;

    info!(
        "Created release {} ({}) with {} package selection(s)",
        created.version,
        created.id.as_deref().unwrap_or("no id"),
        created.selected_packages.len()
    );
    Ok(created)
}

/// Fetch the project's process, channel and template, then pin every package to `version`.
pub fn build_release(
    client: &impl OctopusClient,
    project: &Project,
    version: &str,
    release_notes: Option<&str>,
) -> Result<Release, AppError> {
    let process = client.get_deployment_process(&project.deployment_process_id)?;
    let channel = resolver::find_channel_for_project(client, project)?;
    debug!("Using channel {} ({}) for {}", channel.name, channel.id, project.name);

    let template = client.get_release_template(&process, &channel)?;
    Ok(Release::draft(&project.id, Some(channel.id.as_str()), version, release_notes, &template))
}
