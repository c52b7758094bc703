//! Lookup of server entities by their human-readable keys.
//!
//! Name matching is exact and case-sensitive.

use log::debug;

use crate::domain::{AppError, Channel, EntityKind, Environment, Project, Release};
use crate::ports::OctopusClient;

pub fn find_project_by_name(client: &impl OctopusClient, name: &str) -> Result<Project, AppError> {
    let project = client
        .list_projects()?
        .into_iter()
        .find(|project| project.name == name)
        .ok_or_else(|| AppError::not_found(EntityKind::Project, name))?;
    debug!("Resolved project '{}' to {}", name, project.id);
    Ok(project)
}

pub fn find_environment_by_name(
    client: &impl OctopusClient,
    name: &str,
) -> Result<Environment, AppError> {
    let environment = client
        .list_environments()?
        .into_iter()
        .find(|environment| environment.name == name)
        .ok_or_else(|| AppError::not_found(EntityKind::Environment, name))?;
    debug!("Resolved environment '{}' to {}", name, environment.id);
    Ok(environment)
}

/// First release of `project_id` whose version equals `version`.
pub fn find_release_by_project_and_version(
    client: &impl OctopusClient,
    project_id: &str,
    version: &str,
) -> Result<Release, AppError> {
    let release = client
        .find_release(&|release: &Release| {
            release.version == version && release.project_id == project_id
        })?
        .ok_or_else(|| {
            AppError::not_found(EntityKind::Release, format!("{} {}", project_id, version))
        })?;
    debug!("Resolved release {} of {} to {:?}", version, project_id, release.id);
    Ok(release)
}

/// First channel the server lists for `project`.
///
/// With several channels the pick follows server order.
pub fn find_channel_for_project(
    client: &impl OctopusClient,
    project: &Project,
) -> Result<Channel, AppError> {
    client
        .get_channels_for_project(&project.id)?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::not_found(EntityKind::Channel, &project.name))
}
