use crate::domain::{AppError, Deployment, Environment, Release};

/// Build a request promoting `release` into `environment`.
pub fn build_deployment(
    release: &Release,
    environment: &Environment,
) -> Result<Deployment, AppError> {
    Ok(Deployment {
        id: None,
        release_id: release.require_id()?.to_string(),
        project_id: release.project_id.clone(),
        environment_id: environment.id.clone(),
    })
}
