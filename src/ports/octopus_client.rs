//! Octopus Deploy API client port definition.

use crate::domain::{
    AppError, Channel, Deployment, DeploymentProcess, Environment, Project, Release,
    ReleaseTemplate,
};

/// Remote operations the release and promotion workflows consume.
///
/// Lookups that may miss return `Option`/empty collections; transport and
/// server failures are `AppError::RemoteFailure`.
pub trait OctopusClient {
    /// Every project on the server.
    fn list_projects(&self) -> Result<Vec<Project>, AppError>;

    /// Every environment on the server.
    fn list_environments(&self) -> Result<Vec<Environment>, AppError>;

    fn get_deployment_process(&self, process_id: &str) -> Result<DeploymentProcess, AppError>;

    /// Channels of a project in server order.
    fn get_channels_for_project(&self, project_id: &str) -> Result<Vec<Channel>, AppError>;

    /// Package actions needing a version for `process` released through `channel`.
    fn get_release_template(
        &self,
        process: &DeploymentProcess,
        channel: &Channel,
    ) -> Result<ReleaseTemplate, AppError>;

    /// Submit a release draft; the returned release carries the server identifier.
    fn create_release(&self, release: &Release) -> Result<Release, AppError>;

    /// First release accepted by `predicate`, in server order.
    fn find_release(
        &self,
        predicate: &dyn Fn(&Release) -> bool,
    ) -> Result<Option<Release>, AppError>;

    fn create_deployment(&self, deployment: &Deployment) -> Result<Deployment, AppError>;
}
