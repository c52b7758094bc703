pub mod configuration;
pub mod deployment;
pub mod error;
pub mod release;
pub mod resources;

pub use configuration::{ConnectionArgs, FileConfig, ServerConfig};
pub use deployment::build_deployment;
pub use error::{AppError, EntityKind, MissingParameter};
pub use release::select_packages;
pub use resources::{
    Channel, Deployment, DeploymentAction, DeploymentProcess, DeploymentStep, Environment,
    Project, Release, ReleaseTemplate, ReleaseTemplatePackage, SelectedPackage,
};
