//! octorelease: create Octopus Deploy releases and promote them through environments.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    PromoteOptions, ReleaseOptions, ServerConfig, create_release, promote_release,
};
pub use domain::AppError;
