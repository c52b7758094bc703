//! Octopus Deploy resource DTOs touched by the release and promotion workflows.
//!
//! Field names follow the server's PascalCase JSON. Unknown fields are ignored.

use serde::{Deserialize, Serialize};

use crate::domain::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub deployment_process_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Channel {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub project_id: String,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeploymentProcess {
    pub id: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub steps: Vec<DeploymentStep>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeploymentStep {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub actions: Vec<DeploymentAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeploymentAction {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub action_type: String,
}

/// Server-derived list of package actions needing a version for a process and channel.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReleaseTemplate {
    #[serde(default)]
    pub next_version_increment: Option<String>,
    #[serde(default)]
    pub packages: Vec<ReleaseTemplatePackage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReleaseTemplatePackage {
    pub action_name: String,
    #[serde(default)]
    pub package_id: Option<String>,
    #[serde(default)]
    pub feed_id: Option<String>,
    #[serde(default)]
    pub version_selected_last_release: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SelectedPackage {
    pub action_name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Release {
    /// Assigned by the server; absent on a locally built draft.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub project_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    pub version: String,
    #[serde(default)]
    pub release_notes: Option<String>,
    #[serde(default)]
    pub selected_packages: Vec<SelectedPackage>,
}

impl Release {
    /// Server-assigned identifier of a release read back from the server.
    pub fn require_id(&self) -> Result<&str, AppError> {
        self.id.as_deref().ok_or_else(|| {
            AppError::remote(
                format!("Release {} for {} has no identifier", self.version, self.project_id),
                None,
            )
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Environment {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Deployment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub release_id: String,
    pub project_id: String,
    pub environment_id: String,
}
