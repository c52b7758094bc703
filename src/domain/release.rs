//! Release assembly from a deployment template.

use std::collections::HashSet;

use crate::domain::{Release, ReleaseTemplate, SelectedPackage};

/// Pin every package action in `template` to `version`.
///
/// Entries keep template order. An action listed twice by the server is
/// selected once.
pub fn select_packages(template: &ReleaseTemplate, version: &str) -> Vec<SelectedPackage> {
    let mut seen = HashSet::new();
    template
        .packages
        .iter()
        .filter(|package| seen.insert(package.action_name.as_str()))
        .map(|package| SelectedPackage {
            action_name: package.action_name.clone(),
            version: version.to_string(),
        })
        .collect()
}

impl Release {
    /// Build an unsaved release for a project from its template.
    pub fn draft(
        project_id: &str,
        channel_id: Option<&str>,
        version: &str,
        release_notes: Option<&str>,
        template: &ReleaseTemplate,
    ) -> Self {
        Release {
            id: None,
            project_id: project_id.to_string(),
            channel_id: channel_id.map(ToOwned::to_owned),
            version: version.to_string(),
            release_notes: release_notes.map(ToOwned::to_owned),
            selected_packages: select_packages(template, version),
        }
    }
}
