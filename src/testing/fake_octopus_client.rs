use std::sync::Mutex;

use crate::domain::{
    AppError, Channel, Deployment, DeploymentProcess, Environment, Project, Release,
    ReleaseTemplate, ReleaseTemplatePackage,
};
use crate::ports::OctopusClient;

/// In-memory Octopus server recording every call it receives.
pub struct FakeOctopusClient {
    pub projects: Vec<Project>,
    pub environments: Vec<Environment>,
    pub processes: Vec<DeploymentProcess>,
    pub channels: Vec<Channel>,
    pub template_actions: Vec<String>,
    pub releases: Mutex<Vec<Release>>,
    pub created_releases: Mutex<Vec<Release>>,
    pub created_deployments: Mutex<Vec<Deployment>>,
    pub calls: Mutex<Vec<String>>,
    pub fail_on: Option<&'static str>,
}

impl Default for FakeOctopusClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeOctopusClient {
    pub fn new() -> Self {
        Self {
            projects: Vec::new(),
            environments: Vec::new(),
            processes: Vec::new(),
            channels: Vec::new(),
            template_actions: Vec::new(),
            releases: Mutex::new(Vec::new()),
            created_releases: Mutex::new(Vec::new()),
            created_deployments: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            fail_on: None,
        }
    }

    /// Server holding project "Checkout" with one channel and an environment "Staging".
    pub fn checkout(actions: &[&str]) -> Self {
        let mut fake = Self::new();
        fake.projects = vec![Project {
            id: "Projects-1".to_string(),
            name: "Checkout".to_string(),
            deployment_process_id: "deploymentprocess-Projects-1".to_string(),
        }];
        fake.processes = vec![DeploymentProcess {
            id: "deploymentprocess-Projects-1".to_string(),
            project_id: "Projects-1".to_string(),
            steps: vec![],
        }];
        fake.channels = vec![Channel {
            id: "Channels-1".to_string(),
            name: "Default".to_string(),
            project_id: "Projects-1".to_string(),
            is_default: true,
        }];
        fake.environments = vec![Environment {
            id: "Environments-2".to_string(),
            name: "Staging".to_string(),
        }];
        fake.template_actions = actions.iter().map(|action| action.to_string()).collect();
        fake
    }

    pub fn with_release(self, id: &str, project_id: &str, version: &str) -> Self {
        self.releases.lock().unwrap().push(Release {
            id: Some(id.to_string()),
            project_id: project_id.to_string(),
            channel_id: None,
            version: version.to_string(),
            release_notes: None,
            selected_packages: vec![],
        });
        self
    }

    pub fn failing_on(mut self, call: &'static str) -> Self {
        self.fail_on = Some(call);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn created_releases(&self) -> Vec<Release> {
        self.created_releases.lock().unwrap().clone()
    }

    pub fn created_deployments(&self) -> Vec<Deployment> {
        self.created_deployments.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) -> Result<(), AppError> {
        self.calls.lock().unwrap().push(call.to_string());
        if self.fail_on == Some(call) {
            return Err(AppError::remote(format!("{} rejected (HTTP 500)", call), Some(500)));
        }
        Ok(())
    }
}

impl OctopusClient for FakeOctopusClient {
    fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        self.record("list_projects")?;
        Ok(self.projects.clone())
    }

    fn list_environments(&self) -> Result<Vec<Environment>, AppError> {
        self.record("list_environments")?;
        Ok(self.environments.clone())
    }

    fn get_deployment_process(&self, process_id: &str) -> Result<DeploymentProcess, AppError> {
        self.record("get_deployment_process")?;
        self.processes.iter().find(|process| process.id == process_id).cloned().ok_or_else(|| {
            AppError::remote(
                format!("Deployment process {} not found (HTTP 404)", process_id),
                Some(404),
            )
        })
    }

    fn get_channels_for_project(&self, project_id: &str) -> Result<Vec<Channel>, AppError> {
        self.record("get_channels_for_project")?;
        Ok(self
            .channels
            .iter()
            .filter(|channel| channel.project_id == project_id)
            .cloned()
            .collect())
    }

    fn get_release_template(
        &self,
        _process: &DeploymentProcess,
        _channel: &Channel,
    ) -> Result<ReleaseTemplate, AppError> {
        self.record("get_release_template")?;
        Ok(ReleaseTemplate {
            next_version_increment: None,
            packages: self
                .template_actions
                .iter()
                .map(|action| ReleaseTemplatePackage {
                    action_name: action.clone(),
                    package_id: Some(format!("Checkout.{}", action)),
                    feed_id: Some("feeds-builtin".to_string()),
                    version_selected_last_release: None,
                })
                .collect(),
        })
    }

    fn create_release(&self, release: &Release) -> Result<Release, AppError> {
        self.record("create_release")?;
        let mut created = self.created_releases.lock().unwrap();
        let mut saved = release.clone();
        saved.id = Some(format!("Releases-{}", 100 + created.len()));
        created.push(saved.clone());
        Ok(saved)
    }

    fn find_release(
        &self,
        predicate: &dyn Fn(&Release) -> bool,
    ) -> Result<Option<Release>, AppError> {
        self.record("find_release")?;
        Ok(self.releases.lock().unwrap().iter().find(|release| predicate(release)).cloned())
    }

    fn create_deployment(&self, deployment: &Deployment) -> Result<Deployment, AppError> {
        self.record("create_deployment")?;
        let mut created = self.created_deployments.lock().unwrap();
        let mut saved = deployment.clone();
        saved.id = Some(format!("Deployments-{}", 200 + created.len()));
        created.push(saved.clone());
        Ok(saved)
    }
}
