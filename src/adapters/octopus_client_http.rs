//! Octopus Deploy REST client implementation using reqwest.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use log::debug;
use reqwest::Method;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::{
    AppError, Channel, Deployment, DeploymentProcess, Environment, Project, Release,
    ReleaseTemplate, ServerConfig,
};
use crate::ports::OctopusClient;

const X_OCTOPUS_API_KEY: &str = "X-Octopus-ApiKey";
const DEFAULT_STATUS_MESSAGE: &str = "Octopus Deploy request failed";
const NEXT_PAGE_LINK: &str = "Page.Next";
const RELEASE_PAGE_SIZE: u32 = 100;

/// HTTP transport for the Octopus Deploy REST API.
///
/// Each call performs the request(s) it needs exactly once; there is no retry.
pub struct HttpOctopusClient {
    config: ServerConfig,
    client: Client,
}

impl std::fmt::Debug for HttpOctopusClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpOctopusClient")
            .field("server_url", &self.config.server_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl HttpOctopusClient {
    /// Create a new HTTP client for the configured server.
    pub fn new(config: &ServerConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::remote_caused("Failed to create HTTP client", None, e))?;

        Ok(Self { config: config.clone(), client })
    }

    /// Create a client and verify the server answers its API root with the given key.
    pub fn connect(config: &ServerConfig) -> Result<Self, AppError> {
        let client = Self::new(config)?;
        let root: ApiRoot = client.get(client.config.endpoint("/api")?)?;
        debug!(
            "Connected to {} (Octopus {})",
            client.config.server_url,
            root.version.as_deref().unwrap_or("unknown version")
        );
        Ok(client)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!("{} {}", method, url);
        self.client
            .request(method, url)
            .header(X_OCTOPUS_API_KEY, &self.config.api_key)
            .header(ACCEPT, "application/json")
    }

    fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, AppError> {
        self.send(self.request(Method::GET, url))
    }

    fn post<B: Serialize, T: DeserializeOwned>(&self, url: Url, body: &B) -> Result<T, AppError> {
        self.send(
            self.request(Method::POST, url).header(CONTENT_TYPE, "application/json").json(body),
        )
    }

    fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, AppError> {
        let response =
            request.send().map_err(|e| AppError::remote_caused("HTTP request failed", None, e))?;

        let status = response.status();
        let body_text = response.text().map_err(|e| {
            AppError::remote_caused("Failed to read response body", Some(status.as_u16()), e)
        })?;

        if status.is_success() {
            return serde_json::from_str(&body_text).map_err(|e| {
                AppError::remote_caused("Failed to parse response", Some(status.as_u16()), e)
            });
        }

        let message = extract_error_message(&body_text).unwrap_or_else(|| {
            if !body_text.trim().is_empty() {
                body_text.clone()
            } else if status.as_u16() == 401 {
                "Unauthorized: check the API key".to_string()
            } else if status.is_server_error() {
                "Server error".to_string()
            } else {
                DEFAULT_STATUS_MESSAGE.to_string()
            }
        });

        let code = status.as_u16();
        Err(AppError::remote(format!("{} (HTTP {})", message, code), Some(code)))
    }

    /// Resolve a server-provided link.
    ///
    /// App-relative links (`~/api/releases?skip=30`) sit under the configured
    /// virtual directory like any endpoint. Other links are server-absolute.
    fn link(&self, href: &str) -> Result<Url, AppError> {
        if let Some(relative) = href.strip_prefix('~') {
            return self.config.endpoint(relative);
        }
        self.config
            .server_url
            .join(href)
            .map_err(|e| AppError::remote_caused(format!("Invalid link '{}'", href), None, e))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiRoot {
    #[serde(default)]
    version: Option<String>,
}

/// Paged collection envelope used by list endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ResourceCollection<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
    #[serde(default)]
    links: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ErrorBody {
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    errors: Vec<String>,
}

fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<ErrorBody>(body).ok()?;
    let mut message = parsed.error_message?;
    let details: Vec<&str> = parsed
        .errors
        .iter()
        .map(String::as_str)
        .filter(|detail| *detail != message)
        .collect();
    if !details.is_empty() {
        message.push_str(&format!(": {}", details.join("; ")));
    }
    Some(message)
}

impl OctopusClient for HttpOctopusClient {
    fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        self.get(self.config.endpoint("/api/projects/all")?)
    }

    fn list_environments(&self) -> Result<Vec<Environment>, AppError> {
        self.get(self.config.endpoint("/api/environments/all")?)
    }

    fn get_deployment_process(&self, process_id: &str) -> Result<DeploymentProcess, AppError> {
        self.get(self.config.endpoint(&format!("/api/deploymentprocesses/{}", process_id))?)
    }

    fn get_channels_for_project(&self, project_id: &str) -> Result<Vec<Channel>, AppError> {
        let page: ResourceCollection<Channel> =
            self.get(self.config.endpoint(&format!("/api/projects/{}/channels", project_id))?)?;
        Ok(page.items)
    }

    fn get_release_template(
        &self,
        process: &DeploymentProcess,
        channel: &Channel,
    ) -> Result<ReleaseTemplate, AppError> {
        let mut url =
            self.config.endpoint(&format!("/api/deploymentprocesses/{}/template", process.id))?;
        url.query_pairs_mut().append_pair("channel", &channel.id);
        self.get(url)
    }

    fn create_release(&self, release: &Release) -> Result<Release, AppError> {
        self.post(self.config.endpoint("/api/releases")?, release)
    }

    fn find_release(
        &self,
        predicate: &dyn Fn(&Release) -> bool,
    ) -> Result<Option<Release>, AppError> {
        let mut url = self.config.endpoint("/api/releases")?;
        url.query_pairs_mut()
            .append_pair("skip", "0")
            .append_pair("take", &RELEASE_PAGE_SIZE.to_string());

        let mut visited = HashSet::new();
        loop {
            visited.insert(url.clone());
            let page: ResourceCollection<Release> = self.get(url.clone())?;
            if let Some(found) = page.items.into_iter().find(|release| predicate(release)) {
                return Ok(Some(found));
            }

            let next = match page.links.get(NEXT_PAGE_LINK) {
                Some(href) => self.link(href)?,
                None => return Ok(None),
            };
            if visited.contains(&next) {
                debug!("Release paging revisited {}; stopping", next);
                return Ok(None);
            }
            url = next;
        }
    }

    fn create_deployment(&self, deployment: &Deployment) -> Result<Deployment, AppError> {
        self.post(self.config.endpoint("/api/deployments")?, deployment)
    }
}
