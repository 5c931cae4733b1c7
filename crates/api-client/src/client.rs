use anyhow::{Result, bail};
use tracing::debug;

use fwtag_api_types::{Acquisition, Analysis, Project, Session, UploadEnvelope};

/// Header carrying the Flywheel API key on every request.
pub const API_KEY_HEADER: &str = "X-FW-API-KEY";

/// Typed HTTP client for a Flywheel server.
///
/// Bound to one base URL and API key; every method issues a fresh network
/// request (no caching) and surfaces transport and HTTP errors unmodified.
pub struct FlywheelClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl FlywheelClient {
    /// Create a new client for the given base URL and API key.
    ///
    /// The key is not validated here; a bad key shows up as an auth failure
    /// from the server on the first call.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self::with_client(client, base_url, api_key))
    }

    /// Create from an existing `reqwest::Client` (e.g. shared in tests).
    pub fn with_client(client: reqwest::Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        debug!(path, "GET");
        self.client
            .get(self.url(path))
            .header(API_KEY_HEADER, &self.api_key)
    }

    // ── Containers ────────────────────────────────────────────────────────

    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        let resp = self.get("/projects").send().await?;
        parse_response(resp).await
    }

    pub async fn get_project(&self, id: &str) -> Result<Project> {
        let resp = self.get(&format!("/projects/{id}")).send().await?;
        parse_response(resp).await
    }

    pub async fn list_sessions_for_project(&self, id: &str) -> Result<Vec<Session>> {
        let resp = self.get(&format!("/projects/{id}/sessions")).send().await?;
        parse_response(resp).await
    }

    pub async fn list_analyses_for_project(&self, id: &str) -> Result<Vec<Analysis>> {
        let resp = self.get(&format!("/projects/{id}/analyses")).send().await?;
        parse_response(resp).await
    }

    pub async fn list_acquisitions_for_session(&self, id: &str) -> Result<Vec<Acquisition>> {
        let resp = self
            .get(&format!("/sessions/{id}/acquisitions"))
            .send()
            .await?;
        parse_response(resp).await
    }

    // ── Upload ────────────────────────────────────────────────────────────

    /// Upload a file to a project.
    ///
    /// The whole content goes out as one JSON request body; there is no
    /// chunking or progress reporting. On any 2xx the response body is
    /// discarded and the upload reported as a bare success.
    pub async fn upload_file(
        &self,
        project_id: &str,
        name: &str,
        content: &str,
        content_type: &str,
    ) -> Result<()> {
        let envelope = UploadEnvelope {
            name: name.to_string(),
            content_type: content_type.to_string(),
            content: content.to_string(),
        };
        debug!(project_id, name, "uploading file");
        let resp = self
            .client
            .post(self.url(&format!("/projects/{project_id}/file/upload")))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&envelope)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("{status}: {body}");
        }
        Ok(())
    }
}

/// Parse an HTTP response: return the deserialized body on 2xx,
/// or an error containing the status and body text.
async fn parse_response<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        bail!("{status}: {body}");
    }
    Ok(resp.json().await?)
}
