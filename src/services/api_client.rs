use std::fmt;
use std::time::Duration;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, IntoUrl, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use uuid::Uuid;
use crate::config::constants::REQUEST_ID_HEADER;
use crate::errors::{ClientError, ClientResult};
use crate::structs::analysis::analysis_created::AnalysisCreated;
use crate::structs::analysis::analysis_detail::AnalysisDetail;
use crate::structs::analysis::analysis_filter::AnalysisFilter;
use crate::structs::analysis::analysis_page::AnalysisPage;
use crate::structs::analysis::analysis_summary::AnalysisSummary;
use crate::structs::api_error_body::ApiErrorBody;
use crate::structs::config::api_config::ApiConfig;
use crate::structs::detection_thresholds::DetectionThresholds;
use crate::structs::health_status::HealthStatus;
use crate::structs::notification::unread_notifications::UnreadNotifications;
use crate::structs::report::threat_report::ThreatReport;
use crate::structs::staged_file::StagedFile;
use crate::traits::threat_modeling_api::ThreatModelingApi;

/// Per-call deadline and how a timeout should be reported.
#[derive(Debug, Clone, Copy)]
struct Deadline {
    timeout: Duration,
    long_running: bool,
}

/// What a 404 refers to, when the endpoint addresses a single resource.
type Lookup<'a> = Option<(&'a str, &'a str)>;

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ClientError::config_error(&format!("cannot build HTTP client: {}", e), Some("api"), None))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    const fn short(&self) -> Deadline {
        Deadline { timeout: self.config.request_timeout(), long_running: false }
    }

    const fn analysis(&self) -> Deadline {
        Deadline { timeout: self.config.analysis_timeout(), long_running: true }
    }

    const fn notification(&self) -> Deadline {
        Deadline { timeout: self.config.notification_timeout(), long_running: false }
    }

    fn request(&self, method: Method, path: &str, deadline: Deadline) -> RequestBuilder {
        self.request_to(method, self.config.endpoint(path), deadline)
    }

    fn request_to<U: IntoUrl + fmt::Display>(&self, method: Method, url: U, deadline: Deadline) -> RequestBuilder {
        let request_id = Uuid::new_v4().to_string();
        log::debug!("➡️  {} {} [{}]", method, url, request_id);

        self.client
            .request(method, url)
            .header(REQUEST_ID_HEADER, request_id)
            .timeout(deadline.timeout)
    }

    /// Endpoint URL with each segment percent-encoded, so an id always
    /// stays a single path segment.
    fn resource_url(&self, segments: &[&str]) -> ClientResult<Url> {
        let base = self.config.endpoint("/");
        let invalid = |reason: &str| {
            ClientError::config_error(&format!("invalid API URL '{}': {}", base, reason), Some("api.base_url"), None)
        };

        let mut url = Url::parse(&base).map_err(|e| invalid(&e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, operation: &str, builder: RequestBuilder, deadline: Deadline, lookup: Lookup<'_>) -> ClientResult<Response> {
        let response = builder
            .send()
            .await
            .map_err(|e| Self::transport_error(operation, &e, deadline))?;

        let status = response.status();
        log::debug!("⬅️  {} answered {}", operation, status);

        if status.is_success() {
            return Ok(response);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            if let Some((resource, id)) = lookup {
                return Err(ClientError::not_found(resource, id));
            }
        }

        let text = response.text().await.unwrap_or_default();
        Err(Self::server_error(status.as_u16(), &text))
    }

    async fn read_json<T: DeserializeOwned>(operation: &str, response: Response, deadline: Deadline) -> ClientResult<T> {
        let text = response
            .text()
            .await
            .map_err(|e| Self::transport_error(operation, &e, deadline))?;
        Ok(serde_json::from_str(&text)?)
    }

    fn transport_error(operation: &str, error: &reqwest::Error, deadline: Deadline) -> ClientError {
        if error.is_timeout() {
            log::warn!("⏱️  {} timed out after {}s", operation, deadline.timeout.as_secs());
            return ClientError::timeout(operation, deadline.timeout.as_secs(), deadline.long_running);
        }
        log::warn!("🌐 {} failed without a response: {}", operation, error);
        ClientError::network_error(operation, error.url().map(|u| u.as_str()), &error.to_string())
    }

    fn server_error(status_code: u16, body: &str) -> ClientError {
        let parsed: ApiErrorBody = serde_json::from_str(body).unwrap_or_default();
        let message = parsed.message().unwrap_or_else(|| {
            if body.trim().is_empty() {
                format!("Request failed with status {}", status_code)
            } else {
                body.trim().to_string()
            }
        });
        ClientError::server_error(Some(status_code), &message, parsed.details())
    }

    fn file_part(file: &StagedFile) -> ClientResult<Part> {
        Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.mime_type)
            .map_err(|_| ClientError::validation_error("file", &file.mime_type, "not a valid MIME type", None))
    }
}

#[async_trait]
impl ThreatModelingApi for ApiClient {

    async fn analyze_diagram(&self, file: &StagedFile, thresholds: &DetectionThresholds) -> ClientResult<ThreatReport> {
        let operation = "analyze diagram";
        let deadline = self.analysis();

        let mut form = Form::new().part("file", Self::file_part(file)?);
        for (name, value) in thresholds.form_fields() {
            form = form.text(name, value);
        }

        let builder = self.request(Method::POST, "/threat-model/analyze", deadline).multipart(form);
        let response = self.send(operation, builder, deadline, None).await?;
        Self::read_json(operation, response, deadline).await
    }

    async fn create_analysis(&self, file: &StagedFile) -> ClientResult<AnalysisCreated> {
        let operation = "create analysis";
        let deadline = self.analysis();

        let form = Form::new().part("file", Self::file_part(file)?);
        let builder = self.request(Method::POST, "/analyses", deadline).multipart(form);
        let response = self.send(operation, builder, deadline, None).await?;
        let created: AnalysisCreated = Self::read_json(operation, response, deadline).await?;

        log::info!("📤 Analysis {} created ({})", created.code, created.status);
        Ok(created)
    }

    async fn get_analysis_detail(&self, id: &str) -> ClientResult<AnalysisDetail> {
        let operation = "fetch analysis detail";
        let deadline = self.short();

        let url = self.resource_url(&["analyses", id])?;
        let builder = self.request_to(Method::GET, url, deadline);
        let response = self.send(operation, builder, deadline, Some(("Analysis", id))).await?;
        Self::read_json(operation, response, deadline).await
    }

    async fn list_analyses(&self, filter: &AnalysisFilter) -> ClientResult<Vec<AnalysisSummary>> {
        let operation = "list analyses";
        let deadline = self.short();

        let builder = self
            .request(Method::GET, "/analyses", deadline)
            .query(&filter.query_pairs());
        let response = self.send(operation, builder, deadline, None).await?;
        let page: AnalysisPage = Self::read_json(operation, response, deadline).await?;
        Ok(page.into_items())
    }

    async fn get_unread_notifications(&self, limit: u32) -> ClientResult<UnreadNotifications> {
        let operation = "fetch unread notifications";
        let deadline = self.notification();

        let builder = self
            .request(Method::GET, "/notifications/unread", deadline)
            .query(&[("limit", limit)]);
        let response = self.send(operation, builder, deadline, None).await?;
        Self::read_json(operation, response, deadline).await
    }

    async fn mark_notification_read(&self, id: &str) -> ClientResult<()> {
        let operation = "mark notification read";
        let deadline = self.notification();

        let url = self.resource_url(&["notifications", id, "read"])?;
        let builder = self.request_to(Method::POST, url, deadline);
        self.send(operation, builder, deadline, Some(("Notification", id))).await?;
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let operation = "health check";
        let deadline = self.short();

        let builder = self.request(Method::GET, "/health", deadline);
        let response = match self.send(operation, builder, deadline, None).await {
            Ok(response) => response,
            Err(e) => {
                log::debug!("Health check failed: {}", e);
                return false;
            }
        };

        match Self::read_json::<HealthStatus>(operation, response, deadline).await {
            Ok(health) => health.is_healthy(),
            Err(e) => {
                log::debug!("Health payload unreadable: {}", e);
                false
            }
        }
    }
}
