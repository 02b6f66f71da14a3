use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{AnalysisRequest, AnalysisResult};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, info};

pub const ANALYZE_PATH: &str = "/api/v1/analyze";
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Client for the design-token analysis service.
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    http: Client,
    base_url: String,
    api_key: String,
    timeout: Option<Duration>,
}

impl AnalysisClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::new(),
            base_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            timeout: config.timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: None,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), ANALYZE_PATH)
    }

    /// Sends one analysis request. There is no retry: a failure is
    /// returned to the caller as is.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        if request.url.trim().is_empty() {
            return Err(Error::InvalidRequest("url must not be empty".to_string()));
        }

        let endpoint = self.endpoint();
        info!(
            "analyzing {} (format={}, color_format={}, compact={})",
            request.url, request.format, request.color_format, request.compact
        );
        debug!("POST {}", endpoint);

        let mut builder = self
            .http
            .post(&endpoint)
            .header("Content-Type", "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .json(request);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let resp = builder.send().await.map_err(|e| {
            error!("request to {} failed: {}", endpoint, e);
            Error::transport(e)
        })?;

        let status = resp.status();
        if !status.is_success() {
            error!("analysis service answered {}", status);
            return Err(Error::http_status(status.as_u16()));
        }

        let body = resp.text().await.map_err(Error::transport)?;
        debug!("analysis response: {} bytes", body.len());
        let result: AnalysisResult = serde_json::from_str(&body).map_err(|e| {
            error!("could not decode analysis response: {}", e);
            Error::from(e)
        })?;
        info!("analysis of {} complete", request.url);
        Ok(result)
    }
}
