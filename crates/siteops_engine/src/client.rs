use std::time::Duration;

use futures_util::StreamExt;
use ops_logging::ops_debug;
use reqwest::Url;

use crate::{FailureKind, SiteOpError, SiteOpRequest, SiteOpResponse};

const SITE_OP_PATH: &str = "site-op";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Prefix every endpoint path is resolved against.
    pub script_root: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            script_root: "http://localhost:5000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait SiteOpClient: Send + Sync {
    async fn perform(&self, request: &SiteOpRequest) -> Result<SiteOpResponse, SiteOpError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestSiteOpClient {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestSiteOpClient {
    pub fn new(settings: ClientSettings) -> Result<Self, SiteOpError> {
        // Reject a bad root up front instead of once per site.
        Url::parse(&settings.script_root)
            .map_err(|err| SiteOpError::new(FailureKind::InvalidScriptRoot, err.to_string()))?;

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| SiteOpError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self { settings, client })
    }
}

#[async_trait::async_trait]
impl SiteOpClient for ReqwestSiteOpClient {
    async fn perform(&self, request: &SiteOpRequest) -> Result<SiteOpResponse, SiteOpError> {
        let url = site_op_url(&self.settings.script_root, request)?;
        ops_debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SiteOpError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(SiteOpError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(SiteOpError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            body.extend_from_slice(&chunk);
        }

        decode_site_op_response(&body)
    }
}

/// Builds `<script_root>/site-op?site=..&op=..&verbose=..&dry_run=..`.
pub fn site_op_url(script_root: &str, request: &SiteOpRequest) -> Result<Url, SiteOpError> {
    let base = format!("{}/{}", script_root.trim_end_matches('/'), SITE_OP_PATH);
    let mut url = Url::parse(&base)
        .map_err(|err| SiteOpError::new(FailureKind::InvalidScriptRoot, err.to_string()))?;
    url.query_pairs_mut()
        .append_pair("site", &request.site)
        .append_pair("op", &request.op)
        .append_pair("verbose", bool_param(request.verbose))
        .append_pair("dry_run", bool_param(request.dry_run));
    Ok(url)
}

pub fn decode_site_op_response(body: &[u8]) -> Result<SiteOpResponse, SiteOpError> {
    serde_json::from_slice(body).map_err(|err| SiteOpError::new(FailureKind::Decode, err.to_string()))
}

// The endpoint compares against the literal string "true".
fn bool_param(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn map_reqwest_error(err: reqwest::Error) -> SiteOpError {
    if err.is_timeout() {
        return SiteOpError::new(FailureKind::Timeout, err.to_string());
    }
    SiteOpError::new(FailureKind::Network, err.to_string())
}
