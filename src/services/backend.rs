use crate::models::{PageResponse, RawUser};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the matches backend
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Backend returned status {0}")]
    Status(u16),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Where the view engine gets its records from
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch one page of users with the total number of users available
    async fn fetch_page(&self, page_num: u64, page_size: u64) -> Result<PageResponse, TransportError>;

    /// Fetch a single user; `Ok(None)` when the backend has no such record
    async fn fetch_user_detail(&self, user_id: &str) -> Result<Option<RawUser>, TransportError>;
}

/// Client for the `matches_by_user` HTTP endpoint
///
/// - `GET /matches_by_user?page_num=N&page_size=M` answers `{ "data": [...], "total": T }`
/// - `GET /matches_by_user?user_id=ID` answers a single user object or `null`
pub struct HttpDataSource {
    base_url: String,
    client: Client,
}

impl HttpDataSource {
    /// Create a new backend client
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { base_url, client })
    }

    fn endpoint(&self) -> String {
        format!("{}/matches_by_user", self.base_url.trim_end_matches('/'))
    }

    async fn get_json(&self, url: &str) -> Result<Value, TransportError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Backend request {} failed: {} - {}", url, status, body);
            return Err(TransportError::Status(status.as_u16()));
        }

        Ok(response.json().await?)
    }
}

/// Read the reported total; integer-valued floats and numeric strings count
fn parse_total(value: Option<&Value>) -> Result<u64, TransportError> {
    let parsed = match value {
        None | Some(Value::Null) => return Ok(0),
        Some(Value::Number(n)) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        Some(_) => None,
    };

    parsed.ok_or_else(|| {
        let shown = value.map(Value::to_string).unwrap_or_default();
        TransportError::InvalidResponse(format!("total is not a non-negative integer: {}", shown))
    })
}

#[async_trait]
impl DataSource for HttpDataSource {
    async fn fetch_page(&self, page_num: u64, page_size: u64) -> Result<PageResponse, TransportError> {
        let url = format!(
            "{}?page_num={}&page_size={}",
            self.endpoint(),
            page_num,
            page_size
        );

        tracing::debug!("Fetching page from: {}", url);

        let json = self.get_json(&url).await?;

        let total = parse_total(json.get("total"))?;

        let documents: &[Value] = match json.get("data") {
            Some(Value::Array(docs)) => docs.as_slice(),
            Some(Value::Null) | None => &[],
            Some(_) => {
                return Err(TransportError::InvalidResponse("data is not an array".into()));
            }
        };

        let data: Vec<RawUser> = documents
            .iter()
            .filter_map(|doc| match serde_json::from_value(doc.clone()) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!("Skipping undecodable user record: {}", e);
                    None
                }
            })
            .collect();

        tracing::debug!("Fetched {} users (total: {})", data.len(), total);

        Ok(PageResponse { data, total })
    }

    async fn fetch_user_detail(&self, user_id: &str) -> Result<Option<RawUser>, TransportError> {
        let url = format!("{}?user_id={}", self.endpoint(), urlencoding::encode(user_id));

        tracing::debug!("Fetching detail for user: {}", user_id);

        let json = self.get_json(&url).await?;

        if json.is_null() {
            return Ok(None);
        }

        serde_json::from_value(json)
            .map(Some)
            .map_err(|e| TransportError::InvalidResponse(format!("Failed to parse user: {}", e)))
    }
}
