//! HTTP client for the homework statuses endpoint.

use std::future::Future;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, info};

use super::PracticumError;

/// Maximum number of body characters kept in an error message.
const ERROR_BODY_LIMIT: usize = 200;

/// Source of raw review-status responses.
pub trait HomeworkSource {
    /// Fetches statuses changed since `from_date` (Unix seconds).
    fn fetch(&self, from_date: i64) -> impl Future<Output = Result<Value, PracticumError>> + Send;
}

/// Client for the Practicum homework statuses API.
pub struct PracticumClient {
    http: Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    /// Creates a new client for the given endpoint.
    #[must_use]
    pub fn new(http: Client, endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            token: token.into(),
        }
    }

    /// Returns the configured endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Performs one GET request and returns the parsed JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`PracticumError::Connection`] on transport failures,
    /// [`PracticumError::InvalidStatusCode`] for any status other than 200,
    /// and [`PracticumError::Decode`] when the body is not JSON.
    pub async fn get_api_answer(&self, from_date: i64) -> Result<Value, PracticumError> {
        info!("Requesting {} with from_date={}", self.endpoint, from_date);

        let response = self
            .http
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|source| PracticumError::Connection {
                endpoint: self.endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let reason = status.canonical_reason().unwrap_or("Unknown").to_owned();
            let body = response.text().await.unwrap_or_default();
            return Err(PracticumError::InvalidStatusCode {
                endpoint: self.endpoint.clone(),
                status: status.as_u16(),
                reason,
                body: truncate(&body, ERROR_BODY_LIMIT),
            });
        }

        let body = response.json::<Value>().await.map_err(PracticumError::Decode)?;
        debug!("Received API response");
        Ok(body)
    }
}

impl HomeworkSource for PracticumClient {
    async fn fetch(&self, from_date: i64) -> Result<Value, PracticumError> {
        self.get_api_answer(from_date).await
    }
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

/// Truncates a string for display.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_owned()
    } else {
        format!("{}...", s.chars().take(max_len).collect::<String>())
    }
}
