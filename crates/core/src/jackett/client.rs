//! HTTP client for the Jackett API.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use tracing::{debug, warn};

use crate::config::JackettConfig;

use super::{ClientError, RawIndexerRecord};

const USER_AGENT: &str = concat!("jackbridge/", env!("CARGO_PKG_VERSION"));

/// Client for the Jackett HTTP API.
///
/// Owns the reqwest client (and with it the session cookie jar captured by
/// [`JackettClient::authenticate`]) plus the retry budget for the indexer
/// listing call. The configured base URL is normalized once at construction.
pub struct JackettClient {
    client: Client,
    base_url: String,
    api_key: String,
    password: Option<String>,
    retry_attempts: u32,
    retry_delay: Duration,
}

impl JackettClient {
    /// Create a new client from the Jackett connection config.
    pub fn new(config: &JackettConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .cookie_store(true)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ClientError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.host.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            password: config.password.clone().filter(|p| !p.is_empty()),
            retry_attempts: config.retry_attempts.max(1),
            retry_delay: Duration::from_secs(config.retry_delay_secs),
        })
    }

    /// The normalized Jackett base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Log in against the Jackett dashboard when an admin password is
    /// configured. Jackett expects the password both as form body and query
    /// parameter; a 200 leaves the session cookie in the client's jar.
    ///
    /// Returns whether a session was established. A failed login is logged
    /// and swallowed: most deployments have no admin password, and the API
    /// key header alone is often sufficient, so the absence of a session
    /// must never abort indexer listing.
    pub async fn authenticate(&self) -> bool {
        let Some(password) = &self.password else {
            return false;
        };

        let url = format!("{}/UI/Dashboard", self.base_url);
        let mut form = HashMap::new();
        form.insert("password", password.as_str());

        match self
            .client
            .post(&url)
            .query(&[("password", password.as_str())])
            .form(&form)
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => {
                debug!("Jackett dashboard session established");
                true
            }
            Ok(response) => {
                warn!(status = %response.status(), "Jackett dashboard login rejected");
                false
            }
            Err(e) => {
                warn!(error = %e, "Jackett dashboard login failed");
                false
            }
        }
    }

    /// Fetch the configured indexers.
    ///
    /// Transient failures (transport errors, timeouts, 5xx) are retried up
    /// to the configured attempt budget with a fixed delay in between.
    /// 401/403 are permanent and returned immediately without retrying.
    pub async fn fetch_indexers(&self) -> Result<Vec<RawIndexerRecord>, ClientError> {
        let url = format!("{}/api/v2.0/indexers?configured=true", self.base_url);

        let mut last_error = None;
        for attempt in 1..=self.retry_attempts {
            crate::metrics::JACKETT_REQUESTS
                .with_label_values(&["list_indexers"])
                .inc();

            match self.try_fetch_indexers(&url).await {
                Ok(records) => {
                    debug!(count = records.len(), "Fetched Jackett indexers");
                    return Ok(records);
                }
                Err(e) if e.is_transient() && attempt < self.retry_attempts => {
                    warn!(
                        attempt = attempt,
                        max_attempts = self.retry_attempts,
                        error = %e,
                        "Jackett indexer listing failed, retrying"
                    );
                    last_error = Some(e);
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(e) => return Err(e),
            }
        }

        // Unreachable with retry_attempts >= 1, but keep the compiler honest.
        Err(last_error.unwrap_or_else(|| ClientError::ConnectionFailed("no attempts".into())))
    }

    async fn try_fetch_indexers(&self, url: &str) -> Result<Vec<RawIndexerRecord>, ClientError> {
        let response = self
            .client
            .get(url)
            .header("X-Api-Key", &self.api_key)
            .header("Accept", "application/json, text/javascript, */*; q=0.01")
            .send()
            .await
            .map_err(map_transport_error)?;

        let response = check_status(response).await?;

        response
            .json::<Vec<RawIndexerRecord>>()
            .await
            .map_err(|e| ClientError::InvalidResponse(format!("indexer list: {}", e)))
    }

    /// Run a torznab keyword search against one indexer, or against the
    /// `all` aggregate when no indexer is targeted. Returns the raw XML body.
    pub async fn query(
        &self,
        indexer_id: Option<&str>,
        keyword: &str,
    ) -> Result<String, ClientError> {
        let indexer = indexer_id.unwrap_or("all");
        let url = format!(
            "{}/api/v2.0/indexers/{}/results/torznab/api?apikey={}&t=search&q={}",
            self.base_url,
            urlencoding::encode(indexer),
            urlencoding::encode(&self.api_key),
            urlencoding::encode(keyword)
        );

        crate::metrics::JACKETT_REQUESTS
            .with_label_values(&["query"])
            .inc();

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await
            .map_err(map_transport_error)?;

        let response = check_status(response).await?;

        response
            .text()
            .await
            .map_err(|e| ClientError::InvalidResponse(format!("torznab body: {}", e)))
    }
}

fn map_transport_error(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout
    } else {
        ClientError::ConnectionFailed(e.to_string())
    }
}

async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(ClientError::Unauthorized(status.as_u16()));
    }

    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Http {
        status: status.as_u16(),
        body: body.chars().take(200).collect(),
    })
}
