/// Datamuse client implementing the `WordSource` port
use async_trait::async_trait;
use futures::future::join_all;
use reqwest::{Method, StatusCode};
use tracing::{debug, info, warn};
use wordforge_core::{WordConstraints, WordSource, WordSourceError};
use wordforge_domain::{SourceSettings, WordForgeError};

use super::types::DatamuseWord;
use crate::errors::InfraError;
use crate::http::HttpClient;

/// Word source backed by the Datamuse `/words` endpoint
pub struct DatamuseSource {
    http_client: HttpClient,
    base_url: String,
}

impl DatamuseSource {
    pub fn new(http_client: HttpClient, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http_client, base_url }
    }

    /// Build the HTTP client and source from configuration
    pub fn from_settings(settings: &SourceSettings) -> Result<Self, WordForgeError> {
        Ok(Self::new(HttpClient::from_settings(settings)?, settings.base_url.clone()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Rows for words of exactly `len` letters
    async fn words_of_length(
        &self,
        len: usize,
        limit: usize,
    ) -> Result<Vec<DatamuseWord>, WordSourceError> {
        let pattern = "?".repeat(len);
        let max = limit.to_string();
        let request = self
            .http_client
            .request(Method::GET, format!("{}/words", self.base_url))
            .query(&[("sp", pattern.as_str()), ("md", "f"), ("max", max.as_str())]);

        let response = self.http_client.send(request).await.map_err(network_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(WordSourceError::Network {
                message: format!("datamuse returned HTTP {status}"),
                retryable: is_retryable_status(status),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|err| network_error(WordForgeError::from(InfraError::from(err))))?;
        serde_json::from_str::<Vec<DatamuseWord>>(&body)
            .map_err(|err| WordSourceError::InvalidResponse(format!("unexpected body: {err}")))
    }
}

#[async_trait]
impl WordSource for DatamuseSource {
    async fn query(&self, constraints: &WordConstraints) -> Result<Vec<String>, WordSourceError> {
        // One request per length, all in flight at once, so the call takes as
        // long as the slowest single request chain
        let lengths = constraints.min_length..=constraints.max_length;
        let requests = lengths.map(|len| async move {
            (len, self.words_of_length(len, constraints.limit).await)
        });

        let mut candidates = Vec::new();
        let mut last_error = None;
        for (len, result) in join_all(requests).await {
            match result {
                Ok(rows) => {
                    let total = rows.len();
                    candidates.extend(select_candidates(rows, constraints));
                    debug!(len, total, kept = candidates.len(), "datamuse rows received");
                }
                Err(error) => {
                    warn!(len, %error, "datamuse query failed");
                    last_error = Some(error);
                }
            }
        }

        candidates.truncate(constraints.limit);
        if candidates.is_empty() {
            return Err(last_error.unwrap_or(WordSourceError::NoCandidates));
        }

        info!(
            min_length = constraints.min_length,
            max_length = constraints.max_length,
            count = candidates.len(),
            "datamuse candidates fetched"
        );
        Ok(candidates)
    }
}

/// Plain words above the frequency threshold, uppercased
fn select_candidates(rows: Vec<DatamuseWord>, constraints: &WordConstraints) -> Vec<String> {
    rows.into_iter()
        .filter(|row| row.is_plain_word() && constraints.accepts_length(row.word.len()))
        .filter(|row| row.frequency().is_some_and(|f| f > constraints.min_frequency))
        .map(|row| row.word.to_ascii_uppercase())
        .collect()
}

fn is_retryable_status(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}

// Only transport-level failures are worth another try later
fn network_error(err: WordForgeError) -> WordSourceError {
    let retryable = matches!(err, WordForgeError::Network(_));
    WordSourceError::Network { message: err.to_string(), retryable }
}
