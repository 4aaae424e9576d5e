use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use tracing::{debug, instrument, warn};

use crate::client_error::ClientError;
use crate::model::{NoiseEntry, NoiseLevel};

pub const DEFAULT_URL: &str = "https://road-noise.samwarnick.com";

/// HTTP client for the road noise service. Reads are anonymous, writes carry
/// the bearer credential.
#[derive(Clone)]
pub struct NoiseEntryClient {
    client: reqwest::Client,
    url: String,
    key: String,
}

impl NoiseEntryClient {
    pub fn new(url: String, key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
            key,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the full history, newest first.
    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn fetch_all(&self) -> Result<Vec<NoiseEntry>, ClientError> {
        debug!("Requesting entry history");
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        debug!("Received HTTP response with status: {}", status);

        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        debug!("Retrieved body, size: {} bytes", body.len());

        let entries = Self::decode_history(&body)?;
        debug!("Decoded {} entries", entries.len());
        Ok(entries)
    }

    /// Record a new rating and return the entry the service created for it.
    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn post_entry(&self, level: NoiseLevel) -> Result<NoiseEntry, ClientError> {
        if self.key.is_empty() {
            warn!("Posting without a credential; the service will likely reject it");
        }

        let response = self
            .client
            .post(&self.url)
            .header(AUTHORIZATION, format!("Bearer {}", self.key))
            .header(CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(level.to_string())
            .send()
            .await?;
        let status = response.status();
        debug!("Received HTTP response with status: {}", status);

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ClientError::Auth(status.as_u16()));
        }
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let entry: NoiseEntry = serde_json::from_str(&body)?;
        debug!("Service created entry {}", entry.id);
        Ok(entry)
    }

    /// Decode a history body and order it newest first. The service makes no
    /// ordering promise; ties keep their body order.
    fn decode_history(body: &str) -> Result<Vec<NoiseEntry>, ClientError> {
        let mut entries: Vec<NoiseEntry> = serde_json::from_str(body)?;
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(entries)
    }
}
