//! HTTP implementation of the directory port
//!
//! Talks JSON to the journal API with reqwest. Decoding is split out into
//! plain functions over `(status, body)` so it can be tested without a server.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::Directory;
use crate::config::Settings;
use crate::error::{JournalError, JournalResult};
use crate::models::{
    Client, Department, JournalEntry, JournalEntryId, NewClient, NewJournalEntry, NewVehicle,
    Service, Vehicle,
};

/// Longest backend message quoted in an error
const MAX_DETAIL_LEN: usize = 200;

/// List responses wrap their rows in `results`
#[derive(Deserialize)]
struct ResultsEnvelope<T> {
    results: Option<Vec<T>>,
}

#[derive(Serialize)]
struct CommentPatch<'a> {
    comment: &'a str,
}

/// Directory backed by the journal HTTP API
#[derive(Debug, Clone)]
pub struct HttpDirectory {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpDirectory {
    /// Create a directory for the API rooted at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> JournalResult<Self> {
        let mut base = Url::parse(base_url.trim()).map_err(|e| {
            JournalError::Config(format!("Invalid API base URL '{}': {}", base_url, e))
        })?;
        // Url::join drops the last path segment unless it ends with a slash
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| JournalError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base,
            client,
        })
    }

    pub fn from_settings(settings: &Settings) -> JournalResult<Self> {
        Self::new(
            &settings.api_base_url,
            Duration::from_secs(settings.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> JournalResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| JournalError::Config(format!("Invalid endpoint '{}': {}", path, e)))
    }

    async fn get_results<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> JournalResult<Vec<T>> {
        let url = self.endpoint(path)?;
        let started = Instant::now();
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(network_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(network_error)?;
        tracing::debug!(path, %status, elapsed_ms = started.elapsed().as_millis() as u64, "GET");
        decode_results(status, &body)
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&B>,
    ) -> JournalResult<T> {
        let url = self.endpoint(path)?;
        let started = Instant::now();
        let mut request = self.client.request(method.clone(), url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(network_error)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(network_error)?;
        tracing::debug!(%method, path, %status, elapsed_ms = started.elapsed().as_millis() as u64, "write");
        decode_object(status, &bytes)
    }
}

#[async_trait]
impl Directory for HttpDirectory {
    async fn list_journal_entries(
        &self,
        department: Department,
    ) -> JournalResult<Vec<JournalEntry>> {
        self.get_results("journals/", &[("department", department.as_str())])
            .await
    }

    async fn list_services(&self) -> JournalResult<Vec<Service>> {
        self.get_results("services/", &[]).await
    }

    async fn search_clients(&self, query: &str) -> JournalResult<Vec<Client>> {
        self.get_results("clients/auto_find/", &[("q", query)]).await
    }

    async fn search_vehicles_by_plate(&self, query: &str) -> JournalResult<Vec<Vehicle>> {
        self.get_results("vehicles/auto_find_by_number/", &[("plate_number", query)])
            .await
    }

    async fn create_client(&self, client: &NewClient) -> JournalResult<Client> {
        self.send_json(reqwest::Method::POST, "clients/", Some(client))
            .await
    }

    async fn create_vehicle(&self, vehicle: &NewVehicle) -> JournalResult<Vehicle> {
        self.send_json(reqwest::Method::POST, "vehicles/", Some(vehicle))
            .await
    }

    async fn create_journal_entry(&self, entry: &NewJournalEntry) -> JournalResult<JournalEntry> {
        self.send_json(reqwest::Method::POST, "journals/", Some(entry))
            .await
    }

    async fn append_comment(
        &self,
        id: JournalEntryId,
        comment: &str,
    ) -> JournalResult<JournalEntry> {
        let path = format!("journals/{}/", id.get());
        self.send_json(
            reqwest::Method::PATCH,
            &path,
            Some(&CommentPatch { comment }),
        )
        .await
    }

    async fn toggle_priority(&self, id: JournalEntryId) -> JournalResult<JournalEntry> {
        let path = format!("journals/{}/toggle-priority/", id.get());
        self.send_json::<(), _>(reqwest::Method::POST, &path, None)
            .await
    }
}

fn network_error(err: reqwest::Error) -> JournalError {
    JournalError::Network(err.to_string())
}

/// Decode a `{results: [...]}` list response
pub(crate) fn decode_results<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
) -> JournalResult<Vec<T>> {
    check_status(status, body)?;
    let envelope: ResultsEnvelope<T> = serde_json::from_slice(body)
        .map_err(|e| JournalError::InvalidResponse(format!("malformed list payload: {}", e)))?;
    envelope.results.ok_or_else(|| {
        JournalError::InvalidResponse("response is missing the `results` list".into())
    })
}

/// Decode a single-object response
pub(crate) fn decode_object<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
) -> JournalResult<T> {
    check_status(status, body)?;
    serde_json::from_slice(body)
        .map_err(|e| JournalError::InvalidResponse(format!("malformed payload: {}", e)))
}

fn check_status(status: StatusCode, body: &[u8]) -> JournalResult<()> {
    if status.is_success() {
        return Ok(());
    }
    let detail = error_detail(body);
    if status == StatusCode::BAD_REQUEST {
        return Err(JournalError::Validation(detail));
    }
    Err(JournalError::InvalidResponse(format!(
        "unexpected status {}: {}",
        status, detail
    )))
}

/// Pull a readable message out of an error body
///
/// The backend answers either `{"error": "..."}` or a map of field name to
/// a list of messages.
fn error_detail(body: &[u8]) -> String {
    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => {
            if let Some(message) = map.get("error").and_then(|v| v.as_str()) {
                return message.to_string();
            }
            let parts: Vec<String> = map
                .iter()
                .map(|(field, value)| match value {
                    serde_json::Value::Array(items) => {
                        let messages: Vec<String> = items
                            .iter()
                            .map(|m| m.as_str().map(str::to_string).unwrap_or_else(|| m.to_string()))
                            .collect();
                        format!("{}: {}", field, messages.join(" "))
                    }
                    serde_json::Value::String(s) => format!("{}: {}", field, s),
                    other => format!("{}: {}", field, other),
                })
                .collect();
            parts.join("; ")
        }
        Ok(other) => other.to_string(),
        Err(_) => {
            let text = String::from_utf8_lossy(body);
            let text = text.trim();
            if text.is_empty() {
                "empty response body".to_string()
            } else {
                text.chars().take(MAX_DETAIL_LEN).collect()
            }
        }
    }
}
