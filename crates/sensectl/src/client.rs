//! HTTP client for communicating with sensed.

use anyhow::{anyhow, Context, Result};
use reqwest::{Response, StatusCode};
use sense_shared::api::{
    CreateTicketRequest, ErrorResponse, HealthResponse, SuggestionResponse, TextRequest,
    UpdateTicketResponse, PATH_ANALYZE, PATH_HEALTH, PATH_SUGGEST, PATH_TICKETS,
};
use sense_shared::{CreatedTicket, PriorityEstimate, Ticket, TicketPatch};
use serde::de::DeserializeOwned;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the sensed HTTP API
pub struct SensedClient {
    http: reqwest::Client,
    base_url: String,
}

impl SensedClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("sensectl/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Get daemon health
    pub async fn health(&self) -> Result<HealthResponse> {
        let response = self.send(self.http.get(self.url(PATH_HEALTH))).await?;
        decode(response).await
    }

    /// List tickets in ranked order
    pub async fn list(&self) -> Result<Vec<Ticket>> {
        let response = self.send(self.http.get(self.url(PATH_TICKETS))).await?;
        decode(response).await
    }

    /// Submit a ticket
    pub async fn create(&self, text: &str, source: Option<&str>) -> Result<CreatedTicket> {
        let body = CreateTicketRequest {
            text: Some(text.to_string()),
            source: source.map(str::to_string),
        };
        let response = self
            .send(self.http.post(self.url(PATH_TICKETS)).json(&body))
            .await?;
        decode(response).await
    }

    /// Apply a partial update
    pub async fn update(&self, id: i64, patch: &TicketPatch) -> Result<UpdateTicketResponse> {
        let url = format!("{}/{}", self.url(PATH_TICKETS), id);
        let response = self.send(self.http.patch(url).json(patch)).await?;
        decode(response).await
    }

    /// Get a suggested reply
    pub async fn suggest(&self, text: &str) -> Result<SuggestionResponse> {
        let response = self
            .send(self.http.post(self.url(PATH_SUGGEST)).json(&TextRequest::new(text)))
            .await?;
        decode(response).await
    }

    /// Get a standalone priority estimate
    pub async fn analyze(&self, text: &str) -> Result<PriorityEstimate> {
        let response = self
            .send(self.http.post(self.url(PATH_ANALYZE)).json(&TextRequest::new(text)))
            .await?;
        decode(response).await
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response> {
        request.send().await.map_err(|e| {
            anyhow!(
                "Cannot reach sensed at {}: {}\n\n\
                 Start the daemon with `sensed` or point --url / $SENSED_URL at it.",
                self.base_url,
                e
            )
        })
    }
}

/// Parse a success body, or turn the daemon's `{"error": ...}` into an error
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let bytes = response.bytes().await.context("Failed to read response")?;

    if !status.is_success() {
        return Err(error_from_body(status, &bytes));
    }

    serde_json::from_slice(&bytes).context("Unexpected response from sensed")
}

fn error_from_body(status: StatusCode, bytes: &[u8]) -> anyhow::Error {
    match serde_json::from_slice::<ErrorResponse>(bytes) {
        Ok(body) => anyhow!("{} ({})", body.error, status),
        Err(_) => anyhow!("sensed returned {}", status),
    }
}
