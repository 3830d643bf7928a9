//! HTTP request and response bodies shared by sensed and sensectl.

use crate::ticket::Ticket;
use serde::{Deserialize, Serialize};

/// Banner returned by `GET /`
pub const BANNER: &str = "SupportSense AI API is running! 🚀";

/// Message returned alongside an updated ticket
pub const UPDATE_MESSAGE: &str = "Ticket updated successfully";

pub const PATH_ROOT: &str = "/";
pub const PATH_HEALTH: &str = "/api/health";
pub const PATH_TICKETS: &str = "/api/tickets";
pub const PATH_SUGGEST: &str = "/api/ai/suggest-response";
pub const PATH_ANALYZE: &str = "/api/ai/analyze-priority";

/// `POST /api/tickets`. Missing text is treated as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTicketRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Body of the suggestion and analysis calls
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextRequest {
    #[serde(default)]
    pub text: Option<String>,
}

impl TextRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionResponse {
    pub suggestion: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTicketResponse {
    pub message: String,
    pub ticket: Ticket,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
