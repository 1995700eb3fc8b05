use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Channel metadata returned alongside a field feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelInfo {
    pub id: Option<u64>,
    pub name: String,
    pub description: Option<String>,
    /// `field1`..`field8` display names plus anything else the API sends
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl ChannelInfo {
    /// Display name configured for `field{field_id}`, if the channel has one
    pub fn field_name(&self, field_id: &str) -> Option<&str> {
        self.extra
            .get(&format!("field{}", field_id))
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// One time-stamped record of a channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feed {
    pub created_at: DateTime<Utc>,
    pub entry_id: Option<u64>,
    /// Field values keyed `field{N}`; strings in practice, null when unset
    #[serde(flatten)]
    pub fields: HashMap<String, Value>,
}

impl Feed {
    pub fn field(&self, field_id: &str) -> Option<&Value> {
        self.fields.get(&format!("field{}", field_id))
    }
}

/// Response from GET /channels/{channel}/fields/{field}.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldFeedResponse {
    pub channel: ChannelInfo,
    #[serde(default)]
    pub feeds: Vec<Feed>,
}

/// Comprehensive error type for API operations
#[derive(Debug, Clone)]
pub enum ApiError {
    /// 400 Bad Request
    BadRequest(String),
    /// 401 Unauthorized
    Unauthorized(String),
    /// 403 Forbidden
    Forbidden(String),
    /// 404 Not Found
    NotFound(String),
    /// 429 Too Many Requests
    RateLimited(String),
    /// 5xx Server Error
    ServerError(u16, String),
    /// Other HTTP errors
    HttpError(u16, String),
    /// Network/request error
    RequestError(String),
    /// Deserialization error
    DeserializationError(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::RateLimited(msg) => write!(f, "Rate Limited: {}", msg),
            ApiError::ServerError(code, msg) => write!(f, "Server Error ({}): {}", code, msg),
            ApiError::HttpError(code, msg) => write!(f, "HTTP Error ({}): {}", code, msg),
            ApiError::RequestError(msg) => write!(f, "Request Error: {}", msg),
            ApiError::DeserializationError(msg) => write!(f, "Deserialization Error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}
