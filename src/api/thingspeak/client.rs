use reqwest::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use super::models::{ApiError, FieldFeedResponse};
use tracing::{debug, warn};

/// ThingSpeak read API client
pub struct ThingSpeakClient {
    http_client: HttpClient,
    base_url: String,
}

impl ThingSpeakClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.thingspeak.com";

    /// Create a new ThingSpeak API client
    pub fn new() -> Self {
        Self::with_base_url(Self::DEFAULT_BASE_URL.to_string())
    }

    /// Create a new client with custom base URL (for testing)
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn create_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// Build `{base}/channels/{channel}/fields/{field}.json?api_key={key}&{query}`
    ///
    /// The key and query parts are left out when not configured.
    pub fn field_feed_url(
        &self,
        channel_id: &str,
        field_id: &str,
        query: Option<&str>,
        read_key: Option<&str>,
    ) -> String {
        let mut url = format!("{}/channels/{}/fields/{}.json", self.base_url, channel_id, field_id);
        let params: Vec<String> = read_key
            .map(|k| format!("api_key={}", k))
            .into_iter()
            .chain(query.map(str::to_string))
            .collect();
        if !params.is_empty() {
            url.push('?');
            url.push_str(&params.join("&"));
        }
        url
    }

    /// Parse error response based on HTTP status code
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ApiError {
        let status_code = status.as_u16();
        let body_text = response.text().await.unwrap_or_default();

        match status_code {
            400 => {
                // ThingSpeak sometimes wraps the reason in {"status": ..., "error": {...}}
                if let Ok(err_json) = serde_json::from_str::<serde_json::Value>(&body_text) {
                    let message = err_json
                        .pointer("/error/details")
                        .or_else(|| err_json.get("message"))
                        .and_then(|v| v.as_str())
                        .unwrap_or(&body_text);
                    ApiError::BadRequest(message.to_string())
                } else {
                    ApiError::BadRequest(body_text)
                }
            }
            401 => ApiError::Unauthorized(body_text),
            403 => ApiError::Forbidden(body_text),
            404 => ApiError::NotFound(body_text),
            429 => {
                warn!("Rate limited by ThingSpeak");
                ApiError::RateLimited(body_text)
            }
            500..=599 => {
                warn!("Server error {}: {}", status_code, body_text);
                ApiError::ServerError(status_code, body_text)
            }
            _ => ApiError::HttpError(status_code, body_text),
        }
    }

    /// GET /channels/{channel_id}/fields/{field_id}.json
    ///
    /// Fetches the feed for one field of a channel together with the
    /// channel metadata. Exactly one request is made; there is no retry.
    ///
    /// # Returns
    /// * `Ok(FieldFeedResponse)` - Channel info and feeds, oldest first
    /// * `Err(ApiError)` - Transport, status or body error
    pub async fn get_field_feed(
        &self,
        channel_id: &str,
        field_id: &str,
        query: Option<&str>,
        read_key: Option<&str>,
    ) -> Result<FieldFeedResponse, ApiError> {
        let url = self.field_feed_url(channel_id, field_id, query, read_key);
        debug!("GET {}/channels/{}/fields/{}.json", self.base_url, channel_id, field_id);

        let response = self.http_client
            .get(&url)
            .headers(Self::create_headers())
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        response
            .json::<FieldFeedResponse>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }
}

impl Default for ThingSpeakClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::thingspeak::test_support::serve_once;
    use tokio::net::TcpListener;

    #[test]
    fn test_field_feed_url_full() {
        let client = ThingSpeakClient::new();
        let url = client.field_feed_url("123", "4", Some("results=10"), Some("ABCDEF"));
        assert_eq!(
            url,
            "https://api.thingspeak.com/channels/123/fields/4.json?api_key=ABCDEF&results=10"
        );
    }

    #[test]
    fn test_field_feed_url_without_optional_parts() {
        let client = ThingSpeakClient::with_base_url("http://localhost:8080/".to_string());
        assert_eq!(
            client.field_feed_url("1", "2", None, None),
            "http://localhost:8080/channels/1/fields/2.json"
        );
        assert_eq!(
            client.field_feed_url("1", "2", Some("results=5"), None),
            "http://localhost:8080/channels/1/fields/2.json?results=5"
        );
    }

    #[tokio::test]
    async fn test_get_field_feed_success() {
        let body = r#"{"channel":{"id":123,"name":"Office","field4":"Humidity"},"feeds":[{"created_at":"2024-05-01T12:00:00Z","entry_id":1,"field4":"40.1"},{"created_at":"2024-05-01T12:05:00Z","entry_id":2,"field4":"41.7"}]}"#;
        let (base, server) = serve_once("200 OK", body).await;
        let client = ThingSpeakClient::with_base_url(base);

        let resp = client
            .get_field_feed("123", "4", Some("results=2"), Some("KEY"))
            .await
            .unwrap();
        assert_eq!(resp.channel.name, "Office");
        assert_eq!(resp.channel.field_name("4"), Some("Humidity"));
        assert_eq!(resp.feeds.len(), 2);

        let request_line = server.await.unwrap();
        assert_eq!(
            request_line,
            "GET /channels/123/fields/4.json?api_key=KEY&results=2 HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn test_get_field_feed_not_found() {
        let (base, server) = serve_once("404 Not Found", r#"{"status":"404"}"#).await;
        let client = ThingSpeakClient::with_base_url(base);

        let err = client.get_field_feed("999", "1", None, None).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_get_field_feed_bad_body() {
        // ThingSpeak answers "-1" for private channels without a key
        let (base, server) = serve_once("200 OK", "-1").await;
        let client = ThingSpeakClient::with_base_url(base);

        let err = client.get_field_feed("1", "1", None, None).await.unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_get_field_feed_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ThingSpeakClient::with_base_url(format!("http://{}", addr));
        let err = client.get_field_feed("1", "1", None, None).await.unwrap_err();
        assert!(matches!(err, ApiError::RequestError(_)));
    }
}
