//! `reqwest`-backed catalog client

use async_trait::async_trait;
use reqwest::Client;

use super::{parse_page, FetchError, Page, RemoteSource};
use crate::config::ClientConfig;

/// HTTP client for the public character catalog
#[derive(Debug, Clone)]
pub struct CharacterApiClient {
    base_url: String,
    client: Client,
}

impl CharacterApiClient {
    /// Build a client from resolved configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|error| FetchError::Network(format!("failed to build HTTP client: {error}")))?;

        Ok(Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Listing endpoint URL
    pub fn endpoint(&self) -> String {
        format!("{}/character", self.base_url)
    }
}

#[async_trait]
impl RemoteSource for CharacterApiClient {
    async fn fetch_page(&self, page: u32) -> Result<Page, FetchError> {
        tracing::debug!("Fetching character page {page}");

        let response = self
            .client
            .get(self.endpoint())
            .query(&[("page", page)])
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                code: status.as_u16(),
                message: error_message(&body),
            });
        }

        let body = response.text().await?;
        parse_page(&body)
    }
}

/// Longest slice of a non-JSON error body echoed back to the user
const MAX_ERROR_BODY_CHARS: usize = 180;

/// Message for a non-success response: the API's `error` field, else the
/// start of the raw body.
fn error_message(body: &str) -> String {
    if let Some(message) = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("error")?.as_str().map(str::to_string))
    {
        return message;
    }

    let excerpt = body
        .trim()
        .chars()
        .take(MAX_ERROR_BODY_CHARS)
        .collect::<String>();
    if excerpt.is_empty() {
        "Unknown Error".to_string()
    } else {
        excerpt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn endpoint_trims_trailing_slash() {
        let config = ClientConfig {
            api_base_url: "https://example.com/api/".to_string(),
            request_timeout: Duration::from_secs(1),
            ..Default::default()
        };
        let client = CharacterApiClient::new(&config).unwrap();
        assert_eq!(client.endpoint(), "https://example.com/api/character");
    }

    #[test]
    fn error_message_prefers_api_error_field() {
        assert_eq!(
            error_message(r#"{"error":"There is nothing here"}"#),
            "There is nothing here"
        );
    }

    #[test]
    fn error_message_falls_back_to_body_excerpt() {
        assert_eq!(error_message("  Bad Gateway \n"), "Bad Gateway");
        assert_eq!(error_message(&"x".repeat(500)).len(), MAX_ERROR_BODY_CHARS);
        assert_eq!(error_message(""), "Unknown Error");
        assert_eq!(error_message(r#"{"status":500}"#), r#"{"status":500}"#);
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        let config = ClientConfig {
            // Port 9 (discard) on loopback refuses connections on test hosts
            api_base_url: "http://127.0.0.1:9".to_string(),
            request_timeout: Duration::from_secs(2),
            ..Default::default()
        };
        let client = CharacterApiClient::new(&config).unwrap();

        let error = client.fetch_page(1).await.unwrap_err();
        assert!(matches!(error, FetchError::Network(_)));
        assert!(error.to_string().starts_with("Network error:"));
    }
}
