//! Blocking HTTP client for the Scryfall REST API.
//!
//! Wraps a `reqwest` blocking client configured with the headers Scryfall
//! requires, decodes JSON bodies into the crate's models and maps upstream
//! error objects onto [`SpoilerError`].

use crate::collector::{PageSource, PrintMode};
use crate::config;
use crate::error::{Result, SpoilerError};
use crate::models::{ApiErrorBody, Card, ListPage, Release};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, RETRY_AFTER};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Read-only client for the releases and card search endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// API base URL, e.g. `https://api.scryfall.com`.
    pub base: String,
    client: Client,
}

impl ApiClient {
    /// Create a client against `base` with the given request timeout.
    pub fn new(base: impl Into<String>, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(config::ACCEPT));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(config::USER_AGENT)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self {
            base: base.into(),
            client,
        })
    }

    /// GET `url` and decode the JSON body.
    ///
    /// Non-success responses become [`SpoilerError::RateLimited`] (429),
    /// [`SpoilerError::Api`] when the body is a Scryfall error object, or
    /// [`SpoilerError::Status`] otherwise.
    pub fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url, "GET");
        let resp = self.client.get(url).send()?;
        let status = resp.status();

        if status.is_success() {
            return Ok(resp.json()?);
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = resp
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.trim().parse::<u64>().ok());
            return Err(SpoilerError::RateLimited { retry_after_secs });
        }

        let body = resp.text().unwrap_or_default();
        Err(decode_error(status, url, &body))
    }

    /// Fetch the full release catalog.
    pub fn list_releases(&self) -> Result<Vec<Release>> {
        let page: ListPage<Release> = self.get_json(&config::sets_url(&self.base))?;
        Ok(page.data)
    }

    /// Fetch one release by code (case-insensitive).
    pub fn get_release(&self, code: &str) -> Result<Release> {
        if code.trim().is_empty() {
            return Err(SpoilerError::InvalidArgument(
                "release code must not be empty".into(),
            ));
        }
        self.get_json(&config::set_url(&self.base, code.trim()))
    }

    /// Build the first card search request for a release.
    pub fn search_url(&self, release_code: &str, mode: PrintMode) -> String {
        search_url(&self.base, release_code, mode)
    }
}

impl PageSource for ApiClient {
    fn initial_target(&self, release_code: &str, mode: PrintMode) -> String {
        self.search_url(release_code, mode)
    }

    fn fetch_page(&self, target: &str) -> Result<ListPage<Card>> {
        self.get_json(target)
    }
}

/// Card search URL scoped to one release: `q=e:<code>`, spoil order.
pub fn search_url(base: &str, release_code: &str, mode: PrintMode) -> String {
    let query = format!("e:{}", release_code.trim().to_lowercase());
    let endpoint = config::card_search_url(base);
    let params = [
        ("q", query.as_str()),
        ("unique", mode.as_query()),
        ("order", "spoiled"),
    ];
    match reqwest::Url::parse_with_params(&endpoint, &params) {
        Ok(url) => url.to_string(),
        // Unparseable base: hand back something that fails at request time.
        Err(_) => format!(
            "{}?q=e%3A{}&unique={}&order=spoiled",
            endpoint,
            release_code.trim().to_lowercase(),
            mode.as_query()
        ),
    }
}

fn decode_error(status: StatusCode, url: &str, body: &str) -> SpoilerError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(err) => SpoilerError::Api {
            status: err.status,
            code: err.code,
            details: err.details,
        },
        Err(_) => SpoilerError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_scopes_query_to_lowercased_code() {
        let url = search_url("https://api.scryfall.com", "DSK", PrintMode::AllPrints);
        assert!(url.starts_with("https://api.scryfall.com/cards/search?"));
        assert!(url.contains("q=e%3Adsk"));
        assert!(url.contains("unique=prints"));
        assert!(url.contains("order=spoiled"));
    }

    #[test]
    fn search_url_unique_cards_mode() {
        let url = search_url("https://api.scryfall.com/", "fdn", PrintMode::UniqueCards);
        assert!(url.starts_with("https://api.scryfall.com/cards/search?"));
        assert!(url.contains("unique=cards"));
    }

    #[test]
    fn decode_error_reads_scryfall_error_object() {
        let body = r#"{"object":"error","code":"not_found","status":404,"details":"No cards found"}"#;
        let err = decode_error(StatusCode::NOT_FOUND, "http://x", body);
        assert!(err.is_not_found());
        match err {
            SpoilerError::Api { status, code, .. } => {
                assert_eq!(status, 404);
                assert_eq!(code, "not_found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn bare_404_is_not_an_empty_search() {
        let err = decode_error(StatusCode::NOT_FOUND, "http://x/cards/search", "<html>");
        assert!(!err.is_not_found());
        assert!(!err.is_empty_search());
    }

    #[test]
    fn decode_error_falls_back_to_status() {
        let err = decode_error(StatusCode::BAD_GATEWAY, "http://x/sets", "<html>");
        match err {
            SpoilerError::Status { status, url } => {
                assert_eq!(status, 502);
                assert_eq!(url, "http://x/sets");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
