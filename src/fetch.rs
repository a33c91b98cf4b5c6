//! Retrieval of the event export from the Indico API.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use serde_json::Value;
use tracing::{error, info};

use crate::error::FetchError;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const BROWSER_ACCEPT: &str =
    "application/json,text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

/// Blocking client carrying the browser-like headers used for every request.
///
/// Timeouts are set per request, so one client serves both the API call and
/// the attachment downloads.
pub fn http_client() -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    headers.insert("upgrade-insecure-requests", HeaderValue::from_static("1"));

    Client::builder().default_headers(headers).build()
}

/// Fetch the export envelope at `url` and return its first result, the raw event.
///
/// There is no retry: any transport error, non-success status, undecodable
/// body or empty envelope fails the fetch.
pub fn fetch_event(client: &Client, url: &str, timeout: Duration) -> Result<Value, FetchError> {
    info!(url = %url, "Fetching event data");

    let result = request_envelope(client, url, timeout).and_then(first_result);
    match &result {
        Ok(event) => {
            let (title, contributions) = event_overview(event);
            info!(title, contributions, "Fetched event data");
        }
        Err(e) => error!(error = %e, url = %url, "Failed to fetch event data"),
    }
    result
}

fn request_envelope(client: &Client, url: &str, timeout: Duration) -> Result<Value, FetchError> {
    let response = client
        .get(url)
        .timeout(timeout)
        .send()
        .map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    response.json::<Value>().map_err(|source| FetchError::Decode {
        url: url.to_string(),
        source,
    })
}

/// Title and contribution count of a raw event, for logging.
fn event_overview(event: &Value) -> (&str, usize) {
    let title = event.get("title").and_then(Value::as_str).unwrap_or("Unknown");
    let contributions = event
        .get("contributions")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);
    (title, contributions)
}

/// Unwrap `{"count": n, "results": [event, ...]}`.
fn first_result(mut envelope: Value) -> Result<Value, FetchError> {
    let count = envelope.get("count").and_then(Value::as_i64).unwrap_or(0);
    if count <= 0 {
        return Err(FetchError::EmptyEnvelope);
    }

    match envelope.get_mut("results").and_then(Value::as_array_mut) {
        Some(results) if !results.is_empty() => Ok(results.swap_remove(0)),
        _ => Err(FetchError::EmptyEnvelope),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_result() {
        let event = first_result(json!({
            "count": 1,
            "results": [{"title": "LLRF 2025", "contributions": []}]
        }))
        .unwrap();
        assert_eq!(event["title"], "LLRF 2025");
    }

    #[test]
    fn test_zero_count_is_empty() {
        let err = first_result(json!({"count": 0, "results": [{"title": "x"}]})).unwrap_err();
        assert!(matches!(err, FetchError::EmptyEnvelope));
    }

    #[test]
    fn test_missing_results_is_empty() {
        assert!(matches!(
            first_result(json!({"count": 3})),
            Err(FetchError::EmptyEnvelope)
        ));
        assert!(matches!(
            first_result(json!({"count": 1, "results": []})),
            Err(FetchError::EmptyEnvelope)
        ));
        assert!(matches!(
            first_result(json!({"results": [{}]})),
            Err(FetchError::EmptyEnvelope)
        ));
    }

    #[test]
    fn test_event_overview() {
        let event = json!({"title": "LLRF 2025", "contributions": [{}, {}]});
        assert_eq!(event_overview(&event), ("LLRF 2025", 2));
        assert_eq!(event_overview(&json!({"title": 7})), ("Unknown", 0));
    }

    #[test]
    fn test_client_builds() {
        assert!(http_client().is_ok());
    }
}
