//! HTTP transport used by [`crate::ingest::HttpSource`].

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use crate::error::IngestError;

/// Issues a GET for `url` and returns the body bytes.
///
/// # Errors
///
/// Returns [`IngestError::InvalidUrl`] if `url` does not parse and
/// [`IngestError::Http`] on transport failure or a non-2xx status.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>, IngestError> {
    let parsed = reqwest::Url::parse(url).map_err(|e| IngestError::InvalidUrl {
        url: url.to_string(),
        message: e.to_string(),
    })?;
    let req = reqwest::Request::new(reqwest::Method::GET, parsed);

    let http_err = |source| IngestError::Http {
        url: url.to_string(),
        source,
    };

    let resp = client
        .execute(req)
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(http_err)?;

    Ok(resp.bytes().await.map_err(http_err)?.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_url_is_rejected_before_sending() {
        let client = BasicClient::new();
        let result = fetch_bytes(&client, "not a url").await;
        assert!(matches!(result, Err(IngestError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_http_error() {
        let client = BasicClient::new();
        let result = fetch_bytes(&client, "http://127.0.0.1:9/data.json").await;
        assert!(matches!(result, Err(IngestError::Http { .. })));
    }
}
