//! HTTP fetcher implementation
//!
//! One GET per source, bounded by a per-source timeout. There is no retry;
//! any failure is returned to the aggregator, which records it against the
//! source and moves on.

use crate::QueryError;
use reqwest::{header::CONTENT_TYPE, redirect::Policy, Client};
use std::time::Duration;

/// Upper bound on the TCP/TLS handshake, independent of the request budget
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum redirect hops followed before giving up
const MAX_REDIRECTS: usize = 5;

/// Builds the HTTP client shared by every query in a run
///
/// # Arguments
///
/// * `user_agent` - User-Agent header value
/// * `timeout` - Total time allowed for one request, body included
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use yard_scout::query::build_http_client;
///
/// let client = build_http_client("yard-scout/1.0", Duration::from_secs(10)).unwrap();
/// ```
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(CONNECT_TIMEOUT.min(timeout))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page body
///
/// The send and the body read both run under `timeout`. The response is owned
/// by the request future, so it is released on success, on error, and when
/// the deadline drops the future.
///
/// # Returns
///
/// * `Ok(String)` - The full response body of a 2xx response
/// * `Err(QueryError::Status)` - The server answered with a non-2xx status
/// * `Err(QueryError::ContentMismatch)` - The body is declared as something
///   other than text or markup (JSON, images, ...)
/// * `Err(QueryError::Timeout)` - The deadline expired
/// * `Err(QueryError::Http)` - Any other transport failure
pub async fn fetch_page(client: &Client, url: &str, timeout: Duration) -> Result<String, QueryError> {
    let request = async {
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, timeout, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(QueryError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // A missing header is tolerated; yard sites are not consistent about it.
        if let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if !is_markup_content_type(content_type) {
                return Err(QueryError::ContentMismatch {
                    url: url.to_string(),
                    content_type: content_type.to_string(),
                });
            }
        }

        response
            .text()
            .await
            .map_err(|e| classify_error(url, timeout, e))
    };

    match tokio::time::timeout(timeout, request).await {
        Ok(result) => result,
        Err(_) => Err(QueryError::Timeout {
            url: url.to_string(),
            after: timeout,
        }),
    }
}

/// Returns true for `text/*` and any HTML/XML media type
fn is_markup_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    essence.is_empty()
        || essence.starts_with("text/")
        || essence.contains("html")
        || essence.ends_with("+xml")
        || essence.ends_with("/xml")
}

/// Maps a client error onto the query error taxonomy
fn classify_error(url: &str, timeout: Duration, error: reqwest::Error) -> QueryError {
    if error.is_timeout() {
        QueryError::Timeout {
            url: url.to_string(),
            after: timeout,
        }
    } else {
        QueryError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
