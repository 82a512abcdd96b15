//! HTTP transport for the Waxwing Twitter binding.
//!
//! - Request options: extra headers, prebuilt `Authorization` value, query
//!   params, timeout, retry budget
//! - Decodes the Twitter v1.1 error envelope (`{"errors":[{"code","message"}]}`)
//!   into [`HttpError::Api`] so callers can branch on vendor error codes
//! - Retries 429/5xx with exponential backoff and `Retry-After` support, but
//!   only when a retry budget is explicitly granted (API calls run with 0)
//! - Redacts secrets from logs; `WAXWING_HTTP_RAW=1` enables capped raw body
//!   logging on the `http.raw` target

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue, RETRY_AFTER};
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::env;
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;

const RAW_ENV: &str = "WAXWING_HTTP_RAW";
const RAW_MAX_BODY: usize = 64 * 1024;

fn raw_enabled() -> bool {
    matches!(
        env::var(RAW_ENV).as_deref(),
        Ok("1") | Ok("true") | Ok("yes")
    )
}

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("request build failed: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("decode error: {0}, body_snippet: {1}")]
    Decode(String, String),
    #[error("server returned {status}: {message}")]
    Api {
        status: StatusCode,
        /// Vendor error code from the v1.1 error envelope, when decodable.
        code: Option<u32>,
        message: String,
    },
}

impl HttpError {
    /// Vendor error code carried by an API-level failure, if any.
    pub fn api_code(&self) -> Option<u32> {
        match self {
            HttpError::Api { code, .. } => *code,
            _ => None,
        }
    }
}

/// How a request is authenticated.
///
/// The OAuth 1.0a header is built by the caller (it depends on the exact
/// method, URL, and parameter set), so the transport only ever sees a
/// finished `Authorization` value.
#[derive(Clone, Debug, Default)]
pub enum Auth {
    Signed(HeaderValue),
    #[default]
    None,
}

/// Per-request tuning knobs.
#[derive(Clone, Debug, Default)]
pub struct RequestOpts {
    pub timeout: Option<Duration>,
    /// Retry budget for 429/5xx. Defaults to the client-wide setting.
    pub retries: Option<usize>,
    pub auth: Auth,
    pub headers: Option<HeaderMap>,
    pub query: Vec<(String, String)>,
}

/// Body payload for a single request attempt.
#[derive(Clone, Copy)]
enum Body<'a> {
    Empty,
    Form(&'a [(String, String)]),
    Json(&'a serde_json::Value),
}

#[derive(Clone)]
pub struct HttpClient {
    base: Url,
    inner: Client,
    pub default_timeout: Duration,
    pub max_retries: usize,
}

impl HttpClient {
    /// Construct a client anchored to a base URL.
    pub fn new(base: &str) -> Result<Self, HttpError> {
        let base = Url::parse(base).map_err(|e| HttpError::Url(e.to_string()))?;
        let inner = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;
        Ok(Self {
            base,
            inner,
            default_timeout: Duration::from_secs(15),
            max_retries: 0,
        })
    }

    pub fn with_timeout(mut self, dur: Duration) -> Self {
        self.default_timeout = dur;
        self
    }

    pub fn with_retries(mut self, n: usize) -> Self {
        self.max_retries = n;
        self
    }

    /// Resolve a path (or absolute URL) against the base.
    pub fn resolve(&self, path: &str) -> Result<Url, HttpError> {
        if let Ok(abs) = Url::parse(path) {
            return Ok(abs);
        }
        self.base
            .join(path)
            .map_err(|e| HttpError::Url(e.to_string()))
    }

    /// GET, decoding the response as JSON.
    pub async fn get_json<T>(&self, path: &str, opts: RequestOpts) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
    {
        let bytes = self
            .run(Method::GET, path, Body::Empty, &opts)
            .await?;
        decode_json(&bytes)
    }

    /// POST a url-encoded form body, decoding the response as JSON.
    pub async fn post_form<T>(
        &self,
        path: &str,
        form: &[(String, String)],
        opts: RequestOpts,
    ) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
    {
        let bytes = self.run(Method::POST, path, Body::Form(form), &opts).await?;
        decode_json(&bytes)
    }

    /// POST a JSON body, decoding the response as JSON.
    pub async fn post_json<T>(
        &self,
        path: &str,
        body: &serde_json::Value,
        opts: RequestOpts,
    ) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
    {
        let bytes = self.run(Method::POST, path, Body::Json(body), &opts).await?;
        decode_json(&bytes)
    }

    /// POST a JSON body where only the status matters; the response body is
    /// discarded. Some endpoints answer success with an empty body.
    pub async fn post_json_discard(
        &self,
        path: &str,
        body: &serde_json::Value,
        opts: RequestOpts,
    ) -> Result<(), HttpError> {
        self.run(Method::POST, path, Body::Json(body), &opts).await?;
        Ok(())
    }

    /// POST a multipart form. Never retried: the form is consumed on send.
    pub async fn post_multipart<T>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
        opts: RequestOpts,
    ) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
    {
        let url = self.resolve(path)?;
        let timeout = opts.timeout.unwrap_or(self.default_timeout);
        let mut rb = self
            .inner
            .request(Method::POST, url.clone())
            .timeout(timeout)
            .multipart(form);
        if let Some(hdrs) = &opts.headers {
            rb = rb.headers(hdrs.clone());
        }
        if let Auth::Signed(value) = &opts.auth {
            rb = rb.header(AUTHORIZATION, value.clone());
        }

        tracing::debug!(
            method = "POST",
            host_path = %host_path(&url),
            timeout_ms = timeout.as_millis() as u64,
            "http.request.multipart"
        );

        let resp = rb
            .send()
            .await
            .map_err(|e| HttpError::Network(e.to_string()))?;
        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| HttpError::Network(e.to_string()))?;
        if !status.is_success() {
            return Err(api_error(status, &bytes));
        }
        decode_json(&bytes)
    }

    /// GET raw bytes (media downloads, HTML). No JSON decoding.
    pub async fn get_bytes(&self, path: &str, opts: RequestOpts) -> Result<Vec<u8>, HttpError> {
        let bytes = self.run(Method::GET, path, Body::Empty, &opts).await?;
        Ok(bytes)
    }

    async fn run(
        &self,
        method: Method,
        path: &str,
        body: Body<'_>,
        opts: &RequestOpts,
    ) -> Result<Vec<u8>, HttpError> {
        let mut url = self.resolve(path)?;
        if !opts.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(opts.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }

        let timeout = opts.timeout.unwrap_or(self.default_timeout);
        let max_retries = opts.retries.unwrap_or(self.max_retries);
        let mut attempt = 0usize;

        loop {
            let mut rb = self.inner.request(method.clone(), url.clone()).timeout(timeout);

            match body {
                Body::Empty => {}
                Body::Form(fields) => {
                    rb = rb.form(fields);
                }
                Body::Json(value) => {
                    rb = rb.json(value);
                }
            }

            if let Some(hdrs) = &opts.headers {
                rb = rb.headers(hdrs.clone());
            }
            if let Auth::Signed(value) = &opts.auth {
                rb = rb.header(AUTHORIZATION, value.clone());
            }

            tracing::debug!(
                attempt = attempt + 1,
                max_retries,
                method = %method,
                host_path = %host_path(&url),
                query = ?redact_query(&url),
                timeout_ms = timeout.as_millis() as u64,
                signed = matches!(opts.auth, Auth::Signed(_)),
                "http.request.start"
            );

            let t0 = std::time::Instant::now();
            let resp = match rb.send().await {
                Ok(resp) => resp,
                Err(err) => {
                    let message = err.to_string();
                    if attempt < max_retries {
                        attempt += 1;
                        let delay = backoff(attempt);
                        tracing::warn!(
                            attempt,
                            max_retries,
                            backoff_ms = delay.as_millis() as u64,
                            message = %message,
                            "http.retrying.network"
                        );
                        sleep(delay).await;
                        continue;
                    }
                    return Err(HttpError::Network(message));
                }
            };

            let status = resp.status();
            let headers = resp.headers().clone();
            let bytes = match resp.bytes().await {
                Ok(bytes) => bytes.to_vec(),
                Err(err) => {
                    let message = err.to_string();
                    if attempt < max_retries {
                        attempt += 1;
                        let delay = backoff(attempt);
                        sleep(delay).await;
                        continue;
                    }
                    return Err(HttpError::Network(message));
                }
            };
            let dur_ms = t0.elapsed().as_millis() as u64;

            let limit = rate_header(&headers, "x-rate-limit-limit");
            let remain = rate_header(&headers, "x-rate-limit-remaining");
            tracing::debug!(
                %status,
                duration_ms = dur_ms,
                body_len = bytes.len(),
                rate_limit.limit = ?limit,
                rate_limit.remaining = ?remain,
                "http.response"
            );

            if raw_enabled() {
                let mut snip = bytes.clone();
                let truncated = snip.len() > RAW_MAX_BODY;
                if truncated {
                    snip.truncate(RAW_MAX_BODY);
                }
                tracing::info!(
                    target: "http.raw",
                    status = %status,
                    body = %String::from_utf8_lossy(&snip),
                    truncated,
                    "response"
                );
            }

            if status.is_success() {
                return Ok(bytes);
            }

            let is_retryable = status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error();
            if is_retryable && attempt < max_retries {
                attempt += 1;
                let delay = retry_after_delay(&headers).unwrap_or_else(|| backoff(attempt));
                tracing::warn!(
                    %status,
                    attempt,
                    max_retries,
                    backoff_ms = delay.as_millis() as u64,
                    "http.retrying"
                );
                sleep(delay).await;
                continue;
            }

            let err = api_error(status, &bytes);
            tracing::warn!(
                %status,
                message = %err,
                body_snippet = %snip_body(&bytes),
                "http.error"
            );
            return Err(err);
        }
    }
}

fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, HttpError> {
    serde_json::from_slice::<T>(bytes).map_err(|e| {
        let snippet = snip_body(bytes);
        tracing::warn!(
            serde_err = %e,
            body_snippet = %snippet,
            "http.response.decode_error"
        );
        HttpError::Decode(e.to_string(), snippet)
    })
}

/// Build an [`HttpError::Api`] from a non-2xx response, pulling the vendor
/// code/message from the v1.1 error envelope when present.
fn api_error(status: StatusCode, body: &[u8]) -> HttpError {
    let (code, message) = match extract_error(body) {
        Some((code, message)) => (code, message),
        None => (None, snip_body(body)),
    };
    HttpError::Api {
        status,
        code,
        message,
    }
}

/// Decode `{"errors":[{"code":136,"message":"..."}]}`. The envelope may carry
/// several entries; the last one wins, matching the original client.
fn extract_error(body: &[u8]) -> Option<(Option<u32>, String)> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    let errors = value.get("errors")?.as_array()?;
    let mut found: Option<(Option<u32>, String)> = None;
    for entry in errors {
        let code = entry.get("code").and_then(|c| c.as_u64()).map(|c| c as u32);
        let message = entry
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or_default()
            .to_string();
        found = Some((code, message));
    }
    found
}

fn retry_after_delay(h: &HeaderMap) -> Option<Duration> {
    let secs: u64 = h.get(RETRY_AFTER)?.to_str().ok()?.parse().ok()?;
    Some(Duration::from_secs(secs))
}

fn backoff(attempt: usize) -> Duration {
    Duration::from_millis(200u64.saturating_mul(1 << (attempt.saturating_sub(1))))
}

fn rate_header<'a>(h: &'a HeaderMap, name: &str) -> Option<&'a str> {
    h.get(name).and_then(|v| v.to_str().ok())
}

fn host_path(url: &Url) -> String {
    format!("{}{}", url.domain().unwrap_or("-"), url.path())
}

fn snip_body(body: &[u8]) -> String {
    let mut snip = String::from_utf8_lossy(body).to_string();
    if snip.len() > 500 {
        let mut cut = 500;
        while !snip.is_char_boundary(cut) {
            cut -= 1;
        }
        snip.truncate(cut);
        snip.push_str("...");
    }
    snip
}

fn redact_query(url: &Url) -> Vec<(String, String)> {
    url.query_pairs()
        .map(|(k, v)| {
            let is_secret = matches!(
                k.to_ascii_lowercase().as_str(),
                "oauth_token" | "oauth_signature" | "token" | "secret" | "api_key"
            );
            (
                k.to_string(),
                if is_secret {
                    "<redacted>".to_string()
                } else {
                    v.to_string()
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_vendor_code_and_message() {
        let body = br#"{"errors":[{"code":136,"message":"You have been blocked"}]}"#;
        let err = api_error(StatusCode::UNAUTHORIZED, body);
        assert_eq!(err.api_code(), Some(136));
        match err {
            HttpError::Api { message, .. } => assert_eq!(message, "You have been blocked"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn falls_back_to_body_snippet_without_envelope() {
        let err = api_error(StatusCode::BAD_GATEWAY, b"upstream sad");
        assert_eq!(err.api_code(), None);
        match err {
            HttpError::Api { message, .. } => assert_eq!(message, "upstream sad"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn last_envelope_entry_wins() {
        let body = br#"{"errors":[{"code":88,"message":"Rate limit"},{"code":136,"message":"Blocked"}]}"#;
        let err = api_error(StatusCode::UNAUTHORIZED, body);
        assert_eq!(err.api_code(), Some(136));
    }

    #[test]
    fn backoff_doubles() {
        assert_eq!(backoff(1), Duration::from_millis(200));
        assert_eq!(backoff(2), Duration::from_millis(400));
        assert_eq!(backoff(3), Duration::from_millis(800));
    }

    #[test]
    fn redacts_secret_query_params() {
        let url = Url::parse("https://api.twitter.com/1.1/x.json?q=ferris&oauth_token=abc").unwrap();
        let pairs = redact_query(&url);
        assert!(pairs.contains(&("q".into(), "ferris".into())));
        assert!(pairs.contains(&("oauth_token".into(), "<redacted>".into())));
    }
}
