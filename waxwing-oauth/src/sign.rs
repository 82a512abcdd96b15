//! HMAC-SHA1 request signing.

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use base64::{Engine, engine::general_purpose::STANDARD, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use url::Url;

use crate::{OAuthError, Result};

/// One identity's full credential set: application keys plus user tokens.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub token: String,
    pub token_secret: String,
}

impl Credentials {
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        token: impl Into<String>,
        token_secret: impl Into<String>,
    ) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            token: token.into(),
            token_secret: token_secret.into(),
        }
    }
}

/// Build the `Authorization: OAuth ...` header value for a request.
///
/// `params` must be the complete non-oauth parameter set the server will see:
/// query-string pairs for GETs, form fields for url-encoded POSTs, both when
/// mixed. Multipart bodies contribute nothing (per the OAuth spec).
pub fn sign(
    method: &str,
    url: &str,
    params: &[(String, String)],
    credentials: &Credentials,
) -> Result<String> {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| OAuthError::Signature(e.to_string()))?
        .as_secs()
        .to_string();
    sign_at(method, url, params, credentials, &nonce(), &timestamp)
}

/// [`sign`] with caller-supplied nonce and timestamp. Exposed so the header
/// can be checked against fixed vectors.
pub fn sign_at(
    method: &str,
    url: &str,
    params: &[(String, String)],
    credentials: &Credentials,
    nonce: &str,
    timestamp: &str,
) -> Result<String> {
    let mut oauth_params = BTreeMap::new();
    oauth_params.insert("oauth_consumer_key", credentials.consumer_key.as_str());
    oauth_params.insert("oauth_nonce", nonce);
    oauth_params.insert("oauth_signature_method", "HMAC-SHA1");
    oauth_params.insert("oauth_timestamp", timestamp);
    oauth_params.insert("oauth_token", credentials.token.as_str());
    oauth_params.insert("oauth_version", "1.0");

    let signature = signature(method, url, params, &oauth_params, credentials)?;

    let mut header = String::from("OAuth ");
    for (i, (k, v)) in oauth_params
        .iter()
        .map(|(k, v)| (*k, *v))
        .chain(std::iter::once(("oauth_signature", signature.as_str())))
        .enumerate()
    {
        if i > 0 {
            header.push_str(", ");
        }
        header.push_str(&format!("{}=\"{}\"", encode(k), encode(v)));
    }
    Ok(header)
}

fn signature(
    method: &str,
    url: &str,
    params: &[(String, String)],
    oauth_params: &BTreeMap<&str, &str>,
    credentials: &Credentials,
) -> Result<String> {
    let parsed = Url::parse(url)?;
    let base_url = format!(
        "{}://{}{}",
        parsed.scheme(),
        parsed.host_str().unwrap_or(""),
        parsed.path()
    );

    // All parameters participate: explicit pairs, URL query pairs, and the
    // oauth_* protocol parameters. Sorted by encoded key, then encoded value.
    let mut all: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (encode(k), encode(v)))
        .collect();
    all.extend(parsed.query_pairs().map(|(k, v)| (encode(&k), encode(&v))));
    all.extend(oauth_params.iter().map(|(k, v)| (encode(k), encode(v))));
    all.sort();

    let param_string = all
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let base = format!(
        "{}&{}&{}",
        method.to_uppercase(),
        encode(&base_url),
        encode(&param_string)
    );

    let key = format!(
        "{}&{}",
        encode(&credentials.consumer_secret),
        encode(&credentials.token_secret)
    );

    let mut mac = Hmac::<Sha1>::new_from_slice(key.as_bytes())
        .map_err(|e| OAuthError::Signature(e.to_string()))?;
    mac.update(base.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

fn nonce() -> String {
    let bytes: [u8; 24] = rand::random();
    URL_SAFE_NO_PAD.encode(bytes)
}

/// RFC 3986 percent encoding: unreserved characters pass through, everything
/// else becomes uppercase-hex escapes.
fn encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}
