//! Three-legged OAuth 1.0a flow (request token, authorize URL, access token).

use std::collections::HashMap;

use reqwest::Client;
use reqwest::header::AUTHORIZATION;

use crate::sign::{Credentials, sign};
use crate::{OAuthError, Result};

const DEFAULT_BASE: &str = "https://api.twitter.com";
const REQUEST_TOKEN_PATH: &str = "/oauth/request_token";
const AUTHORIZE_PATH: &str = "/oauth/authorize";
const ACCESS_TOKEN_PATH: &str = "/oauth/access_token";

/// Temporary token from the first leg of the flow.
#[derive(Debug, Clone)]
pub struct RequestToken {
    pub token: String,
    pub token_secret: String,
    pub callback_confirmed: bool,
}

/// Final user token from the third leg.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    pub token_secret: String,
    pub user_id: Option<String>,
    pub screen_name: Option<String>,
}

/// Drives the token dance for one consumer-key pair.
#[derive(Debug, Clone)]
pub struct OAuthFlow {
    consumer_key: String,
    consumer_secret: String,
    callback: Option<String>,
    base: String,
    http: Client,
}

impl OAuthFlow {
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            callback: None,
            base: DEFAULT_BASE.to_string(),
            http: Client::new(),
        }
    }

    /// Out-of-band ("oob") PIN entry is used when no callback is set.
    pub fn with_callback(mut self, url: impl Into<String>) -> Self {
        self.callback = Some(url.into());
        self
    }

    /// Point the flow at a different host. Intended for tests.
    pub fn with_base_url(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    pub async fn request_token(&self) -> Result<RequestToken> {
        let callback = self.callback.as_deref().unwrap_or("oob");
        tracing::debug!(callback, "request_token");
        let url = format!("{}{REQUEST_TOKEN_PATH}", self.base);
        let params = vec![("oauth_callback".to_string(), callback.to_string())];
        // No user token yet; the token half of the signing key is empty.
        let credentials = Credentials::new(
            self.consumer_key.clone(),
            self.consumer_secret.clone(),
            "",
            "",
        );
        let header = sign("POST", &url, &params, &credentials)?;

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, header)
            .form(&[("oauth_callback", callback)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "request token exchange refused");
            return Err(OAuthError::Exchange(format!("request token: {text}")));
        }

        let body = response.text().await?;
        let fields = decode_token_body(&body)?;
        let token = RequestToken {
            token: require(&fields, "oauth_token")?,
            token_secret: require(&fields, "oauth_token_secret")?,
            callback_confirmed: fields
                .get("oauth_callback_confirmed")
                .is_some_and(|v| v == "true"),
        };
        tracing::debug!(
            callback_confirmed = token.callback_confirmed,
            "request token issued"
        );
        Ok(token)
    }

    pub fn authorize_url(&self, request_token: &RequestToken) -> String {
        format!(
            "{}{AUTHORIZE_PATH}?oauth_token={}",
            self.base, request_token.token
        )
    }

    pub async fn access_token(
        &self,
        request_token: &RequestToken,
        verifier: &str,
    ) -> Result<AccessToken> {
        tracing::debug!("access_token");
        let url = format!("{}{ACCESS_TOKEN_PATH}", self.base);
        let params = vec![("oauth_verifier".to_string(), verifier.to_string())];
        let credentials = Credentials::new(
            self.consumer_key.clone(),
            self.consumer_secret.clone(),
            request_token.token.clone(),
            request_token.token_secret.clone(),
        );
        let header = sign("POST", &url, &params, &credentials)?;

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, header)
            .form(&[("oauth_verifier", verifier)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "access token exchange refused");
            return Err(OAuthError::Exchange(format!("access token: {text}")));
        }

        let body = response.text().await?;
        let fields = decode_token_body(&body)?;
        tracing::debug!(
            screen_name = fields.get("screen_name").map(String::as_str),
            "access token issued"
        );
        Ok(AccessToken {
            token: require(&fields, "oauth_token")?,
            token_secret: require(&fields, "oauth_token_secret")?,
            user_id: fields.get("user_id").cloned(),
            screen_name: fields.get("screen_name").cloned(),
        })
    }
}

fn decode_token_body(body: &str) -> Result<HashMap<String, String>> {
    serde_urlencoded::from_str(body).map_err(|e| OAuthError::InvalidResponse(e.to_string()))
}

fn require(fields: &HashMap<String, String>, key: &str) -> Result<String> {
    fields
        .get(key)
        .cloned()
        .ok_or_else(|| OAuthError::InvalidResponse(format!("missing {key}")))
}
