//! OAuth 1.0a support for the Waxwing Twitter binding.
//!
//! [`sign`] produces the `Authorization` header for an already-shaped request
//! (method + URL + the full query/form parameter set). [`flow`] implements
//! the three-legged token dance: request token, authorize URL, access token.
//!
//! Signing internals follow RFC 5849: percent-encoded sorted parameter
//! string, HMAC-SHA1 over the signature base string, signing key
//! `consumer_secret&token_secret`.

pub mod flow;
mod sign;

pub use flow::{AccessToken, OAuthFlow, RequestToken};
pub use sign::{sign, Credentials};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OAuthError {
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("token exchange failed: {0}")]
    Exchange(String),
    #[error("invalid token response: {0}")]
    InvalidResponse(String),
    #[error("signature error: {0}")]
    Signature(String),
}

pub type Result<T> = std::result::Result<T, OAuthError>;
