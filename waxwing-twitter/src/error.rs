//! Error surface of the façade.
//!
//! Two tiers, per the original client: transport/API failures carry the
//! vendor's message and code when the error envelope decodes; anything with
//! an unexpected JSON shape collapses to the generic default message.

use thiserror::Error;
use waxwing_http::HttpError;
use waxwing_oauth::OAuthError;

/// Shown to the user when a response cannot be interpreted.
pub const DEFAULT_ERROR_MESSAGE: &str = "Waxwing couldn't understand Twitter's response!";

/// Vendor code for "you have been blocked from viewing this user's tweets".
pub const ERROR_CODE_BLOCKED: u32 = 136;

#[derive(Debug, Error)]
pub enum TwitterError {
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error(transparent)]
    OAuth(#[from] OAuthError),
    /// The response decoded as JSON but was not the expected object/array.
    #[error("{DEFAULT_ERROR_MESSAGE}")]
    UnexpectedShape,
    #[error("file error: {0}")]
    Io(#[from] std::io::Error),
}

impl TwitterError {
    /// Vendor error code, when the failure was an API error with a decodable
    /// envelope.
    pub fn api_code(&self) -> Option<u32> {
        match self {
            TwitterError::Http(e) => e.api_code(),
            _ => None,
        }
    }

    /// Human-readable message for the notification surface.
    pub fn user_message(&self) -> String {
        match self {
            TwitterError::Http(HttpError::Api { message, .. }) => message.clone(),
            TwitterError::Http(HttpError::Network(message)) => message.clone(),
            TwitterError::Http(HttpError::Decode(..)) | TwitterError::UnexpectedShape => {
                DEFAULT_ERROR_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TwitterError>;

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn api_error_exposes_vendor_code_and_message() {
        let err = TwitterError::from(HttpError::Api {
            status: StatusCode::UNAUTHORIZED,
            code: Some(ERROR_CODE_BLOCKED),
            message: "You have been blocked".into(),
        });
        assert_eq!(err.api_code(), Some(136));
        assert_eq!(err.user_message(), "You have been blocked");
    }

    #[test]
    fn shape_errors_use_the_default_message() {
        assert_eq!(
            TwitterError::UnexpectedShape.user_message(),
            DEFAULT_ERROR_MESSAGE
        );
        let decode = TwitterError::from(HttpError::Decode("eof".into(), "<html>".into()));
        assert_eq!(decode.user_message(), DEFAULT_ERROR_MESSAGE);
    }
}
