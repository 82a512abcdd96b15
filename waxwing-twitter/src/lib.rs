//! Async binding to the Twitter v1.1 REST API.
//!
//! [`TwitterApi`] maps each endpoint to one method that signs, sends, and
//! decodes a single request; [`dispatch`] wraps the façade in a sequential
//! intent/event loop for UI frontends. Responses stay generic JSON, so a
//! vendor-side field addition never breaks decoding here.

pub mod client;
pub mod dispatch;
pub mod endpoints;
pub mod error;
pub mod media;
pub mod shape;

pub use client::{Identity, TwitterApi};
pub use dispatch::{ApiEvent, Intent, Payload};
pub use error::{DEFAULT_ERROR_MESSAGE, ERROR_CODE_BLOCKED, Result, TwitterError};
pub use waxwing_oauth::Credentials;
