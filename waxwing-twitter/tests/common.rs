use std::sync::OnceLock;

use waxwing_common::observability::{self, LogConfig};
use waxwing_oauth::Credentials;
use waxwing_twitter::TwitterApi;

static TRACING: OnceLock<()> = OnceLock::new();

/// Wiremock assertions are much easier to debug with the request log on
/// stderr, so every test starts here.
pub fn init_test_tracing() {
    TRACING.get_or_init(|| {
        let _ = observability::init_logging(LogConfig {
            app_name: "waxwing-tests",
            emit_stderr: true,
            default_filter: "debug",
            ..LogConfig::default()
        });
    });
}

pub fn primary_credentials() -> Credentials {
    Credentials {
        consumer_key: "ck".into(),
        consumer_secret: "csecret".into(),
        token: "primarytoken".into(),
        token_secret: "primarysecret".into(),
    }
}

pub fn secret_credentials() -> Credentials {
    Credentials {
        consumer_key: "ck".into(),
        consumer_secret: "csecret".into(),
        token: "secrettoken".into(),
        token_secret: "secretsecret".into(),
    }
}

pub fn api_against(base: &str) -> TwitterApi {
    TwitterApi::new(primary_credentials())
        .and_then(|api| api.with_base_url(base))
        .unwrap()
}

pub fn api_with_secret_against(base: &str) -> TwitterApi {
    TwitterApi::new(primary_credentials())
        .map(|api| api.with_secret_identity(secret_credentials()))
        .and_then(|api| api.with_base_url(base))
        .unwrap()
}
