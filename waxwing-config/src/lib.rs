//! Loader for Waxwing credential configuration with YAML + environment overlays.
//!
//! The schema is small: one consumer-key pair, the primary account's token
//! pair, and an optional second ("secret identity") token pair used for the
//! blocked-requester fallback. Values may reference environment variables
//! with `${VAR}` placeholders, which are expanded recursively up to a fixed
//! depth.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

#[derive(Debug, Deserialize)]
pub struct WaxwingConfig {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub primary: AccountTokens,
    /// Alternative account used when the primary is blocked (error code 136).
    #[serde(default)]
    pub secret_identity: Option<AccountTokens>,
}

/// A user token pair as issued by the access-token leg of the OAuth flow.
#[derive(Debug, Deserialize)]
pub struct AccountTokens {
    pub token: String,
    pub token_secret: String,
}

// FIXME: cover recursive `${VAR}` expansion of nested mappings in unit tests
// so env interpolation stays deterministic.
fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hiding the `config` crate wiring (YAML file + env overrides).
pub struct WaxwingConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for WaxwingConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl WaxwingConfigLoader {
    /// Start with the defaults: `WAXWING_`-prefixed env overrides, `__` as
    /// the nesting separator (`WAXWING_PRIMARY__TOKEN=...`).
    pub fn new() -> Self {
        let builder =
            Config::builder().add_source(Environment::with_prefix("WAXWING").separator("__"));
        Self { builder }
    }

    /// Attach a configuration file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Merge an inline YAML snippet (tests, CLI overrides).
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources.
    ///
    /// ```
    /// use waxwing_config::WaxwingConfigLoader;
    ///
    /// let config = WaxwingConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// consumer_key: "ck"
    /// consumer_secret: "cs"
    /// primary:
    ///   token: "at"
    ///   token_secret: "as"
    /// "#,
    ///     )
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.consumer_key, "ck");
    /// assert!(config.secret_identity.is_none());
    /// ```
    pub fn load(self) -> Result<WaxwingConfig, ConfigError> {
        let cfg = self.builder.build()?;

        // Merge to a generic tree first so `${VAR}` expansion can walk it.
        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: WaxwingConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;
        Ok(typed)
    }
}
