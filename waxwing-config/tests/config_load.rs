use serial_test::serial;
use std::{fs, path::PathBuf};
use tempfile::TempDir;
use waxwing_config::WaxwingConfigLoader;

/// Helper to write a YAML file in a temp dir and return its path.
fn write_yaml(tmp: &TempDir, name: &str, yaml: &str) -> PathBuf {
    let p = tmp.path().join(name);
    fs::write(&p, yaml).expect("write yaml");
    p
}

#[test]
#[serial]
fn loads_full_profile_from_file() {
    let tmp = TempDir::new().unwrap();
    let file_yaml = r#"
consumer_key: "ck-from-file"
consumer_secret: "cs-from-file"
primary:
  token: "primary-token"
  token_secret: "primary-secret"
secret_identity:
  token: "secret-token"
  token_secret: "secret-secret"
"#;
    let p = write_yaml(&tmp, "waxwing.yaml", file_yaml);

    let config = WaxwingConfigLoader::new()
        .with_file(p)
        .load()
        .expect("load config");

    assert_eq!(config.consumer_key, "ck-from-file");
    assert_eq!(config.primary.token, "primary-token");
    let secret = config.secret_identity.expect("secret identity configured");
    assert_eq!(secret.token, "secret-token");
}

#[test]
#[serial]
fn secret_identity_is_optional_and_env_expands() {
    let tmp = TempDir::new().unwrap();
    let file_yaml = r#"
consumer_key: "ck"
consumer_secret: "cs"
primary:
  token: "${WAXWING_TEST_TOKEN}"
  token_secret: "as"
"#;
    let p = write_yaml(&tmp, "waxwing.yaml", file_yaml);

    temp_env::with_var("WAXWING_TEST_TOKEN", Some("injected"), || {
        let config = WaxwingConfigLoader::new()
            .with_file(&p)
            .load()
            .expect("load config");
        assert_eq!(config.primary.token, "injected");
        assert!(config.secret_identity.is_none());
    });
}
