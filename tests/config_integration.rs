use serial_test::serial;
use std::env;
use std::fs;
use tmb_admin::config::AppConfig;

// Helper to clear environment variables that might interfere with tests
fn clear_env_vars() {
    unsafe {
        env::remove_var("TMB_API__BASE_URL");
        env::remove_var("TMB_SESSION__COOKIE_TTL_DAYS");
        env::remove_var("TMB_BASE_URL");
        env::remove_var("TMB_STORAGE_DIR");
        env::remove_var("CONFIG_FILE");
    }
}

#[test]
#[serial]
fn test_default_config() {
    clear_env_vars();

    let config = AppConfig::load().expect("defaults should load");
    assert_eq!(config.api.base_url, "http://localhost:8000");
    assert_eq!(config.session.cookie_name, "tmb_cookie");
    assert_eq!(config.session.cookie_ttl_days, 7);
    assert_eq!(config.session.storage_dir, ".tmb");
}

#[test]
#[serial]
fn test_env_override() {
    clear_env_vars();
    unsafe {
        env::set_var("TMB_API__BASE_URL", "https://admin.example.com");
        env::set_var("TMB_SESSION__COOKIE_TTL_DAYS", "30");
    }

    let config = AppConfig::load().expect("Failed to load config");
    assert_eq!(config.api.base_url, "https://admin.example.com");
    assert_eq!(config.session.cookie_ttl_days, 30);

    clear_env_vars();
}

#[test]
#[serial]
fn test_cli_flag_beats_env() {
    clear_env_vars();
    unsafe {
        env::set_var("TMB_API__BASE_URL", "https://env.example.com");
    }

    let config = AppConfig::load_from_args([
        "tmb-admin",
        "--base-url",
        "https://flag.example.com",
        "--storage-dir",
        "/var/lib/tmb",
    ])
    .expect("Failed to load config");
    assert_eq!(config.api.base_url, "https://flag.example.com");
    assert_eq!(config.session.storage_dir, "/var/lib/tmb");

    clear_env_vars();
}

#[test]
#[serial]
fn test_file_load() {
    clear_env_vars();

    let dir = tempfile::tempdir().expect("tempdir");
    let file_path = dir.path().join("custom.yaml");
    fs::write(
        &file_path,
        r#"
api:
  base_url: https://staging.example.com
session:
  cookie_name: staging_cookie
    "#,
    )
    .expect("Failed to write temp config");

    // Point at the file through the env var backing --config
    unsafe {
        env::set_var("CONFIG_FILE", &file_path);
    }

    let config = AppConfig::load().expect("Failed to load config from file");
    assert_eq!(config.api.base_url, "https://staging.example.com");
    assert_eq!(config.session.cookie_name, "staging_cookie");
    // Unset keys keep their defaults
    assert_eq!(config.session.cookie_ttl_days, 7);

    clear_env_vars();
}

#[test]
#[serial]
fn test_missing_explicit_file_is_an_error() {
    clear_env_vars();

    let result = AppConfig::load_from_args(["tmb-admin", "--config", "/nonexistent/tmb.yaml"]);
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_cwd_config_fallback() {
    clear_env_vars();

    let cwd_path = "tmb-admin.yaml";
    fs::write(
        cwd_path,
        r#"
api:
  base_url: http://cwd.example.com
    "#,
    )
    .expect("Failed to write ./tmb-admin.yaml");

    let config = AppConfig::load();

    // Clean up before asserting so a failure doesn't leave the file behind
    fs::remove_file(cwd_path).unwrap();

    let config = config.expect("Failed to load config");
    assert_eq!(config.api.base_url, "http://cwd.example.com");
}
