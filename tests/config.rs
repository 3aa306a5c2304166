use fraudwatch::backend::ListResource;
use fraudwatch::config::Config;
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.api.base_url, "http://localhost:5001/api");
    assert_eq!(config.api.timeout_secs, 30);
    assert_eq!(config.grid.per_page, 50);
    assert_eq!(config.grid.default_view, "transactions");
    assert_eq!(config.export.directory, std::path::PathBuf::from("."));
    assert_eq!(config.stats.refresh_interval_secs, 30);
    assert!(!config.logging.enabled);
    assert_eq!(config.default_view(), Some(ListResource::Transactions));
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();

    // Valid config should pass
    assert!(config.validate().is_ok());

    config.grid.per_page = 0;
    assert!(config.validate().is_err());
    config.grid.per_page = 501;
    assert!(config.validate().is_err());
    config.grid.per_page = 500;
    assert!(config.validate().is_ok());

    config.api.timeout_secs = 0;
    assert!(config.validate().is_err());
    config.api.timeout_secs = 30;

    config.api.base_url = "localhost:5001".to_string();
    assert!(config.validate().is_err());
    config.api.base_url = "  ".to_string();
    assert!(config.validate().is_err());
    config.api.base_url = "https://fraud.example.com/api".to_string();
    assert!(config.validate().is_ok());
}

#[test]
fn test_unknown_default_view() {
    let mut config = Config::default();
    config.grid.default_view = "accounts".to_string();

    let err = config.validate().unwrap_err().to_string();
    assert!(err.contains("grid.default_view 'accounts' not found"));
    assert!(err.contains("transactions, alerts, reactivations"));

    // View names are case-insensitive
    config.grid.default_view = "Alerts".to_string();
    assert_eq!(config.default_view(), Some(ListResource::Alerts));
}

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let toml_str = toml::to_string_pretty(&config).unwrap();
    assert!(toml_str.contains("per_page = 50"));
    assert!(toml_str.contains("default_view = \"transactions\""));
    assert!(toml_str.contains("refresh_interval_secs = 30"));
}

#[test]
fn test_partial_config_deserialization() {
    // Partial TOML merges with defaults
    let partial_toml = r#"
[grid]
per_page = 100

[logging]
enabled = true
"#;

    let config: Config = toml::from_str(partial_toml).unwrap();

    assert_eq!(config.grid.per_page, 100);
    assert!(config.logging.enabled);

    assert_eq!(config.grid.default_view, "transactions");
    assert_eq!(config.api.timeout_secs, 30);
    assert_eq!(config.stats.refresh_interval_secs, 30);
}

#[test]
fn test_load_from_file_validates() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fraudwatch.toml");

    std::fs::write(&path, "[api]\nbase_url = \"http://10.0.0.5:8080/api\"\n").unwrap();
    let config = Config::load_from_file(&path).unwrap();
    assert_eq!(config.api.base_url, "http://10.0.0.5:8080/api");

    std::fs::write(&path, "[grid]\nper_page = 9000\n").unwrap();
    assert!(Config::load_from_file(&path).is_err());

    std::fs::write(&path, "[grid\nper_page = ").unwrap();
    let err = Config::load_from_file(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn test_generate_default_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    Config::generate_default_config(&path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("# fraudwatch Configuration File\n# Generated on "));

    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded.grid.per_page, 50);
    assert_eq!(loaded.api.base_url, "http://localhost:5001/api");
}
