//! Integration tests for dsadash-core infrastructure

use dsadash_core::{
    config_error, init_logging, not_found_error, performance, storage_error, validation_error,
    DashConfig, DashError, ErrorContext, ErrorKind, LogFormat, LoggingConfig,
};

#[test]
fn test_error_handling() {
    let error = not_found_error!("/data/DSA/missing.md", "test_component");

    match &error {
        DashError::NotFound { resource, context } => {
            assert_eq!(resource, "/data/DSA/missing.md");
            assert_eq!(context.component, "test_component");
            assert!(!context.error_id.is_empty());
            assert_eq!(context.recovery_suggestions.len(), 2);
        }
        _ => panic!("Expected NotFound error"),
    }
    assert_eq!(error.kind(), ErrorKind::NotFound);

    // Logging must not panic without a subscriber
    error.log();

    let invalid = validation_error!("path is required", "path", "test");
    assert_eq!(invalid.kind(), ErrorKind::InvalidInput);

    let storage = storage_error!(
        "write failed",
        "test",
        std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied")
    );
    assert_eq!(storage.kind(), ErrorKind::IoFailure);
    assert!(std::error::Error::source(&storage).is_some());

    let config = config_error!("bad config", "test");
    assert_eq!(config.kind(), ErrorKind::Internal);
    assert!(config.context().is_some());

    let parse: DashError = serde_json::from_str::<serde_json::Value>("{")
        .unwrap_err()
        .into();
    assert_eq!(parse.kind(), ErrorKind::ParseFailure);
    assert!(parse.context().is_none());
}

#[test]
fn test_error_context_builder() {
    let context = ErrorContext::new("tree_builder")
        .with_operation("build")
        .with_metadata("root", "/data/DSA")
        .with_suggestion("Check permissions");

    assert_eq!(context.operation.as_deref(), Some("build"));
    assert_eq!(context.metadata.get("root").map(String::as_str), Some("/data/DSA"));
    assert_eq!(context.recovery_suggestions, vec!["Check permissions".to_string()]);
}

#[test]
fn test_logging_initialization() {
    let config = LoggingConfig {
        level: "debug".to_string(),
        format: LogFormat::Compact,
        include_location: false,
        include_thread: false,
        log_file_path: None,
        enable_performance_monitoring: false,
        filter_directives: vec!["dsadash_core=debug".to_string()],
    };

    // A global subscriber can only be installed once per process, so a second
    // attempt must report an error instead of panicking.
    let _ = init_logging(&config);
    assert!(init_logging(&config).is_err());
}

#[test]
fn test_verbose_logging_config() {
    let config = LoggingConfig::default().verbose();
    assert_eq!(config.level, "debug");
    assert!(config
        .filter_directives
        .iter()
        .all(|directive| directive.ends_with("=debug")));
}

#[test]
fn test_measure_sync_returns_result() {
    let value = performance::measure_sync("sum", || (1..=4).sum::<u32>());
    assert_eq!(value, 10);
}

#[test]
fn test_config_validation() {
    let mut config = DashConfig::default();
    assert!(config.validate().is_ok());

    config.server.port = 0;
    match config.validate().unwrap_err() {
        DashError::Config { message, .. } => assert!(message.contains("port")),
        _ => panic!("Expected Config error"),
    }

    config = DashConfig::default();
    config.repository.markdown_extension = ".".to_string();
    assert!(config.validate().is_err());

    config = DashConfig::default();
    config.repository.ignored_names.push("nested/dir".to_string());
    assert!(config.validate().is_err());
}

#[test]
fn test_config_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dsadash.toml");

    let mut config = DashConfig::default();
    config.repository.root = dir.path().join("DSA");
    config.repository.prune_empty_dirs = false;
    config.server.port = 4000;

    config.save_to_file(&path).unwrap();
    let loaded = DashConfig::from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_partial_config_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dsadash.toml");
    std::fs::write(&path, "[server]\nport = 8081\n").unwrap();

    let loaded = DashConfig::from_file(&path).unwrap();
    assert_eq!(loaded.server.port, 8081);
    assert_eq!(loaded.server.host, "127.0.0.1");
    assert_eq!(loaded.repository, DashConfig::default().repository);
}

#[test]
fn test_config_parse_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[server\nport = ").unwrap();

    assert!(matches!(
        DashConfig::from_file(&path),
        Err(DashError::Config { .. })
    ));
    assert!(DashConfig::from_file(dir.path().join("missing.toml")).is_err());
}
