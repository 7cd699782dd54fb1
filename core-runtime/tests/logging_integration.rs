//! Integration tests for logging system

use bridge_traits::time::LogLevel;
use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
use core_runtime::Error;

#[test]
fn test_logging_initialization_is_once_per_process() {
    let config = LoggingConfig::default()
        .with_format(LogFormat::Compact)
        .with_level(LogLevel::Debug)
        .with_spans(false);

    init_logging(config.clone()).expect("first initialization succeeds");
    tracing::info!(component = "logging_integration", "Logging initialized");

    let err = init_logging(config).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
    assert!(err.to_string().contains("Failed to initialize logging"));
}

#[test]
fn test_format_selection() {
    // Debug builds should default to Pretty
    #[cfg(debug_assertions)]
    {
        let config = LoggingConfig::default();
        assert_eq!(config.format, LogFormat::Pretty);
    }

    // Release builds should default to JSON
    #[cfg(not(debug_assertions))]
    {
        let config = LoggingConfig::default();
        assert_eq!(config.format, LogFormat::Json);
    }
}

#[test]
fn test_filter_configuration() {
    let config = LoggingConfig::default().with_filter("core_metadata=debug,reqwest=warn");

    assert_eq!(
        config.filter,
        Some("core_metadata=debug,reqwest=warn".to_string())
    );
}

#[test]
fn test_config_chaining() {
    let config = LoggingConfig::default()
        .with_format(LogFormat::Json)
        .with_level(LogLevel::Warn)
        .with_spans(false)
        .with_target(false)
        .with_thread_info(true);

    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.level, LogLevel::Warn);
    assert!(!config.enable_spans);
    assert!(!config.display_target);
    assert!(config.display_thread_info);
}
