//! # Logging Tests
//!
//! Tests for logging configuration, request IDs and macros.

mod logging_config_tests {
    use logging::LoggingConfig;

    #[test]
    fn test_logging_config_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, "compact");
        assert_eq!(config.environment, "development");
        assert!(config.include_timestamp);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_logging_config_deserializes_kebab_case() {
        let config: LoggingConfig =
            serde_json::from_str(r#"{"level": "warn", "log-file": "logs/okr.log", "include-timestamp": false}"#)
                .unwrap();
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, "compact");
        assert_eq!(config.log_file.as_deref(), Some("logs/okr.log"));
        assert!(!config.include_timestamp);
    }

    #[test]
    fn test_file_output_returns_guard() {
        let dir = std::env::temp_dir().join(format!("okr-logging-{}", std::process::id()));
        let config = LoggingConfig {
            log_file: Some(dir.join("okr.log").to_string_lossy().into_owned()),
            ..Default::default()
        };
        let (_subscriber, guard) = config.build();
        assert!(guard.is_some());
    }
}

mod request_id_tests {
    use logging::RequestId;

    #[test]
    fn test_request_id_uniqueness() {
        let id1 = RequestId::new();
        let id2 = RequestId::new();
        assert_ne!(id1, id2, "Request IDs should be unique");
    }

    #[test]
    fn test_generated_id_accepted_back_from_header() {
        let id = RequestId::new();
        let parsed = logging::request_id::try_from_header(id.as_str());
        assert_eq!(parsed, Some(id));
    }
}

mod macro_tests {
    #[test]
    fn test_macros_expand() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        logging::log_api_request!("GET", "/api/okrs", 200, 3);
        let value = logging::measure_duration!("test", "sum", { 1 + 1 });
        assert_eq!(value, 2);
    }
}
