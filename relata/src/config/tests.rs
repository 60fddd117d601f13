#[cfg(test)]
mod tests {
    use crate::config::{
        CacheConfig, ConfigBuilder, ConfigError, ConfigLoader, LogFormat, LogLevel, RelataConfig,
        validation,
    };
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn test_default_config() {
        let config = RelataConfig::default();
        assert_eq!(config.fetcher.top_n, 15);
        assert_eq!(config.fetcher.status, "publish");
        assert_eq!(config.fetcher.product_type, "product");
        assert!(config.fetcher.hide_out_of_stock);
        assert_eq!(config.scoring.base_score, 0.0);
        assert!(config.cache.enabled);
        assert_eq!(config.cache.ttl, Duration::from_secs(60));
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_config_builder_overrides() {
        let config = ConfigBuilder::new()
            .with_top_n(5)
            .with_status("private")
            .with_product_type("sku")
            .with_hide_out_of_stock(false)
            .with_base_score(0.5)
            .with_cache_ttl(Duration::from_secs(10))
            .with_cache_capacity(16)
            .with_cache_key_prefix("site2_")
            .with_log_level(LogLevel::Debug)
            .build()
            .unwrap();

        assert_eq!(config.fetcher.top_n, 5);
        assert_eq!(config.fetcher.status, "private");
        assert_eq!(config.fetcher.product_type, "sku");
        assert!(!config.fetcher.hide_out_of_stock);
        assert_eq!(config.scoring.base_score, 0.5);
        assert_eq!(config.cache.ttl, Duration::from_secs(10));
        assert_eq!(config.cache.capacity, 16);
        assert_eq!(config.cache.key_prefix, "site2_");
        assert_eq!(config.logging.level, LogLevel::Debug);
    }

    #[test]
    fn test_validation() {
        assert!(validation::validate_config(&RelataConfig::default()).is_ok());

        let invalid = [
            ConfigBuilder::new().with_top_n(0).build(),
            ConfigBuilder::new().with_status("  ").build(),
            ConfigBuilder::new().with_product_type("").build(),
            ConfigBuilder::new().with_base_score(f64::NAN).build(),
            ConfigBuilder::new().with_base_score(f64::INFINITY).build(),
            ConfigBuilder::new().with_cache_capacity(0).build(),
        ];
        for result in invalid {
            assert!(matches!(result, Err(ConfigError::ValidationError(_))));
        }

        // Capacity is irrelevant once the cache is off
        assert!(
            ConfigBuilder::new()
                .with_cache_capacity(0)
                .without_cache()
                .build()
                .is_ok()
        );
    }

    #[test]
    fn test_predefined_configs() {
        let dev = ConfigBuilder::development().build().unwrap();
        let test = ConfigBuilder::testing().build().unwrap();
        let prod = ConfigBuilder::production().build().unwrap();

        assert_eq!(dev.logging.level, LogLevel::Debug);
        assert_eq!(dev.cache.ttl, Duration::from_secs(5));
        assert!(!test.cache.enabled);
        assert_eq!(prod.logging.format, LogFormat::Json);
        assert_eq!(prod.cache.ttl, Duration::from_secs(300));
    }

    #[test]
    fn test_config_serialization() {
        let config = ConfigBuilder::new()
            .with_top_n(8)
            .with_cache_ttl(Duration::from_secs(90))
            .build()
            .unwrap();

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"ttl\":\"1m 30s\""));
        let deserialized: RelataConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_loader_reads_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relata.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[fetcher]\ntop_n = 20\nhide_out_of_stock = false\n\n[cache]\nttl = \"2m\"\n"
        )
        .unwrap();

        let config = ConfigLoader::new()
            .load_file(&path)
            .unwrap()
            .extract()
            .unwrap();

        assert_eq!(config.fetcher.top_n, 20);
        assert!(!config.fetcher.hide_out_of_stock);
        assert_eq!(config.fetcher.status, "publish");
        assert_eq!(config.cache.ttl, Duration::from_secs(120));
        assert_eq!(config.cache, CacheConfig {
            ttl: Duration::from_secs(120),
            ..CacheConfig::default()
        });
    }

    #[test]
    fn test_loader_rejects_missing_and_unsupported_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(matches!(
            ConfigLoader::new().load_file(&missing),
            Err(ConfigError::FileLoadError(_))
        ));

        let ini = dir.path().join("relata.ini");
        std::fs::write(&ini, "top_n=3").unwrap();
        assert!(matches!(
            ConfigLoader::new().load_file(&ini),
            Err(ConfigError::FileLoadError(_))
        ));
    }

    #[test]
    fn test_loader_validates_extracted_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relata.json");
        std::fs::write(&path, r#"{"fetcher": {"top_n": 0}}"#).unwrap();

        let result = ConfigLoader::new().load_file(&path).unwrap().extract();
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }
}
