#[cfg(test)]
mod tests {
    use shiftwise::libs::config::{Config, MatchPolicyKind, CONFIG_FILE_NAME};
    use shiftwise::libs::matcher::MatchPolicy;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ConfigTestContext {
        _temp_dir: TempDir,
        config_path: PathBuf,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
            ConfigTestContext {
                _temp_dir: temp_dir,
                config_path,
            }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_read_nonexistent_config(ctx: &mut ConfigTestContext) {
        let config = Config::read_from(&ctx.config_path).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.matching.policy, MatchPolicyKind::Strict);
        assert_eq!(config.script.shift_table, "ASISTENCIAS.TURNO");
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_config(ctx: &mut ConfigTestContext) {
        let mut config = Config::default();
        config.matching.policy = MatchPolicyKind::Tolerant;
        config.matching.entry_tolerance_minutes = 3;
        config.script.detail_table = "RRHH.TURNO_DETALLE".to_string();
        config.script.anchor_date = "2024-12-31".to_string();

        config.save_to(&ctx.config_path).unwrap();
        let read_config = Config::read_from(&ctx.config_path).unwrap();
        assert_eq!(read_config, config);

        let policy = MatchPolicy::from(&read_config.matching);
        assert!(policy.tolerant);
        assert_eq!(policy.entry_tolerance_minutes, 3);
        assert_eq!(policy.duration_tolerance_minutes, 10);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_invalid_config_is_not_saved(ctx: &mut ConfigTestContext) {
        let mut config = Config::default();
        config.script.anchor_date = "01/01/2025".to_string();

        assert!(config.save_to(&ctx.config_path).is_err());
        assert!(!ctx.config_path.exists());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_malformed_file_is_an_error(ctx: &mut ConfigTestContext) {
        std::fs::write(&ctx.config_path, "{ \"matching\": { \"policy\": \"fuzzy\" } }").unwrap();
        assert!(Config::read_from(&ctx.config_path).is_err());
    }
}
