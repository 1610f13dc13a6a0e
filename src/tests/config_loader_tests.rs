#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::attract::AttractConfirmPolicy;
    use crate::config::GameConfig;
    use crate::config::loader::{
        CONFIG_ENV_VAR, ConfigError, get_config_file_path, load_config_from, save_config_to,
    };
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    // Helper function to create a test config path
    fn create_test_config_path() -> (tempfile::TempDir, PathBuf) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("nested").join("dropgrid.toml");
        (temp_dir, config_path)
    }

    #[test]
    fn test_load_nonexistent_config() {
        let (_temp_dir, config_path) = create_test_config_path();
        assert!(!config_path.exists());

        // Loading a non-existent config should create a default one
        let config = load_config_from(&config_path).expect("Failed to load default config");

        assert!(config_path.exists(), "Config file should have been created");
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_save_and_load_config() {
        let (_temp_dir, config_path) = create_test_config_path();

        let mut config = GameConfig::default();
        config.board.width = 12;
        config.timing.drop_ticks = 7;
        config.attract.confirm_policy = AttractConfirmPolicy::RotateOnly;
        config.touch.cooldown_ms = 250;

        save_config_to(&config_path, &config).expect("Failed to save config");
        let loaded = load_config_from(&config_path).expect("Failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let (temp_dir, _) = create_test_config_path();
        let config_path = temp_dir.path().join("partial.toml");
        fs::write(
            &config_path,
            "[board]\nheight = 30\n\n[attract]\nconfirm_policy = \"rotate-only\"\n",
        )
        .unwrap();

        let config = load_config_from(&config_path).expect("Failed to load partial config");

        assert_eq!(config.board.height, 30);
        assert_eq!(config.board.width, 10);
        assert_eq!(config.attract.confirm_policy, AttractConfirmPolicy::RotateOnly);
        assert_eq!(config.attract.interval_ms, 50);
        assert_eq!(config.timing, GameConfig::default().timing);
    }

    #[test]
    fn test_invalid_config_file() {
        let (temp_dir, _) = create_test_config_path();
        let config_path = temp_dir.path().join("broken.toml");
        fs::write(&config_path, "[board\nwidth = ten").unwrap();

        let result = load_config_from(&config_path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let (temp_dir, _) = create_test_config_path();
        let config_path = temp_dir.path().join("policy.toml");
        fs::write(&config_path, "[attract]\nconfirm_policy = \"sometimes\"\n").unwrap();

        assert!(matches!(
            load_config_from(&config_path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_env_var_overrides_path() {
        let (_temp_dir, config_path) = create_test_config_path();

        // Set environment variable to use this path
        unsafe {
            std::env::set_var(CONFIG_ENV_VAR, config_path.to_str().unwrap());
        }
        assert_eq!(get_config_file_path(), config_path);
        unsafe {
            std::env::remove_var(CONFIG_ENV_VAR);
        }
    }
}
