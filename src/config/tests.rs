use super::*;
use figment::Jail;

fn load(jail: &mut Jail, custom: Option<&str>, overrides: &ConfigOverrides) -> figment::Result<RangesumConfig> {
    // Keep the real user config out of the picture
    let home = jail.directory().to_path_buf();
    jail.set_env("HOME", home.display());
    RangesumConfig::load(custom, overrides).map_err(|e| format!("{e:#}").into())
}

#[test]
fn test_config_loads_defaults() {
    Jail::expect_with(|jail| {
        let config = load(jail, None, &ConfigOverrides::default())?;
        assert_eq!(config, RangesumConfig::default());
        assert_eq!(config.reducer.min_threshold, 1000);
        assert_eq!(config.threshold(), None);
        assert_eq!(config.parallel.mode, ExecutionMode::Auto);
        Ok(())
    });
}

#[test]
fn test_repo_config_overrides_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "rangesum.toml",
            r#"
                [reducer]
                threshold = 5000
                range_policy = "inclusive"

                [parallel]
                mode = "scoped"
                max_threads = 2
            "#,
        )?;

        let config = load(jail, None, &ConfigOverrides::default())?;
        assert_eq!(config.threshold(), Some(5000));
        assert_eq!(config.reducer.range_policy, RangePolicy::Inclusive);
        assert_eq!(config.parallel.mode, ExecutionMode::Scoped);
        assert!(config.workers() <= 2);
        // Untouched keys keep their defaults
        assert_eq!(config.reducer.min_threshold, 1000);
        Ok(())
    });
}

#[test]
fn test_user_config_below_repo_config() {
    Jail::expect_with(|jail| {
        std::fs::create_dir_all(jail.directory().join(".config/rangesum"))
            .map_err(|e| e.to_string())?;
        jail.create_file(
            ".config/rangesum/config.toml",
            "[reducer]\nmin_threshold = 10\nthreshold = 20\n",
        )?;
        jail.create_file("rangesum.toml", "[reducer]\nthreshold = 30\n")?;

        let config = load(jail, None, &ConfigOverrides::default())?;
        assert_eq!(config.reducer.min_threshold, 10);
        assert_eq!(config.threshold(), Some(30));
        Ok(())
    });
}

#[test]
fn test_env_overrides_files() {
    Jail::expect_with(|jail| {
        jail.create_file("rangesum.toml", "[reducer]\nmin_threshold = 10\n")?;
        jail.set_env("RANGESUM_REDUCER__MIN_THRESHOLD", "50");
        jail.set_env("RANGESUM_PARALLEL__MODE", "sequential");

        let config = load(jail, None, &ConfigOverrides::default())?;
        assert_eq!(config.reducer.min_threshold, 50);
        assert_eq!(config.parallel.mode, ExecutionMode::Sequential);
        Ok(())
    });
}

#[test]
fn test_cli_overrides_win() {
    Jail::expect_with(|jail| {
        jail.set_env("RANGESUM_REDUCER__THRESHOLD", "4000");
        let overrides = ConfigOverrides {
            threshold: Some(9000),
            mode: Some(ExecutionMode::Parallel),
            range_policy: Some(RangePolicy::Inclusive),
            ..ConfigOverrides::default()
        };

        let config = load(jail, None, &overrides)?;
        assert_eq!(config.threshold(), Some(9000));
        assert_eq!(config.parallel.mode, ExecutionMode::Parallel);
        assert_eq!(config.reducer_config().range_policy, RangePolicy::Inclusive);
        Ok(())
    });
}

#[test]
fn test_custom_config_replaces_repo_config() {
    Jail::expect_with(|jail| {
        jail.create_file("rangesum.toml", "[reducer]\nthreshold = 30000\n")?;
        jail.create_file("custom.toml", "[reducer]\nmin_threshold = 5\n")?;

        let config = load(jail, Some("custom.toml"), &ConfigOverrides::default())?;
        assert_eq!(config.reducer.min_threshold, 5);
        assert_eq!(config.threshold(), None);
        Ok(())
    });
}

#[test]
fn test_missing_custom_config_is_an_error() {
    Jail::expect_with(|jail| {
        assert!(load(jail, Some("non_existent.toml"), &ConfigOverrides::default()).is_err());
        Ok(())
    });
}

#[test]
fn test_invalid_values_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file("rangesum.toml", "[parallel]\nthread_percentage = 0\n")?;
        assert!(load(jail, None, &ConfigOverrides::default()).is_err());

        jail.create_file("rangesum.toml", "[parallel]\nmode = \"turbo\"\n")?;
        assert!(load(jail, None, &ConfigOverrides::default()).is_err());
        Ok(())
    });
}
