//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;
use std::time::Duration;

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = env::temp_dir().join(name);
    fs::write(&path, contents).expect("Failed to write test config");
    path
}

#[test]
fn default_config_path_contains_listview_config_toml() {
    let path = default_config_path().expect("Should have default path");
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("listview") && path_str.ends_with("config.toml"),
        "Path should contain 'listview' and end with 'config.toml', got: {}",
        path_str
    );
}

#[test]
fn default_log_path_ends_with_listview_log() {
    let path = default_log_path();
    assert!(
        path.to_string_lossy().ends_with("listview.log"),
        "Default log path should end with 'listview.log', got: {:?}",
        path
    );
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(
        result,
        Ok(None),
        "Missing config file should return Ok(None), not an error"
    );
}

#[test]
fn load_config_file_parses_valid_toml() {
    let config_path = write_temp(
        "listview_test_config.toml",
        r#"
default_screen = "users"
default_page_size = 25
debounce_ms = 200

[screens.users]
default_sort = "name"
"#,
    );

    let config = load_config_file(&config_path)
        .expect("Should successfully parse valid TOML")
        .expect("Should return Some(ConfigFile) for existing file");

    assert_eq!(config.default_screen, Some("users".to_string()));
    assert_eq!(config.default_page_size, Some(25));
    assert_eq!(config.debounce_ms, Some(200));
    let screens = config.screens.expect("screens section");
    assert_eq!(
        screens.get("users").and_then(|s| s.default_sort.clone()),
        Some("name".to_string())
    );

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = write_temp("listview_test_invalid.toml", "this is not valid TOML ][}{");

    let result = load_config_file(&config_path);
    match result {
        Err(ConfigError::ParseError { path, reason: _ }) => {
            assert_eq!(path, config_path);
        }
        _ => panic!("Expected ParseError, got {:?}", result),
    }

    fs::remove_file(config_path).ok();
}

#[test]
fn config_file_rejects_unknown_fields() {
    let result: Result<ConfigFile, _> = toml::from_str(
        r#"
default_page_size = 10
theme = "dark"
"#,
    );
    assert!(
        result.is_err(),
        "Should reject TOML with unknown fields due to deny_unknown_fields"
    );
}

// ===== merge_config =====

#[test]
fn merge_config_uses_presets_when_none() {
    let resolved = merge_config(None).expect("defaults are valid");
    let names: Vec<&str> = resolved.screens.keys().map(|n| n.as_str()).collect();
    assert_eq!(names, vec!["businesses", "locations", "units", "users"]);
    assert_eq!(resolved.default_screen.as_str(), "businesses");
    assert_eq!(resolved.log_file_path, default_log_path());
}

#[test]
fn merge_config_applies_global_page_size_to_every_screen() {
    let config = ConfigFile {
        default_page_size: Some(50),
        ..ConfigFile::default()
    };

    let resolved = merge_config(Some(config)).expect("valid config");
    for screen in resolved.screens.values() {
        assert_eq!(screen.default_page_size().get(), 50, "{}", screen.name());
    }
}

#[test]
fn merge_config_screen_section_beats_global_setting() {
    let config: ConfigFile = toml::from_str(
        r#"
default_page_size = 50
debounce_ms = 100

[screens.units]
default_page_size = 5
"#,
    )
    .expect("valid toml");

    let resolved = merge_config(Some(config)).expect("valid config");
    let units = resolved.screen("units").expect("units screen");
    assert_eq!(units.default_page_size().get(), 5);
    assert_eq!(units.debounce(), Duration::from_millis(100));

    let users = resolved.screen("users").expect("users screen");
    assert_eq!(users.default_page_size().get(), 50);
}

#[test]
fn merge_config_defines_new_screen() {
    let config: ConfigFile = toml::from_str(
        r#"
default_screen = "suppliers"

[screens.suppliers]
searchable_fields = ["name", "contact"]

[screens.suppliers.filters.status]
allowed_values = ["active", "inactive"]

[screens.suppliers.sort_options.name]
field = "name"
"#,
    )
    .expect("valid toml");

    let resolved = merge_config(Some(config)).expect("valid config");
    let suppliers = resolved.default_screen().expect("default screen exists");
    assert_eq!(suppliers.name().as_str(), "suppliers");
    assert_eq!(suppliers.searchable_fields().len(), 2);
    assert_eq!(suppliers.default_sort().map(|k| k.as_str()), Some("name"));
    assert_eq!(suppliers.default_page_size().get(), 10);
}

#[test]
fn merge_config_rejects_new_screen_without_search_fields() {
    let config: ConfigFile = toml::from_str(
        r#"
[screens.suppliers]
default_page_size = 10
"#,
    )
    .expect("valid toml");

    assert!(matches!(
        merge_config(Some(config)),
        Err(ConfigError::InvalidScreen { .. })
    ));
}

#[test]
fn merge_config_rejects_zero_global_page_size() {
    let config = ConfigFile {
        default_page_size: Some(0),
        ..ConfigFile::default()
    };
    assert!(matches!(
        merge_config(Some(config)),
        Err(ConfigError::InvalidPageSize { value: 0, .. })
    ));
}

#[test]
fn merge_config_rejects_unknown_default_screen() {
    let config = ConfigFile {
        default_screen: Some("invoices".to_string()),
        ..ConfigFile::default()
    };
    assert!(matches!(
        merge_config(Some(config)),
        Err(ConfigError::UnknownScreen { .. })
    ));
}

#[test]
fn merge_config_overrides_log_path() {
    let custom = PathBuf::from("/custom/path/to/app.log");
    let config = ConfigFile {
        log_file_path: Some(custom.clone()),
        ..ConfigFile::default()
    };
    let resolved = merge_config(Some(config)).expect("valid config");
    assert_eq!(resolved.log_file_path, custom);
}

#[test]
fn resolved_screen_lookup_reports_known_screens() {
    let resolved = ResolvedConfig::defaults().expect("valid defaults");
    match resolved.screen("invoices") {
        Err(ConfigError::UnknownScreen { known, .. }) => {
            assert_eq!(known, "businesses, locations, units, users");
        }
        other => panic!("Expected UnknownScreen, got {:?}", other),
    }
}

// ===== Environment overrides =====

/// RAII guard to ensure environment variable cleanup even under test parallelism.
struct EnvGuard(&'static str);

impl EnvGuard {
    fn new(name: &'static str) -> Self {
        env::remove_var(name);
        EnvGuard(name)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        env::remove_var(self.0);
    }
}

#[test]
#[serial(listview_env)]
fn apply_env_overrides_sets_page_size_on_every_screen() {
    let _page = EnvGuard::new(PAGE_SIZE_ENV);
    let _debounce = EnvGuard::new(DEBOUNCE_ENV);
    env::set_var(PAGE_SIZE_ENV, "15");

    let result = apply_env_overrides(ResolvedConfig::defaults().expect("valid defaults"))
        .expect("valid override");

    for screen in result.screens.values() {
        assert_eq!(screen.default_page_size().get(), 15);
    }
}

#[test]
#[serial(listview_env)]
fn apply_env_overrides_sets_debounce() {
    let _page = EnvGuard::new(PAGE_SIZE_ENV);
    let _debounce = EnvGuard::new(DEBOUNCE_ENV);
    env::set_var(DEBOUNCE_ENV, "75");

    let result = apply_env_overrides(ResolvedConfig::defaults().expect("valid defaults"))
        .expect("valid override");

    let users = result.screen("users").expect("users screen");
    assert_eq!(users.debounce(), Duration::from_millis(75));
}

#[test]
#[serial(listview_env)]
fn apply_env_overrides_rejects_non_numeric_value() {
    let _page = EnvGuard::new(PAGE_SIZE_ENV);
    let _debounce = EnvGuard::new(DEBOUNCE_ENV);
    env::set_var(PAGE_SIZE_ENV, "lots");

    let result = apply_env_overrides(ResolvedConfig::defaults().expect("valid defaults"));
    assert_eq!(
        result,
        Err(ConfigError::InvalidEnv {
            var: PAGE_SIZE_ENV.to_string(),
            value: "lots".to_string()
        })
    );
}

#[test]
#[serial(listview_env)]
fn apply_env_overrides_rejects_zero_page_size() {
    let _page = EnvGuard::new(PAGE_SIZE_ENV);
    let _debounce = EnvGuard::new(DEBOUNCE_ENV);
    env::set_var(PAGE_SIZE_ENV, "0");

    let result = apply_env_overrides(ResolvedConfig::defaults().expect("valid defaults"));
    assert!(matches!(result, Err(ConfigError::InvalidPageSize { .. })));
}

#[test]
#[serial(listview_env)]
fn apply_env_overrides_no_change_when_env_vars_not_set() {
    let _page = EnvGuard::new(PAGE_SIZE_ENV);
    let _debounce = EnvGuard::new(DEBOUNCE_ENV);

    let base = ResolvedConfig::defaults().expect("valid defaults");
    let result = apply_env_overrides(base.clone()).expect("no overrides");
    assert_eq!(result, base);
}

// ===== CLI overrides =====

#[test]
fn apply_cli_overrides_switches_default_screen() {
    let base = ResolvedConfig::defaults().expect("valid defaults");
    let result =
        apply_cli_overrides(base, Some("units".to_string()), None).expect("known screen");
    assert_eq!(result.default_screen.as_str(), "units");
}

#[test]
fn apply_cli_overrides_rejects_unknown_screen() {
    let base = ResolvedConfig::defaults().expect("valid defaults");
    let result = apply_cli_overrides(base, Some("nope".to_string()), None);
    assert!(matches!(result, Err(ConfigError::UnknownScreen { .. })));
}

#[test]
fn apply_cli_overrides_sets_log_path() {
    let base = ResolvedConfig::defaults().expect("valid defaults");
    let path = PathBuf::from("/tmp/listview-cli.log");
    let result = apply_cli_overrides(base, None, Some(path.clone())).expect("valid");
    assert_eq!(result.log_file_path, path);
}

// ===== Precedence =====

#[test]
#[serial(listview_config)]
fn load_config_with_precedence_prefers_explicit_path() {
    env::remove_var(CONFIG_ENV);

    let explicit_path = write_temp("listview_explicit.toml", "default_screen = \"units\"\n");
    let env_path = write_temp("listview_env.toml", "default_screen = \"users\"\n");
    env::set_var(CONFIG_ENV, &env_path);

    let config = load_config_with_precedence(Some(explicit_path.clone()))
        .expect("valid config")
        .expect("file exists");
    assert_eq!(
        config.default_screen,
        Some("units".to_string()),
        "Should use explicit path, not LISTVIEW_CONFIG env var"
    );

    fs::remove_file(explicit_path).ok();
    fs::remove_file(env_path).ok();
    env::remove_var(CONFIG_ENV);
}

#[test]
#[serial(listview_config)]
fn load_config_with_precedence_uses_env_var_when_no_explicit_path() {
    env::remove_var(CONFIG_ENV);

    let env_path = write_temp("listview_env_only.toml", "default_screen = \"users\"\n");
    env::set_var(CONFIG_ENV, &env_path);

    let config = load_config_with_precedence(None)
        .expect("valid config")
        .expect("file exists");
    assert_eq!(config.default_screen, Some("users".to_string()));

    fs::remove_file(env_path).ok();
    env::remove_var(CONFIG_ENV);
}
