//! Tests for the TTFE configuration system.

use std::sync::Mutex;

use ttfe_core::config::{ConfigOverrides, ReportFormat, StrategyConfig, TtfeConfig};
use ttfe_core::errors::DiagnosticKind;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear all TTFE_ env vars and point HOME at an empty directory.
fn isolate_env(home: &std::path::Path) {
    for key in [
        "TTFE_TOP_K",
        "TTFE_ALPHA",
        "TTFE_BETA",
        "TTFE_DELTA",
        "TTFE_DATABASE",
        "TTFE_DEBUG_LEVEL",
        "TTFE_OUTPUT",
    ] {
        std::env::remove_var(key);
    }
    std::env::set_var("HOME", home);
}

#[test]
fn test_defaults_from_empty_toml() {
    let config = TtfeConfig::from_toml("").unwrap();
    let resolution = config.resolve();
    let settings = resolution.settings;
    assert_eq!(settings.top_k, 5);
    assert_eq!(settings.alpha, 0.5);
    assert_eq!(settings.beta, 0.5);
    assert_eq!(settings.delta, None);
    assert_eq!(settings.debug_level, 2);
    assert_eq!(settings.database, "ttfe");
    assert_eq!(settings.format, ReportFormat::Text);
    assert!(!settings.strategies.seed);
    assert!(settings.strategies.realized_value);
    assert!(settings.strategies.pairwise_exact);
    assert!(!settings.strategies.pairwise_lower_bound);
    assert!(settings.strategies.prune_search);
    assert!(settings.strategies.queue_feedback);
    assert!(!settings.strategies.cooccurrence_pruning);
    assert!(resolution.substitutions.is_empty());
}

#[test]
fn test_layer_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    std::fs::create_dir_all(home.path().join(".ttfe")).unwrap();
    std::fs::write(
        home.path().join(".ttfe").join("config.toml"),
        "[mining]\ntop_k = 3\ndatabase = \"user_db\"\n[logging]\ndebug_level = 1\n",
    )
    .unwrap();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("ttfe.toml"),
        "[mining]\ntop_k = 7\nalpha = 0.25\n[strategies]\npairwise_lower_bound = true\n",
    )
    .unwrap();

    let directives = ConfigOverrides {
        top_k: Some(9),
        ..Default::default()
    };
    std::env::set_var("TTFE_BETA", "0.4");
    let cli = ConfigOverrides {
        format: Some(ReportFormat::Json),
        ..Default::default()
    };

    let config = TtfeConfig::load(dir.path(), Some(&directives), Some(&cli)).config;
    let settings = config.resolve().settings;

    // user layer survives where nothing overrides it
    assert_eq!(settings.database, "user_db");
    assert_eq!(settings.debug_level, 1);
    // directives beat the project file
    assert_eq!(settings.top_k, 9);
    // env beta implies alpha and beats the project alpha
    assert!((settings.beta - 0.4).abs() < 1e-12);
    assert!((settings.alpha - 0.6).abs() < 1e-12);
    assert!(settings.strategies.pairwise_lower_bound);
    assert_eq!(settings.format, ReportFormat::Json);

    std::env::remove_var("TTFE_BETA");
}

#[test]
fn test_cli_beats_environment() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    std::env::set_var("TTFE_TOP_K", "11");
    std::env::set_var("TTFE_DELTA", "3.5");
    let cli = ConfigOverrides {
        top_k: Some(2),
        ..Default::default()
    };
    let dir = tempdir();
    let config = TtfeConfig::load(dir.path(), None, Some(&cli)).config;
    let settings = config.resolve().settings;
    assert_eq!(settings.top_k, 2);
    assert_eq!(settings.delta, Some(3.5));

    std::env::remove_var("TTFE_TOP_K");
    std::env::remove_var("TTFE_DELTA");
}

#[test]
fn test_broken_project_toml_is_skipped() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let dir = tempdir();
    std::fs::write(dir.path().join("ttfe.toml"), "[mining\ntop_k = 2\n").unwrap();
    let cli = ConfigOverrides {
        alpha: Some(0.75),
        ..Default::default()
    };
    let loaded = TtfeConfig::load(dir.path(), None, Some(&cli));

    assert_eq!(loaded.skipped.len(), 1);
    assert_eq!(loaded.skipped[0].kind, DiagnosticKind::ConfigFileSkipped);
    assert!(loaded.skipped[0].message.contains("ttfe.toml"));
    // the broken layer contributes nothing, the others still apply
    let settings = loaded.config.resolve().settings;
    assert_eq!(settings.top_k, 5);
    assert_eq!(settings.alpha, 0.75);
}

#[test]
fn test_broken_user_toml_keeps_project_layer() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    std::fs::create_dir_all(home.path().join(".ttfe")).unwrap();
    std::fs::write(home.path().join(".ttfe").join("config.toml"), "top_k = = 3").unwrap();
    let dir = tempdir();
    std::fs::write(dir.path().join("ttfe.toml"), "[mining]\ntop_k = 8\n").unwrap();

    let loaded = TtfeConfig::load(dir.path(), None, None);
    assert_eq!(loaded.skipped.len(), 1);
    assert_eq!(loaded.config.resolve().settings.top_k, 8);
}

#[test]
fn test_clean_load_reports_nothing_skipped() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let dir = tempdir();
    assert!(TtfeConfig::load(dir.path(), None, None).skipped.is_empty());
}

#[test]
fn test_unknown_keys_ignored() {
    let config = TtfeConfig::from_toml(
        "[mining]\ntop_k = 4\nfuture_knob = true\n[brand_new_section]\nx = 1\n",
    )
    .unwrap();
    assert_eq!(config.resolve().settings.top_k, 4);
}

#[test]
fn test_out_of_range_values_substituted() {
    let config = TtfeConfig::from_toml(
        "[mining]\ntop_k = -3\nalpha = 1.5\nbeta = -0.5\ndatabase = \"9lives\"\n[logging]\ndebug_level = 7\n",
    )
    .unwrap();
    let resolution = config.resolve();
    assert_eq!(resolution.settings.top_k, 5);
    assert_eq!(resolution.settings.alpha, 0.5);
    assert_eq!(resolution.settings.database, "ttfe");
    assert_eq!(resolution.settings.debug_level, 2);
    let fields: Vec<&str> = resolution
        .substitutions
        .iter()
        .map(|s| s.field.as_str())
        .collect();
    assert_eq!(fields, vec!["top_k", "alpha/beta", "database", "debug_level"]);
}

#[test]
fn test_positional_switches() {
    let mut strategies = StrategyConfig::default();
    assert!(strategies.set_positional(0, true));
    assert!(strategies.set_positional(3, true));
    assert!(strategies.set_positional(5, false));
    assert!(!strategies.set_positional(6, true));

    let mut config = TtfeConfig::default();
    config.apply_overrides(&ConfigOverrides {
        strategies,
        ..Default::default()
    });
    let flags = config.resolve().settings.strategies;
    assert_eq!(flags.switches(), [true, true, true, true, true, false]);
}

#[test]
fn test_config_round_trip() {
    let config = TtfeConfig::from_toml(
        "[mining]\ntop_k = 8\nalpha = 0.3\ndelta = 2.0\n[output]\nformat = \"json\"\n",
    )
    .unwrap();
    let text = config.to_toml().unwrap();
    let back = TtfeConfig::from_toml(&text).unwrap();
    assert_eq!(back.resolve().settings, config.resolve().settings);
}
