use std::collections::HashMap;
use std::env::VarError;
use std::path::PathBuf;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_empty_env_matches_defaults() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg, AppConfig::default());
    assert_eq!(cfg.carpark_ids, vec!["civic", "downtown", "victoria st"]);
    assert_eq!(cfg.category, "short-term");
    assert_eq!(cfg.request_timeout_secs, 30);
}

#[test]
fn build_app_config_overrides_data_dir() {
    let mut map = HashMap::new();
    map.insert("CARPARK_DATA_DIR", "/var/lib/carparks");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.data_dir, PathBuf::from("/var/lib/carparks"));
    assert_eq!(
        cfg.history_path(),
        PathBuf::from("/var/lib/carparks/history.csv")
    );
    assert_eq!(
        cfg.latest_path(),
        PathBuf::from("/var/lib/carparks/latest.csv")
    );
    assert_eq!(
        cfg.capacity_path(),
        PathBuf::from("/var/lib/carparks/capacity_lookup.csv")
    );
}

#[test]
fn build_app_config_blank_override_falls_back_to_default() {
    let mut map = HashMap::new();
    map.insert("CARPARK_CATEGORY", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.category, "short-term");
}

#[test]
fn build_app_config_parses_carpark_ids() {
    let mut map = HashMap::new();
    map.insert("CARPARK_IDS", " civic , , toka puia ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.carpark_ids, vec!["civic", "toka puia"]);
}

#[test]
fn build_app_config_rejects_empty_carpark_ids() {
    let mut map = HashMap::new();
    map.insert("CARPARK_IDS", " , ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CARPARK_IDS"),
        "expected InvalidEnvVar(CARPARK_IDS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_non_numeric_timeout() {
    let mut map = HashMap::new();
    map.insert("CARPARK_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CARPARK_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(CARPARK_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_timeout() {
    let mut map = HashMap::new();
    map.insert("CARPARK_REQUEST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::InvalidEnvVar { .. })));
}

#[test]
fn build_app_config_blank_timeout_and_ids_use_defaults() {
    let mut map = HashMap::new();
    map.insert("CARPARK_REQUEST_TIMEOUT_SECS", "  ");
    map.insert("CARPARK_IDS", "");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let defaults = AppConfig::default();
    assert_eq!(cfg.request_timeout_secs, defaults.request_timeout_secs);
    assert_eq!(cfg.carpark_ids, defaults.carpark_ids);
}

#[test]
fn build_app_config_custom_timeout_and_log_level() {
    let mut map = HashMap::new();
    map.insert("CARPARK_REQUEST_TIMEOUT_SECS", "5");
    map.insert("CARPARK_LOG_LEVEL", "debug");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 5);
    assert_eq!(cfg.log_level, "debug");
}
