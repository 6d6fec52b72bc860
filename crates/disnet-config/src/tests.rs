use super::*;
use std::collections::HashMap;
use std::io::Write;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.server.port, 8000);
    assert_eq!(config.server.bind_address(), "0.0.0.0:8000");
    assert!(config.server.cors_permissive);
    assert_eq!(config.data.source, DataSource::Snapshot);
    assert_eq!(config.data.snapshot_path, PathBuf::from("data/processed_network.json"));
    assert_eq!(config.logging.filter, "disnet=debug,info");
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let config: Config = toml::from_str(
        r#"
        [server]
        port = 9100

        [data]
        source = "csv"
        csv_path = "fixtures/pairs.csv"
        "#,
    )
    .unwrap();

    assert_eq!(config.server.port, 9100);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.data.source, DataSource::Csv);
    assert_eq!(config.data.csv_path, PathBuf::from("fixtures/pairs.csv"));
    assert_eq!(config.data.snapshot_path, PathBuf::from("data/processed_network.json"));
    assert_eq!(config.query.max_limit, 100_000);
}

#[test]
fn test_from_yaml_file() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(file, "server:\n  host: 127.0.0.1\n  port: 8081\nquery:\n  max_limit: 50").unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.server.bind_address(), "127.0.0.1:8081");
    assert_eq!(config.query.max_limit, 50);
}

#[test]
fn test_invalid_toml_reports_path() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[server\nport = ").unwrap();

    let err = Config::from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Toml { .. }));
    assert!(err.to_string().contains(&file.path().display().to_string()));
}

#[test]
fn test_env_overrides() {
    let mut config = Config::default();
    config
        .apply_overrides(lookup_from(&[
            ("DISNET_PORT", "7000"),
            ("DISNET_DATA_SOURCE", "CSV"),
            ("DISNET_CSV_PATH", "/srv/pairs.csv"),
        ]))
        .unwrap();

    assert_eq!(config.server.port, 7000);
    assert_eq!(config.data.source, DataSource::Csv);
    assert_eq!(config.data.csv_path, PathBuf::from("/srv/pairs.csv"));
}

#[test]
fn test_bad_port_override_is_rejected() {
    let mut config = Config::default();
    let err = config
        .apply_overrides(lookup_from(&[("DISNET_PORT", "eighty")]))
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidOverride { ref key, .. } if key == "DISNET_PORT"));
}
