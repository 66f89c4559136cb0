use super::*;
use std::path::PathBuf;

#[test]
fn test_parse_minimal_config() {
    let yaml = r#"
name: sales_silver
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.name, "sales_silver");
    assert_eq!(config.version, "1.0.0");
    assert_eq!(config.input_path, "data/incoming");
    assert_eq!(config.processed_path, "data/processed");
    assert_eq!(config.database.path, "target/sluice.duckdb");
}

#[test]
fn test_parse_full_config() {
    let yaml = r#"
name: sales_silver
version: "2.1.0"
input_path: incoming
processed_path: archive
database:
  path: "warehouse/sales.duckdb"
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.version, "2.1.0");
    assert_eq!(config.input_path, "incoming");
    assert_eq!(config.processed_path, "archive");
    assert_eq!(config.database.path, "warehouse/sales.duckdb");
}

#[test]
fn test_unknown_fields_rejected() {
    let yaml = r#"
name: sales_silver
not_a_field: true
"#;
    let result: Result<Config, _> = serde_yaml::from_str(yaml);
    assert!(result.is_err());
}

#[test]
fn test_path_resolution() {
    let config: Config = serde_yaml::from_str("name: sales_silver").unwrap();
    let root = PathBuf::from("/srv/pipelines/sales");

    assert_eq!(
        config.input_path_absolute(&root),
        root.join("data/incoming")
    );
    assert_eq!(
        config.processed_path_absolute(&root),
        root.join("data/processed")
    );
    assert_eq!(
        config.database_path_absolute(&root),
        root.join("target/sluice.duckdb").display().to_string()
    );
}

#[test]
fn test_absolute_paths_pass_through() {
    let yaml = r#"
name: sales_silver
input_path: /var/data/incoming
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    let root = PathBuf::from("/srv/elsewhere");
    assert_eq!(
        config.input_path_absolute(&root),
        PathBuf::from("/var/data/incoming")
    );
}

#[test]
fn test_memory_database_path_untouched() {
    let yaml = r#"
name: sales_silver
database:
  path: ":memory:"
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(
        config.database_path_absolute(&PathBuf::from("/srv")),
        ":memory:"
    );
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load_from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, CoreError::ConfigNotFound { .. }));
}

#[test]
fn test_load_from_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("sluice.yml"), "name: sales_silver\n").unwrap();

    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.name, "sales_silver");
}

#[test]
fn test_empty_name_rejected() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("sluice.yml"), "name: \"  \"\n").unwrap();

    let err = Config::load_from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, CoreError::ConfigInvalid { .. }));
}
