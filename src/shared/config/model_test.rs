use std::fs;

use indoc::indoc;
use tempfile::tempdir;

use crate::shared::config::model::load_settings_from;

#[test]
fn missing_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent");
    let settings = load_settings_from(path.to_str().unwrap()).unwrap();
    assert_eq!(settings.logging.log_dir, "logs");
    assert_eq!(settings.logging.stdout_level, "info");
    assert_eq!(settings.aggregate.partitions, 0);
    assert_eq!(settings.aggregate.state_pool_capacity, 1024);
}

#[test]
fn file_values_override_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("agg.toml");
    fs::write(
        &path,
        indoc! {r#"
            [logging]
            stdout_level = "warn"

            [aggregate]
            partitions = 6
            state_pool_capacity = 16
        "#},
    )
    .unwrap();

    let settings = load_settings_from(path.to_str().unwrap()).unwrap();
    assert_eq!(settings.logging.stdout_level, "warn");
    assert_eq!(settings.logging.file_level, "debug");
    assert_eq!(settings.aggregate.partitions, 6);
    assert_eq!(settings.aggregate.state_pool_capacity, 16);
}

#[test]
fn malformed_value_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(
        &path,
        indoc! {r#"
            [aggregate]
            partitions = "many"
        "#},
    )
    .unwrap();

    assert!(load_settings_from(path.to_str().unwrap()).is_err());
}
