use redline::commands::handle_config_subcommand;
use redline::errors::AppError;
use redline::utils::config::{read_config, write_config, Config};
use std::fs;

#[test]
fn missing_file_is_created_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let config = read_config(Some(path.as_path())).unwrap();

    assert_eq!(config, Config::default());
    assert!(path.exists());
}

#[test]
fn config_subcommand_persists_changes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    handle_config_subcommand(
        Some(path.as_path()),
        None,
        Some(9090),
        Some("debug".to_string()),
        Some("gpt-4o".to_string()),
        None,
        Some(0.2),
        None,
    )
    .unwrap();

    let config = read_config(Some(path.as_path())).unwrap();
    assert_eq!(config.port, 9090);
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.model, "gpt-4o");
    assert_eq!(config.temperature, 0.2);
    assert_eq!(config.host, Config::default().host);
}

#[test]
fn invalid_values_are_rejected_and_repairable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let broken = Config {
        temperature: 3.0,
        ..Config::default()
    };
    write_config(&broken, Some(path.as_path())).unwrap();

    assert!(matches!(
        read_config(Some(path.as_path())),
        Err(AppError::InvalidInput(_))
    ));

    let rejected = handle_config_subcommand(
        Some(path.as_path()),
        None,
        Some(0),
        None,
        None,
        None,
        Some(0.7),
        None,
    );
    assert!(rejected.is_err());

    handle_config_subcommand(
        Some(path.as_path()),
        None,
        None,
        None,
        None,
        None,
        Some(0.7),
        None,
    )
    .unwrap();
    assert_eq!(read_config(Some(path.as_path())).unwrap().temperature, 0.7);
}

#[test]
fn unparseable_file_is_a_toml_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "port = \"eighty\"").unwrap();

    assert!(matches!(read_config(Some(path.as_path())), Err(AppError::TomlError(_))));
}
