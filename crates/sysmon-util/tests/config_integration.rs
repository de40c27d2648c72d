//! Integration tests for loading and saving UtilConfig

use std::io::Cursor;
use sysmon_util::config::UtilConfig;
use sysmon_util::read::read_all_with;
use sysmon_util::scalar::{parse_scalar_with, ScalarValue};
use tempfile::TempDir;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("sysmon_util=debug")
        .try_init();
}

#[tokio::test]
async fn test_save_and_load_roundtrip() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("sysmon.toml");

    let config = UtilConfig {
        read_chunk_size: 1024,
        parse_bool: true,
    };
    config.save_to_path(&path).await.unwrap();
    assert!(path.exists());
    assert!(!path.with_extension("toml.tmp").exists());

    let loaded = UtilConfig::from_toml(&std::fs::read_to_string(&path).unwrap()).unwrap();
    loaded.validate().unwrap();
    assert_eq!(loaded, config);
}

#[tokio::test]
async fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = UtilConfig::load_from_path(&dir.path().join("absent.toml"))
        .await
        .unwrap_err();
    assert!(err.is_config());
}

#[tokio::test]
async fn test_load_rejects_zero_chunk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sysmon.toml");
    std::fs::write(&path, "read_chunk_size = 0\n").unwrap();

    let err = UtilConfig::load_from_path(&path).await.unwrap_err();
    assert!(err.is_config());
}

#[tokio::test]
async fn test_save_rejects_invalid() {
    let dir = TempDir::new().unwrap();
    let config = UtilConfig {
        read_chunk_size: 0,
        parse_bool: false,
    };
    assert!(config.save_to_path(&dir.path().join("bad.toml")).await.is_err());
}

#[test]
fn test_config_drives_helpers() {
    let config = UtilConfig::from_toml("read_chunk_size = 3\nparse_bool = true\n").unwrap();

    let mut source = Cursor::new(b"off".to_vec());
    let text = read_all_with(&mut source, &config).unwrap();
    assert_eq!(parse_scalar_with(&text, &config), ScalarValue::Bool(false));
}
