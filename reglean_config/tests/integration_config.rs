//! Integration tests for loading gleaner configuration files.

use reglean_config::Config;
use reglean_core::Value;
use std::path::PathBuf;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("reglean_{name}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_template_round_trip() {
    let dir = scratch_dir("template");
    let path = dir.join("config.json");

    Config::create_config_at(&path).unwrap();
    let config = Config::load_from(&path).unwrap();
    let gleaner = config.build_gleaner().unwrap();

    let gleaned = gleaner.glean("300uA_20G_-170to170deg_poldn").unwrap();
    assert_eq!(gleaned["current"], Some(Value::Float(300.0)));
    assert_eq!(gleaned["pol"], Some(Value::from("down")));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_create_refuses_to_overwrite() {
    let dir = scratch_dir("overwrite");
    let path = dir.join("config.json");

    Config::create_config_at(&path).unwrap();
    let err = Config::create_config_at(&path).unwrap_err();
    assert!(err.to_string().contains("already exists"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_invalid_pattern_is_reported() {
    let dir = scratch_dir("bad_pattern");
    let path = dir.join("config.json");
    std::fs::write(
        &path,
        r#"{ "gleaner": { "categories": { "broken": "(unclosed" } } }"#,
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    let err = config.build_gleaner().unwrap_err();
    assert!(err.to_string().contains("Invalid pattern"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_incomplete_translation_is_reported() {
    let dir = scratch_dir("bad_translation");
    let path = dir.join("config.json");
    std::fs::write(
        &path,
        r#"{
            "gleaner": {
                "categories": { "pol": "pol(up|down)" },
                "translations": { "pol": [ { "regex": true, "pattern": "down" } ] }
            }
        }"#,
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    let err = config.build_gleaner().unwrap_err();
    assert!(err.to_string().contains("Invalid translation"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_missing_file_has_context() {
    let err = Config::load_from(&std::env::temp_dir().join("reglean_does_not_exist.json"))
        .unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn test_sections_default() {
    let dir = scratch_dir("defaults");
    let path = dir.join("config.json");
    std::fs::write(&path, "{}").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert!(config.gleaner.categories.is_empty());
    assert!(!config.output.pretty);
    assert!(config.build_gleaner().unwrap().is_empty());

    let _ = std::fs::remove_dir_all(&dir);
}
