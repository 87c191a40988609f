//! Layered settings loading from a search directory

use std::fs;

use tempfile::TempDir;

use docktree::application::ApplicationError;
use docktree::config::{local_config_path, Settings};

#[test]
fn given_local_config_when_loading_then_specified_fields_override_defaults() {
    let temp = TempDir::new().unwrap();
    fs::write(
        local_config_path(temp.path()),
        "dockerfile = \"Containerfile\"\nmax_depth = 4\n",
    )
    .unwrap();

    let settings = Settings::load(Some(temp.path())).unwrap();

    assert_eq!(settings.dockerfile, "Containerfile");
    assert_eq!(settings.max_depth, Some(4));
    assert_eq!(settings.unknown_parent, "?");
}

#[test]
fn given_invalid_local_max_depth_when_loading_then_config_error() {
    let temp = TempDir::new().unwrap();
    fs::write(local_config_path(temp.path()), "max_depth = 1\n").unwrap();

    let result = Settings::load(Some(temp.path()));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_malformed_local_config_when_loading_then_error_names_file() {
    let temp = TempDir::new().unwrap();
    let path = local_config_path(temp.path());
    fs::write(&path, "dockerfile = [unterminated\n").unwrap();

    let result = Settings::load(Some(temp.path()));

    match result {
        Err(ApplicationError::Config { message }) => {
            assert!(message.contains(&path.display().to_string()));
        }
        other => panic!("expected config error, got {other:?}"),
    }
}
