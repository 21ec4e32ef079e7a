//! Integration tests for the `validate` command.
use rtrwh::cli::handle_validate_command;
use rtrwh::log::is_logger_initialised;
use rtrwh::settings::Settings;
use std::path::PathBuf;

/// Get the path to the example project.
fn get_project_path(name: &str) -> PathBuf {
    ["demos", name, "project.toml"].iter().collect()
}

/// An integration test for the `validate` command.
///
/// We also check that the logger is initialised after it is run.
#[test]
fn test_handle_validate_command() {
    unsafe { std::env::set_var("RTRWH_LOG_LEVEL", "off") };

    assert!(!is_logger_initialised());

    for name in ["simple", "dry_region", "large_roof"] {
        handle_validate_command(&get_project_path(name), None, Some(Settings::default()))
            .unwrap();
    }

    assert!(is_logger_initialised());

    let result = handle_validate_command(
        &get_project_path("no_such_project"),
        None,
        Some(Settings::default()),
    );
    assert_eq!(
        result.unwrap_err().to_string(),
        "Failed to validate project."
    );
}
