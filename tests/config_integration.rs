//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use std::fs;
use std::path::PathBuf;

use orbsky::config::AppConfig;
use serial_test::serial;

/// Fresh scratch config directory for one test
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("orbsky_config_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
#[serial]
fn test_shipped_defaults_match_code_defaults() {
    let config = AppConfig::load_from(concat!(env!("CARGO_MANIFEST_DIR"), "/config")).unwrap();
    let defaults = AppConfig::default();

    assert_eq!(config.window.title, defaults.window.title);
    assert_eq!(config.window.width, defaults.window.width);
    assert_eq!(config.window.height, defaults.window.height);
    assert_eq!(config.camera.position, defaults.camera.position);
    assert_eq!(config.camera.far, defaults.camera.far);
    assert_eq!(config.controls.damping_factor, defaults.controls.damping_factor);
    assert_eq!(config.controls.max_distance, defaults.controls.max_distance);
    assert_eq!(config.animation.time_step, defaults.animation.time_step);
    assert_eq!(config.animation.period, defaults.animation.period);
    assert_eq!(config.scene.path, None);
}

#[test]
#[serial]
fn test_env_override() {
    let dir = scratch_dir("env");
    std::env::set_var("ORBSKY_WINDOW__TITLE", "Test From Env");
    std::env::set_var("ORBSKY_ANIMATION__PAUSED", "true");
    let config = AppConfig::load_from(&dir);
    std::env::remove_var("ORBSKY_WINDOW__TITLE");
    std::env::remove_var("ORBSKY_ANIMATION__PAUSED");

    let config = config.unwrap();
    assert_eq!(config.window.title, "Test From Env");
    assert!(config.animation.paused);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
#[serial]
fn test_user_config_overrides_default() {
    let dir = scratch_dir("user");
    fs::write(
        dir.join("default.toml"),
        "[window]\ntitle = \"Default\"\nwidth = 960\nheight = 540\nfullscreen = false\nvsync = true\n",
    )
    .unwrap();
    fs::write(dir.join("user.toml"), "[window]\nwidth = 1280\n").unwrap();

    let config = AppConfig::load_from(&dir).unwrap();
    assert_eq!(config.window.title, "Default");
    assert_eq!(config.window.width, 1280);
    assert_eq!(config.window.height, 540);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
#[serial]
fn test_missing_directory_gives_defaults() {
    let dir = scratch_dir("missing").join("nowhere");
    let config = AppConfig::load_from(&dir).unwrap();
    assert_eq!(config.window.width, 960);
    assert_eq!(config.controls.key_pan_speed, 7.0);
}

#[test]
#[serial]
fn test_bad_value_is_an_error() {
    let dir = scratch_dir("bad");
    fs::write(dir.join("default.toml"), "[animation]\ntime_step = \"fast\"\n").unwrap();

    let err = AppConfig::load_from(&dir).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error:"));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
#[serial]
fn test_unusable_user_values_fall_back_to_defaults() {
    let dir = scratch_dir("unusable");
    fs::write(
        dir.join("user.toml"),
        "[camera]\nfov = 0.0\n\n[controls]\nmin_distance = 100.0\nmax_distance = 50.0\n\n[window]\ntitle = \"Mine\"\n",
    )
    .unwrap();

    let raw = AppConfig::load_from(&dir).unwrap();
    assert_eq!(raw.camera.fov, 0.0);

    let config = raw.sanitized();
    assert_eq!(config.camera.fov, 45.0);
    assert_eq!(config.controls.min_distance, 0.0);
    assert_eq!(config.controls.max_distance, 10000.0);
    assert_eq!(config.window.title, "Mine");

    // The defaults build a usable controller
    let controller = config.controls.build_controller();
    assert!(controller.min_distance <= controller.max_distance);
    let _ = fs::remove_dir_all(&dir);
}
