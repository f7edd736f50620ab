//! Artifact load failures disable the form without crashing.

mod support;

use std::path::PathBuf;

use churnsight::artifacts::{ArtifactCache, ArtifactError, ArtifactPaths};
use churnsight::config::{self, DisplaySettings, LABEL_ENCODER_PATH_ENV, MODEL_PATH_ENV};
use churnsight::egui_app::ui::ChurnApp;
use support::artifacts::copy_bundled;
use support::churnsight_env::ChurnsightEnvGuard;

#[test]
fn missing_model_yields_launch_message_instead_of_form() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cache = ArtifactCache::new(ArtifactPaths {
        model_path: dir.path().join("missing_model.json"),
        label_encoder_path: dir.path().join("missing_labels.json"),
    });
    let message = ChurnApp::new(cache.get_or_load(), DisplaySettings::default())
        .err()
        .expect("form must not be built without artifacts");
    assert!(message.starts_with("Error loading files:"));
    assert!(message.contains("missing_model.json"));
}

#[test]
fn corrupt_label_encoder_fails_the_whole_load() {
    let dir = tempfile::tempdir().expect("tempdir");
    let paths = copy_bundled(dir.path(), Some("{\"classes\": \"Male\"}"));
    let cache = ArtifactCache::new(paths);
    assert!(matches!(
        cache.get_or_load(),
        Err(ArtifactError::LabelEncoder { .. })
    ));
    assert!(ChurnApp::new(cache.get_or_load(), DisplaySettings::default()).is_err());
}

#[test]
fn environment_points_the_loader_at_other_artifacts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let paths = copy_bundled(dir.path(), None);
    let config_home = dir.path().join("config");
    let _env = ChurnsightEnvGuard::set(&[
        ("CHURNSIGHT_CONFIG_HOME", config_home.to_string_lossy().into_owned()),
        (MODEL_PATH_ENV, paths.model_path.to_string_lossy().into_owned()),
        (
            LABEL_ENCODER_PATH_ENV,
            paths.label_encoder_path.to_string_lossy().into_owned(),
        ),
    ]);

    let app_config = config::load_or_default().expect("config loads");
    assert_eq!(app_config.artifacts, paths);
    assert_eq!(
        config::config_path().expect("config path"),
        config_home.join(".churnsight").join("config.toml")
    );
    let cache = ArtifactCache::new(app_config.artifacts);
    assert!(ChurnApp::new(cache.get_or_load(), app_config.display).is_ok());
    assert_ne!(
        cache.paths().model_path,
        PathBuf::from("models/RandomForest/churn_pred_rf_model.json")
    );
}
