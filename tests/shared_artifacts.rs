//! The process-wide artifact cache loads once and keeps the first caller's paths.

mod support;

use std::sync::Arc;

use churnsight::artifacts::{self, ArtifactPaths};
use support::artifacts::copy_bundled;

#[test]
fn shared_artifacts_load_once_for_the_whole_process() {
    let dir = tempfile::tempdir().expect("tempdir");
    let first_paths = copy_bundled(dir.path(), None);
    let first = artifacts::shared(&first_paths).expect("bundled artifacts load");

    let other_paths = ArtifactPaths {
        model_path: dir.path().join("missing_model.json"),
        label_encoder_path: dir.path().join("missing_labels.json"),
    };
    let second = artifacts::shared(&other_paths).expect("first outcome is reused");
    assert!(Arc::ptr_eq(&first, &second));

    std::fs::remove_file(&first_paths.model_path).expect("remove model");
    let third = artifacts::shared(&first_paths).expect("no reload from disk");
    assert!(Arc::ptr_eq(&first, &third));
}
