use std::path::{Path, PathBuf};

use churnsight::artifacts::ArtifactPaths;

/// The sample artifact pair shipped under `models/RandomForest/`.
pub fn bundled_paths() -> ArtifactPaths {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("models/RandomForest");
    ArtifactPaths {
        model_path: root.join("churn_pred_rf_model.json"),
        label_encoder_path: root.join("random_label.json"),
    }
}

/// Copy the bundled pair into `dir`, optionally replacing the label encoder contents.
pub fn copy_bundled(dir: &Path, label_encoder_json: Option<&str>) -> ArtifactPaths {
    let source = bundled_paths();
    let paths = ArtifactPaths {
        model_path: dir.join("model.json"),
        label_encoder_path: dir.join("labels.json"),
    };
    std::fs::copy(&source.model_path, &paths.model_path).expect("copy model");
    match label_encoder_json {
        Some(json) => std::fs::write(&paths.label_encoder_path, json).expect("write encoder"),
        None => {
            std::fs::copy(&source.label_encoder_path, &paths.label_encoder_path)
                .map(|_| ())
                .expect("copy encoder")
        }
    }
    paths
}
