//! Load-once access to the trained classifier and the Gender label encoder.
//!
//! Both files are read together; if either fails neither is handed out. The outcome,
//! failure included, is memoized for the lifetime of the process.

use std::{
    path::{Path, PathBuf},
    sync::{Arc, OnceLock},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::features::{FEATURE_COLUMNS, FEATURE_COUNT};
use crate::ml::forest::{ModelError, RandomForestModel};
use crate::ml::label_encoder::{EncoderError, LabelEncoder};
use crate::predict::{CHURN_LABEL, STAY_LABEL};

/// Default classifier location, relative to the working directory.
pub const DEFAULT_MODEL_PATH: &str = "models/RandomForest/churn_pred_rf_model.json";
/// Default label encoder location, relative to the working directory.
pub const DEFAULT_LABEL_ENCODER_PATH: &str = "models/RandomForest/random_label.json";

/// Where the two artifacts live on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactPaths {
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
    #[serde(default = "default_label_encoder_path")]
    pub label_encoder_path: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            label_encoder_path: default_label_encoder_path(),
        }
    }
}

fn default_model_path() -> PathBuf {
    PathBuf::from(DEFAULT_MODEL_PATH)
}

fn default_label_encoder_path() -> PathBuf {
    PathBuf::from(DEFAULT_LABEL_ENCODER_PATH)
}

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid classifier at {path}: {source}")]
    Model { path: PathBuf, source: ModelError },
    #[error("Invalid label encoder at {path}: {source}")]
    LabelEncoder { path: PathBuf, source: EncoderError },
    #[error("Classifier at {path} does not match the churn feature layout: {reason}")]
    Schema { path: PathBuf, reason: String },
}

/// The loaded, read-only artifact pair.
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub classifier: RandomForestModel,
    pub label_encoder: LabelEncoder,
}

/// Read and validate both artifacts.
pub fn load(paths: &ArtifactPaths) -> Result<Artifacts, ArtifactError> {
    let classifier = load_classifier(&paths.model_path)?;
    let label_encoder = load_label_encoder(&paths.label_encoder_path)?;
    Ok(Artifacts {
        classifier,
        label_encoder,
    })
}

fn read(path: &Path) -> Result<Vec<u8>, ArtifactError> {
    std::fs::read(path).map_err(|source| ArtifactError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn load_classifier(path: &Path) -> Result<RandomForestModel, ArtifactError> {
    let bytes = read(path)?;
    let model =
        RandomForestModel::from_json_slice(&bytes).map_err(|source| ArtifactError::Model {
            path: path.to_path_buf(),
            source,
        })?;
    check_schema(&model).map_err(|reason| ArtifactError::Schema {
        path: path.to_path_buf(),
        reason,
    })?;
    Ok(model)
}

fn load_label_encoder(path: &Path) -> Result<LabelEncoder, ArtifactError> {
    let bytes = read(path)?;
    LabelEncoder::from_json_slice(&bytes).map_err(|source| ArtifactError::LabelEncoder {
        path: path.to_path_buf(),
        source,
    })
}

fn check_schema(model: &RandomForestModel) -> Result<(), String> {
    if model.n_features != FEATURE_COUNT {
        return Err(format!(
            "expected {FEATURE_COUNT} features, found {}",
            model.n_features
        ));
    }
    if model.classes != [STAY_LABEL, CHURN_LABEL] {
        return Err(format!(
            "expected classes [{STAY_LABEL}, {CHURN_LABEL}], found {:?}",
            model.classes
        ));
    }
    if let Some(names) = &model.feature_names {
        for (found, expected) in names.iter().zip(FEATURE_COLUMNS) {
            // Exporters may keep the dataset's spaced headers ("Satisfaction Score").
            let compact: String = found.chars().filter(|c| !c.is_whitespace()).collect();
            if compact != expected {
                return Err(format!("expected column {expected:?}, found {found:?}"));
            }
        }
    }
    Ok(())
}

/// A load-once cell around a single [`load`] outcome.
#[derive(Debug)]
pub struct ArtifactCache {
    paths: ArtifactPaths,
    cell: OnceLock<Result<Arc<Artifacts>, ArtifactError>>,
}

impl ArtifactCache {
    pub fn new(paths: ArtifactPaths) -> Self {
        Self {
            paths,
            cell: OnceLock::new(),
        }
    }

    pub fn paths(&self) -> &ArtifactPaths {
        &self.paths
    }

    /// Load on first use; every later call returns the same outcome.
    pub fn get_or_load(&self) -> Result<Arc<Artifacts>, &ArtifactError> {
        self.cell
            .get_or_init(|| {
                let outcome = load(&self.paths);
                match &outcome {
                    Ok(_) => tracing::info!(
                        "Loaded classifier {} and label encoder {}",
                        self.paths.model_path.display(),
                        self.paths.label_encoder_path.display()
                    ),
                    Err(err) => tracing::error!("Error loading files: {err}"),
                }
                outcome.map(Arc::new)
            })
            .as_ref()
            .map(Arc::clone)
    }
}

static SHARED: OnceLock<ArtifactCache> = OnceLock::new();

/// Process-wide artifacts. The first caller's paths win.
pub fn shared(paths: &ArtifactPaths) -> Result<Arc<Artifacts>, &'static ArtifactError> {
    let cache = SHARED.get_or_init(|| ArtifactCache::new(paths.clone()));
    if cache.paths() != paths {
        tracing::warn!(
            "Artifacts already cached from {}; ignoring {}",
            cache.paths().model_path.display(),
            paths.model_path.display()
        );
    }
    cache.get_or_load()
}
