use std::sync::Arc;

use crate::artifacts::{ArtifactError, Artifacts};
use crate::config::DisplaySettings;
use crate::egui_app::state::{ResultState, UiState};
use crate::egui_app::view_model;
use crate::features::{self, CustomerForm};
use crate::predict;

/// Maintains form state and bridges encoding and inference to the egui UI.
pub struct ChurnController {
    pub ui: UiState,
    artifacts: Arc<Artifacts>,
    display: DisplaySettings,
}

impl ChurnController {
    pub fn new(artifacts: Arc<Artifacts>, display: DisplaySettings) -> Self {
        Self {
            ui: UiState::default(),
            artifacts,
            display,
        }
    }

    /// Build a controller from the artifact load outcome.
    ///
    /// A failed load yields the message to show in place of the form.
    pub fn from_artifacts(
        outcome: Result<Arc<Artifacts>, &ArtifactError>,
        display: DisplaySettings,
    ) -> Result<Self, String> {
        outcome
            .map(|artifacts| Self::new(artifacts, display))
            .map_err(|err| format!("Error loading files: {err}"))
    }

    /// Encode the current form and run one prediction, replacing the previous result.
    pub fn submit(&mut self) {
        let vector = features::encode(&self.ui.form, Some(&self.artifacts.label_encoder));
        self.ui.result = match predict::predict(&self.artifacts.classifier, &vector) {
            Ok(prediction) => {
                tracing::info!("Prediction: label {}", prediction.outcome.label());
                ResultState::Prediction(view_model::prediction_view(
                    &prediction,
                    self.display.show_probability,
                ))
            }
            Err(err) => {
                tracing::error!("Prediction failed: {err}");
                ResultState::Failed(err.to_string())
            }
        };
    }

    /// Restore the form defaults and clear the result.
    pub fn reset_form(&mut self) {
        self.ui.form = CustomerForm::default();
        self.ui.result = ResultState::Empty;
    }

    pub fn show_probability(&self) -> bool {
        self.display.show_probability
    }

    pub fn set_show_probability(&mut self, show: bool) {
        self.display.show_probability = show;
    }
}
