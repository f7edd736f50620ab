//! Shared state types for the egui UI.

use crate::features::CustomerForm;

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug, Default)]
pub struct UiState {
    /// Values currently entered in the form widgets.
    pub form: CustomerForm,
    pub result: ResultState,
}

/// What the result area below the form shows.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ResultState {
    /// Nothing submitted yet.
    #[default]
    Empty,
    Prediction(PredictionView),
    /// The inference call failed; the message is shown verbatim.
    Failed(String),
}

/// Display-ready prediction message.
#[derive(Clone, Debug, PartialEq)]
pub struct PredictionView {
    pub tone: ResultTone,
    pub headline: String,
    pub suggestion: Option<String>,
    /// Formatted churn probability, present when enabled in settings.
    pub probability: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResultTone {
    Churn,
    Stay,
}
