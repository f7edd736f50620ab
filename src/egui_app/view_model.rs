//! Helpers to convert domain data into egui-facing view structs.

use crate::egui_app::state::{PredictionView, ResultTone};
use crate::predict::{ChurnOutcome, Prediction};

/// Convert a prediction into the message shown under the form.
pub fn prediction_view(prediction: &Prediction, show_probability: bool) -> PredictionView {
    let outcome = prediction.outcome;
    PredictionView {
        tone: match outcome {
            ChurnOutcome::Churn => ResultTone::Churn,
            ChurnOutcome::Stay => ResultTone::Stay,
        },
        headline: outcome.headline().to_string(),
        suggestion: outcome.suggestion().map(str::to_string),
        probability: show_probability
            .then(|| format!("Churn probability: {:.1}%", prediction.churn_probability * 100.0)),
    }
}
