//! Single-shot churn prediction over an encoded feature vector.

use thiserror::Error;

use crate::features::FeatureVector;
use crate::ml::forest::RandomForestModel;

/// Class label the classifier uses for a customer who leaves.
pub const CHURN_LABEL: i64 = 1;
/// Class label the classifier uses for a customer who stays.
pub const STAY_LABEL: i64 = 0;

/// Failure of the inference call itself. Nothing here is retried or recovered.
#[derive(Debug, Error, PartialEq)]
pub enum PredictError {
    #[error("Classifier expects {expected} features but received {found}")]
    FeatureCount { expected: usize, found: usize },
    #[error("Feature {index} is not a finite number ({value})")]
    NonFinite { index: usize, value: f64 },
    #[error("Classifier returned {found} probabilities for {expected} classes")]
    ProbabilityWidth { expected: usize, found: usize },
    #[error("Classifier predicted unexpected class {0}")]
    UnexpectedClass(i64),
}

/// Anything that turns a feature row into class probabilities.
pub trait Classifier {
    /// Number of features each row must carry.
    fn n_features(&self) -> usize;
    /// Class labels, aligned with [`Classifier::predict_proba`].
    fn classes(&self) -> &[i64];
    fn predict_proba(&self, features: &[f64]) -> Vec<f64>;
}

impl Classifier for RandomForestModel {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn predict_proba(&self, features: &[f64]) -> Vec<f64> {
        RandomForestModel::predict_proba(self, features)
    }
}

/// Binary outcome of a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChurnOutcome {
    Churn,
    Stay,
}

impl ChurnOutcome {
    /// `1` for churn, `0` for retention.
    pub fn label(self) -> u8 {
        match self {
            Self::Churn => 1,
            Self::Stay => 0,
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            Self::Churn => "Prediction: Customer will CHURN (Leave the Bank)",
            Self::Stay => "Prediction: Customer will STAY",
        }
    }

    /// Retention advice shown alongside a churn prediction.
    pub fn suggestion(self) -> Option<&'static str> {
        match self {
            Self::Churn => Some("Suggestion: Please offer them a better plan or discount."),
            Self::Stay => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub outcome: ChurnOutcome,
    /// Probability mass the classifier puts on the churn class.
    pub churn_probability: f64,
}

/// Run the classifier once on `vector`.
pub fn predict(
    classifier: &dyn Classifier,
    vector: &FeatureVector,
) -> Result<Prediction, PredictError> {
    let features = vector.as_slice();
    if features.len() != classifier.n_features() {
        return Err(PredictError::FeatureCount {
            expected: classifier.n_features(),
            found: features.len(),
        });
    }
    if let Some((index, value)) = features
        .iter()
        .copied()
        .enumerate()
        .find(|(_, value)| !value.is_finite())
    {
        return Err(PredictError::NonFinite { index, value });
    }

    let classes = classifier.classes();
    let proba = classifier.predict_proba(features);
    if proba.len() != classes.len() || classes.is_empty() {
        return Err(PredictError::ProbabilityWidth {
            expected: classes.len(),
            found: proba.len(),
        });
    }

    let mut best = 0usize;
    for (idx, &p) in proba.iter().enumerate() {
        if p > proba[best] {
            best = idx;
        }
    }
    let outcome = match classes[best] {
        CHURN_LABEL => ChurnOutcome::Churn,
        STAY_LABEL => ChurnOutcome::Stay,
        other => return Err(PredictError::UnexpectedClass(other)),
    };
    let churn_probability = classes
        .iter()
        .position(|class| *class == CHURN_LABEL)
        .map(|idx| proba[idx])
        .unwrap_or(0.0);

    tracing::debug!(
        "Predicted label {} (churn probability {churn_probability:.3})",
        outcome.label()
    );
    Ok(Prediction {
        outcome,
        churn_probability,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{CustomerForm, FEATURE_COUNT, encode};

    struct FixedClassifier {
        classes: Vec<i64>,
        proba: Vec<f64>,
        n_features: usize,
    }

    impl Classifier for FixedClassifier {
        fn n_features(&self) -> usize {
            self.n_features
        }

        fn classes(&self) -> &[i64] {
            &self.classes
        }

        fn predict_proba(&self, _features: &[f64]) -> Vec<f64> {
            self.proba.clone()
        }
    }

    fn fixed(classes: Vec<i64>, proba: Vec<f64>) -> FixedClassifier {
        FixedClassifier {
            classes,
            proba,
            n_features: FEATURE_COUNT,
        }
    }

    fn vector() -> FeatureVector {
        encode(&CustomerForm::default(), None)
    }

    #[test]
    fn maps_class_one_to_churn() {
        let prediction = predict(&fixed(vec![0, 1], vec![0.2, 0.8]), &vector()).unwrap();
        assert_eq!(prediction.outcome, ChurnOutcome::Churn);
        assert_eq!(prediction.outcome.label(), 1);
        assert!((prediction.churn_probability - 0.8).abs() < 1e-12);
        assert!(prediction.outcome.suggestion().is_some());
    }

    #[test]
    fn maps_class_zero_to_stay_and_ties_to_first_class() {
        let prediction = predict(&fixed(vec![0, 1], vec![0.5, 0.5]), &vector()).unwrap();
        assert_eq!(prediction.outcome, ChurnOutcome::Stay);
        assert_eq!(prediction.outcome.headline(), "Prediction: Customer will STAY");
        assert_eq!(prediction.outcome.suggestion(), None);
    }

    #[test]
    fn feature_count_mismatch_propagates() {
        let mut classifier = fixed(vec![0, 1], vec![1.0, 0.0]);
        classifier.n_features = 14;
        assert_eq!(
            predict(&classifier, &vector()),
            Err(PredictError::FeatureCount {
                expected: 14,
                found: 15
            })
        );
    }

    #[test]
    fn non_finite_features_are_rejected() {
        let form = CustomerForm {
            balance: f64::NAN,
            ..CustomerForm::default()
        };
        let err = predict(&fixed(vec![0, 1], vec![1.0, 0.0]), &encode(&form, None)).unwrap_err();
        assert!(matches!(err, PredictError::NonFinite { index: 4, .. }));
    }

    #[test]
    fn malformed_classifier_output_propagates() {
        assert_eq!(
            predict(&fixed(vec![0, 1], vec![1.0]), &vector()),
            Err(PredictError::ProbabilityWidth {
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            predict(&fixed(vec![0, 7], vec![0.1, 0.9]), &vector()),
            Err(PredictError::UnexpectedClass(7))
        );
    }
}
