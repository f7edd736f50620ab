//! Form values and their fixed-order feature encoding.
//!
//! The classifier was fitted on 15 columns in a fixed order; [`encode`] reproduces that
//! layout from the literal values a form submits.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ml::label_encoder::LabelEncoder;

/// Number of columns in an encoded vector.
pub const FEATURE_COUNT: usize = 15;

/// Column names in the order the classifier expects them.
pub const FEATURE_COLUMNS: [&str; FEATURE_COUNT] = [
    "CreditScore",
    "Gender",
    "Age",
    "Tenure",
    "Balance",
    "NumOfProducts",
    "HasCrCard",
    "IsActiveMember",
    "EstimatedSalary",
    "Complain",
    "SatisfactionScore",
    "PointEarned",
    "Geography_France",
    "Geography_Germany",
    "Geography_Spain",
];

pub const GENDERS: [&str; 2] = ["Male", "Female"];
pub const GEOGRAPHIES: [&str; 3] = ["France", "Germany", "Spain"];
pub const YES: &str = "Yes";
pub const NO: &str = "No";
pub const YES_NO: [&str; 2] = [YES, NO];

pub const AGE_RANGE: RangeInclusive<u32> = 18..=100;
pub const CREDIT_SCORE_RANGE: RangeInclusive<u32> = 300..=850;
pub const PRODUCTS_RANGE: RangeInclusive<u32> = 1..=4;
pub const TENURE_RANGE: RangeInclusive<u32> = 0..=10;

/// Raw customer attributes as submitted by the form.
///
/// Categorical fields keep the literal strings so the label encoder sees exactly what the
/// user picked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerForm {
    pub age: u32,
    pub gender: String,
    pub geography: String,
    pub estimated_salary: f64,
    pub credit_score: u32,
    pub balance: f64,
    pub num_of_products: u32,
    pub tenure: u32,
    pub has_cr_card: String,
    pub is_active_member: String,
    pub complain: String,
    pub satisfaction_score: u32,
    pub point_earned: u32,
}

impl Default for CustomerForm {
    fn default() -> Self {
        Self {
            age: 30,
            gender: GENDERS[0].to_string(),
            geography: GEOGRAPHIES[0].to_string(),
            estimated_salary: 50_000.0,
            credit_score: 600,
            balance: 10_000.0,
            num_of_products: 1,
            tenure: 5,
            has_cr_card: YES.to_string(),
            is_active_member: YES.to_string(),
            complain: YES.to_string(),
            satisfaction_score: 3,
            point_earned: 500,
        }
    }
}

/// A form value outside what the input surface accepts.
#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("{field} must be within {min}..={max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
    #[error("{field} must be a finite number >= 0 (got {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must be one of {allowed:?} (got {value:?})")]
    UnknownChoice {
        field: &'static str,
        value: String,
        allowed: &'static [&'static str],
    },
}

impl CustomerForm {
    /// Check the ranges and choices the form widgets enforce.
    ///
    /// [`encode`] never calls this; surfaces without widget clamping should.
    pub fn validate(&self) -> Result<(), FormError> {
        check_range("Age", self.age, &AGE_RANGE)?;
        check_range("CreditScore", self.credit_score, &CREDIT_SCORE_RANGE)?;
        check_range("NumOfProducts", self.num_of_products, &PRODUCTS_RANGE)?;
        check_range("Tenure", self.tenure, &TENURE_RANGE)?;
        check_non_negative("EstimatedSalary", self.estimated_salary)?;
        check_non_negative("Balance", self.balance)?;
        check_choice("Gender", &self.gender, &GENDERS)?;
        check_choice("Geography", &self.geography, &GEOGRAPHIES)?;
        check_choice("HasCrCard", &self.has_cr_card, &YES_NO)?;
        check_choice("IsActiveMember", &self.is_active_member, &YES_NO)?;
        check_choice("Complain", &self.complain, &YES_NO)?;
        Ok(())
    }
}

fn check_range(
    field: &'static str,
    value: u32,
    range: &RangeInclusive<u32>,
) -> Result<(), FormError> {
    if range.contains(&value) {
        return Ok(());
    }
    Err(FormError::OutOfRange {
        field,
        value,
        min: *range.start(),
        max: *range.end(),
    })
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), FormError> {
    if value.is_finite() && value >= 0.0 {
        return Ok(());
    }
    Err(FormError::Negative { field, value })
}

fn check_choice(
    field: &'static str,
    value: &str,
    allowed: &'static [&'static str],
) -> Result<(), FormError> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(FormError::UnknownChoice {
        field,
        value: value.to_string(),
        allowed,
    })
}

/// Encoded model input, one value per entry of [`FEATURE_COLUMNS`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value of a named column.
    pub fn get(&self, column: &str) -> Option<f64> {
        FEATURE_COLUMNS
            .iter()
            .position(|name| *name == column)
            .map(|idx| self.0[idx])
    }

    /// `(column, value)` pairs in model order.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_COLUMNS.iter().copied().zip(self.0.iter().copied())
    }
}

impl AsRef<[f64]> for FeatureVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// Which path produced the Gender column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenderEncoding {
    /// The fitted label encoder recognised the value.
    Encoder,
    /// The encoder was missing or rejected the value; `Male` → 1, anything else → 0.
    Fallback,
}

/// Encode a submitted form into the classifier's column layout.
pub fn encode(form: &CustomerForm, encoder: Option<&LabelEncoder>) -> FeatureVector {
    encode_with_path(form, encoder).0
}

/// [`encode`], also reporting which path produced the Gender column.
pub fn encode_with_path(
    form: &CustomerForm,
    encoder: Option<&LabelEncoder>,
) -> (FeatureVector, GenderEncoding) {
    let (gender, gender_path) = encode_gender(&form.gender, encoder);
    let [france, germany, spain] = one_hot_geography(&form.geography);
    let vector = FeatureVector([
        f64::from(form.credit_score),
        gender,
        f64::from(form.age),
        f64::from(form.tenure),
        form.balance,
        f64::from(form.num_of_products),
        yes_no(&form.has_cr_card),
        yes_no(&form.is_active_member),
        form.estimated_salary,
        yes_no(&form.complain),
        f64::from(form.satisfaction_score),
        f64::from(form.point_earned),
        france,
        germany,
        spain,
    ]);
    (vector, gender_path)
}

/// Encode Gender through the label encoder, falling back to the fixed mapping.
///
/// The two paths disagree whenever the encoder was fitted with a different mapping;
/// the encoder wins when it recognises the value.
pub fn encode_gender(value: &str, encoder: Option<&LabelEncoder>) -> (f64, GenderEncoding) {
    if let Some(encoder) = encoder {
        match encoder.transform(value) {
            Ok(code) => return (code as f64, GenderEncoding::Encoder),
            Err(err) => tracing::debug!("Gender encoder rejected {value:?}, using fallback: {err}"),
        }
    }
    let code = if value == GENDERS[0] { 1.0 } else { 0.0 };
    (code, GenderEncoding::Fallback)
}

/// `Yes` → 1, anything else → 0.
pub fn yes_no(value: &str) -> f64 {
    if value == YES { 1.0 } else { 0.0 }
}

/// One-hot over [`GEOGRAPHIES`]; unknown values produce all zeros.
pub fn one_hot_geography(value: &str) -> [f64; 3] {
    let columns = GEOGRAPHIES.map(|geography| if value == geography { 1.0 } else { 0.0 });
    if columns.iter().all(|v| *v == 0.0) {
        tracing::warn!("Geography {value:?} is outside {GEOGRAPHIES:?}; encoding as all zeros");
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_form() -> CustomerForm {
        CustomerForm {
            complain: NO.to_string(),
            ..CustomerForm::default()
        }
    }

    fn sklearn_encoder() -> LabelEncoder {
        LabelEncoder::new(vec!["Female".into(), "Male".into()]).unwrap()
    }

    #[test]
    fn scenario_vector_matches_column_layout() {
        let expected = [
            600.0, 1.0, 30.0, 5.0, 10_000.0, 1.0, 1.0, 1.0, 50_000.0, 0.0, 3.0, 500.0, 1.0, 0.0,
            0.0,
        ];
        assert_eq!(encode(&scenario_form(), None).as_slice(), &expected);
        assert_eq!(
            encode(&scenario_form(), Some(&sklearn_encoder())).as_slice(),
            &expected
        );
    }

    #[test]
    fn gender_is_one_for_male_on_both_paths() {
        let encoder = sklearn_encoder();
        assert_eq!(encode_gender("Male", Some(&encoder)), (1.0, GenderEncoding::Encoder));
        assert_eq!(encode_gender("Female", Some(&encoder)), (0.0, GenderEncoding::Encoder));
        assert_eq!(encode_gender("Male", None), (1.0, GenderEncoding::Fallback));
        assert_eq!(encode_gender("Female", None), (0.0, GenderEncoding::Fallback));
    }

    #[test]
    fn encoder_rejection_falls_back() {
        let encoder = LabelEncoder::new(vec!["F".into(), "M".into()]).unwrap();
        assert_eq!(encode_gender("Male", Some(&encoder)), (1.0, GenderEncoding::Fallback));
    }

    #[test]
    fn encode_with_path_reports_gender_path_alongside_vector() {
        let form = scenario_form();
        let (vector, path) = encode_with_path(&form, Some(&sklearn_encoder()));
        assert_eq!(path, GenderEncoding::Encoder);
        assert_eq!(vector, encode(&form, Some(&sklearn_encoder())));

        let (vector, path) = encode_with_path(&form, None);
        assert_eq!(path, GenderEncoding::Fallback);
        assert_eq!(vector.get("Gender"), Some(1.0));
    }

    #[test]
    fn encoder_mapping_wins_over_fallback() {
        let encoder =
            LabelEncoder::new(vec!["Female".into(), "Male".into(), "Other".into()]).unwrap();
        let inverted = LabelEncoder::new(vec!["Male".into(), "Other".into()]).unwrap();
        assert_eq!(encode_gender("Male", Some(&encoder)).0, 1.0);
        // Encoder fitted without "Female" sorts "Male" first: the encoder path yields 0.
        assert_eq!(encode_gender("Male", Some(&inverted)), (0.0, GenderEncoding::Encoder));
    }

    #[test]
    fn each_geography_sets_exactly_one_column() {
        for (idx, geography) in GEOGRAPHIES.iter().enumerate() {
            let form = CustomerForm {
                geography: geography.to_string(),
                ..CustomerForm::default()
            };
            let vector = encode(&form, None);
            let one_hot = &vector.as_slice()[12..];
            assert_eq!(one_hot.iter().sum::<f64>(), 1.0);
            assert_eq!(one_hot[idx], 1.0);
        }
    }

    #[test]
    fn unknown_geography_zeroes_all_columns() {
        assert_eq!(one_hot_geography("Italy"), [0.0, 0.0, 0.0]);
        assert_eq!(one_hot_geography("france"), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn yes_no_fields_map_exactly() {
        let form = CustomerForm {
            has_cr_card: NO.to_string(),
            is_active_member: YES.to_string(),
            complain: YES.to_string(),
            ..CustomerForm::default()
        };
        let vector = encode(&form, None);
        assert_eq!(vector.get("HasCrCard"), Some(0.0));
        assert_eq!(vector.get("IsActiveMember"), Some(1.0));
        assert_eq!(vector.get("Complain"), Some(1.0));
        assert_eq!(yes_no("yes"), 0.0);
    }

    #[test]
    fn vector_has_fifteen_named_columns() {
        let vector = encode(&CustomerForm::default(), None);
        assert_eq!(vector.len(), FEATURE_COUNT);
        let names: Vec<_> = vector.named().map(|(name, _)| name).collect();
        assert_eq!(names, FEATURE_COLUMNS);
        assert_eq!(vector.get("Geography_Spain"), Some(0.0));
        assert_eq!(vector.get("Unknown"), None);
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        assert_eq!(CustomerForm::default().validate(), Ok(()));
        let young = CustomerForm {
            age: 17,
            ..CustomerForm::default()
        };
        assert!(matches!(
            young.validate(),
            Err(FormError::OutOfRange { field: "Age", min: 18, max: 100, .. })
        ));
        let negative = CustomerForm {
            balance: -1.0,
            ..CustomerForm::default()
        };
        assert!(matches!(
            negative.validate(),
            Err(FormError::Negative { field: "Balance", .. })
        ));
        let elsewhere = CustomerForm {
            geography: "Italy".into(),
            ..CustomerForm::default()
        };
        assert!(matches!(
            elsewhere.validate(),
            Err(FormError::UnknownChoice { field: "Geography", .. })
        ));
    }
}
