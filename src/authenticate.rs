//! Note authentication pipeline
//!
//! Raw form text is validated in two passes (presence, then numeric parse)
//! before the classifier is consulted exactly once. Nothing here knows about
//! HTTP or HTML.

use thiserror::Error;

use crate::gateway::NoteClassifier;
use crate::models::{ClassificationResult, Feature, FeatureVector, NoteForm, Verdict, FEATURE_COUNT};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    #[error("missing fields: {}", join_features(.fields))]
    MissingInput { fields: Vec<Feature> },

    #[error("invalid numeric value for {field}: {value:?}")]
    InvalidNumeric { field: Feature, value: String },

    #[error("classifier returned unexpected output code {0}")]
    UnexpectedOutput(i64),
}

impl AuthError {
    /// Rejections are the user's to fix; anything else is a model fault
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::MissingInput { .. } | Self::InvalidNumeric { .. })
    }
}

fn join_features(fields: &[Feature]) -> String {
    fields
        .iter()
        .map(Feature::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse one field as a finite real number.
///
/// Surrounding whitespace, a sign and an exponent are accepted.
pub fn parse_feature(field: Feature, raw: &str) -> Result<f64, AuthError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| AuthError::InvalidNumeric {
            field,
            value: raw.to_string(),
        })
}

/// Turn a form submission into a feature vector, or reject it
pub fn validate(form: &NoteForm) -> Result<FeatureVector, AuthError> {
    let missing = form.missing_fields();
    if !missing.is_empty() {
        return Err(AuthError::MissingInput { fields: missing });
    }

    let mut values = [0.0; FEATURE_COUNT];
    for feature in Feature::ALL {
        values[feature.index()] = parse_feature(feature, form.get(feature))?;
    }

    Ok(FeatureVector::from(values))
}

/// Validate, run one inference and map the code to a verdict
pub fn authenticate(
    form: &NoteForm,
    classifier: &dyn NoteClassifier,
) -> Result<ClassificationResult, AuthError> {
    let features = validate(form)?;

    let code = classifier.predict(&features);
    let verdict = Verdict::from_code(code).ok_or(AuthError::UnexpectedOutput(code))?;

    Ok(ClassificationResult { features, verdict })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::testing::RecordingClassifier;

    #[test]
    fn test_all_empty_is_missing_input() {
        let classifier = RecordingClassifier::new(1);
        let err = authenticate(&NoteForm::default(), &classifier).unwrap_err();

        assert_eq!(err, AuthError::MissingInput { fields: Feature::ALL.to_vec() });
        assert!(err.is_rejection());
        assert!(classifier.calls().is_empty());
    }

    #[test]
    fn test_one_empty_is_missing_input() {
        let classifier = RecordingClassifier::new(1);
        let form = NoteForm::new("abc", "1", "", "2");
        let err = authenticate(&form, &classifier).unwrap_err();

        // Presence is checked before parsing
        assert_eq!(err, AuthError::MissingInput { fields: vec![Feature::Curtosis] });
        assert!(classifier.calls().is_empty());
    }

    #[test]
    fn test_non_numeric_is_invalid() {
        let classifier = RecordingClassifier::new(1);
        let form = NoteForm::new("abc", "8.66", "-2.81", "-0.45");
        let err = authenticate(&form, &classifier).unwrap_err();

        assert_eq!(
            err,
            AuthError::InvalidNumeric { field: Feature::Variance, value: "abc".to_string() }
        );
        assert!(err.is_rejection());
        assert!(classifier.calls().is_empty());
    }

    #[test]
    fn test_invalid_kind_independent_of_field() {
        let classifier = RecordingClassifier::new(1);
        for feature in Feature::ALL {
            let mut form = NoteForm::new("1", "2", "3", "4");
            match feature {
                Feature::Variance => form.variance = "x".into(),
                Feature::Skewness => form.skewness = "x".into(),
                Feature::Curtosis => form.curtosis = "x".into(),
                Feature::Entropy => form.entropy = "x".into(),
            }
            let err = authenticate(&form, &classifier).unwrap_err();
            assert!(matches!(err, AuthError::InvalidNumeric { field, .. } if field == feature));
        }
        assert!(classifier.calls().is_empty());
    }

    #[test]
    fn test_valid_input_calls_classifier_once_in_order() {
        let classifier = RecordingClassifier::new(1);
        let form = NoteForm::new("3.62", "8.66", "-2.81", "-0.45");
        let result = authenticate(&form, &classifier).unwrap();

        assert_eq!(classifier.calls(), vec![FeatureVector::new(3.62, 8.66, -2.81, -0.45)]);
        assert_eq!(result.verdict, Verdict::Genuine);
        assert_eq!(result.label(), "Genuine Note");
        assert_eq!(result.code(), 1);
    }

    #[test]
    fn test_code_zero_is_fake() {
        let classifier = RecordingClassifier::new(0);
        let form = NoteForm::new("3.62", "8.66", "-2.81", "-0.45");
        let result = authenticate(&form, &classifier).unwrap();

        assert_eq!(result.verdict, Verdict::Fake);
        assert_eq!(result.label(), "Fake Note");
    }

    #[test]
    fn test_unexpected_code_is_not_mapped() {
        let classifier = RecordingClassifier::new(2);
        let form = NoteForm::new("1", "2", "3", "4");
        let err = authenticate(&form, &classifier).unwrap_err();

        assert_eq!(err, AuthError::UnexpectedOutput(2));
        assert!(!err.is_rejection());
        assert_eq!(classifier.calls().len(), 1);
    }

    #[test]
    fn test_idempotent_for_identical_input() {
        let classifier = RecordingClassifier::new(0);
        let form = NoteForm::new("-1.39", "3.31", "-1.39", "-1.99");

        let first = authenticate(&form, &classifier).unwrap();
        let second = authenticate(&form, &classifier).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_accepts_whitespace_sign_and_exponent() {
        assert_eq!(parse_feature(Feature::Variance, " 1.5 ").unwrap(), 1.5);
        assert_eq!(parse_feature(Feature::Variance, "1e-3").unwrap(), 0.001);
        assert_eq!(parse_feature(Feature::Variance, "-2.5E2").unwrap(), -250.0);
        assert_eq!(parse_feature(Feature::Variance, "+7").unwrap(), 7.0);
        assert_eq!(parse_feature(Feature::Variance, ".5").unwrap(), 0.5);
    }

    #[test]
    fn test_parse_rejects_non_finite_and_junk() {
        for raw in ["nan", "inf", "-infinity", "1e400", "1,5", "0x10", "1_000", " "] {
            assert!(
                parse_feature(Feature::Entropy, raw).is_err(),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_error_messages() {
        let err = AuthError::MissingInput { fields: vec![Feature::Skewness, Feature::Entropy] };
        assert_eq!(err.to_string(), "missing fields: skewness, entropy");
        assert_eq!(
            AuthError::UnexpectedOutput(7).to_string(),
            "classifier returned unexpected output code 7"
        );
    }
}
