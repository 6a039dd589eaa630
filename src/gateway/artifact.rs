//! Serialized model artifact
//!
//! JSON document tagged by `kind`. The artifact is read into the unvalidated
//! `ArtifactSpec` and converted with `TryFrom`, so every `ModelArtifact` in
//! existence has passed structural validation and inference itself cannot fail.

use serde::Deserialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

use super::forest::ForestSpec;
use super::logistic::LogisticSpec;
use super::{LogisticModel, NoteClassifier, RandomForest};

/// Startup-time model loading failure. Always fatal.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model artifact not found: {0}")]
    NotFound(String),

    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid model artifact: {0}")]
    Invalid(String),
}

/// Unvalidated artifact as written on disk
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArtifactSpec {
    Logistic(LogisticSpec),
    Forest(ForestSpec),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "ArtifactSpec")]
pub enum ModelArtifact {
    Logistic(LogisticModel),
    Forest(RandomForest),
}

impl TryFrom<ArtifactSpec> for ModelArtifact {
    type Error = ModelError;

    fn try_from(spec: ArtifactSpec) -> Result<Self, ModelError> {
        Ok(match spec {
            ArtifactSpec::Logistic(spec) => Self::Logistic(LogisticModel::try_from(spec)?),
            ArtifactSpec::Forest(spec) => Self::Forest(RandomForest::try_from(spec)?),
        })
    }
}

impl ModelArtifact {
    /// Parse and validate an artifact. Structural faults are `ModelError::Invalid`.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ModelError> {
        let spec: ArtifactSpec = serde_json::from_slice(bytes)?;
        Self::try_from(spec)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Logistic(_) => "logistic",
            Self::Forest(_) => "forest",
        }
    }

    pub fn into_classifier(self) -> Box<dyn NoteClassifier> {
        match self {
            Self::Logistic(model) => Box::new(model),
            Self::Forest(model) => Box::new(model),
        }
    }
}

/// Hex SHA-256 of the artifact bytes
pub fn checksum(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invalid(json: &str) {
        let err = ModelArtifact::from_slice(json.as_bytes()).unwrap_err();
        assert!(matches!(err, ModelError::Invalid(_)), "{json}: got {err:?}");

        // Going through serde directly must not skip validation either
        assert!(serde_json::from_str::<ModelArtifact>(json).is_err(), "{json}");
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let err = ModelArtifact::from_slice(br#"{"kind": "svm", "vectors": []}"#).unwrap_err();
        assert!(matches!(err, ModelError::Parse(_)));
    }

    #[test]
    fn test_kind_names() {
        let artifact = ModelArtifact::from_slice(
            br#"{"kind": "forest", "trees": [{"nodes": [{"leaf": {"class": 1}}]}]}"#,
        )
        .unwrap();
        assert_eq!(artifact.kind(), "forest");
    }

    #[test]
    fn test_backward_child_invalid() {
        assert_invalid(
            r#"{"kind": "forest", "trees": [{"nodes": [
                {"split": {"feature": 0, "threshold": 0.0, "left": 0, "right": 0}}
            ]}]}"#,
        );
    }

    #[test]
    fn test_out_of_range_feature_invalid() {
        assert_invalid(
            r#"{"kind": "forest", "trees": [{"nodes": [
                {"split": {"feature": 4, "threshold": 0.0, "left": 1, "right": 2}},
                {"leaf": {"class": 0}},
                {"leaf": {"class": 1}}
            ]}]}"#,
        );
    }

    #[test]
    fn test_empty_forest_invalid() {
        assert_invalid(r#"{"kind": "forest", "trees": []}"#);
    }

    #[test]
    fn test_logistic_threshold_invalid() {
        assert_invalid(
            r#"{"kind": "logistic", "weights": [1, 0, 0, 0], "intercept": 0, "threshold": 1.0}"#,
        );
    }

    #[test]
    fn test_checksum_known_value() {
        assert_eq!(
            checksum(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
