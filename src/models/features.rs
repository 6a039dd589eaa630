//! Feature model

use std::fmt;

use serde::Deserialize;
use validator::Validate;

/// Number of measurements the classifier consumes
pub const FEATURE_COUNT: usize = 4;

/// One statistical measurement taken from a wavelet-transformed note image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Variance,
    Skewness,
    Curtosis,
    Entropy,
}

impl Feature {
    /// All features in classifier input order
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::Variance,
        Feature::Skewness,
        Feature::Curtosis,
        Feature::Entropy,
    ];

    /// Form field name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Variance => "variance",
            Self::Skewness => "skewness",
            Self::Curtosis => "curtosis",
            Self::Entropy => "entropy",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Variance => "Variance",
            Self::Skewness => "Skewness",
            Self::Curtosis => "Curtosis",
            Self::Entropy => "Entropy",
        }
    }

    /// Position in the classifier input
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw form submission, exactly as typed
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
pub struct NoteForm {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub variance: String,

    #[serde(default)]
    #[validate(length(min = 1))]
    pub skewness: String,

    #[serde(default)]
    #[validate(length(min = 1))]
    pub curtosis: String,

    #[serde(default)]
    #[validate(length(min = 1))]
    pub entropy: String,
}

impl NoteForm {
    pub fn new(variance: &str, skewness: &str, curtosis: &str, entropy: &str) -> Self {
        Self {
            variance: variance.to_string(),
            skewness: skewness.to_string(),
            curtosis: curtosis.to_string(),
            entropy: entropy.to_string(),
        }
    }

    /// Raw text of a single field
    pub fn get(&self, feature: Feature) -> &str {
        match feature {
            Feature::Variance => &self.variance,
            Feature::Skewness => &self.skewness,
            Feature::Curtosis => &self.curtosis,
            Feature::Entropy => &self.entropy,
        }
    }

    /// Fields submitted empty, in form order
    pub fn missing_fields(&self) -> Vec<Feature> {
        let Err(errors) = self.validate() else {
            return Vec::new();
        };

        let failed: Vec<String> = errors
            .field_errors()
            .into_keys()
            .map(|name| name.to_string())
            .collect();

        Feature::ALL
            .into_iter()
            .filter(|feature| failed.iter().any(|name| name == feature.as_str()))
            .collect()
    }
}

/// Four parsed measurements. Only constructed from finite values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    variance: f64,
    skewness: f64,
    curtosis: f64,
    entropy: f64,
}

impl FeatureVector {
    pub fn new(variance: f64, skewness: f64, curtosis: f64, entropy: f64) -> Self {
        Self { variance, skewness, curtosis, entropy }
    }

    pub fn variance(&self) -> f64 {
        self.variance
    }

    pub fn skewness(&self) -> f64 {
        self.skewness
    }

    pub fn curtosis(&self) -> f64 {
        self.curtosis
    }

    pub fn entropy(&self) -> f64 {
        self.entropy
    }

    /// Values in classifier input order
    pub fn as_array(&self) -> [f64; FEATURE_COUNT] {
        [self.variance, self.skewness, self.curtosis, self.entropy]
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        let [variance, skewness, curtosis, entropy] = values;
        Self::new(variance, skewness, curtosis, entropy)
    }
}
