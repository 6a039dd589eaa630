//! Verdict model

use super::FeatureVector;

/// Closed set of classifier outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Fake,
    Genuine,
}

impl Verdict {
    /// Map a raw classifier code. Codes outside {0, 1} have no verdict.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Fake),
            1 => Some(Self::Genuine),
            _ => None,
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Self::Fake => 0,
            Self::Genuine => 1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Fake => "Fake Note",
            Self::Genuine => "Genuine Note",
        }
    }
}

/// Outcome of one successful inference
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassificationResult {
    pub features: FeatureVector,
    pub verdict: Verdict,
}

impl ClassificationResult {
    pub fn code(&self) -> i64 {
        self.verdict.code()
    }

    pub fn label(&self) -> &'static str {
        self.verdict.label()
    }
}
