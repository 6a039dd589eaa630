//! Model Gateway - classifier loading and inference
//!
//! The classifier is loaded once during startup and shared read-only
//! across all requests. Swapping the model kind only touches this module.

pub mod artifact;
pub mod forest;
pub mod logistic;

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::FeatureVector;

pub use artifact::{ModelArtifact, ModelError};
pub use forest::{DecisionTree, RandomForest, TreeNode};
pub use logistic::LogisticModel;

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// A deterministic note classifier.
///
/// `predict` returns the raw class code. Well-behaved models only produce
/// 0 or 1; callers must not assume it.
pub trait NoteClassifier: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> i64;

    /// Short description for status reporting, e.g. `forest (3 trees)`
    fn describe(&self) -> String;
}

impl<T: NoteClassifier + ?Sized> NoteClassifier for Arc<T> {
    fn predict(&self, features: &FeatureVector) -> i64 {
        (**self).predict(features)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Where the loaded model came from
#[derive(Debug, Clone, Serialize)]
pub struct ModelMetadata {
    pub source: String,
    pub kind: String,
    pub sha256: String,
    pub loaded_at: DateTime<Utc>,
}

impl ModelMetadata {
    /// Metadata for a classifier built in memory rather than read from disk
    #[cfg(test)]
    pub fn in_memory(kind: &str) -> Self {
        Self {
            source: "<memory>".to_string(),
            kind: kind.to_string(),
            sha256: String::new(),
            loaded_at: Utc::now(),
        }
    }
}

/// Gateway status for the health endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ModelStatus {
    pub source: String,
    pub kind: String,
    pub description: String,
    pub sha256: String,
    pub loaded_at: DateTime<Utc>,
    pub inference_count: u64,
    pub avg_latency_ms: f64,
}

/// Lock-free inference counters
#[derive(Debug, Default)]
struct InferenceStats {
    count: AtomicU64,
    latency_sum_us: AtomicU64,
}

impl InferenceStats {
    fn record(&self, elapsed_us: u64) {
        self.latency_sum_us.fetch_add(elapsed_us, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> (u64, f64) {
        let count = self.count.load(Ordering::Relaxed);
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let avg_ms = if count > 0 { (sum as f64 / count as f64) / 1000.0 } else { 0.0 };
        (count, avg_ms)
    }
}

// ============================================================================
// GATEWAY
// ============================================================================

/// Loaded classifier plus its provenance and usage statistics
pub struct ModelGateway {
    classifier: Box<dyn NoteClassifier>,
    metadata: ModelMetadata,
    stats: InferenceStats,
}

impl ModelGateway {
    pub fn new(classifier: Box<dyn NoteClassifier>, metadata: ModelMetadata) -> Self {
        Self {
            classifier,
            metadata,
            stats: InferenceStats::default(),
        }
    }

    /// Load a model artifact from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        tracing::info!("Loading classifier from: {}", path.display());

        if !path.exists() {
            return Err(ModelError::NotFound(path.display().to_string()));
        }

        let bytes = std::fs::read(path).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_bytes(&bytes, &path.display().to_string())
    }

    /// Load a model artifact already in memory
    pub fn from_bytes(bytes: &[u8], source: &str) -> Result<Self, ModelError> {
        let artifact = ModelArtifact::from_slice(bytes)?;

        let metadata = ModelMetadata {
            source: source.to_string(),
            kind: artifact.kind().to_string(),
            sha256: artifact::checksum(bytes),
            loaded_at: Utc::now(),
        };

        let classifier = artifact.into_classifier();
        tracing::info!(
            "Classifier loaded: {} (sha256 {})",
            classifier.describe(),
            metadata.sha256
        );

        Ok(Self::new(classifier, metadata))
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    pub fn status(&self) -> ModelStatus {
        let (inference_count, avg_latency_ms) = self.stats.snapshot();
        ModelStatus {
            source: self.metadata.source.clone(),
            kind: self.metadata.kind.clone(),
            description: self.classifier.describe(),
            sha256: self.metadata.sha256.clone(),
            loaded_at: self.metadata.loaded_at,
            inference_count,
            avg_latency_ms,
        }
    }
}

impl NoteClassifier for ModelGateway {
    fn predict(&self, features: &FeatureVector) -> i64 {
        let start = Instant::now();
        let code = self.classifier.predict(features);
        let elapsed_us = start.elapsed().as_micros() as u64;

        self.stats.record(elapsed_us);
        tracing::debug!(?features, code, elapsed_us, "inference complete");

        code
    }

    fn describe(&self) -> String {
        self.classifier.describe()
    }
}

impl std::fmt::Debug for ModelGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelGateway")
            .field("classifier", &self.classifier.describe())
            .field("metadata", &self.metadata)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use parking_lot::Mutex;

    use super::*;

    /// Returns a fixed code and records every call
    pub struct RecordingClassifier {
        code: i64,
        calls: Mutex<Vec<FeatureVector>>,
    }

    impl RecordingClassifier {
        pub fn new(code: i64) -> Self {
            Self {
                code,
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<FeatureVector> {
            self.calls.lock().clone()
        }
    }

    impl NoteClassifier for RecordingClassifier {
        fn predict(&self, features: &FeatureVector) -> i64 {
            self.calls.lock().push(*features);
            self.code
        }

        fn describe(&self) -> String {
            format!("recording (code {})", self.code)
        }
    }
}
