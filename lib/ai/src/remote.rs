//! Remote classification capability.
//!
//! Defines the interface for delegating intent classification to a
//! hosted text-classification model, with typed request/response shapes
//! and environment-driven configuration. No HTTP implementation lives
//! here; hosts provide one behind the [`RemoteClassifier`] trait.

use crate::error::RemoteError;
use serde::{Deserialize, Serialize};

/// Configuration for a remote classification backend.
///
/// Loaded from the environment with the `FLOWMATE` prefix, e.g.
/// `FLOWMATE_API_KEY`, `FLOWMATE_MODEL`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Base URL of the inference endpoint.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// API credential; classification is refused without one.
    pub api_key: Option<String>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api-inference.huggingface.co/models".to_string(),
            model: "facebook/bart-large-mnli".to_string(),
            api_key: None,
        }
    }
}

impl RemoteConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if present configuration fails to parse.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::with_prefix("FLOWMATE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Returns the API credential, or the missing-credential error.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::MissingCredential`] when no credential is
    /// configured. Implementations check this before attempting any
    /// request.
    pub fn credential(&self) -> Result<&str, RemoteError> {
        self.api_key.as_deref().ok_or(RemoteError::MissingCredential)
    }
}

/// A classification request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifyRequest {
    /// The text to classify.
    pub text: String,
    /// Candidate labels for zero-shot classification.
    pub labels: Vec<String>,
}

impl ClassifyRequest {
    /// Creates a request with no candidate labels.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            labels: Vec::new(),
        }
    }

    /// Sets the candidate labels.
    #[must_use]
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }
}

/// A classification response: labels with scores, best first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifyResponse {
    /// Labels, ordered by descending score.
    pub labels: Vec<String>,
    /// Scores aligned with `labels`.
    pub scores: Vec<f64>,
    /// The model that produced the response.
    pub model: String,
}

impl ClassifyResponse {
    /// Returns the best label and its score.
    #[must_use]
    pub fn top(&self) -> Option<(&str, f64)> {
        let label = self.labels.first()?;
        let score = self.scores.first().copied()?;
        Some((label.as_str(), score))
    }
}

/// A remote classification backend.
///
/// Implementations own transport and authentication; they are expected
/// to fail with [`RemoteError::MissingCredential`] before issuing any
/// request when no credential is configured.
pub trait RemoteClassifier: Send + Sync {
    /// Classifies the request text.
    ///
    /// # Errors
    ///
    /// Returns a [`RemoteError`] when the backend is misconfigured or
    /// the request fails.
    fn classify(&self, request: &ClassifyRequest) -> Result<ClassifyResponse, RemoteError>;

    /// Returns the model identifier this backend serves.
    fn model(&self) -> &str;
}
