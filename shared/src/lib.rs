//! Shared types for the AI game dev library.
//!
//! Everything in this crate crosses the C ABI as JSON, so field names and
//! encodings here are the wire contract between the library and every host
//! binding (C, C++, Rust).

pub mod engine;
pub mod envelope;

use serde::{Deserialize, Serialize};

pub use engine::{GameEngine, SUPPORTED_ENGINES};
pub use envelope::{Envelope, ErrorKind, ErrorPayload};

// === Request Types ===

/// Configuration for a single game generation request.
///
/// Only `engine` influences generation. The remaining fields are advisory
/// and passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub engine: GameEngine,
    pub complexity: String,
    pub target_audience: String,
    pub features: Vec<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            engine: GameEngine::default(),
            complexity: DEFAULT_COMPLEXITY.to_string(),
            target_audience: String::new(),
            features: Vec::new(),
        }
    }
}

impl GameConfig {
    pub fn with_engine(mut self, engine: GameEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_complexity(mut self, complexity: impl Into<String>) -> Self {
        self.complexity = complexity.into();
        self
    }

    pub fn with_target_audience(mut self, audience: impl Into<String>) -> Self {
        self.target_audience = audience.into();
        self
    }

    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }

    pub fn add_feature(mut self, feature: impl Into<String>) -> Self {
        self.features.push(feature.into());
        self
    }
}

/// Complexity label used when a request doesn't name one.
pub const DEFAULT_COMPLEXITY: &str = "intermediate";

// === Response Types ===

/// Outcome of a generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub title: String,
    pub description: String,
    /// Resolved engine name (`"bevy"`, `"godot"`, `"arcade"` or `"auto"`)
    pub engine: String,
    pub success: bool,
    /// Relative paths of the project skeleton for the engine
    pub files_generated: Vec<String>,
    pub output_directory: String,
    /// Empty on success
    #[serde(default)]
    pub error_message: String,
}
