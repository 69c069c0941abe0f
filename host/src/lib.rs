//! Rust host binding for the AI game dev C ABI.
//!
//! Mirrors what the C++ and Node.js bindings offer: an RAII session that
//! initializes the library on construction and cleans it up on drop,
//! synchronous and asynchronous game creation, and one error type that
//! carries the library's last-error message.
//!
//! All calls go through the exported `extern "C"` functions, including
//! JSON marshaling and string ownership, so this crate exercises the same
//! contract a foreign host sees.
//!
//! # Example
//!
//! ```
//! use aigamedev_host::{AiGameDev, GameConfig, GameEngine};
//!
//! let dev = AiGameDev::new().unwrap();
//! let result = dev
//!     .create_game("retro space shooter", &GameConfig::default().with_engine(GameEngine::Bevy))
//!     .unwrap();
//! assert_eq!(result.title, "AI Generated Retro Space Shooter");
//! ```
//!
//! The library state is process-wide: dropping any session resets it for
//! every other session too. Keep one session per process.

mod raw;

use std::future::Future;

pub use aigamedev_shared::{ErrorKind, GameConfig, GameEngine, GameResult};

/// Failure reported by the library or while talking to it.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// The library rejected a call; `message` is its last error
    #[error("AI Game Dev Error: {message}")]
    Call {
        kind: Option<ErrorKind>,
        message: String,
    },

    /// The library returned JSON this binding could not decode
    #[error("failed to decode library response: {0}")]
    Decode(#[from] serde_json::Error),

    /// An argument contained an interior NUL byte
    #[error("argument contains an interior NUL byte")]
    InvalidString(#[from] std::ffi::NulError),

    /// The blocking task of an async call failed
    #[error("async task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl HostError {
    /// Error category, when the library reported one.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Call { kind, .. } => *kind,
            _ => None,
        }
    }
}

/// Encode a config exactly as it is sent across the C ABI.
pub fn encode_config(config: &GameConfig) -> Result<String, HostError> {
    Ok(serde_json::to_string(config)?)
}

/// Session handle. Construction initializes the library; drop cleans it up.
#[derive(Debug)]
pub struct AiGameDev {
    _private: (),
}

impl AiGameDev {
    /// Initialize the library.
    pub fn new() -> Result<Self, HostError> {
        raw::init()?;
        tracing::debug!(version = %raw::version(), "AI game dev session opened");
        Ok(Self { _private: () })
    }

    /// Generate a game and return its result.
    pub fn create_game(
        &self,
        description: &str,
        config: &GameConfig,
    ) -> Result<GameResult, HostError> {
        raw::create_and_fetch(description, config)
    }

    /// Generate a game on tokio's blocking pool.
    ///
    /// The returned future owns its inputs and does not borrow the session.
    /// Must be awaited inside a tokio runtime.
    pub fn create_game_async(
        &self,
        description: &str,
        config: GameConfig,
    ) -> impl Future<Output = Result<GameResult, HostError>> + Send + use<> {
        let description = description.to_string();
        async move {
            tokio::task::spawn_blocking(move || raw::create_and_fetch(&description, &config))
                .await?
        }
    }

    pub fn create_bevy_game(
        &self,
        description: &str,
        complexity: &str,
    ) -> Result<GameResult, HostError> {
        self.create_with(description, GameEngine::Bevy, complexity)
    }

    pub fn create_godot_game(
        &self,
        description: &str,
        complexity: &str,
    ) -> Result<GameResult, HostError> {
        self.create_with(description, GameEngine::Godot, complexity)
    }

    pub fn create_arcade_game(
        &self,
        description: &str,
        complexity: &str,
    ) -> Result<GameResult, HostError> {
        self.create_with(description, GameEngine::Arcade, complexity)
    }

    fn create_with(
        &self,
        description: &str,
        engine: GameEngine,
        complexity: &str,
    ) -> Result<GameResult, HostError> {
        let config = GameConfig::default()
            .with_engine(engine)
            .with_complexity(complexity);
        self.create_game(description, &config)
    }

    /// Fetch the result of an earlier creation by instance ID.
    pub fn result(&self, instance_id: i32) -> Result<GameResult, HostError> {
        raw::get_result(instance_id)
    }

    pub fn supported_engines(&self) -> Result<Vec<String>, HostError> {
        raw::supported_engines()
    }

    pub fn version(&self) -> String {
        raw::version()
    }

    /// Last error recorded by the library, empty if none.
    pub fn last_error(&self) -> String {
        raw::last_error()
    }
}

impl Drop for AiGameDev {
    fn drop(&mut self) {
        raw::cleanup();
        tracing::debug!("AI game dev session closed");
    }
}
