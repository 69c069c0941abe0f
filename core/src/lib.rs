//! Core of the AI game dev library.
//!
//! Turns a natural-language description plus a [`GameConfig`] into a
//! [`GameResult`] and keeps the results in a [`GameRegistry`] under
//! sequential instance IDs. Generation is a synchronous, deterministic
//! string transform: nothing is written to disk.
//!
//! # Example
//!
//! ```
//! use aigamedev_core::{GameConfig, GameEngine, GameRegistry};
//!
//! let mut registry = GameRegistry::new();
//! registry.init();
//!
//! let config = GameConfig::default().with_engine(GameEngine::Godot);
//! let id = registry.create_game("a fast paced space shooter", config).unwrap();
//!
//! let result = registry.get_result(id).unwrap();
//! assert_eq!(result.title, "AI Generated A Fast Paced");
//! assert_eq!(result.engine, "godot");
//! ```

pub mod error;
pub mod generation;
pub mod presets;
pub mod registry;
pub mod settings;

pub use aigamedev_shared::{
    DEFAULT_COMPLEXITY, Envelope, ErrorKind, ErrorPayload, GameConfig, GameEngine, GameResult,
    SUPPORTED_ENGINES,
};
pub use error::{GenerationError, RegistryError};
pub use registry::{GameInstance, GameRegistry, InstanceState};
pub use settings::Settings;

/// Library version reported across the C ABI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
