//! Instance registry.
//!
//! Maps integer instance IDs to generation requests and their results.
//! The registry itself is a plain value with `&mut self` methods; callers
//! that share one across threads (the C ABI does) wrap it in a lock.
//!
//! # Lifecycle
//!
//! ```text
//! init() ──> create_game()* ──> get_result()* ──> cleanup()
//!   ^                                                │
//!   └────────────────────────────────────────────────┘
//! ```
//!
//! Every failed operation overwrites [`GameRegistry::last_error`].

use aigamedev_shared::{GameConfig, GameResult, SUPPORTED_ENGINES};
use hashbrown::HashMap;

use crate::error::RegistryError;
use crate::generation;
use crate::settings::Settings;

/// Generation progress of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceState {
    Generating,
    Completed,
}

impl InstanceState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Generating => "generating",
            Self::Completed => "completed",
        }
    }
}

/// One `create_game` request and its outcome.
#[derive(Debug, Clone)]
pub struct GameInstance {
    pub id: i32,
    pub config: GameConfig,
    pub state: InstanceState,
    pub result: Option<GameResult>,
}

/// Process-level table of generated games.
#[derive(Debug, Default)]
pub struct GameRegistry {
    initialized: bool,
    instances: HashMap<i32, GameInstance>,
    next_id: i32,
    last_error: String,
    settings: Settings,
}

impl GameRegistry {
    /// Create an uninitialized registry with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an uninitialized registry with explicit settings.
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Mark the registry ready. Calling it again is a no-op.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        self.last_error.clear();
        tracing::info!("game registry initialized");
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Generate a game and store it under the next instance ID.
    ///
    /// Failed calls store nothing and do not consume an ID.
    pub fn create_game(
        &mut self,
        description: &str,
        config: GameConfig,
    ) -> Result<i32, RegistryError> {
        let outcome = self.try_create(description, config);
        self.track(outcome)
    }

    /// Like [`create_game`](Self::create_game), decoding the config from JSON first.
    pub fn create_game_json(
        &mut self,
        description: &str,
        config_json: &str,
    ) -> Result<i32, RegistryError> {
        let outcome = self.ensure_initialized().and_then(|()| {
            serde_json::from_str::<GameConfig>(config_json)
                .map_err(|e| RegistryError::ConfigParse(e.to_string()))
        });
        match outcome {
            Ok(config) => self.create_game(description, config),
            Err(err) => self.track(Err(err)),
        }
    }

    fn try_create(&mut self, description: &str, config: GameConfig) -> Result<i32, RegistryError> {
        self.ensure_initialized()?;

        let result = generation::generate_game(description, &config, &self.settings.output_root)?;

        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or(RegistryError::IdsExhausted)?;
        tracing::debug!(id, engine = %config.engine, "game created");

        self.instances.insert(
            id,
            GameInstance {
                id,
                config,
                state: InstanceState::Completed,
                result: Some(result),
            },
        );
        Ok(id)
    }

    /// Fetch the completed result of an instance.
    pub fn get_result(&mut self, id: i32) -> Result<&GameResult, RegistryError> {
        if let Err(err) = self.lookup_result(id) {
            return Err(self.record_error(err));
        }
        match self.instances.get(&id).and_then(|i| i.result.as_ref()) {
            Some(result) => Ok(result),
            None => Err(RegistryError::NotReady(id)),
        }
    }

    /// Fetch a result already encoded as JSON.
    pub fn get_result_json(&mut self, id: i32) -> Result<String, RegistryError> {
        let result = self.get_result(id)?;
        match serde_json::to_string(result) {
            Ok(json) => Ok(json),
            Err(err) => Err(self.record_error(err.into())),
        }
    }

    fn lookup_result(&self, id: i32) -> Result<(), RegistryError> {
        self.ensure_initialized()?;
        let instance = self
            .instances
            .get(&id)
            .ok_or(RegistryError::InvalidInstance(id))?;
        if instance.state != InstanceState::Completed || instance.result.is_none() {
            return Err(RegistryError::NotReady(id));
        }
        Ok(())
    }

    /// Look at an instance without the readiness checks of `get_result`.
    pub fn instance(&self, id: i32) -> Option<&GameInstance> {
        self.instances.get(&id)
    }

    /// Number of stored instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn supported_engines(&self) -> &'static [&'static str] {
        &SUPPORTED_ENGINES
    }

    pub fn version(&self) -> &'static str {
        crate::VERSION
    }

    /// Most recent error message, empty if none since init/cleanup.
    pub fn last_error(&self) -> &str {
        &self.last_error
    }

    /// Overwrite the last error with a failure that happened outside the
    /// registry (a caught panic at the C ABI).
    pub fn set_last_error(&mut self, message: impl Into<String>) {
        self.last_error = message.into();
    }

    /// Drop every instance and return to the uninitialized state.
    pub fn cleanup(&mut self) {
        let was_initialized = std::mem::replace(&mut self.initialized, false);
        let dropped = self.instances.len();
        self.instances.clear();
        self.next_id = 0;
        self.last_error.clear();
        if was_initialized {
            tracing::info!(dropped, "game registry cleaned up");
        }
    }

    fn ensure_initialized(&self) -> Result<(), RegistryError> {
        if self.initialized {
            Ok(())
        } else {
            Err(RegistryError::NotInitialized)
        }
    }

    /// Log `err`, store its message as the last error and hand it back.
    pub fn record_error(&mut self, err: RegistryError) -> RegistryError {
        tracing::warn!(kind = ?err.kind(), "{err}");
        self.last_error = err.to_string();
        err
    }

    fn track<T>(&mut self, outcome: Result<T, RegistryError>) -> Result<T, RegistryError> {
        outcome.map_err(|err| self.record_error(err))
    }
}
