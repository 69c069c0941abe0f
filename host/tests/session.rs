//! Session behavior through the Rust host binding.

use aigamedev_host::{AiGameDev, ErrorKind, GameConfig, GameEngine, HostError};
use parking_lot::{Mutex, const_mutex};

/// Sessions share one process-wide library state.
static SERIAL: Mutex<()> = const_mutex(());

#[test]
fn create_game_sync() {
    let _lock = SERIAL.lock();
    let dev = AiGameDev::new().unwrap();

    let config = GameConfig::default()
        .with_engine(GameEngine::Godot)
        .add_feature("dialogue");
    let result = dev.create_game("story driven adventure", &config).unwrap();

    assert!(result.success);
    assert_eq!(result.title, "AI Generated Story Driven Adventure");
    assert_eq!(result.engine, "godot");
    assert_eq!(result.files_generated[0], "project.godot");
    assert_eq!(
        result.output_directory,
        "./generated_games/story_driven_adventure"
    );
}

#[test]
fn errors_carry_last_error() {
    let _lock = SERIAL.lock();
    let dev = AiGameDev::new().unwrap();

    let err = dev.create_game("", &GameConfig::default()).unwrap_err();
    assert!(matches!(err, HostError::Call { .. }));
    assert_eq!(err.kind(), Some(ErrorKind::Validation));
    assert_eq!(
        err.to_string(),
        "AI Game Dev Error: description cannot be empty"
    );
    assert_eq!(dev.last_error(), "description cannot be empty");

    let err = dev.result(99).unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::InvalidInstance));
}

#[test]
fn drop_cleans_up() {
    let _lock = SERIAL.lock();

    let id = {
        let dev = AiGameDev::new().unwrap();
        dev.create_game("first", &GameConfig::default()).unwrap();
        let dev_result = dev.create_bevy_game("second", "advanced").unwrap();
        assert_eq!(dev_result.engine, "bevy");
        1
    };

    let dev = AiGameDev::new().unwrap();
    let err = dev.result(id).unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::InvalidInstance));

    // IDs restart after cleanup
    dev.create_arcade_game("third", "simple").unwrap();
    assert_eq!(dev.result(0).unwrap().description, "third");
}

#[test]
fn engines_and_version() {
    let _lock = SERIAL.lock();
    let dev = AiGameDev::new().unwrap();

    assert_eq!(
        dev.supported_engines().unwrap(),
        ["bevy", "godot", "arcade", "auto"]
    );
    assert_eq!(dev.version(), "1.0.0");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn create_game_async() {
    let _lock = SERIAL.lock();
    let dev = AiGameDev::new().unwrap();

    let config = GameConfig::default().with_engine(GameEngine::Arcade);
    let pending: Vec<_> = ["tower defense", "kart racer", "card battler"]
        .into_iter()
        .map(|d| dev.create_game_async(d, config.clone()))
        .collect();

    let mut titles = Vec::new();
    for fut in pending {
        let result = fut.await.unwrap();
        assert_eq!(result.engine, "arcade");
        titles.push(result.title);
    }
    titles.sort();
    assert_eq!(
        titles,
        [
            "AI Generated Card Battler",
            "AI Generated Kart Racer",
            "AI Generated Tower Defense",
        ]
    );
}

#[tokio::test]
async fn async_errors_surface() {
    let _lock = SERIAL.lock();
    let dev = AiGameDev::new().unwrap();

    let err = dev
        .create_game_async("", GameConfig::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::Validation));
    assert!(err.to_string().contains("description cannot be empty"));
}
