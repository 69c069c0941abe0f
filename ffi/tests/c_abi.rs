//! Contract tests for the exported C functions, called the way a host would.

use std::ffi::{CStr, CString, c_char};

use ai_game_dev::*;
use parking_lot::{Mutex, MutexGuard, const_mutex};

static SERIAL: Mutex<()> = const_mutex(());

fn take(ptr: *mut c_char) -> String {
    assert!(!ptr.is_null(), "library returned a null string");
    let c_str = unsafe { CStr::from_ptr(ptr) };
    let s = c_str.to_string_lossy().into_owned();
    unsafe { ai_game_dev_free_string(ptr) };
    s
}

fn create(description: &str, config: &str) -> i32 {
    let description = CString::new(description).unwrap();
    let config = CString::new(config).unwrap();
    unsafe { ai_game_dev_create_game(description.as_ptr(), config.as_ptr()) }
}

fn result(id: i32) -> serde_json::Value {
    serde_json::from_str(&take(ai_game_dev_get_result(id))).unwrap()
}

fn last_error() -> String {
    take(ai_game_dev_get_last_error())
}

fn fresh() -> MutexGuard<'static, ()> {
    let lock = SERIAL.lock();
    ai_game_dev_cleanup();
    assert_eq!(ai_game_dev_init(), 0);
    lock
}

#[test]
fn init_is_idempotent() {
    let _lock = fresh();

    assert_eq!(create("one", "{}"), 0);
    for _ in 0..3 {
        assert_eq!(ai_game_dev_init(), 0);
    }
    assert_eq!(create("two", "{}"), 1);
    assert_eq!(result(0)["description"], "one");

    ai_game_dev_cleanup();
}

#[test]
fn ids_increase_from_zero() {
    let _lock = fresh();

    let ids: Vec<i32> = ["alpha", "beta", "gamma", "delta"]
        .iter()
        .map(|d| create(d, r#"{"engine": 3}"#))
        .collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);

    ai_game_dev_cleanup();
}

#[test]
fn operations_fail_before_init() {
    let _lock = SERIAL.lock();
    ai_game_dev_cleanup();

    assert_eq!(create("space", "{}"), -1);
    assert_eq!(last_error(), "Library not initialized");
    assert_eq!(result(0)["error"], "Library not initialized");
}

#[test]
fn empty_description_is_rejected_without_insert() {
    let _lock = fresh();

    assert_eq!(create("", "{}"), -1);
    assert_eq!(last_error(), "description cannot be empty");
    assert_eq!(result(0)["error"], "Invalid instance ID");

    ai_game_dev_cleanup();
}

#[test]
fn malformed_config_is_rejected() {
    let _lock = fresh();

    assert_eq!(create("space", "{\"engine\": "), -1);
    let error = last_error();
    assert!(error.starts_with("Invalid configuration JSON: "), "{error}");

    ai_game_dev_cleanup();
}

#[test]
fn cleanup_resets_state() {
    let _lock = fresh();

    create("first", "{}");
    let id = create("second", "{}");
    assert_eq!(id, 1);

    ai_game_dev_cleanup();
    assert_eq!(result(id)["error"], "Library not initialized");

    assert_eq!(ai_game_dev_init(), 0);
    assert_eq!(result(id)["error"], "Invalid instance ID");
    assert_eq!(last_error(), "Invalid instance ID");
    assert_eq!(create("third", "{}"), 0);

    ai_game_dev_cleanup();
    assert_eq!(last_error(), "");
}

#[test]
fn envelope_create_reports_kind() {
    let _lock = fresh();

    let description = CString::new("").unwrap();
    let config = CString::new("{}").unwrap();
    let ptr = unsafe { ai_game_dev_create_game_envelope(description.as_ptr(), config.as_ptr()) };
    let envelope: serde_json::Value = serde_json::from_str(&take(ptr)).unwrap();

    assert_eq!(envelope["ok"], false);
    assert_eq!(envelope["error"]["kind"], "validation");
    assert_eq!(last_error(), "description cannot be empty");
    assert_eq!(result(0)["error"], "Invalid instance ID");

    ai_game_dev_cleanup();
}

#[test]
fn engine_list_is_fixed() {
    let json = take(ai_game_dev_supported_engines());
    let engines: Vec<String> = serde_json::from_str(&json).unwrap();
    assert_eq!(engines, ["bevy", "godot", "arcade", "auto"]);
}

#[test]
fn version_is_semver() {
    let version = take(ai_game_dev_version());
    assert_eq!(version, "1.0.0");
    assert_eq!(version.split('.').count(), 3);
}

#[test]
fn godot_file_list_is_deterministic() {
    let _lock = fresh();

    let expected = serde_json::json!([
        "project.godot",
        "scenes/Main.tscn",
        "scripts/Main.gd",
        "scripts/Player.gd",
        "assets/sprites/",
        "assets/audio/",
    ]);
    let first = create("puzzle platformer", r#"{"engine": 1}"#);
    let config = r#"{"engine": 1, "features": ["a"]}"#;
    let second = create("something else entirely", config);
    assert_eq!(result(first)["files_generated"], expected);
    assert_eq!(result(second)["files_generated"], expected);

    ai_game_dev_cleanup();
}

#[test]
fn result_matches_wire_schema() {
    let _lock = fresh();

    let config = serde_json::json!({
        "engine": 0,
        "complexity": "intermediate",
        "target_audience": "",
        "features": ["physics", "audio"],
    });
    let id = create("My Game! 2.0", &config.to_string());
    let value = result(id);

    let mut keys: Vec<&str> = value
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        [
            "description",
            "engine",
            "error_message",
            "files_generated",
            "output_directory",
            "success",
            "title",
        ]
    );
    assert_eq!(value["output_directory"], "./generated_games/My_Game_20");
    assert_eq!(value["title"], "AI Generated My Game! 2.0");

    ai_game_dev_cleanup();
}

#[test]
fn non_ascii_description_gets_fallback_directory() {
    let _lock = fresh();

    let id = create("漢字", "{}");
    assert_eq!(result(id)["output_directory"], "./generated_games/ai_game");

    ai_game_dev_cleanup();
}

#[test]
fn concurrent_creates_get_distinct_ids() {
    let _lock = fresh();

    let handles: Vec<_> = (0..8)
        .map(|t| {
            std::thread::spawn(move || {
                (0..25)
                    .map(|i| create(&format!("game {t} {i}"), "{}"))
                    .collect::<Vec<i32>>()
            })
        })
        .collect();

    let mut ids: Vec<i32> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, (0..200).collect::<Vec<i32>>());

    ai_game_dev_cleanup();
}
