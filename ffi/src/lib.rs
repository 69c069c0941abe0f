//! C ABI for the AI game dev library.
//!
//! Exposes the game registry to C, C++ and any other host that can call a
//! C function. Structured data crosses the boundary as null-terminated
//! UTF-8 JSON.
//!
//! # Conventions
//!
//! - Integer returns: `>= 0` on success, `-1` on failure. After a failure,
//!   `ai_game_dev_get_last_error()` describes it.
//! - String returns are never null. Every returned string is owned by the
//!   caller and must be released with `ai_game_dev_free_string()`.
//! - Panics never unwind into the host; they surface as `-1` or an error
//!   string.
//!
//! # Thread Safety
//!
//! All state lives behind one process-wide lock, so every function may be
//! called from any thread. The last error is process-wide as well: with
//! concurrent callers it reports whichever failure happened last.
//!
//! # Usage
//!
//! ```c
//! ai_game_dev_init();
//! int id = ai_game_dev_create_game("space shooter", "{\"engine\": 0}");
//! if (id < 0) {
//!     char* err = ai_game_dev_get_last_error();
//!     fprintf(stderr, "%s\n", err);
//!     ai_game_dev_free_string(err);
//! } else {
//!     char* json = ai_game_dev_get_result(id);
//!     puts(json);
//!     ai_game_dev_free_string(json);
//! }
//! ai_game_dev_cleanup();
//! ```

use std::borrow::Cow;
use std::ffi::{CStr, CString, c_char};
use std::panic::{self, UnwindSafe};
use std::sync::LazyLock;

use aigamedev_core::{Envelope, ErrorKind, GameRegistry, RegistryError, SUPPORTED_ENGINES, VERSION};
use parking_lot::{Mutex, MutexGuard};
use serde::Serialize;


static REGISTRY: LazyLock<Mutex<GameRegistry>> =
    LazyLock::new(|| Mutex::new(GameRegistry::new()));

fn registry() -> MutexGuard<'static, GameRegistry> {
    REGISTRY.lock()
}

/// Run `f`, converting a panic into `fallback` and a recorded last error.
fn guard<T>(name: &str, fallback: T, f: impl FnOnce() -> T + UnwindSafe) -> T {
    match panic::catch_unwind(f) {
        Ok(value) => value,
        Err(payload) => {
            let detail = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            tracing::error!(function = name, "panic caught at C boundary: {detail}");
            registry().set_last_error(format!("internal error in {name}: {detail}"));
            fallback
        }
    }
}

/// Read a borrowed C string. Null reads as empty; invalid UTF-8 is replaced.
///
/// # Safety
///
/// `ptr` must be null or point to a null-terminated string that stays valid
/// for the returned lifetime.
unsafe fn read_c_str<'a>(ptr: *const c_char) -> Cow<'a, str> {
    if ptr.is_null() {
        Cow::Borrowed("")
    } else {
        // SAFETY: non-null and null-terminated per the caller contract
        unsafe { CStr::from_ptr(ptr) }.to_string_lossy()
    }
}

/// Hand a string to the caller. Interior NULs are dropped so the result is
/// never truncated silently and never null.
fn into_c_string(s: impl Into<String>) -> *mut c_char {
    let mut s = s.into();
    s.retain(|c| c != '\0');
    CString::new(s).unwrap_or_default().into_raw()
}

fn error_json(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}

/// Encode a registry outcome as an envelope.
fn envelope_json<T: Serialize>(outcome: Result<T, RegistryError>) -> String {
    let envelope = match outcome {
        Ok(value) => Envelope::success(value),
        Err(err) => Envelope::failure(err.kind(), err.to_string()),
    };
    match serde_json::to_string(&envelope) {
        Ok(json) => json,
        Err(e) => internal_envelope(&format!("Failed to serialize result: {e}")),
    }
}

fn internal_envelope(message: &str) -> String {
    let envelope: Envelope<()> = Envelope::failure(ErrorKind::Internal, message);
    serde_json::to_string(&envelope).unwrap_or_default()
}

// =============================================================================
// Lifecycle
// =============================================================================

/// Initialize the library. Safe to call more than once.
///
/// Returns 0 on success, -1 on an internal failure.
#[unsafe(no_mangle)]
pub extern "C" fn ai_game_dev_init() -> i32 {
    guard("ai_game_dev_init", -1, || {
        registry().init();
        0
    })
}

/// Drop every game instance and return to the uninitialized state.
///
/// Instance IDs restart at 0 after the next init.
#[unsafe(no_mangle)]
pub extern "C" fn ai_game_dev_cleanup() {
    guard("ai_game_dev_cleanup", (), || registry().cleanup())
}

// =============================================================================
// Generation
// =============================================================================

/// Generate a game from a description and a JSON `GameConfig`.
///
/// Returns the new instance ID, or -1 on failure.
///
/// # Safety
///
/// Both pointers must be null or point to null-terminated strings. A null
/// description counts as empty; a null config counts as malformed JSON.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ai_game_dev_create_game(
    description: *const c_char,
    config_json: *const c_char,
) -> i32 {
    // SAFETY: forwarded caller contract
    let description = unsafe { read_c_str(description) };
    let config_json = unsafe { read_c_str(config_json) };

    guard("ai_game_dev_create_game", -1, move || {
        registry()
            .create_game_json(&description, &config_json)
            .unwrap_or(-1)
    })
}

/// Generate a game and report the outcome in the uniform envelope.
///
/// Returns `{"ok": true, "value": <instance id>}` or
/// `{"ok": false, "error": {"kind": "...", "message": "..."}}`. Failures also
/// record the last error. The returned string must be freed with
/// `ai_game_dev_free_string`.
///
/// # Safety
///
/// Same pointer contract as `ai_game_dev_create_game`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ai_game_dev_create_game_envelope(
    description: *const c_char,
    config_json: *const c_char,
) -> *mut c_char {
    // SAFETY: forwarded caller contract
    let description = unsafe { read_c_str(description) };
    let config_json = unsafe { read_c_str(config_json) };

    let json = guard(
        "ai_game_dev_create_game_envelope",
        internal_envelope("internal error"),
        move || envelope_json(registry().create_game_json(&description, &config_json)),
    );
    into_c_string(json)
}

/// Fetch the `GameResult` JSON of an instance.
///
/// On failure returns `{"error": "<message>"}` and records the last error.
/// The returned string must be freed with `ai_game_dev_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn ai_game_dev_get_result(instance_id: i32) -> *mut c_char {
    let json = guard(
        "ai_game_dev_get_result",
        error_json("internal error"),
        || match registry().get_result_json(instance_id) {
            Ok(json) => json,
            Err(err) => error_json(&err.to_string()),
        },
    );
    into_c_string(json)
}

/// Fetch the result of an instance wrapped in the uniform envelope.
///
/// Returns `{"ok": true, "value": {...}}` or
/// `{"ok": false, "error": {"kind": "...", "message": "..."}}`.
/// The returned string must be freed with `ai_game_dev_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn ai_game_dev_get_result_envelope(instance_id: i32) -> *mut c_char {
    let json = guard(
        "ai_game_dev_get_result_envelope",
        internal_envelope("internal error"),
        || envelope_json(registry().get_result(instance_id).cloned()),
    );
    into_c_string(json)
}

// =============================================================================
// Introspection
// =============================================================================

/// JSON array of supported engine names.
///
/// The returned string must be freed with `ai_game_dev_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn ai_game_dev_supported_engines() -> *mut c_char {
    let json = serde_json::to_string(&SUPPORTED_ENGINES).unwrap_or_else(|_| "[]".to_string());
    into_c_string(json)
}

/// Semantic version of the library.
///
/// The returned string must be freed with `ai_game_dev_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn ai_game_dev_version() -> *mut c_char {
    into_c_string(VERSION)
}

/// Message of the most recent failure, or an empty string.
///
/// The returned string must be freed with `ai_game_dev_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn ai_game_dev_get_last_error() -> *mut c_char {
    let message = guard("ai_game_dev_get_last_error", String::new(), || {
        registry().last_error().to_string()
    });
    into_c_string(message)
}

// =============================================================================
// Memory
// =============================================================================

/// Release a string returned by this library. Null is ignored.
///
/// # Safety
///
/// `ptr` must be null or a pointer returned by one of the string functions
/// of this library that has not been freed yet.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ai_game_dev_free_string(ptr: *mut c_char) {
    if ptr.is_null() {
        return;
    }
    // SAFETY: ptr came from CString::into_raw in into_c_string
    drop(unsafe { CString::from_raw(ptr) });
}
