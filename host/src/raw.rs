//! Thin safe layer over the exported C functions.
//!
//! Every string the library returns is copied into Rust and freed here.

use std::ffi::{CStr, CString, c_char};

use ai_game_dev as ffi;
use aigamedev_shared::{Envelope, GameConfig, GameResult};
use serde::de::DeserializeOwned;

use crate::HostError;

/// Copy a library-owned string and release it.
fn take_string(ptr: *mut c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    // SAFETY: the library returns valid null-terminated strings
    let c_str = unsafe { CStr::from_ptr(ptr) };
    let s = c_str.to_string_lossy().into_owned();
    // SAFETY: ptr came from the library and is freed exactly once
    unsafe { ffi::ai_game_dev_free_string(ptr) };
    s
}

/// Decode an envelope string, turning a failure into a kinded error.
fn decode<T: DeserializeOwned>(json: &str) -> Result<T, HostError> {
    let envelope: Envelope<T> = serde_json::from_str(json)?;
    envelope.into_result().map_err(|payload| {
        let err = HostError::Call {
            kind: Some(payload.kind),
            message: payload.message,
        };
        tracing::debug!("library call failed: {err}");
        err
    })
}

fn call_error() -> HostError {
    HostError::Call {
        kind: None,
        message: last_error(),
    }
}

pub(crate) fn init() -> Result<(), HostError> {
    if ffi::ai_game_dev_init() == 0 {
        Ok(())
    } else {
        Err(call_error())
    }
}

pub(crate) fn cleanup() {
    ffi::ai_game_dev_cleanup();
}

pub(crate) fn create_game(description: &str, config: &GameConfig) -> Result<i32, HostError> {
    let description = CString::new(description)?;
    let config = CString::new(crate::encode_config(config)?)?;

    // SAFETY: both pointers are valid C strings for the duration of the call
    let ptr =
        unsafe { ffi::ai_game_dev_create_game_envelope(description.as_ptr(), config.as_ptr()) };
    decode(&take_string(ptr))
}

pub(crate) fn get_result(instance_id: i32) -> Result<GameResult, HostError> {
    decode(&take_string(ffi::ai_game_dev_get_result_envelope(instance_id)))
}

pub(crate) fn create_and_fetch(
    description: &str,
    config: &GameConfig,
) -> Result<GameResult, HostError> {
    let id = create_game(description, config)?;
    get_result(id)
}

pub(crate) fn supported_engines() -> Result<Vec<String>, HostError> {
    let json = take_string(ffi::ai_game_dev_supported_engines());
    Ok(serde_json::from_str(&json)?)
}

pub(crate) fn version() -> String {
    take_string(ffi::ai_game_dev_version())
}

pub(crate) fn last_error() -> String {
    take_string(ffi::ai_game_dev_get_last_error())
}
