//! Uniform result envelope for string-returning C ABI calls.
//!
//! `{"ok": true, "value": ...}` on success,
//! `{"ok": false, "error": {"kind": "...", "message": "..."}}` on failure.

use serde::{Deserialize, Serialize};

/// Machine-readable error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotInitialized,
    Validation,
    ConfigParse,
    InvalidInstance,
    NotReady,
    Serialization,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub kind: ErrorKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorPayload>,
}

impl<T> Envelope<T> {
    pub fn success(value: T) -> Self {
        Self {
            ok: true,
            value: Some(value),
            error: None,
        }
    }

    pub fn failure(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            value: None,
            error: Some(ErrorPayload {
                kind,
                message: message.into(),
            }),
        }
    }

    /// Convert into a `Result`, treating a malformed envelope as `Internal`.
    pub fn into_result(self) -> Result<T, ErrorPayload> {
        match (self.ok, self.value, self.error) {
            (true, Some(value), _) => Ok(value),
            (_, _, Some(error)) => Err(error),
            _ => Err(ErrorPayload {
                kind: ErrorKind::Internal,
                message: "malformed envelope".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameResult;

    #[test]
    fn test_success_shape() {
        let value = serde_json::to_value(Envelope::success(7)).unwrap();
        assert_eq!(value, serde_json::json!({"ok": true, "value": 7}));
    }

    #[test]
    fn test_failure_shape() {
        let envelope: Envelope<u32> =
            Envelope::failure(ErrorKind::InvalidInstance, "Invalid instance ID");
        let value = serde_json::to_value(envelope).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "ok": false,
                "error": {"kind": "invalid_instance", "message": "Invalid instance ID"}
            })
        );
    }

    #[test]
    fn test_decode_result_envelope() {
        let json = r#"{
            "ok": true,
            "value": {
                "title": "AI Generated Space Game",
                "description": "space game",
                "engine": "bevy",
                "success": true,
                "files_generated": ["Cargo.toml", "src/main.rs"],
                "output_directory": "./generated_games/space_game",
                "error_message": ""
            }
        }"#;

        let envelope: Envelope<GameResult> = serde_json::from_str(json).unwrap();
        assert!(envelope.error.is_none());
        let result = envelope.into_result().unwrap();
        assert_eq!(result.title, "AI Generated Space Game");
        assert_eq!(result.files_generated, ["Cargo.toml", "src/main.rs"]);
    }

    #[test]
    fn test_decode_result_envelope_error() {
        let json = r#"{
            "ok": false,
            "error": {"kind": "not_ready", "message": "Game not yet generated"}
        }"#;

        let envelope: Envelope<GameResult> = serde_json::from_str(json).unwrap();
        assert!(envelope.value.is_none());
        let err = envelope.into_result().unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotReady);
        assert_eq!(err.message, "Game not yet generated");
    }

    #[test]
    fn test_into_result() {
        assert_eq!(Envelope::success("x").into_result(), Ok("x"));

        let err = Envelope::<()>::failure(ErrorKind::NotReady, "later")
            .into_result()
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotReady);

        let malformed: Envelope<()> = serde_json::from_str(r#"{"ok": true}"#).unwrap();
        assert_eq!(
            malformed.into_result().unwrap_err().kind,
            ErrorKind::Internal
        );
    }
}
