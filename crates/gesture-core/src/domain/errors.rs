//! Errors - エラー型と分類
//!
//! - `ErrorKind`: 実行時エラーの運用分類。Outcome に載せて UI に渡すだけで、
//!   dispatcher より外へ伝播させない。
//! - `ConfigError`: 起動時の設定エラー。これだけは致命的で初期化を中断する。

use std::fmt;

use serde::{Deserialize, Serialize};

use super::action::ActionKind;
use super::finger::FingerStateVector;
use super::gesture::GestureId;

/// Why a capture event did not end in `SUCCESS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    NoHandDetected,
    UnrecognizedGesture,
    /// Recognized gesture with no registry entry.
    ActionNotConfigured,
    /// Local process / browser launch failed.
    ExecutorFailure,
    CloudAuthFailure,
    /// Instance or image not found, or the instance is in the wrong state.
    CloudResourceFailure,
    CloudGenericFailure,
    /// Rejected by the single-flight guard.
    DispatchBusy,
    /// No executor wired for the action kind.
    NotImplemented,
    Timeout,
}

impl ErrorKind {
    /// シリアライズ名と同じ SCREAMING_SNAKE_CASE
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoHandDetected => "NO_HAND_DETECTED",
            Self::UnrecognizedGesture => "UNRECOGNIZED_GESTURE",
            Self::ActionNotConfigured => "ACTION_NOT_CONFIGURED",
            Self::ExecutorFailure => "EXECUTOR_FAILURE",
            Self::CloudAuthFailure => "CLOUD_AUTH_FAILURE",
            Self::CloudResourceFailure => "CLOUD_RESOURCE_FAILURE",
            Self::CloudGenericFailure => "CLOUD_GENERIC_FAILURE",
            Self::DispatchBusy => "DISPATCH_BUSY",
            Self::NotImplemented => "NOT_IMPLEMENTED",
            Self::Timeout => "TIMEOUT",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Startup misconfiguration. Fatal: the engine is never built.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("duplicate classifier pattern {pattern}: already mapped to {first}, cannot also map to {second}")]
    DuplicatePattern {
        pattern: FingerStateVector,
        first: GestureId,
        second: GestureId,
    },

    #[error("gesture {0} is produced by the classifier itself and cannot be configured")]
    ReservedGesture(GestureId),

    #[error("duplicate action for gesture {0}")]
    DuplicateAction(GestureId),

    #[error("action for gesture {gesture} ({kind}) is missing required parameter '{param}'")]
    MissingParameter {
        gesture: GestureId,
        kind: ActionKind,
        param: &'static str,
    },

    #[error("dispatch.{0} must be greater than zero")]
    InvalidTimeout(&'static str),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind_serializes_as_display_name() {
        for kind in [
            ErrorKind::NoHandDetected,
            ErrorKind::CloudAuthFailure,
            ErrorKind::DispatchBusy,
            ErrorKind::Timeout,
        ] {
            let s = serde_json::to_string(&kind).unwrap();
            assert_eq!(s, format!("\"{kind}\""));
        }
    }

    #[test]
    fn duplicate_pattern_message_names_both_gestures() {
        let err = ConfigError::DuplicatePattern {
            pattern: FingerStateVector::from_bits([0, 1, 1, 0, 0]),
            first: GestureId::CloudStart,
            second: GestureId::CloudStop,
        };
        let msg = err.to_string();
        assert!(msg.contains("[0, 1, 1, 0, 0]"));
        assert!(msg.contains("CLOUD_START"));
        assert!(msg.contains("CLOUD_STOP"));
    }
}
