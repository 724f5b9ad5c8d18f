//! Outcome - キャプチャイベントの終端結果
//!
//! エンジンに届いたキャプチャイベントは必ず 1 つの Outcome になり、常に終端。
//! 表示側が描画して捨てる。永続化はしない。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::action::ActionKind;
use super::errors::ErrorKind;
use super::finger::FingerStateVector;
use super::gesture::GestureId;
use super::ids::CaptureId;

/// We serialize as SCREAMING_SNAKE_CASE: SUCCESS / FAILURE / SKIPPED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeStatus {
    Success,
    /// The action ran (or tried to) and failed.
    Failure,
    /// Nothing was executed: no hand, unmatched gesture, no action, or busy.
    Skipped,
}

/// 1 キャプチャイベントの終端結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub capture_id: CaptureId,

    /// Vector the detector reported ("Fingers Detected"). `None` for no hand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingers: Option<FingerStateVector>,

    pub gesture: GestureId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_kind: Option<ActionKind>,

    pub status: OutcomeStatus,

    /// Set for every non-success status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<ErrorKind>,

    pub message: String,

    pub finished_at: DateTime<Utc>,
}

impl Outcome {
    /// SUCCESS の Outcome を作成
    pub fn success(
        capture_id: CaptureId,
        gesture: GestureId,
        kind: ActionKind,
        message: impl Into<String>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        Self {
            capture_id,
            fingers: None,
            gesture,
            action_kind: Some(kind),
            status: OutcomeStatus::Success,
            reason: None,
            message: message.into(),
            finished_at,
        }
    }

    /// FAILURE の Outcome を作成
    pub fn failure(
        capture_id: CaptureId,
        gesture: GestureId,
        kind: ActionKind,
        reason: ErrorKind,
        message: impl Into<String>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        Self {
            capture_id,
            fingers: None,
            gesture,
            action_kind: Some(kind),
            status: OutcomeStatus::Failure,
            reason: Some(reason),
            message: message.into(),
            finished_at,
        }
    }

    /// SKIPPED の Outcome を作成（何も実行していない）
    pub fn skipped(
        capture_id: CaptureId,
        gesture: GestureId,
        reason: ErrorKind,
        message: impl Into<String>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        Self {
            capture_id,
            fingers: None,
            gesture,
            action_kind: None,
            status: OutcomeStatus::Skipped,
            reason: Some(reason),
            message: message.into(),
            finished_at,
        }
    }

    /// ActionKind を載せる（busy で skip した場合など）
    pub fn with_action_kind(mut self, kind: ActionKind) -> Self {
        self.action_kind = Some(kind);
        self
    }

    /// 検出された指ベクトルを載せる
    pub fn with_fingers(mut self, fingers: Option<FingerStateVector>) -> Self {
        self.fingers = fingers;
        self
    }

    /// SUCCESS なら true
    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use ulid::Ulid;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn status_serializes_as_required_names() {
        let s = serde_json::to_string(&OutcomeStatus::Success).unwrap();
        assert_eq!(s, "\"SUCCESS\"");

        let s = serde_json::to_string(&OutcomeStatus::Failure).unwrap();
        assert_eq!(s, "\"FAILURE\"");

        let s = serde_json::to_string(&OutcomeStatus::Skipped).unwrap();
        assert_eq!(s, "\"SKIPPED\"");
    }

    #[test]
    fn skipped_outcome_omits_action_kind() {
        let o = Outcome::skipped(
            CaptureId::from_ulid(Ulid::new()),
            GestureId::NoHand,
            ErrorKind::NoHandDetected,
            "No hand detected",
            at(),
        );
        let v = serde_json::to_value(&o).unwrap();
        assert_eq!(v["status"], "SKIPPED");
        assert_eq!(v["gesture"], "NO_HAND");
        assert_eq!(v["reason"], "NO_HAND_DETECTED");
        assert!(v.get("action_kind").is_none());
        assert!(v.get("fingers").is_none());
    }

    #[test]
    fn success_outcome_has_no_reason() {
        let o = Outcome::success(
            CaptureId::from_ulid(Ulid::new()),
            GestureId::OpenNotepad,
            ActionKind::LaunchLocal,
            "Opened Notepad",
            at(),
        )
        .with_fingers(Some(FingerStateVector::from_bits([0, 0, 0, 0, 0])));
        assert!(o.is_success());
        let v = serde_json::to_value(&o).unwrap();
        assert_eq!(v["action_kind"], "LAUNCH_LOCAL");
        assert_eq!(v["fingers"], "00000");
        assert!(v.get("reason").is_none());

        let back: Outcome = serde_json::from_value(v).unwrap();
        assert_eq!(back, o);
    }
}
