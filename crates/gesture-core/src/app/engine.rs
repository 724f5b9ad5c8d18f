//! GestureEngine - キャプチャイベント 1 つ → 終端 Outcome 1 つ
//!
//! classify → resolve → dispatch を順に実行する。
//! アクション実行中に来たキャプチャは `DISPATCH_BUSY` で返す。

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::classifier::GestureClassifier;
use super::dispatcher::ActionDispatcher;
use super::registry::ActionRegistry;
use crate::domain::{
    ActionSpec, CaptureId, Detection, ErrorKind, FingerStateVector, GestureId, Outcome,
};
use crate::ports::{Clock, IdGenerator};

/// One row of the gesture guide shown next to the camera preview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuideEntry {
    pub pattern: FingerStateVector,
    pub fingers: String,
    pub gesture: GestureId,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

/// GestureEngine は classify → resolve → dispatch を 1 本に繋ぐ
pub struct GestureEngine {
    classifier: GestureClassifier,
    registry: ActionRegistry,
    dispatcher: ActionDispatcher,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl GestureEngine {
    pub(super) fn new(
        classifier: GestureClassifier,
        registry: ActionRegistry,
        dispatcher: ActionDispatcher,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            classifier,
            registry,
            dispatcher,
            ids,
            clock,
        }
    }

    /// 検出結果を分類する（副作用なし）
    pub fn classify(&self, detection: Detection) -> GestureId {
        self.classifier.classify(detection)
    }

    /// ジェスチャーに対応するアクションを引く
    pub fn resolve(&self, gesture: GestureId) -> Option<&ActionSpec> {
        self.registry.resolve(gesture)
    }

    /// アクション実行中なら true
    pub fn is_busy(&self) -> bool {
        self.dispatcher.is_busy()
    }

    /// 1 キャプチャイベントを処理する。必ず終端の Outcome を返す。
    pub async fn process(&self, detection: Detection) -> Outcome {
        let capture_id = self.ids.generate_capture_id();
        let gesture = self.classify(detection);
        debug!(capture = %capture_id, ?detection, %gesture, "capture received");

        self.decide(capture_id, gesture, detection)
            .await
            .with_fingers(detection.fingers())
    }

    async fn decide(
        &self,
        capture_id: CaptureId,
        gesture: GestureId,
        detection: Detection,
    ) -> Outcome {
        if self.dispatcher.is_busy() {
            info!(capture = %capture_id, %gesture, "capture rejected: dispatch in flight");
            return self.skip(
                capture_id,
                gesture,
                ErrorKind::DispatchBusy,
                "Another action is still running",
            );
        }

        match (gesture, detection) {
            (GestureId::NoHand, _) => {
                self.skip(capture_id, gesture, ErrorKind::NoHandDetected, "No hand detected")
            }
            (GestureId::Unrecognized, Detection::Hand(vector)) => self.skip(
                capture_id,
                gesture,
                ErrorKind::UnrecognizedGesture,
                format!("Unrecognized gesture {vector}"),
            ),
            _ => match self.registry.resolve(gesture) {
                None => self.skip(
                    capture_id,
                    gesture,
                    ErrorKind::ActionNotConfigured,
                    format!("No action configured for {gesture}"),
                ),
                Some(spec) => self.dispatcher.dispatch(capture_id, gesture, spec).await,
            },
        }
    }

    fn skip(
        &self,
        capture_id: CaptureId,
        gesture: GestureId,
        reason: ErrorKind,
        message: impl Into<String>,
    ) -> Outcome {
        Outcome::skipped(capture_id, gesture, reason, message, self.clock.now())
    }

    /// ルール順のジェスチャーガイド
    pub fn guide(&self) -> Vec<GuideEntry> {
        self.classifier
            .rules()
            .iter()
            .map(|rule| GuideEntry {
                pattern: rule.pattern,
                fingers: rule.pattern.describe(),
                gesture: rule.gesture,
                label: rule.gesture.label(),
                action: self.registry.resolve(rule.gesture).map(ActionSpec::summary),
            })
            .collect()
    }
}
