//! ActionDispatcher - 1 つの ActionSpec を失敗を閉じ込めて実行する
//!
//! - 1 回の dispatch は `Pending → Executing → {Succeeded, Failed}`。リトライしない。
//! - single-flight guard: 実行中に来た dispatch は待たせずに `DISPATCH_BUSY` で返す。
//! - executor は別タスクで走らせる。panic しても Outcome(FAILURE) に変換される。
//! - guard は実行タスク側が持つ。呼び出し側の future が drop されても、
//!   executor が終わる（または timeout する）まで解放されない。
//! - すべての実行に timeout をかける。timeout 時は executor を drop して FAILURE。

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::executor::{
    ActionExecutor, CloudStartExecutor, CloudStopExecutor, ExecutionError, LaunchLocalExecutor,
    OpenUrlExecutor,
};
use crate::domain::{
    ActionKind, ActionSpec, CaptureId, ConfigError, DispatchState, ErrorKind, GestureId, Outcome,
};
use crate::ports::{Clock, CloudLifecycle, Launcher};

/// 実行ごとにかける timeout（秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    pub local_timeout_secs: u64,
    pub cloud_timeout_secs: u64,
}

impl DispatchConfig {
    /// ActionKind に対応する timeout を返す
    pub fn timeout_for(&self, kind: ActionKind) -> Duration {
        if kind.is_cloud() {
            Duration::from_secs(self.cloud_timeout_secs)
        } else {
            Duration::from_secs(self.local_timeout_secs)
        }
    }

    /// 起動時検証。0 秒の timeout は全実行を TIMEOUT にしてしまうので拒否する。
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.local_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout("local_timeout_secs"));
        }
        if self.cloud_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout("cloud_timeout_secs"));
        }
        Ok(())
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            local_timeout_secs: 5,
            cloud_timeout_secs: 10,
        }
    }
}

/// Held for the whole `Executing` phase; clears the flag on drop.
struct InFlight(Arc<AtomicBool>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// ActionDispatcher は ActionKind ごとの executor を持ち、Outcome を返す
pub struct ActionDispatcher {
    executors: HashMap<ActionKind, Arc<dyn ActionExecutor>>,
    in_flight: Arc<AtomicBool>,
    local_timeout: Duration,
    cloud_timeout: Duration,
    clock: Arc<dyn Clock>,
}

impl ActionDispatcher {
    /// executor なしの dispatcher を作成
    ///
    /// executor を追加するまで、すべての dispatch は `NOT_IMPLEMENTED` になる。
    pub fn new(config: DispatchConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            executors: HashMap::new(),
            in_flight: Arc::new(AtomicBool::new(false)),
            local_timeout: config.timeout_for(ActionKind::LaunchLocal),
            cloud_timeout: config.timeout_for(ActionKind::CloudStart),
            clock,
        }
    }

    /// 組み込み executor を全 ActionKind に配線して作成
    pub fn with_collaborators(
        config: DispatchConfig,
        clock: Arc<dyn Clock>,
        launcher: Arc<dyn Launcher>,
        cloud: Arc<dyn CloudLifecycle>,
    ) -> Self {
        Self::new(config, clock)
            .with_executor(
                ActionKind::LaunchLocal,
                Arc::new(LaunchLocalExecutor::new(Arc::clone(&launcher))),
            )
            .with_executor(ActionKind::OpenUrl, Arc::new(OpenUrlExecutor::new(launcher)))
            .with_executor(
                ActionKind::CloudStart,
                Arc::new(CloudStartExecutor::new(Arc::clone(&cloud))),
            )
            .with_executor(ActionKind::CloudStop, Arc::new(CloudStopExecutor::new(cloud)))
    }

    /// executor を登録（同じ kind は後勝ち）
    pub fn with_executor(mut self, kind: ActionKind, executor: Arc<dyn ActionExecutor>) -> Self {
        self.executors.insert(kind, executor);
        self
    }

    /// kind に executor が配線されているか
    pub fn supports(&self, kind: ActionKind) -> bool {
        self.executors.contains_key(&kind)
    }

    /// 設定値の timeout を上書き（1 秒未満も可）
    pub fn with_timeouts(mut self, local: Duration, cloud: Duration) -> Self {
        self.local_timeout = local;
        self.cloud_timeout = cloud;
        self
    }

    /// 実行中（guard 取得中）なら true
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn try_begin(&self) -> Option<InFlight> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight(Arc::clone(&self.in_flight)))
    }

    fn timeout_for(&self, kind: ActionKind) -> Duration {
        if kind.is_cloud() {
            self.cloud_timeout
        } else {
            self.local_timeout
        }
    }

    /// 1 つの action を実行し、終端の Outcome を返す
    ///
    /// panic もエラーも外に出さない。
    pub async fn dispatch(
        &self,
        capture_id: CaptureId,
        gesture: GestureId,
        spec: &ActionSpec,
    ) -> Outcome {
        let kind = spec.kind();
        let mut state = DispatchState::Pending;

        let Some(executor) = self.executors.get(&kind).cloned() else {
            warn!(capture = %capture_id, %gesture, action = %kind, "no executor wired");
            return Outcome::failure(
                capture_id,
                gesture,
                kind,
                ErrorKind::NotImplemented,
                format!("action kind {kind} is not implemented"),
                self.clock.now(),
            );
        };

        let Some(guard) = self.try_begin() else {
            warn!(capture = %capture_id, %gesture, action = %kind, "dispatch rejected: busy");
            return Outcome::skipped(
                capture_id,
                gesture,
                ErrorKind::DispatchBusy,
                "Another action is still running",
                self.clock.now(),
            )
            .with_action_kind(kind);
        };

        advance(&mut state, DispatchState::Executing);
        info!(capture = %capture_id, %gesture, action = %spec.summary(), "dispatching");

        let result = self.run(guard, executor, gesture, spec).await;

        match result {
            Ok(message) => {
                advance(&mut state, DispatchState::Succeeded);
                info!(capture = %capture_id, %gesture, %message, "action succeeded");
                Outcome::success(capture_id, gesture, kind, message, self.clock.now())
            }
            Err(err) => {
                advance(&mut state, DispatchState::Failed);
                warn!(
                    capture = %capture_id,
                    %gesture,
                    reason = %err.kind,
                    error = %err.message,
                    "action failed"
                );
                Outcome::failure(
                    capture_id,
                    gesture,
                    kind,
                    err.kind,
                    err.message,
                    self.clock.now(),
                )
            }
        }
    }

    async fn run(
        &self,
        guard: InFlight,
        executor: Arc<dyn ActionExecutor>,
        gesture: GestureId,
        spec: &ActionSpec,
    ) -> Result<String, ExecutionError> {
        let kind = spec.kind();
        let limit = self.timeout_for(kind);
        let owned = spec.clone();

        // The task owns the guard, so dropping our caller cannot release it
        // while the executor is still running.
        let handle = tokio::spawn(async move {
            let _guard = guard;
            match tokio::time::timeout(limit, executor.execute(gesture, &owned)).await {
                Ok(result) => result,
                Err(_) => Err(ExecutionError::new(
                    ErrorKind::Timeout,
                    format!("{kind} did not finish within {}ms", limit.as_millis()),
                )),
            }
        });

        match handle.await {
            Ok(result) => result,
            Err(join_err) => {
                let failure_kind = if kind.is_cloud() {
                    ErrorKind::CloudGenericFailure
                } else {
                    ErrorKind::ExecutorFailure
                };
                Err(ExecutionError::new(
                    failure_kind,
                    format!("{kind} executor aborted: {join_err}"),
                ))
            }
        }
    }
}

fn advance(state: &mut DispatchState, next: DispatchState) {
    debug_assert!(
        state.can_transition_to(next),
        "invalid dispatch transition {state:?} -> {next:?}"
    );
    debug!(from = ?state, to = ?next, "dispatch state");
    *state = next;
}
