//! State - dispatch の状態
//!
//! 1 回の dispatch 呼び出しの状態遷移:
//! - pending: 受付済み、まだ実行していない
//! - executing: executor 実行中（single-flight guard を保持）
//! - succeeded / failed: 終端

use serde::{Deserialize, Serialize};

/// DispatchState は 1 回の dispatch の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchState {
    Pending,
    Executing,
    Succeeded,
    Failed,
}

impl DispatchState {
    /// 終端状態（Succeeded / Failed）か
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    /// Allowed transitions: `Pending → Executing → {Succeeded, Failed}`.
    pub fn can_transition_to(&self, next: DispatchState) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Executing)
                | (Self::Executing, Self::Succeeded)
                | (Self::Executing, Self::Failed)
        )
    }
}
