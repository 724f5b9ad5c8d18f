//! Executors - ActionKind ごとの実行者
//!
//! ActionSpec を注入された collaborator（Launcher / CloudLifecycle）の呼び出しに
//! 変換し、success メッセージか分類済みの ExecutionError を返す。

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{ActionSpec, ErrorKind, GestureId, param};
use crate::ports::{CloudError, CloudLifecycle, LaunchError, Launcher};

/// Failure of one execution, already classified for the Outcome.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ExecutionError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ExecutionError {
    /// 分類とメッセージから作成
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<LaunchError> for ExecutionError {
    fn from(err: LaunchError) -> Self {
        Self::new(ErrorKind::ExecutorFailure, err.to_string())
    }
}

impl From<CloudError> for ExecutionError {
    fn from(err: CloudError) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}

/// 1 つの ActionKind を担当する executor
#[async_trait]
pub trait ActionExecutor: Send + Sync {
    /// 実行して、人が読む success メッセージを返す
    ///
    /// `gesture` はメッセージの表示名にだけ使う。
    async fn execute(
        &self,
        gesture: GestureId,
        spec: &ActionSpec,
    ) -> Result<String, ExecutionError>;
}

fn required<'a>(spec: &'a ActionSpec, key: &str) -> Result<&'a str, ExecutionError> {
    spec.param(key).ok_or_else(|| {
        ExecutionError::new(
            ErrorKind::ExecutorFailure,
            format!("{} action is missing parameter '{key}'", spec.kind()),
        )
    })
}

/// ローカルプログラムを起動
pub struct LaunchLocalExecutor {
    launcher: Arc<dyn Launcher>,
}

impl LaunchLocalExecutor {
    /// 新しい executor を作成
    pub fn new(launcher: Arc<dyn Launcher>) -> Self {
        Self { launcher }
    }
}

#[async_trait]
impl ActionExecutor for LaunchLocalExecutor {
    async fn execute(
        &self,
        gesture: GestureId,
        spec: &ActionSpec,
    ) -> Result<String, ExecutionError> {
        let process = required(spec, param::PROCESS)?;
        self.launcher.launch_process(process).await?;
        Ok(format!("Opened {}", gesture.target_name().unwrap_or(process)))
    }
}

/// 既定ブラウザで URL を開く
pub struct OpenUrlExecutor {
    launcher: Arc<dyn Launcher>,
}

impl OpenUrlExecutor {
    pub fn new(launcher: Arc<dyn Launcher>) -> Self {
        Self { launcher }
    }
}

#[async_trait]
impl ActionExecutor for OpenUrlExecutor {
    async fn execute(
        &self,
        gesture: GestureId,
        spec: &ActionSpec,
    ) -> Result<String, ExecutionError> {
        let url = required(spec, param::URL)?;
        self.launcher.launch_url(url).await?;
        Ok(format!("Opened {}", gesture.target_name().unwrap_or(url)))
    }
}

/// クラウドインスタンスを起動
pub struct CloudStartExecutor {
    cloud: Arc<dyn CloudLifecycle>,
}

impl CloudStartExecutor {
    /// 新しい executor を作成
    pub fn new(cloud: Arc<dyn CloudLifecycle>) -> Self {
        Self { cloud }
    }
}

#[async_trait]
impl ActionExecutor for CloudStartExecutor {
    async fn execute(
        &self,
        _gesture: GestureId,
        spec: &ActionSpec,
    ) -> Result<String, ExecutionError> {
        let image_id = required(spec, param::IMAGE_ID)?;
        let instance_type = required(spec, param::INSTANCE_TYPE)?;
        let region = required(spec, param::REGION)?;

        let instance_id = self
            .cloud
            .start_instance(image_id, instance_type, region)
            .await?;
        Ok(format!(
            "Instance {instance_id} started ({instance_type}, {region})"
        ))
    }
}

/// クラウドインスタンスを停止
pub struct CloudStopExecutor {
    cloud: Arc<dyn CloudLifecycle>,
}

impl CloudStopExecutor {
    pub fn new(cloud: Arc<dyn CloudLifecycle>) -> Self {
        Self { cloud }
    }
}

#[async_trait]
impl ActionExecutor for CloudStopExecutor {
    async fn execute(
        &self,
        _gesture: GestureId,
        spec: &ActionSpec,
    ) -> Result<String, ExecutionError> {
        let instance_id = required(spec, param::INSTANCE_ID)?;
        let region = required(spec, param::REGION)?;

        self.cloud.stop_instance(instance_id, region).await?;
        Ok(format!("Instance {instance_id} stopped"))
    }
}
