//! CloudLifecycle port - クラウドのインスタンス起動/停止
//!
//! dispatcher から見ると同期呼び出し（結果が返るまで待つ）。
//! 最終的なインスタンス状態のポーリングは契約に含めない。
//! 認証情報の解決はホスト環境に任せる。

use async_trait::async_trait;

use crate::domain::ErrorKind;

/// Provider failures, split so an operator can tell "wrong credentials" from
/// "instance already stopped". Messages are the provider's, verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CloudError {
    #[error("authorization failed: {0}")]
    Auth(String),

    /// Instance/image not found, or the instance is in a conflicting state.
    #[error("resource error: {0}")]
    NotFound(String),

    #[error("provider error: {0}")]
    Provider(String),
}

impl CloudError {
    /// Outcome に載せる ErrorKind へ変換
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Auth(_) => ErrorKind::CloudAuthFailure,
            Self::NotFound(_) => ErrorKind::CloudResourceFailure,
            Self::Provider(_) => ErrorKind::CloudGenericFailure,
        }
    }
}

/// CloudLifecycle はインスタンスの起動と停止
#[async_trait]
pub trait CloudLifecycle: Send + Sync {
    /// Launch one instance; returns the provider's instance id.
    async fn start_instance(
        &self,
        image_id: &str,
        instance_type: &str,
        region: &str,
    ) -> Result<String, CloudError>;

    async fn stop_instance(&self, instance_id: &str, region: &str) -> Result<(), CloudError>;
}
