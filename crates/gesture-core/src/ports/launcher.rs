//! Launcher port - ローカルプロセス / ブラウザ起動の抽象化
//!
//! core は識別子や URL を渡すだけで、終了コードは見ない（fire-and-forget）。
//! 明示的なエラーが返らなければ成功とみなす。

use async_trait::async_trait;

/// LaunchError はプロセス / ブラウザ起動の失敗
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("failed to launch '{target}': {message}")]
    Spawn { target: String, message: String },

    #[error("refusing to open '{0}': only http:// and https:// URLs are allowed")]
    UnsupportedUrl(String),
}

/// Host OS / browser collaborator.
#[async_trait]
pub trait Launcher: Send + Sync {
    /// Start a local program by name (e.g. `notepad`, `explorer`).
    async fn launch_process(&self, name: &str) -> Result<(), LaunchError>;

    /// Open a URL in the user's default browser.
    async fn launch_url(&self, url: &str) -> Result<(), LaunchError>;
}
