//! DryRun - 何もせずログだけ出す collaborator（`--dry-run` 用）

use async_trait::async_trait;
use tracing::info;

use crate::ports::{CloudError, CloudLifecycle, LaunchError, Launcher};

/// 起動せずにログだけ出す Launcher
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunLauncher;

#[async_trait]
impl Launcher for DryRunLauncher {
    async fn launch_process(&self, name: &str) -> Result<(), LaunchError> {
        info!(process = name, "dry-run: would launch process");
        Ok(())
    }

    async fn launch_url(&self, url: &str) -> Result<(), LaunchError> {
        info!(url, "dry-run: would open url");
        Ok(())
    }
}

/// API を呼ばずにログだけ出す CloudLifecycle
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunCloud;

impl DryRunCloud {
    /// start_instance が返す固定のインスタンス id
    pub const INSTANCE_ID: &'static str = "i-dryrun";
}

#[async_trait]
impl CloudLifecycle for DryRunCloud {
    async fn start_instance(
        &self,
        image_id: &str,
        instance_type: &str,
        region: &str,
    ) -> Result<String, CloudError> {
        info!(image_id, instance_type, region, "dry-run: would start instance");
        Ok(Self::INSTANCE_ID.to_string())
    }

    async fn stop_instance(&self, instance_id: &str, region: &str) -> Result<(), CloudError> {
        info!(instance_id, region, "dry-run: would stop instance");
        Ok(())
    }
}
