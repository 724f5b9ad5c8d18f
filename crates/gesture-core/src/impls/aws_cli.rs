//! AwsCliCloud - `aws ec2` CLI 経由の CloudLifecycle 実装
//!
//! 認証情報は CLI 側（環境変数 / ~/.aws / インスタンスロール）に任せる。
//! 失敗時は stderr のエラーコードで Auth / NotFound / Provider に振り分け、
//! メッセージはそのまま残す。

use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::ports::{CloudError, CloudLifecycle};

const AUTH_CODES: &[&str] = &[
    "UnauthorizedOperation",
    "AuthFailure",
    "InvalidClientTokenId",
    "SignatureDoesNotMatch",
    "ExpiredToken",
    "AccessDenied",
    "OptInRequired",
    "Unable to locate credentials",
];

const RESOURCE_CODES: &[&str] = &[
    "InvalidInstanceID.NotFound",
    "InvalidInstanceID.Malformed",
    "InvalidAMIID.NotFound",
    "InvalidAMIID.Malformed",
    "InvalidAMIID.Unavailable",
    "IncorrectInstanceState",
];

/// Classify an `aws` CLI error message, keeping the text verbatim.
pub fn classify_error(message: &str) -> CloudError {
    let message = message.trim().to_string();
    if AUTH_CODES.iter().any(|code| message.contains(code)) {
        CloudError::Auth(message)
    } else if RESOURCE_CODES.iter().any(|code| message.contains(code)) {
        CloudError::NotFound(message)
    } else {
        CloudError::Provider(message)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RunInstancesOutput {
    #[serde(default)]
    instances: Vec<InstanceSummary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InstanceSummary {
    instance_id: String,
}

fn parse_run_instances(stdout: &str) -> Result<String, CloudError> {
    let output: RunInstancesOutput = serde_json::from_str(stdout)
        .map_err(|e| CloudError::Provider(format!("unexpected run-instances output: {e}")))?;
    output
        .instances
        .into_iter()
        .next()
        .map(|i| i.instance_id)
        .ok_or_else(|| CloudError::Provider("run-instances returned no instance".to_string()))
}

/// AwsCliCloud は `aws` CLI を子プロセスとして呼ぶ
#[derive(Debug, Clone)]
pub struct AwsCliCloud {
    program: String,
    profile: Option<String>,
}

impl AwsCliCloud {
    /// PATH 上の `aws` を使う AwsCliCloud を作成
    pub fn new() -> Self {
        Self {
            program: "aws".to_string(),
            profile: None,
        }
    }

    /// Path to the `aws` binary, when it is not on `PATH`.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// `--profile` を指定
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    fn command(&self, args: &[&str], region: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        if let Some(profile) = &self.profile {
            cmd.arg("--profile").arg(profile);
        }
        cmd.args(args)
            .arg("--region")
            .arg(region)
            .arg("--output")
            .arg("json");
        cmd
    }

    async fn run(&self, mut cmd: Command) -> Result<String, CloudError> {
        debug!(command = ?cmd.as_std(), "running aws cli");

        // The dispatcher aborts us on timeout; take the child down with us.
        let output = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| CloudError::Provider(format!("failed to run {}: {e}", self.program)))?;

        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let message = if stderr.trim().is_empty() {
            format!("{} exited with {}", self.program, output.status)
        } else {
            stderr.into_owned()
        };
        Err(classify_error(&message))
    }
}

impl Default for AwsCliCloud {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CloudLifecycle for AwsCliCloud {
    async fn start_instance(
        &self,
        image_id: &str,
        instance_type: &str,
        region: &str,
    ) -> Result<String, CloudError> {
        let cmd = self.command(
            &[
                "ec2",
                "run-instances",
                "--image-id",
                image_id,
                "--instance-type",
                instance_type,
                "--count",
                "1",
            ],
            region,
        );
        let stdout = self.run(cmd).await?;
        parse_run_instances(&stdout)
    }

    async fn stop_instance(&self, instance_id: &str, region: &str) -> Result<(), CloudError> {
        let cmd = self.command(
            &["ec2", "stop-instances", "--instance-ids", instance_id],
            region,
        );
        self.run(cmd).await.map(drop)
    }
}
