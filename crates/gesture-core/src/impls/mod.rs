//! Impls - ports の実装
//!
//! - **SystemLauncher**: OS のプロセス起動 / 既定ブラウザ（本番用）
//! - **AwsCliCloud**: `aws ec2` CLI 経由のインスタンス起動/停止（本番用）
//! - **DryRunLauncher / DryRunCloud**: ログを出すだけ（確認用）

pub mod aws_cli;
pub mod dry_run;
pub mod system_launcher;

pub use self::aws_cli::AwsCliCloud;
pub use self::dry_run::{DryRunCloud, DryRunLauncher};
pub use self::system_launcher::{Platform, SystemLauncher};
