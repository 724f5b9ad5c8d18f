//! SystemLauncher - OS のプロセス起動 / 既定ブラウザ
//!
//! spawn だけして終了は待たない（fire-and-forget）。spawn 自体の失敗だけを
//! LaunchError として返す。

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::ports::{LaunchError, Launcher};

/// 起動コマンドの組み立て方を決める OS 種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Unix,
}

impl Platform {
    /// ビルド対象の OS
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Unix
        }
    }
}

/// OS のコマンドで Launcher を実装する
#[derive(Debug, Clone)]
pub struct SystemLauncher {
    platform: Platform,
}

impl SystemLauncher {
    /// 現在の OS 向けに作成
    pub fn new() -> Self {
        Self::for_platform(Platform::current())
    }

    /// 指定 OS 向けに作成（テストでコマンドを確認する用）
    pub fn for_platform(platform: Platform) -> Self {
        Self { platform }
    }

    fn process_command(&self, name: &str) -> Command {
        match self.platform {
            // `start` resolves App Paths entries such as chrome / msedge.
            Platform::Windows => {
                let mut cmd = Command::new("cmd");
                cmd.args(["/C", "start", ""]).arg(name);
                cmd
            }
            Platform::MacOs => {
                let mut cmd = Command::new("open");
                cmd.arg("-a").arg(name);
                cmd
            }
            Platform::Unix => Command::new(name),
        }
    }

    fn url_command(&self, url: &str) -> Command {
        let mut cmd = match self.platform {
            // Not through cmd.exe: `&`, `|` and `^` in a query string would be
            // read as command separators.
            Platform::Windows => {
                let mut cmd = Command::new("rundll32");
                cmd.arg("url.dll,FileProtocolHandler");
                cmd
            }
            Platform::MacOs => Command::new("open"),
            Platform::Unix => Command::new("xdg-open"),
        };
        cmd.arg(url);
        cmd
    }

    fn spawn(mut cmd: Command, target: &str) -> Result<(), LaunchError> {
        debug!(command = ?cmd.as_std(), "spawning");
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(drop)
            .map_err(|e| LaunchError::Spawn {
                target: target.to_string(),
                message: e.to_string(),
            })
    }
}

impl Default for SystemLauncher {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_url(url: &str) -> Result<(), LaunchError> {
    let url = url.trim();
    if url.starts_with("https://") || url.starts_with("http://") {
        Ok(())
    } else {
        Err(LaunchError::UnsupportedUrl(url.to_string()))
    }
}

#[async_trait]
impl Launcher for SystemLauncher {
    async fn launch_process(&self, name: &str) -> Result<(), LaunchError> {
        Self::spawn(self.process_command(name), name)
    }

    async fn launch_url(&self, url: &str) -> Result<(), LaunchError> {
        validate_url(url)?;
        Self::spawn(self.url_command(url), url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    fn argv(cmd: &Command) -> (String, Vec<String>) {
        let std = cmd.as_std();
        let program = std.get_program().to_string_lossy().into_owned();
        let args = std
            .get_args()
            .map(OsStr::to_string_lossy)
            .map(|a| a.into_owned())
            .collect();
        (program, args)
    }

    #[test]
    fn windows_starts_programs_by_name() {
        let launcher = SystemLauncher::for_platform(Platform::Windows);
        let (program, args) = argv(&launcher.process_command("msedge"));
        assert_eq!(program, "cmd");
        assert_eq!(args, vec!["/C", "start", "", "msedge"]);
    }

    #[test]
    fn windows_urls_bypass_cmd() {
        let launcher = SystemLauncher::for_platform(Platform::Windows);
        let url = "https://www.google.com/search?q=a&b=c|d^e";
        let (program, args) = argv(&launcher.url_command(url));
        assert_eq!(program, "rundll32");
        assert_eq!(args, vec!["url.dll,FileProtocolHandler", url]);
    }

    #[test]
    fn unix_opens_urls_with_xdg_open() {
        let launcher = SystemLauncher::for_platform(Platform::Unix);
        let (program, args) = argv(&launcher.url_command("https://www.google.com"));
        assert_eq!(program, "xdg-open");
        assert_eq!(args, vec!["https://www.google.com"]);

        let (program, args) = argv(&launcher.process_command("gedit"));
        assert_eq!(program, "gedit");
        assert!(args.is_empty());
    }

    #[test]
    fn macos_opens_apps_by_name() {
        let launcher = SystemLauncher::for_platform(Platform::MacOs);
        let (program, args) = argv(&launcher.process_command("Safari"));
        assert_eq!(program, "open");
        assert_eq!(args, vec!["-a", "Safari"]);
    }

    #[tokio::test]
    async fn non_http_urls_are_refused() {
        let launcher = SystemLauncher::for_platform(Platform::Unix);
        let err = launcher.launch_url("file:///etc/passwd").await.unwrap_err();
        assert!(matches!(err, LaunchError::UnsupportedUrl(_)));
    }

    #[tokio::test]
    async fn missing_program_is_a_spawn_error() {
        let launcher = SystemLauncher::for_platform(Platform::Unix);
        let err = launcher
            .launch_process("gesture-core-no-such-program")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LaunchError::Spawn { ref target, .. } if target == "gesture-core-no-such-program"
        ));
    }
}
