//! ActionSpec - 実行可能なアクションのデータ表現
//!
//! コードではなくデータ。kind とパラメータだけを持ち、実行は executor に任せる。

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Which executor family handles an action.
///
/// Unknown names fail deserialization, so a config file that references a
/// kind this build does not know is rejected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    LaunchLocal,
    OpenUrl,
    CloudStart,
    CloudStop,
}

impl ActionKind {
    /// 全 ActionKind
    pub const ALL: [ActionKind; 4] = [
        ActionKind::LaunchLocal,
        ActionKind::OpenUrl,
        ActionKind::CloudStart,
        ActionKind::CloudStop,
    ];

    /// シリアライズ名と同じ SCREAMING_SNAKE_CASE
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LaunchLocal => "LAUNCH_LOCAL",
            Self::OpenUrl => "OPEN_URL",
            Self::CloudStart => "CLOUD_START",
            Self::CloudStop => "CLOUD_STOP",
        }
    }

    /// Parameters an entry of this kind must carry.
    pub fn required_params(&self) -> &'static [&'static str] {
        match self {
            Self::LaunchLocal => &[param::PROCESS],
            Self::OpenUrl => &[param::URL],
            Self::CloudStart => &[param::IMAGE_ID, param::INSTANCE_TYPE, param::REGION],
            Self::CloudStop => &[param::INSTANCE_ID, param::REGION],
        }
    }

    /// クラウド操作なら true（timeout の選択に使う）
    pub fn is_cloud(&self) -> bool {
        matches!(self, Self::CloudStart | Self::CloudStop)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameter names understood by the built-in executors.
pub mod param {
    pub const PROCESS: &str = "process";
    pub const URL: &str = "url";
    pub const IMAGE_ID: &str = "image_id";
    pub const INSTANCE_TYPE: &str = "instance_type";
    pub const INSTANCE_ID: &str = "instance_id";
    pub const REGION: &str = "region";
}

/// Immutable once built; the registry hands out shared references only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSpec {
    kind: ActionKind,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    params: BTreeMap<String, String>,
}

impl ActionSpec {
    /// パラメータなしの ActionSpec を作成
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            params: BTreeMap::new(),
        }
    }

    /// パラメータを追加（同じキーは上書き）
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// LAUNCH_LOCAL の ActionSpec を作成
    pub fn launch_local(process: impl Into<String>) -> Self {
        Self::new(ActionKind::LaunchLocal).with_param(param::PROCESS, process)
    }

    /// OPEN_URL の ActionSpec を作成
    pub fn open_url(url: impl Into<String>) -> Self {
        Self::new(ActionKind::OpenUrl).with_param(param::URL, url)
    }

    /// CLOUD_START の ActionSpec を作成
    pub fn cloud_start(
        image_id: impl Into<String>,
        instance_type: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self::new(ActionKind::CloudStart)
            .with_param(param::IMAGE_ID, image_id)
            .with_param(param::INSTANCE_TYPE, instance_type)
            .with_param(param::REGION, region)
    }

    /// CLOUD_STOP の ActionSpec を作成
    pub fn cloud_stop(instance_id: impl Into<String>, region: impl Into<String>) -> Self {
        Self::new(ActionKind::CloudStop)
            .with_param(param::INSTANCE_ID, instance_id)
            .with_param(param::REGION, region)
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    /// パラメータを取得
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// First required parameter that is missing or blank.
    pub fn missing_param(&self) -> Option<&'static str> {
        self.kind
            .required_params()
            .iter()
            .copied()
            .find(|key| self.param(key).is_none_or(|v| v.trim().is_empty()))
    }

    /// One-line summary for logs and the gesture guide.
    pub fn summary(&self) -> String {
        let target = match self.kind {
            ActionKind::LaunchLocal => self.param(param::PROCESS),
            ActionKind::OpenUrl => self.param(param::URL),
            ActionKind::CloudStart => self.param(param::IMAGE_ID),
            ActionKind::CloudStop => self.param(param::INSTANCE_ID),
        };
        match target {
            Some(t) => format!("{} {}", self.kind, t),
            None => self.kind.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_carry_required_params() {
        for spec in [
            ActionSpec::launch_local("notepad"),
            ActionSpec::open_url("https://www.google.com"),
            ActionSpec::cloud_start("ami-1", "t3.micro", "ap-south-1"),
            ActionSpec::cloud_stop("i-1", "ap-south-1"),
        ] {
            assert_eq!(spec.missing_param(), None, "{spec:?}");
        }
    }

    #[test]
    fn blank_param_counts_as_missing() {
        let spec = ActionSpec::cloud_stop("  ", "ap-south-1");
        assert_eq!(spec.missing_param(), Some(param::INSTANCE_ID));

        let spec = ActionSpec::new(ActionKind::OpenUrl);
        assert_eq!(spec.missing_param(), Some(param::URL));
    }

    #[test]
    fn deserializes_from_config_shape() {
        let spec: ActionSpec = serde_json::from_value(serde_json::json!({
            "kind": "CLOUD_STOP",
            "params": {"instance_id": "i-1", "region": "ap-south-1"}
        }))
        .unwrap();
        assert_eq!(spec, ActionSpec::cloud_stop("i-1", "ap-south-1"));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let r = serde_json::from_value::<ActionSpec>(serde_json::json!({"kind": "REBOOT_HOST"}));
        assert!(r.is_err());
    }

    #[test]
    fn summary_names_the_target() {
        assert_eq!(
            ActionSpec::launch_local("notepad").summary(),
            "LAUNCH_LOCAL notepad"
        );
    }
}
