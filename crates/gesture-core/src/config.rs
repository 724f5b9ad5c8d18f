//! Engine configuration (TOML).
//!
//! Every section is optional. A missing `rules` or `actions` section falls
//! back to the built-in vocabulary; a present one replaces it wholesale.
//!
//! ```toml
//! [dispatch]
//! local_timeout_secs = 5
//! cloud_timeout_secs = 10
//!
//! [[rules]]
//! pattern = "01100"
//! gesture = "CLOUD_START"
//!
//! [actions.CLOUD_START]
//! kind = "CLOUD_START"
//! params = { image_id = "ami-0d0ad8bb301edb745", instance_type = "t3.micro", region = "ap-south-1" }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::app::classifier::{BUILTIN_RULES, GestureClassifier, GestureRule};
use crate::app::dispatcher::DispatchConfig;
use crate::app::registry::{ActionRegistry, builtin_actions};
use crate::domain::{ActionSpec, ConfigError, GestureId};

/// エンジン設定。デフォルトは組み込みの語彙と timeout。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub dispatch: DispatchConfig,

    /// Classifier rules, in match order.
    pub rules: Vec<GestureRule>,

    pub actions: BTreeMap<GestureId, ActionSpec>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dispatch: DispatchConfig::default(),
            rules: BUILTIN_RULES.to_vec(),
            actions: builtin_actions().into_iter().collect(),
        }
    }
}

impl EngineConfig {
    /// TOML 文字列から読み込む（timeout の検証込み）
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.dispatch.validate()?;
        Ok(config)
    }

    /// ファイルから読み込む
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// ルール表を検証して GestureClassifier を作成
    pub fn classifier(&self) -> Result<GestureClassifier, ConfigError> {
        GestureClassifier::new(self.rules.iter().copied())
    }

    /// アクション表を検証して ActionRegistry を作成
    pub fn registry(&self) -> Result<ActionRegistry, ConfigError> {
        let mut registry = ActionRegistry::new();
        for (gesture, spec) in &self.actions {
            registry.register(*gesture, spec.clone())?;
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ActionKind, Detection, FingerStateVector, param};

    #[test]
    fn empty_file_is_the_builtin_vocabulary() {
        let cfg = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, EngineConfig::default());
        assert_eq!(cfg.classifier().unwrap().rules().len(), 8);
        assert_eq!(cfg.registry().unwrap().len(), 8);
    }

    #[test]
    fn parses_rules_actions_and_timeouts() {
        let cfg = EngineConfig::from_toml_str(
            r#"
            [dispatch]
            cloud_timeout_secs = 3

            [[rules]]
            pattern = "0,1,1,0,0"
            gesture = "CLOUD_START"

            [actions.CLOUD_START]
            kind = "CLOUD_START"
            params = { image_id = "ami-1", instance_type = "t3.nano", region = "eu-west-1" }
            "#,
        )
        .unwrap();

        assert_eq!(cfg.dispatch.cloud_timeout_secs, 3);
        assert_eq!(cfg.dispatch.local_timeout_secs, 5);

        let classifier = cfg.classifier().unwrap();
        let v = FingerStateVector::from_bits([0, 1, 1, 0, 0]);
        assert_eq!(classifier.classify(Detection::Hand(v)), GestureId::CloudStart);

        let registry = cfg.registry().unwrap();
        let spec = registry.resolve(GestureId::CloudStart).unwrap();
        assert_eq!(spec.kind(), ActionKind::CloudStart);
        assert_eq!(spec.param(param::REGION), Some("eu-west-1"));
        assert_eq!(registry.resolve(GestureId::OpenNotepad), None);
    }

    #[test]
    fn duplicate_patterns_fail_at_startup() {
        let cfg = EngineConfig::from_toml_str(
            r#"
            [[rules]]
            pattern = "01110"
            gesture = "CLOUD_STOP"

            [[rules]]
            pattern = "01110"
            gesture = "OPEN_NOTEPAD"
            "#,
        )
        .unwrap();
        assert!(matches!(
            cfg.classifier(),
            Err(ConfigError::DuplicatePattern { .. })
        ));
    }

    #[test]
    fn unknown_action_kind_fails_to_parse() {
        let err = EngineConfig::from_toml_str(
            r#"
            [actions.OPEN_NOTEPAD]
            kind = "SEND_EMAIL"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn bad_pattern_fails_to_parse() {
        let err = EngineConfig::from_toml_str(
            r#"
            [[rules]]
            pattern = "0110"
            gesture = "CLOUD_START"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(msg) if msg.contains("0110")));
    }

    #[test]
    fn missing_parameter_fails_at_startup() {
        let cfg = EngineConfig::from_toml_str(
            r#"
            [actions.OPEN_SEARCH_SITE]
            kind = "OPEN_URL"
            "#,
        )
        .unwrap();
        assert!(matches!(
            cfg.registry(),
            Err(ConfigError::MissingParameter { param: "url", .. })
        ));
    }

    #[test]
    fn zero_timeout_fails_at_startup() {
        let err = EngineConfig::from_toml_str(
            r#"
            [dispatch]
            cloud_timeout_secs = 0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout("cloud_timeout_secs")));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = EngineConfig::load("/nonexistent/gesture.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
