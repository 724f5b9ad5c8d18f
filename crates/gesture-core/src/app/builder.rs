//! EngineBuilder - エンジンの構築とワイヤリング
//!
//! # Fail-fast 設計
//! - 設定（ルール表・アクション表）の検証は build() までに済ませる
//! - launcher / cloud が注入されていなければ BuildError
//! - 実行時のエラーは Outcome で返すので、ここで落ちるのは起動時だけ

use std::sync::Arc;

use tracing::warn;

use super::classifier::GestureClassifier;
use super::dispatcher::{ActionDispatcher, DispatchConfig};
use super::engine::GestureEngine;
use super::executor::ActionExecutor;
use super::registry::ActionRegistry;
use crate::config::EngineConfig;
use crate::domain::{ActionKind, ConfigError};
use crate::ports::{Clock, CloudLifecycle, IdGenerator, Launcher, SystemClock, UlidGenerator};

/// EngineBuilder はエンジンを構築
///
/// # 使用例
/// ```ignore
/// let engine = EngineBuilder::from_config(&config)?
///     .launcher(Arc::new(SystemLauncher::new()))
///     .cloud(Arc::new(AwsCliCloud::new()))
///     .build()?;
/// ```
pub struct EngineBuilder {
    classifier: GestureClassifier,
    registry: ActionRegistry,
    dispatch: DispatchConfig,
    launcher: Option<Arc<dyn Launcher>>,
    cloud: Option<Arc<dyn CloudLifecycle>>,
    clock: Arc<dyn Clock>,
    id_generator: Option<Arc<dyn IdGenerator>>,
    executors: Vec<(ActionKind, Arc<dyn ActionExecutor>)>,
}

/// BuildError はエンジン構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("no {0} collaborator was provided")]
    MissingCollaborator(&'static str),
}

impl EngineBuilder {
    /// 新しい EngineBuilder を作成
    ///
    /// 組み込み語彙・SystemClock・ULID の capture id がデフォルト。
    pub fn new() -> Self {
        Self {
            classifier: GestureClassifier::builtin(),
            registry: ActionRegistry::builtin(),
            dispatch: DispatchConfig::default(),
            launcher: None,
            cloud: None,
            clock: Arc::new(SystemClock),
            id_generator: None,
            executors: Vec::new(),
        }
    }

    /// 設定から作成。timeout・ルール表・アクション表をここで検証する。
    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.dispatch.validate()?;
        Ok(Self::new()
            .classifier(config.classifier()?)
            .registry(config.registry()?)
            .dispatch_config(config.dispatch))
    }

    /// ルール表を差し替え
    pub fn classifier(mut self, classifier: GestureClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// アクション表を差し替え
    pub fn registry(mut self, registry: ActionRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// timeout 設定を差し替え
    pub fn dispatch_config(mut self, dispatch: DispatchConfig) -> Self {
        self.dispatch = dispatch;
        self
    }

    /// Launcher を注入（必須）
    pub fn launcher(mut self, launcher: Arc<dyn Launcher>) -> Self {
        self.launcher = Some(launcher);
        self
    }

    /// CloudLifecycle を注入（必須）
    pub fn cloud(mut self, cloud: Arc<dyn CloudLifecycle>) -> Self {
        self.cloud = Some(cloud);
        self
    }

    /// Clock を差し替え（テスト用に FixedClock など）
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// IdGenerator を差し替え
    pub fn id_generator(mut self, id_generator: Arc<dyn IdGenerator>) -> Self {
        self.id_generator = Some(id_generator);
        self
    }

    /// `kind` の組み込み executor を差し替え
    pub fn executor(mut self, kind: ActionKind, executor: Arc<dyn ActionExecutor>) -> Self {
        self.executors.push((kind, executor));
        self
    }

    /// GestureEngine を構築
    ///
    /// # 検証
    /// - launcher / cloud が注入されていなければ BuildError::MissingCollaborator
    /// - どのルールからも到達できないアクションは warn を出す（エラーにはしない）
    pub fn build(self) -> Result<GestureEngine, BuildError> {
        let launcher = self
            .launcher
            .ok_or(BuildError::MissingCollaborator("launcher"))?;
        let cloud = self.cloud.ok_or(BuildError::MissingCollaborator("cloud"))?;

        // An action no rule can reach is legal, but almost always a typo.
        for gesture in self.registry.gestures() {
            if !self.classifier.rules().iter().any(|r| r.gesture == gesture) {
                warn!(%gesture, "action configured but no rule produces this gesture");
            }
        }

        let mut dispatcher = ActionDispatcher::with_collaborators(
            self.dispatch,
            Arc::clone(&self.clock),
            launcher,
            cloud,
        );
        for (kind, executor) in self.executors {
            dispatcher = dispatcher.with_executor(kind, executor);
        }

        let id_generator: Arc<dyn IdGenerator> = match self.id_generator {
            Some(id_generator) => id_generator,
            None => Arc::new(UlidGenerator::new(Arc::clone(&self.clock))),
        };

        Ok(GestureEngine::new(
            self.classifier,
            self.registry,
            dispatcher,
            id_generator,
            self.clock,
        ))
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
