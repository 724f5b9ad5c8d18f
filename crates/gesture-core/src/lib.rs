//! gesture-core
//!
//! Gesture classification and action dispatch.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（finger, gesture, action, outcome, errors, ids, state）
//! - **ports**: 外部協力者の抽象化（Launcher, CloudLifecycle, Clock, IdGenerator）
//! - **app**: classifier, registry, dispatcher, engine, builder
//! - **impls**: ports の実装（SystemLauncher, AwsCliCloud, dry-run）
//! - **config**: TOML 設定

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod ports;

#[cfg(test)]
pub(crate) mod test_support;

pub use app::{EngineBuilder, GestureEngine};
pub use config::EngineConfig;
pub use domain::{Detection, FingerStateVector, GestureId, Outcome, OutcomeStatus};
