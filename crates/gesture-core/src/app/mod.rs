//! App - アプリケーション層
//!
//! domain と ports を組み合わせて、キャプチャイベントを Outcome に変える。
//!
//! # 主要コンポーネント
//! - **GestureClassifier**: FingerStateVector → GestureId（完全一致のルール表）
//! - **ActionRegistry**: GestureId → ActionSpec
//! - **ActionDispatcher**: ActionSpec → Outcome（失敗を閉じ込める、single-flight）
//! - **GestureEngine / EngineBuilder**: 上記の配線と起動時検証

pub mod builder;
pub mod classifier;
pub mod dispatcher;
pub mod engine;
pub mod executor;
pub mod registry;

pub use self::builder::{BuildError, EngineBuilder};
pub use self::classifier::{BUILTIN_RULES, GestureClassifier, GestureRule};
pub use self::dispatcher::{ActionDispatcher, DispatchConfig};
pub use self::engine::{GestureEngine, GuideEntry};
pub use self::executor::{ActionExecutor, ExecutionError};
pub use self::registry::ActionRegistry;
