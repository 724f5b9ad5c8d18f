//! Domain - ドメインモデル
//!
//! 指ベクトル、ジェスチャー、アクション、Outcome、エラー分類。

pub mod action;
pub mod errors;
pub mod finger;
pub mod gesture;
pub mod ids;
pub mod outcome;
pub mod state;

pub use action::{ActionKind, ActionSpec, param};
pub use errors::{ConfigError, ErrorKind};
pub use finger::{Detection, Finger, FingerStateVector, ParseFingerError};
pub use gesture::GestureId;
pub use ids::CaptureId;
pub use outcome::{Outcome, OutcomeStatus};
pub use state::DispatchState;
