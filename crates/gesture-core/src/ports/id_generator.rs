//! IdGenerator port - ID 生成の抽象化
//!
//! テスト容易性のために trait として抽象化しています。
//!
//! # 実装
//! - **UlidGenerator**: Clock の時刻を timestamp 部分に使う ULID

use crate::domain::CaptureId;
use crate::ports::Clock;
use ulid::Ulid;

/// IdGenerator は CaptureId を生成
pub trait IdGenerator: Send + Sync {
    fn generate_capture_id(&self) -> CaptureId;
}

/// FixedClock を渡せば timestamp 部分が決定的になる（ランダム部分は毎回異なる）。
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    /// 新しい UlidGenerator を作成
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn generate_capture_id(&self) -> CaptureId {
        let timestamp_ms = self.clock.now().timestamp_millis() as u64;
        let ulid = Ulid::from_parts(timestamp_ms, rand::random());
        CaptureId::from(ulid)
    }
}
