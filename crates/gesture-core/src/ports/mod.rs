//! Ports - 抽象化レイヤー
//!
//! 外部の協力者（OS のプロセス起動、ブラウザ、クラウド API、時計）への
//! インターフェース。dispatcher には trait object として注入するので、
//! テストではスタブに差し替えられる。

pub mod clock;
pub mod cloud;
pub mod id_generator;
pub mod launcher;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::cloud::{CloudError, CloudLifecycle};
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::launcher::{LaunchError, Launcher};
