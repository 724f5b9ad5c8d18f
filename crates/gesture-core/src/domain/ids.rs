//! Identifiers.
//!
//! キャプチャイベントごとに ULID ベースの `CaptureId` を振る。
//! ULID は時刻でソート可能なので、ログ上の順序とも一致する。

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Identifier of one capture event (one classify → resolve → dispatch pass).
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaptureId(Ulid);

impl CaptureId {
    /// ULID から作成
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }

    /// 中身の ULID を返す
    pub fn as_ulid(&self) -> Ulid {
        self.0
    }
}

impl From<Ulid> for CaptureId {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl fmt::Display for CaptureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "capture-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_has_prefix() {
        let ulid = Ulid::new();
        let id = CaptureId::from(ulid);
        assert_eq!(id.as_ulid(), ulid);
        assert_eq!(id.to_string(), format!("capture-{ulid}"));
    }

    #[test]
    fn capture_ids_are_sortable() {
        let id1 = CaptureId::from_ulid(Ulid::new());
        std::thread::sleep(std::time::Duration::from_millis(2));
        let id2 = CaptureId::from_ulid(Ulid::new());
        assert!(id1 < id2);
    }

    #[test]
    fn serializes_as_bare_ulid() {
        let id = CaptureId::from_ulid(Ulid::new());
        let s = serde_json::to_string(&id).unwrap();
        assert_eq!(s, format!("\"{}\"", id.as_ulid()));
        let back: CaptureId = serde_json::from_str(&s).unwrap();
        assert_eq!(back, id);
    }
}
