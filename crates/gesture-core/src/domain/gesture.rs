//! Gesture - ジェスチャーの語彙

use std::fmt;

use serde::{Deserialize, Serialize};

/// Result of classifying one capture event.
///
/// `NoHand` and `Unrecognized` are distinct on purpose: the first means the
/// detector saw nothing, the second means a hand was there but matched no rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GestureId {
    OpenNotepad,
    OpenBrowserA,
    OpenBrowserB,
    CloudStart,
    CloudStop,
    OpenVideoSite,
    OpenFileExplorer,
    OpenSearchSite,
    Unrecognized,
    NoHand,
}

impl GestureId {
    /// シリアライズ名と同じ SCREAMING_SNAKE_CASE
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenNotepad => "OPEN_NOTEPAD",
            Self::OpenBrowserA => "OPEN_BROWSER_A",
            Self::OpenBrowserB => "OPEN_BROWSER_B",
            Self::CloudStart => "CLOUD_START",
            Self::CloudStop => "CLOUD_STOP",
            Self::OpenVideoSite => "OPEN_VIDEO_SITE",
            Self::OpenFileExplorer => "OPEN_FILE_EXPLORER",
            Self::OpenSearchSite => "OPEN_SEARCH_SITE",
            Self::Unrecognized => "UNRECOGNIZED",
            Self::NoHand => "NO_HAND",
        }
    }

    /// 起動対象の表示名。success メッセージ（"Opened Notepad"）に使う。
    /// クラウド操作と予約 id は `None`。
    pub fn target_name(&self) -> Option<&'static str> {
        match self {
            Self::OpenNotepad => Some("Notepad"),
            Self::OpenBrowserA => Some("Chrome"),
            Self::OpenBrowserB => Some("Edge"),
            Self::OpenVideoSite => Some("YouTube"),
            Self::OpenFileExplorer => Some("File Explorer"),
            Self::OpenSearchSite => Some("Google"),
            Self::CloudStart | Self::CloudStop | Self::Unrecognized | Self::NoHand => None,
        }
    }

    /// `NO_HAND` / `UNRECOGNIZED` are produced by the classifier itself and
    /// can never be the target of a rule or a registry entry.
    pub fn is_reserved(&self) -> bool {
        matches!(self, Self::Unrecognized | Self::NoHand)
    }

    /// Short description for the gesture guide.
    pub fn label(&self) -> &'static str {
        match self {
            Self::OpenNotepad => "Open Notepad",
            Self::OpenBrowserA => "Open Chrome",
            Self::OpenBrowserB => "Open Edge",
            Self::CloudStart => "Start cloud instance",
            Self::CloudStop => "Stop cloud instance",
            Self::OpenVideoSite => "Open YouTube",
            Self::OpenFileExplorer => "Open File Explorer",
            Self::OpenSearchSite => "Open Google",
            Self::Unrecognized => "Unrecognized gesture",
            Self::NoHand => "No hand detected",
        }
    }
}

impl fmt::Display for GestureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
