//! ActionRegistry: GestureId -> ActionSpec.
//!
//! Design:
//! - Built during initialization (mutable).
//! - Used during runtime (immutable, shared behind `Arc`).
//!
//! Entries are data, not code: adding an action never touches the
//! classifier or the dispatcher.

use std::collections::HashMap;

use crate::domain::{ActionSpec, ConfigError, GestureId};

/// ActionRegistry は GestureId → ActionSpec の表
#[derive(Debug, Clone, Default)]
pub struct ActionRegistry {
    actions: HashMap<GestureId, ActionSpec>,
}

impl ActionRegistry {
    /// 空の ActionRegistry を作成
    pub fn new() -> Self {
        Self {
            actions: HashMap::new(),
        }
    }

    /// The built-in action table.
    pub fn builtin() -> Self {
        let actions = builtin_actions().into_iter().collect();
        Self { actions }
    }

    /// Register the action for a gesture.
    ///
    /// Rejects reserved gestures, a second entry for the same gesture, and
    /// specs missing a parameter their kind requires.
    pub fn register(&mut self, gesture: GestureId, spec: ActionSpec) -> Result<(), ConfigError> {
        if gesture.is_reserved() {
            return Err(ConfigError::ReservedGesture(gesture));
        }
        if self.actions.contains_key(&gesture) {
            return Err(ConfigError::DuplicateAction(gesture));
        }
        if let Some(param) = spec.missing_param() {
            return Err(ConfigError::MissingParameter {
                gesture,
                kind: spec.kind(),
                param,
            });
        }
        self.actions.insert(gesture, spec);
        Ok(())
    }

    /// `None` means "nothing to execute". Always `None` for `NO_HAND` and
    /// `UNRECOGNIZED`.
    pub fn resolve(&self, gesture: GestureId) -> Option<&ActionSpec> {
        if gesture.is_reserved() {
            return None;
        }
        self.actions.get(&gesture)
    }

    /// 登録済みアクション数
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// 登録が 1 つもなければ true
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// アクションが登録されているジェスチャー
    pub fn gestures(&self) -> impl Iterator<Item = GestureId> + '_ {
        self.actions.keys().copied()
    }
}

/// Built-in gesture → action table.
pub fn builtin_actions() -> Vec<(GestureId, ActionSpec)> {
    const REGION: &str = "ap-south-1";

    vec![
        (GestureId::OpenNotepad, ActionSpec::launch_local("notepad")),
        (GestureId::OpenBrowserA, ActionSpec::launch_local("chrome")),
        (GestureId::OpenBrowserB, ActionSpec::launch_local("msedge")),
        (
            GestureId::CloudStart,
            ActionSpec::cloud_start("ami-0d0ad8bb301edb745", "t3.micro", REGION),
        ),
        (
            GestureId::CloudStop,
            ActionSpec::cloud_stop("i-0c9222ddc82c51785", REGION),
        ),
        (
            GestureId::OpenVideoSite,
            ActionSpec::open_url("https://www.youtube.com"),
        ),
        (
            GestureId::OpenFileExplorer,
            ActionSpec::launch_local("explorer"),
        ),
        (
            GestureId::OpenSearchSite,
            ActionSpec::open_url("https://www.google.com"),
        ),
    ]
}
