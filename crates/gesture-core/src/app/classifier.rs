//! GestureClassifier - 指ベクトル → GestureId
//!
//! - 順序付きの完全一致ルール表。最初に一致した行が勝つ。
//! - 純粋・決定的。ルールの検証は構築時に 1 回だけ行うので、
//!   `classify` 自体は失敗しない。

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{ConfigError, Detection, FingerStateVector, GestureId};

/// One `(pattern, gesture)` row of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureRule {
    pub pattern: FingerStateVector,
    pub gesture: GestureId,
}

impl GestureRule {
    /// パターンとジェスチャーから行を作成
    pub const fn new(bits: [bool; 5], gesture: GestureId) -> Self {
        Self {
            pattern: FingerStateVector::new(bits),
            gesture,
        }
    }
}

const O: bool = false;
const I: bool = true;

/// The built-in vocabulary, in match order.
pub const BUILTIN_RULES: [GestureRule; 8] = [
    GestureRule::new([O, O, O, O, O], GestureId::OpenNotepad),
    GestureRule::new([I, O, O, O, O], GestureId::OpenBrowserA),
    GestureRule::new([O, I, O, O, O], GestureId::OpenBrowserB),
    GestureRule::new([O, I, I, O, O], GestureId::CloudStart),
    GestureRule::new([O, I, I, I, O], GestureId::CloudStop),
    GestureRule::new([O, I, I, I, I], GestureId::OpenVideoSite),
    GestureRule::new([I, I, I, I, I], GestureId::OpenFileExplorer),
    GestureRule::new([O, I, O, I, I], GestureId::OpenSearchSite),
];

/// GestureClassifier は順序付き完全一致のルール表
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    rules: Vec<GestureRule>,
}

impl GestureClassifier {
    /// Build from an ordered rule list.
    ///
    /// Fails on a repeated pattern or on a rule targeting `NO_HAND` /
    /// `UNRECOGNIZED`. Several patterns may map to the same gesture.
    pub fn new(rules: impl IntoIterator<Item = GestureRule>) -> Result<Self, ConfigError> {
        let rules: Vec<GestureRule> = rules.into_iter().collect();

        let mut seen: HashMap<FingerStateVector, GestureId> = HashMap::with_capacity(rules.len());
        for rule in &rules {
            if rule.gesture.is_reserved() {
                return Err(ConfigError::ReservedGesture(rule.gesture));
            }
            if let Some(first) = seen.insert(rule.pattern, rule.gesture) {
                return Err(ConfigError::DuplicatePattern {
                    pattern: rule.pattern,
                    first,
                    second: rule.gesture,
                });
            }
        }

        Ok(Self { rules })
    }

    /// Classifier over [`BUILTIN_RULES`].
    pub fn builtin() -> Self {
        Self {
            rules: BUILTIN_RULES.to_vec(),
        }
    }

    /// 検出結果を GestureId に分類する
    ///
    /// 全入力に対して定義される（失敗しない）。手がなければ `NO_HAND`、
    /// どのルールにも一致しなければ `UNRECOGNIZED`。
    pub fn classify(&self, detection: Detection) -> GestureId {
        let vector = match detection {
            Detection::NoHand => return GestureId::NoHand,
            Detection::Hand(vector) => vector,
        };

        let gesture = self
            .rules
            .iter()
            .find(|rule| rule.pattern == vector)
            .map_or(GestureId::Unrecognized, |rule| rule.gesture);

        debug!(fingers = %vector, %gesture, "classified");
        gesture
    }

    /// Rules in match order.
    pub fn rules(&self) -> &[GestureRule] {
        &self.rules
    }
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn hand(bits: [u8; 5]) -> Detection {
        Detection::Hand(FingerStateVector::from_bits(bits))
    }

    #[test]
    fn builtin_rules_pass_validation() {
        let validated = GestureClassifier::new(BUILTIN_RULES).unwrap();
        assert_eq!(validated.rules(), GestureClassifier::builtin().rules());
    }

    #[rstest]
    #[case::zero_fingers([0, 0, 0, 0, 0], GestureId::OpenNotepad)]
    #[case::thumb([1, 0, 0, 0, 0], GestureId::OpenBrowserA)]
    #[case::index([0, 1, 0, 0, 0], GestureId::OpenBrowserB)]
    #[case::index_middle([0, 1, 1, 0, 0], GestureId::CloudStart)]
    #[case::index_middle_ring([0, 1, 1, 1, 0], GestureId::CloudStop)]
    #[case::four_fingers([0, 1, 1, 1, 1], GestureId::OpenVideoSite)]
    #[case::open_palm([1, 1, 1, 1, 1], GestureId::OpenFileExplorer)]
    #[case::index_ring_pinky([0, 1, 0, 1, 1], GestureId::OpenSearchSite)]
    #[case::not_in_table([1, 1, 0, 1, 1], GestureId::Unrecognized)]
    #[case::pinky_only([0, 0, 0, 0, 1], GestureId::Unrecognized)]
    fn builtin_vocabulary(#[case] bits: [u8; 5], #[case] expected: GestureId) {
        let classifier = GestureClassifier::builtin();
        assert_eq!(classifier.classify(hand(bits)), expected);
    }

    #[test]
    fn no_hand_is_not_unrecognized() {
        let classifier = GestureClassifier::builtin();
        assert_eq!(classifier.classify(Detection::NoHand), GestureId::NoHand);
    }

    #[test]
    fn classification_is_total_and_idempotent() {
        let classifier = GestureClassifier::builtin();
        let mut recognized = 0;
        for vector in FingerStateVector::all() {
            let first = classifier.classify(vector.into());
            for _ in 0..3 {
                assert_eq!(classifier.classify(vector.into()), first);
            }
            assert_ne!(first, GestureId::NoHand);
            if first != GestureId::Unrecognized {
                recognized += 1;
            }
        }
        assert_eq!(recognized, BUILTIN_RULES.len());
    }

    #[test]
    fn duplicate_pattern_is_rejected() {
        let rules = [
            GestureRule::new([false, true, true, false, false], GestureId::CloudStart),
            GestureRule::new([false, true, true, false, false], GestureId::CloudStop),
        ];
        let err = GestureClassifier::new(rules).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DuplicatePattern {
                first: GestureId::CloudStart,
                second: GestureId::CloudStop,
                ..
            }
        ));
    }

    #[rstest]
    #[case(GestureId::NoHand)]
    #[case(GestureId::Unrecognized)]
    fn reserved_targets_are_rejected(#[case] gesture: GestureId) {
        let rules = [GestureRule::new([true; 5], gesture)];
        assert!(matches!(
            GestureClassifier::new(rules),
            Err(ConfigError::ReservedGesture(g)) if g == gesture
        ));
    }

    #[test]
    fn two_patterns_may_share_a_gesture() {
        let rules = [
            GestureRule::new([true; 5], GestureId::OpenFileExplorer),
            GestureRule::new([false, true, true, true, true], GestureId::OpenFileExplorer),
        ];
        let classifier = GestureClassifier::new(rules).unwrap();
        assert_eq!(
            classifier.classify(hand([0, 1, 1, 1, 1])),
            GestureId::OpenFileExplorer
        );
    }

    #[test]
    fn empty_table_recognizes_nothing() {
        let classifier = GestureClassifier::new(Vec::new()).unwrap();
        assert_eq!(
            classifier.classify(hand([0, 0, 0, 0, 0])),
            GestureId::Unrecognized
        );
    }
}
