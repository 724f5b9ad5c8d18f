//! FingerStateVector - 指ごとの伸展状態
//!
//! 外部の hand-landmark 検出器が出力する 5 要素の bool ベクトル。
//! 「手が検出されなかった」は all-false ではなく `Detection::NoHand` で表す
//! （all-false は「0 本指」という正当なジェスチャー）。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Finger positions, in vector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Thumb => "thumb",
            Self::Index => "index",
            Self::Middle => "middle",
            Self::Ring => "ring",
            Self::Pinky => "pinky",
        }
    }
}

/// Up/down state of each finger, fixed order `{thumb, index, middle, ring, pinky}`.
///
/// Serialized as the compact form `"01100"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FingerStateVector([bool; 5]);

impl FingerStateVector {
    /// bool 配列から作成（thumb, index, middle, ring, pinky の順）
    pub const fn new(states: [bool; 5]) -> Self {
        Self(states)
    }

    /// Build from the detector's 0/1 output. Any non-zero value counts as "up".
    pub fn from_bits(bits: [u8; 5]) -> Self {
        Self(bits.map(|b| b != 0))
    }

    /// 指が伸びているか
    pub fn is_up(&self, finger: Finger) -> bool {
        self.0[finger as usize]
    }

    /// bool 配列を返す
    pub fn states(&self) -> [bool; 5] {
        self.0
    }

    /// 伸びている指の本数
    pub fn raised_count(&self) -> usize {
        self.0.iter().filter(|up| **up).count()
    }

    /// Every possible vector, in binary counting order (thumb is the high bit).
    pub fn all() -> impl Iterator<Item = FingerStateVector> {
        (0u8..32).map(|n| {
            let mut states = [false; 5];
            for (i, state) in states.iter_mut().enumerate() {
                *state = n & (1 << (4 - i)) != 0;
            }
            FingerStateVector(states)
        })
    }

    /// `"01100"`
    pub fn to_compact(&self) -> String {
        self.0.iter().map(|up| if *up { '1' } else { '0' }).collect()
    }

    /// Human label such as `"index + middle"`, or `"no fingers"`.
    pub fn describe(&self) -> String {
        let raised: Vec<&str> = Finger::ALL
            .iter()
            .filter(|f| self.is_up(**f))
            .map(|f| f.as_str())
            .collect();
        if raised.is_empty() {
            "no fingers".to_string()
        } else {
            raised.join(" + ")
        }
    }
}

impl fmt::Display for FingerStateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e] = self.0.map(u8::from);
        write!(f, "[{a}, {b}, {c}, {d}, {e}]")
    }
}

/// ParseFingerError は指ベクトルの文字列解析エラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid finger vector {input:?}: expected 5 values of 0/1 (e.g. \"01100\" or \"0,1,1,0,0\")")]
pub struct ParseFingerError {
    pub input: String,
}

impl FromStr for FingerStateVector {
    type Err = ParseFingerError;

    /// Accepts `"01100"`, `"0,1,1,0,0"` and `"[0, 1, 1, 0, 0]"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseFingerError {
            input: s.to_string(),
        };

        let trimmed = s.trim();
        let inner = trimmed
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .unwrap_or(trimmed);

        let digits: Vec<char> = if inner.contains(',') {
            inner
                .split(',')
                .map(|part| {
                    let mut chars = part.trim().chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => Ok(c),
                        _ => Err(err()),
                    }
                })
                .collect::<Result<_, _>>()?
        } else {
            inner.chars().collect()
        };

        if digits.len() != 5 {
            return Err(err());
        }

        let mut states = [false; 5];
        for (state, c) in states.iter_mut().zip(digits) {
            *state = match c {
                '0' => false,
                '1' => true,
                _ => return Err(err()),
            };
        }
        Ok(Self(states))
    }
}

impl TryFrom<String> for FingerStateVector {
    type Error = ParseFingerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FingerStateVector> for String {
    fn from(value: FingerStateVector) -> Self {
        value.to_compact()
    }
}

/// What the external detector reported for one capture event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection {
    Hand(FingerStateVector),
    NoHand,
}

impl Detection {
    /// Parse a capture line: a finger vector, or `none` / empty for "no hand".
    pub fn parse(s: &str) -> Result<Self, ParseFingerError> {
        let trimmed = s.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("none")
            || trimmed.eq_ignore_ascii_case("no-hand")
        {
            return Ok(Self::NoHand);
        }
        trimmed.parse().map(Self::Hand)
    }

    /// 検出された指ベクトル（手がなければ `None`）
    pub fn fingers(&self) -> Option<FingerStateVector> {
        match self {
            Self::Hand(vector) => Some(*vector),
            Self::NoHand => None,
        }
    }
}

impl From<FingerStateVector> for Detection {
    fn from(value: FingerStateVector) -> Self {
        Self::Hand(value)
    }
}

impl From<Option<FingerStateVector>> for Detection {
    fn from(value: Option<FingerStateVector>) -> Self {
        value.map_or(Self::NoHand, Self::Hand)
    }
}
