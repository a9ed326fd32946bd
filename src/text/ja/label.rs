// text/ja/label.rs
//! Feature extraction from HTS-style full-context labels.
//!
//! A label looks like
//! `xx^m-a+r=u/A:-2+1+4/B:...!0_xx-1/F:4_1#0_xx@1_1|1_4/...`; only the handful
//! of fields the prosody walk needs are pulled out here.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::G2PError;

/// Value of a numeric feature whose field is missing from the label.
///
/// Lies outside every valid feature range, so relational tests against it
/// never match.
pub const UNDEFINED_FEATURE: i32 = -50;

static P3_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\-(.*?)\+").unwrap());
static E3_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"!(\d+)_").unwrap());
static A1_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"/A:([0-9\-]+)\+").unwrap());
static A2_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\+(\d+)\+").unwrap());
static A3_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\+(\d+)/").unwrap());
static F1_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"/F:(\d+)_").unwrap());
static C1_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"/C:(\d+)_").unwrap());

fn numeric_feature(regex: &Regex, label: &str) -> i32 {
    regex
        .captures(label)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(UNDEFINED_FEATURE)
}

/// Central phoneme of a label, e.g. `a`, `cl`, `sil`, `pau`.
pub fn central_phoneme(label: &str) -> Result<&str, G2PError> {
    P3_REGEX
        .captures(label)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| G2PError::MalformedLabel(label.to_owned()))
}

/// Forward mora position in the accent phrase (`A2`).
pub fn forward_position(label: &str) -> i32 {
    numeric_feature(&A2_REGEX, label)
}

/// Word identity counter (`C1`), used to spot word changes between labels.
pub fn word_id(label: &str) -> i32 {
    numeric_feature(&C1_REGEX, label)
}

/// Interrogative flag of the utterance end (`E3`).
pub fn final_flag(label: &str) -> i32 {
    numeric_feature(&E3_REGEX, label)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelFeatures<'a> {
    pub phoneme: &'a str,
    pub e3: i32,
    pub a1: i32,
    pub a2: i32,
    pub a3: i32,
    pub f1: i32,
    pub c1: i32,
    pub a2_next: i32,
    pub c1_next: i32,
}

impl<'a> LabelFeatures<'a> {
    /// Extracts the features of `label`, reading the `A2` and `C1` fields of
    /// `next` when there is a following label.
    pub fn extract(label: &'a str, next: Option<&str>) -> Result<Self, G2PError> {
        Ok(Self {
            phoneme: central_phoneme(label)?,
            e3: final_flag(label),
            a1: numeric_feature(&A1_REGEX, label),
            a2: forward_position(label),
            a3: numeric_feature(&A3_REGEX, label),
            f1: numeric_feature(&F1_REGEX, label),
            c1: word_id(label),
            a2_next: next.map_or(UNDEFINED_FEATURE, forward_position),
            c1_next: next.map_or(UNDEFINED_FEATURE, word_id),
        })
    }

    pub fn is_silence(&self) -> bool {
        self.phoneme == "sil"
    }

    pub fn is_pause(&self) -> bool {
        self.phoneme == "pau"
    }
}
