// text/ja/frontend.rs
//! Interface to the linguistic frontend (OpenJTalk style) that turns a run of
//! Japanese text into lexical nodes and full-context labels.

use std::{collections::HashMap, path::Path};

use anyhow::{Context, Result, anyhow};
use log::debug;
use serde::{Deserialize, Serialize};

const IDLE: &str = "IDLE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Pronunciation {
    Ordinary(String),
    /// The node is not pronounced (the frontend's `IDLE` marker).
    Idle,
}

impl From<String> for Pronunciation {
    fn from(value: String) -> Self {
        if value == IDLE {
            Pronunciation::Idle
        } else {
            Pronunciation::Ordinary(value)
        }
    }
}

impl From<Pronunciation> for String {
    fn from(value: Pronunciation) -> Self {
        match value {
            Pronunciation::Ordinary(p) => p,
            Pronunciation::Idle => IDLE.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexicalNode {
    /// Substring of the analysed text covered by this node.
    #[serde(alias = "string")]
    pub surface: String,
    pub pron: Pronunciation,
}

impl LexicalNode {
    pub fn new(surface: impl Into<String>, pron: Pronunciation) -> Self {
        Self {
            surface: surface.into(),
            pron,
        }
    }
}

/// The external linguistic frontend.
///
/// Both calls see the same text, and the labels must cover the phonemes of
/// the returned nodes in reading order.
pub trait Frontend {
    fn analyze(&self, text: &str) -> Result<Vec<LexicalNode>>;

    fn labelize(&self, text: &str) -> Result<Vec<String>>;

    fn run(&self, text: &str) -> Result<(Vec<LexicalNode>, Vec<String>)> {
        let nodes = self.analyze(text)?;
        let labels = self.labelize(text)?;
        debug!(
            "frontend {:?}: {} nodes, {} labels",
            text,
            nodes.len(),
            labels.len()
        );
        Ok((nodes, labels))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordedSegment {
    pub nodes: Vec<LexicalNode>,
    pub labels: Vec<String>,
}

/// Frontend replaying analyses recorded ahead of time, keyed by segment text.
///
/// The JSON form is `{ "<segment>": { "nodes": [{ "surface": .., "pron": .. }],
/// "labels": [..] } }`.
#[derive(Debug, Clone, Default)]
pub struct RecordedFrontend {
    segments: HashMap<String, RecordedSegment>,
}

impl RecordedFrontend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, text: impl Into<String>, segment: RecordedSegment) {
        self.segments.insert(text.into(), segment);
    }

    pub fn with_segment(
        mut self,
        text: impl Into<String>,
        nodes: Vec<LexicalNode>,
        labels: Vec<String>,
    ) -> Self {
        self.insert(text, RecordedSegment { nodes, labels });
        self
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let segments: HashMap<String, RecordedSegment> =
            serde_json::from_str(s).context("recorded frontend parse error")?;
        Ok(Self { segments })
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("{} not found", path.display()))?;
        Self::from_json_str(&s)
    }

    fn segment(&self, text: &str) -> Result<&RecordedSegment> {
        self.segments
            .get(text)
            .ok_or_else(|| anyhow!("no recorded analysis for {:?}", text))
    }
}

impl Frontend for RecordedFrontend {
    fn analyze(&self, text: &str) -> Result<Vec<LexicalNode>> {
        Ok(self.segment(text)?.nodes.clone())
    }

    fn labelize(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.segment(text)?.labels.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_recorded_json() {
        let json = r#"{
            "はい": {
                "nodes": [
                    { "surface": "はい", "pron": "ハイ" },
                    { "string": "、", "pron": "IDLE" }
                ],
                "labels": ["xx^xx-sil+h=a", "xx^sil-h+a=i"]
            }
        }"#;
        let frontend = RecordedFrontend::from_json_str(json).unwrap();
        let (nodes, labels) = frontend.run("はい").unwrap();
        assert_eq!(nodes[0].pron, Pronunciation::Ordinary("ハイ".into()));
        assert_eq!(nodes[1].surface, "、");
        assert_eq!(nodes[1].pron, Pronunciation::Idle);
        assert_eq!(labels.len(), 2);
    }

    #[test]
    fn unknown_segment_is_an_error() {
        let frontend = RecordedFrontend::new();
        assert!(frontend.analyze("いいえ").is_err());
    }
}
