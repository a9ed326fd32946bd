use serde_json::Error as JsonError;
use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
    io::Error as IoError,
};

use crate::text::Lang;

#[derive(Debug)]
pub enum G2PError {
    Io(IoError),
    Json(JsonError),
    AnyHow(anyhow::Error),
    /// A context label without a central phoneme.
    MalformedLabel(String),
    /// The word2ph total disagrees with the emitted phoneme count.
    LengthMismatch { phones: usize, word2ph: usize },
    UnsupportedLang(Lang),
}

impl Error for G2PError {}

impl Display for G2PError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "G2PError: ")?;
        match self {
            Self::Io(e) => Display::fmt(e, f),
            Self::Json(e) => Display::fmt(e, f),
            Self::AnyHow(e) => Display::fmt(e, f),
            Self::MalformedLabel(label) => write!(f, "no central phoneme in label {:?}", label),
            Self::LengthMismatch { phones, word2ph } => write!(
                f,
                "length mismatch: the length of phones is {}, while the total of word2ph is {}",
                phones, word2ph
            ),
            Self::UnsupportedLang(lang) => write!(f, "no g2p available for {:?}", lang),
        }
    }
}

impl From<IoError> for G2PError {
    fn from(value: IoError) -> Self {
        Self::Io(value)
    }
}

impl From<JsonError> for G2PError {
    fn from(value: JsonError) -> Self {
        Self::Json(value)
    }
}

impl From<anyhow::Error> for G2PError {
    fn from(value: anyhow::Error) -> Self {
        Self::AnyHow(value)
    }
}
