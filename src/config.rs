use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::G2PError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct G2pConfig {
    /// Emit accent phrase and utterance boundary markers.
    pub with_prosody: bool,
    /// Fold unvoiced vowels to their voiced form in prosody mode.
    pub drop_unvoiced_vowels: bool,
}

impl Default for G2pConfig {
    fn default() -> Self {
        Self {
            with_prosody: true,
            drop_unvoiced_vowels: true,
        }
    }
}

impl G2pConfig {
    pub fn from_json_str(s: &str) -> Result<Self, G2PError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, G2PError> {
        let s = std::fs::read_to_string(path)?;
        Self::from_json_str(&s)
    }
}
