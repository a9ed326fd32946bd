//! Japanese grapheme-to-phoneme conversion for GPT-SoVITS style models.
//!
//! Text is split into readable runs and marks, the runs go through an
//! OpenJTalk style frontend, and its full-context labels are turned into
//! phonemes with accent phrase markers plus a per-character phoneme count
//! (`word2ph`) used to align text features with the phoneme sequence.

mod config;
mod error;
pub mod text;

pub use config::G2pConfig;
pub use error::G2PError;
pub use text::{
    G2pOutput, G2pRegistry, Lang, text_to_phonemes,
    ja::{
        JapaneseG2p,
        frontend::{Frontend, LexicalNode, Pronunciation, RecordedFrontend, RecordedSegment},
        prosody::{ProsodyOptions, ProsodyOutput, annotate},
        word2ph::WordToPhoneme,
    },
};
