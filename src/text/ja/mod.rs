// text/ja/mod.rs
use log::{debug, info};

use crate::{
    config::G2pConfig,
    error::G2PError,
    text::ja::{
        frontend::Frontend,
        normalize::{post_replace_ph, symbols_to_japanese, text_normalize},
        prosody::{ProsodyOptions, annotate},
        segment::{Segment, TextSplitter},
        word2ph::WordToPhoneme,
    },
};

pub mod frontend;
pub mod label;
pub mod normalize;
pub mod prosody;
pub mod segment;
pub mod word2ph;

/// Japanese grapheme-to-phoneme converter over an OpenJTalk style frontend.
pub struct JapaneseG2p {
    frontend: Box<dyn Frontend>,
    drop_unvoiced_vowels: bool,
}

impl std::fmt::Debug for JapaneseG2p {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JapaneseG2p")
            .field("frontend", &"Frontend")
            .field("drop_unvoiced_vowels", &self.drop_unvoiced_vowels)
            .finish()
    }
}

impl JapaneseG2p {
    pub fn new(frontend: Box<dyn Frontend>, config: &G2pConfig) -> Self {
        Self {
            frontend,
            drop_unvoiced_vowels: config.drop_unvoiced_vowels,
        }
    }

    pub fn normalize(&self, text: &str) -> String {
        text_normalize(text)
    }

    fn options(&self, with_prosody: bool) -> ProsodyOptions {
        if with_prosody {
            ProsodyOptions {
                with_prosody: true,
                drop_unvoiced_vowels: self.drop_unvoiced_vowels,
            }
        } else {
            ProsodyOptions::plain()
        }
    }

    /// Runs one content segment through the frontend and the prosody walk,
    /// appending its phonemes and character alignment.
    fn push_content(
        &self,
        segment: &str,
        options: ProsodyOptions,
        phones: &mut Vec<String>,
        word2ph: &mut WordToPhoneme,
    ) -> Result<(), G2PError> {
        let (nodes, labels) = self.frontend.run(segment)?;
        let output = annotate(&labels, nodes.len(), options)?;
        phones.extend_from_slice(output.content_phones());
        word2ph.extend_nodes(&nodes, &output.node_counts);
        Ok(())
    }

    fn preprocess(
        &self,
        text: &str,
        with_prosody: bool,
    ) -> Result<(Vec<String>, WordToPhoneme), G2PError> {
        let text = symbols_to_japanese(text).to_ascii_lowercase();
        let options = self.options(with_prosody);
        let mut phones = Vec::with_capacity(text.len());
        let mut word2ph = WordToPhoneme::new();

        for segment in TextSplitter::new(&text) {
            match segment {
                Segment::Content(s) => {
                    debug!("content segment: {:?}", s);
                    self.push_content(s, options, &mut phones, &mut word2ph)?;
                }
                Segment::Mark(m) if m != "\n" && m.trim().is_empty() => {
                    debug!("skip whitespace mark: {:?}", m);
                }
                Segment::Mark(m) => {
                    phones.push(m.to_owned());
                    word2ph.push(m, 1);
                }
            }
        }
        Ok((phones, word2ph))
    }

    /// Converts normalized text into phonemes and a character alignment.
    ///
    /// Fails with [`G2PError::LengthMismatch`] when the alignment does not
    /// account for every phoneme.
    pub fn g2p(
        &self,
        norm_text: &str,
        with_prosody: bool,
    ) -> Result<(Vec<String>, WordToPhoneme), G2PError> {
        let (phones, word2ph) = self.preprocess(norm_text, with_prosody)?;
        let phones: Vec<String> = phones.into_iter().map(post_replace_ph).collect();

        let total = word2ph.total();
        if phones.len() != total {
            return Err(G2PError::LengthMismatch {
                phones: phones.len(),
                word2ph: total,
            });
        }
        info!("g2p {:?}: {} phones", norm_text, phones.len());
        debug!("phones: {:?}", phones);
        debug!("word2ph: {:?}", word2ph);
        Ok((phones, word2ph))
    }
}
