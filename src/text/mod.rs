// text/mod.rs
use std::fmt::Debug;

use log::{debug, info};
use once_cell::unsync::OnceCell;
use serde::Serialize;

use crate::{
    config::G2pConfig,
    error::G2PError,
    text::ja::{JapaneseG2p, frontend::Frontend, word2ph::WordToPhoneme},
};

pub mod ja;
pub mod symbol;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    Ja,
    Zh,
    En,
}

pub type FrontendFactory = Box<dyn Fn() -> anyhow::Result<Box<dyn Frontend>>>;

/// Per-language analyzers, each built the first time it is asked for.
pub struct G2pRegistry {
    config: G2pConfig,
    ja_frontend: FrontendFactory,
    japanese: OnceCell<JapaneseG2p>,
}

impl Debug for G2pRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("G2pRegistry")
            .field("config", &self.config)
            .field("japanese", &self.japanese.get())
            .finish()
    }
}

impl G2pRegistry {
    pub fn new<F>(config: G2pConfig, ja_frontend: F) -> Self
    where
        F: Fn() -> anyhow::Result<Box<dyn Frontend>> + 'static,
    {
        Self {
            config,
            ja_frontend: Box::new(ja_frontend),
            japanese: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &G2pConfig {
        &self.config
    }

    pub fn japanese(&self) -> Result<&JapaneseG2p, G2PError> {
        self.japanese.get_or_try_init(|| {
            info!("Initializing Japanese g2p");
            let frontend = (self.ja_frontend)()?;
            Ok(JapaneseG2p::new(frontend, &self.config))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct G2pOutput {
    pub phones: Vec<String>,
    pub word2ph: WordToPhoneme,
    pub norm_text: String,
}

impl G2pOutput {
    pub fn phone_ids(&self) -> Vec<i64> {
        symbol::phonemes_to_ids(&self.phones)
    }
}

/// Normalizes `text` and converts it to vocabulary phonemes, replacing
/// anything outside the vocabulary with `UNK`.
pub fn text_to_phonemes(
    registry: &G2pRegistry,
    text: &str,
    lang: Lang,
) -> Result<G2pOutput, G2PError> {
    let g2p = match lang {
        Lang::Ja => registry.japanese()?,
        other => return Err(G2PError::UnsupportedLang(other)),
    };
    let norm_text = g2p.normalize(text);
    debug!("normalized text: {}", norm_text);
    let (phones, word2ph) = g2p.g2p(&norm_text, registry.config().with_prosody)?;
    Ok(G2pOutput {
        phones: symbol::replace_unknown(phones),
        word2ph,
        norm_text,
    })
}
