// text/ja/normalize.rs
use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::text::symbol::PUNCTUATION;

// A run of two or more punctuation marks; the first one is kept.
static PUNCTUATION_RUN_REGEX: Lazy<Regex> = Lazy::new(|| {
    let class: String = PUNCTUATION.iter().map(|p| regex::escape(p)).collect();
    Regex::new(&format!("([{class}])[{class}]+")).unwrap()
});

/// Collapses runs of punctuation into their first mark.
pub fn text_normalize(text: &str) -> String {
    PUNCTUATION_RUN_REGEX.replace_all(text, "$1").into_owned()
}

const SYMBOLS_TO_JAPANESE: [(&str, &str); 2] = [("％", "パーセント"), ("%", "パーセント")];

/// Spells out symbols the frontend would otherwise skip.
pub fn symbols_to_japanese(text: &str) -> String {
    let mut text = text.to_owned();
    for (symbol, spoken) in SYMBOLS_TO_JAPANESE {
        if text.contains(symbol) {
            text = text.replace(symbol, spoken);
        }
    }
    text
}

lazy_static::lazy_static! {
    static ref REP_MAP: HashMap<&'static str, &'static str> = HashMap::from([
        ("：", ","),
        ("；", ","),
        ("，", ","),
        ("。", "."),
        ("！", "!"),
        ("？", "?"),
        ("\n", "."),
        ("·", ","),
        ("、", ","),
    ]);
}

/// Maps full-width and other punctuation variants onto the canonical marks.
pub fn post_replace_ph(ph: String) -> String {
    match REP_MAP.get(ph.as_str()) {
        Some(p) => (*p).to_owned(),
        None => ph,
    }
}
