// text/ja/prosody.rs
use log::{debug, warn};
use smallvec::SmallVec;

use crate::{error::G2PError, text::ja::label::LabelFeatures};

pub const UTTERANCE_START: &str = "^";
pub const UTTERANCE_END: &str = "$";
pub const QUESTION_END: &str = "?";
pub const PAUSE: &str = "_";
pub const ACCENT_PHRASE_BOUNDARY: &str = "#";
pub const PITCH_FALL: &str = "]";
pub const PITCH_RISE: &str = "[";

const UNVOICED_VOWELS: [&str; 5] = ["A", "E", "I", "O", "U"];

/// Phonemes after which an accent phrase boundary `#` may be placed.
// Taken from the OpenJTalk inventory; other frontends may need more.
pub const BOUNDARY_ELIGIBLE: [&str; 12] =
    ["a", "e", "i", "o", "u", "A", "E", "I", "O", "U", "N", "cl"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProsodyOptions {
    /// Emit `#`, `[` and `]` accent markers.
    pub with_prosody: bool,
    /// Fold unvoiced vowels (`A`, `I`, `U`, ...) to their voiced form.
    pub drop_unvoiced_vowels: bool,
}

impl Default for ProsodyOptions {
    fn default() -> Self {
        Self {
            with_prosody: true,
            drop_unvoiced_vowels: true,
        }
    }
}

impl ProsodyOptions {
    /// Options matching the frontend's plain g2p output.
    pub fn plain() -> Self {
        Self {
            with_prosody: false,
            drop_unvoiced_vowels: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProsodyOutput {
    /// Phonemes including the utterance start and end markers.
    pub phones: Vec<String>,
    /// Phonemes attributed to each lexical node, markers included.
    pub node_counts: Vec<usize>,
}

impl ProsodyOutput {
    /// Phonemes without the utterance start and end markers, which belong to
    /// the segment boundary rather than to any node.
    pub fn content_phones(&self) -> &[String] {
        let mut phones = self.phones.as_slice();
        if let Some((first, rest)) = phones.split_first() {
            if first == UTTERANCE_START {
                phones = rest;
            }
        }
        if let Some((last, rest)) = phones.split_last() {
            if last == UTTERANCE_END || last == QUESTION_END {
                phones = rest;
            }
        }
        phones
    }
}

fn accent_marker(f: &LabelFeatures, phoneme: &str) -> Option<&'static str> {
    if f.a3 == 1 && f.a2_next == 1 && BOUNDARY_ELIGIBLE.contains(&phoneme) {
        Some(ACCENT_PHRASE_BOUNDARY)
    } else if f.a1 == 0 && f.a2_next == f.a2 + 1 && f.a2 != f.f1 {
        Some(PITCH_FALL)
    } else if f.a2 == 1 && f.a2_next == 2 {
        Some(PITCH_RISE)
    } else {
        None
    }
}

/// Left-to-right walk over the labels of one segment.
///
/// Carries the label cursor, the lexical node the current phonemes belong
/// to and the per-node phoneme counts.
#[derive(Debug)]
pub struct ProsodyWalk<'l, S> {
    labels: &'l [S],
    options: ProsodyOptions,
    label_index: usize,
    node_index: usize,
    node_counts: Vec<usize>,
    phones: Vec<String>,
}

impl<'l, S: AsRef<str>> ProsodyWalk<'l, S> {
    pub fn new(labels: &'l [S], node_count: usize, options: ProsodyOptions) -> Self {
        Self {
            labels,
            options,
            label_index: 0,
            node_index: 0,
            node_counts: vec![0; node_count],
            phones: Vec::with_capacity(labels.len() * 2),
        }
    }

    pub fn label_index(&self) -> usize {
        self.label_index
    }

    pub fn node_index(&self) -> usize {
        self.node_index
    }

    pub fn node_counts(&self) -> &[usize] {
        &self.node_counts
    }

    pub fn is_done(&self) -> bool {
        self.label_index >= self.labels.len()
    }

    fn count_for_node(&mut self, n: usize) {
        match self.node_counts.get_mut(self.node_index) {
            Some(count) => *count += n,
            None => warn!(
                "label {} has no lexical node (node {} of {})",
                self.label_index,
                self.node_index,
                self.node_counts.len()
            ),
        }
    }

    /// Consumes the label under the cursor. Returns `false` once every label
    /// has been consumed.
    pub fn step(&mut self) -> Result<bool, G2PError> {
        if self.is_done() {
            return Ok(false);
        }
        let labels = self.labels;
        let n = self.label_index;
        let is_last = n + 1 == labels.len();
        let next = labels.get(n + 1).map(|l| l.as_ref());
        let features = LabelFeatures::extract(labels[n].as_ref(), next)?;

        let mut emitted: SmallVec<[String; 2]> = SmallVec::new();
        let mut attributed = 0;

        if features.is_silence() {
            if n == 0 {
                emitted.push(UTTERANCE_START.to_owned());
            } else if is_last {
                let end = if features.e3 == 0 {
                    UTTERANCE_END
                } else {
                    QUESTION_END
                };
                emitted.push(end.to_owned());
            }
        } else if features.is_pause() {
            emitted.push(PAUSE.to_owned());
        } else {
            let phoneme = if self.options.drop_unvoiced_vowels
                && UNVOICED_VOWELS.contains(&features.phoneme)
            {
                features.phoneme.to_ascii_lowercase()
            } else {
                features.phoneme.to_owned()
            };
            let marker = if self.options.with_prosody {
                accent_marker(&features, &phoneme)
            } else {
                None
            };
            emitted.push(phoneme);
            attributed += 1;
            if let Some(marker) = marker {
                emitted.push(marker.to_owned());
                attributed += 1;
            }
        }

        self.phones.extend(emitted);
        if attributed > 0 {
            self.count_for_node(attributed);
        }

        if !is_last
            && features.c1 != features.c1_next
            && !features.is_silence()
            && !features.is_pause()
            && self.node_index + 1 < self.node_counts.len()
        {
            self.node_index += 1;
        }
        self.label_index += 1;
        Ok(true)
    }

    pub fn finish(self) -> ProsodyOutput {
        ProsodyOutput {
            phones: self.phones,
            node_counts: self.node_counts,
        }
    }
}

/// Converts the labels of one segment into phonemes and per-node counts.
pub fn annotate<S: AsRef<str>>(
    labels: &[S],
    node_count: usize,
    options: ProsodyOptions,
) -> Result<ProsodyOutput, G2PError> {
    let mut walk = ProsodyWalk::new(labels, node_count, options);
    while walk.step()? {}
    let output = walk.finish();
    debug!("prosody phones: {:?}", output.phones);
    debug!("prosody node counts: {:?}", output.node_counts);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a synthetic label carrying only the fields the walk reads.
    fn label(p: &str, a1: &str, a2: &str, a3: &str, c1: &str, e3: &str, f1: &str) -> String {
        format!(
            "xx^xx-{}+xx=xx/A:{}+{}+{}/B:xx-xx_xx/C:{}_xx+xx/D:xx+xx_xx/E:xx_xx!{}_xx-xx/F:{}_xx#xx_xx@xx_xx|xx_xx",
            p, a1, a2, a3, c1, e3, f1
        )
    }

    fn sil(e3: &str) -> String {
        label("sil", "xx", "xx", "xx", "xx", e3, "xx")
    }

    #[test]
    fn single_mora_word_gets_rise_marker() {
        // a2 of the closing label stands for the next mora position.
        let labels = vec![
            sil("xx"),
            label("a", "1", "1", "1", "1", "0", "1"),
            label("sil", "xx", "2", "xx", "xx", "0", "xx"),
        ];
        let out = annotate(&labels, 1, ProsodyOptions::default()).unwrap();
        assert_eq!(out.phones, vec!["^", "a", "[", "$"]);
        assert_eq!(out.content_phones(), &["a".to_owned(), "[".to_owned()]);
        assert_eq!(out.node_counts, vec![2]);
    }

    #[test]
    fn interrogative_end_gives_question_marker() {
        let labels = vec![sil("xx"), label("a", "0", "1", "1", "1", "1", "1"), sil("1")];
        let out = annotate(&labels, 1, ProsodyOptions::default()).unwrap();
        assert_eq!(out.phones.last().map(String::as_str), Some("?"));
    }

    #[test]
    fn undefined_features_emit_no_markers() {
        let labels = vec![
            sil("xx"),
            "xx^xx-k+a=xx".to_owned(),
            "xx^k-a+xx=xx".to_owned(),
            sil("0"),
        ];
        let out = annotate(&labels, 1, ProsodyOptions::default()).unwrap();
        assert_eq!(out.phones, vec!["^", "k", "a", "$"]);
        assert_eq!(out.node_counts, vec![2]);
    }

    #[test]
    fn boundary_and_fall_markers() {
        // "kaba" + "ni": a fall after the accented first mora, a phrase
        // boundary after the last mora of the first phrase.
        let labels = vec![
            sil("xx"),
            label("k", "0", "1", "2", "1", "0", "2"),
            label("a", "0", "1", "2", "1", "0", "2"),
            label("b", "1", "2", "1", "1", "0", "2"),
            label("a", "1", "2", "1", "1", "0", "2"),
            label("n", "0", "1", "1", "2", "0", "1"),
            label("i", "0", "1", "1", "2", "0", "1"),
            sil("0"),
        ];
        let out = annotate(&labels, 2, ProsodyOptions::default()).unwrap();
        assert_eq!(
            out.content_phones(),
            &["k", "a", "]", "b", "a", "#", "n", "i"].map(String::from)
        );
        assert_eq!(out.node_counts, vec![6, 2]);
    }

    #[test]
    fn boundary_needs_eligible_phoneme() {
        // Every label closes a phrase (a3 = 1) and is followed by a phrase
        // start (a2 = 1); only vowels, N and cl take the boundary.
        let labels = vec![
            sil("xx"),
            label("ky", "0", "1", "1", "1", "0", "1"),
            label("o", "0", "1", "1", "1", "0", "1"),
            label("cl", "0", "1", "1", "1", "0", "1"),
            label("k", "0", "1", "1", "2", "0", "1"),
            label("a", "0", "1", "1", "2", "0", "1"),
            label("t", "0", "1", "1", "2", "0", "1"),
            label("a", "0", "1", "1", "2", "0", "1"),
            sil("0"),
        ];
        let out = annotate(&labels, 2, ProsodyOptions::default()).unwrap();
        assert_eq!(
            out.content_phones(),
            &["ky", "o", "#", "cl", "#", "k", "a", "#", "t", "a"].map(String::from)
        );
        assert_eq!(out.node_counts, vec![5, 5]);
    }

    #[test]
    fn ineligible_phoneme_falls_through_to_fall_marker() {
        let labels = vec![
            sil("xx"),
            label("k", "0", "0", "1", "1", "0", "2"),
            label("a", "1", "1", "1", "1", "0", "2"),
            sil("0"),
        ];
        let out = annotate(&labels, 1, ProsodyOptions::default()).unwrap();
        assert_eq!(out.phones, vec!["^", "k", "]", "a", "$"]);
        assert_eq!(out.node_counts, vec![3]);
    }

    #[test]
    fn pause_and_inner_silence_are_not_counted() {
        let labels = vec![
            sil("xx"),
            label("o", "xx", "xx", "xx", "1", "0", "xx"),
            label("pau", "xx", "xx", "xx", "xx", "xx", "xx"),
            label("sil", "xx", "xx", "xx", "xx", "xx", "xx"),
            label("e", "xx", "xx", "xx", "2", "0", "xx"),
            sil("0"),
        ];
        let out = annotate(&labels, 2, ProsodyOptions::default()).unwrap();
        assert_eq!(out.phones, vec!["^", "o", "_", "e", "$"]);
        assert_eq!(out.node_counts, vec![1, 1]);
    }

    #[test]
    fn unvoiced_vowels_fold_only_when_dropping() {
        let labels = vec![
            sil("xx"),
            label("s", "xx", "xx", "xx", "1", "0", "xx"),
            label("U", "xx", "xx", "xx", "1", "0", "xx"),
            sil("0"),
        ];
        let out = annotate(&labels, 1, ProsodyOptions::default()).unwrap();
        assert_eq!(out.content_phones(), &["s".to_owned(), "u".to_owned()]);
        let out = annotate(&labels, 1, ProsodyOptions::plain()).unwrap();
        assert_eq!(out.content_phones(), &["s".to_owned(), "U".to_owned()]);
    }

    #[test]
    fn node_index_advances_and_clamps() {
        let labels = vec![
            sil("xx"),
            label("a", "xx", "xx", "xx", "1", "0", "xx"),
            label("i", "xx", "xx", "xx", "2", "0", "xx"),
            label("u", "xx", "xx", "xx", "3", "0", "xx"),
            sil("0"),
        ];
        let mut walk = ProsodyWalk::new(&labels, 2, ProsodyOptions::plain());
        walk.step().unwrap();
        assert_eq!(walk.node_index(), 0);
        walk.step().unwrap();
        assert_eq!(walk.node_index(), 1);
        walk.step().unwrap();
        walk.step().unwrap();
        assert_eq!(walk.node_index(), 1);
        assert!(walk.step().unwrap());
        assert!(!walk.step().unwrap());
        assert_eq!(walk.node_counts(), &[1, 2]);
        assert_eq!(walk.label_index(), 5);
    }

    #[test]
    fn plain_mode_skips_markers() {
        let labels = vec![
            sil("xx"),
            label("a", "1", "1", "1", "1", "0", "1"),
            label("sil", "xx", "2", "xx", "xx", "0", "xx"),
        ];
        let out = annotate(&labels, 1, ProsodyOptions::plain()).unwrap();
        assert_eq!(out.phones, vec!["^", "a", "$"]);
        assert_eq!(out.node_counts, vec![1]);
    }

    #[test]
    fn plain_mode_pause_uses_vocabulary_symbol() {
        let labels = vec![
            sil("xx"),
            label("o", "xx", "xx", "xx", "1", "0", "xx"),
            label("pau", "xx", "xx", "xx", "xx", "xx", "xx"),
            label("e", "xx", "xx", "xx", "2", "0", "xx"),
            sil("0"),
        ];
        let out = annotate(&labels, 2, ProsodyOptions::plain()).unwrap();
        assert_eq!(out.content_phones(), &["o", "_", "e"].map(String::from));
        assert!(!out.phones.iter().any(|p| p == "pau"));
        assert_eq!(out.node_counts, vec![1, 1]);
    }
}
