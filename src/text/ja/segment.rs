// text/ja/segment.rs

/// Characters the frontend can read: Latin letters and digits, kana, CJK
/// ideographs and their full/half-width forms.
pub fn is_content_char(c: char) -> bool {
    matches!(c,
        'A'..='Z' | 'a'..='z' | '0'..='9' |
        '\u{3005}' |                // 々
        '\u{3040}'..='\u{30ff}' |   // hiragana, katakana
        '\u{4e00}'..='\u{9fff}' |   // CJK unified ideographs
        '\u{ff11}'..='\u{ff19}' |   // full-width digits
        '\u{ff21}'..='\u{ff3a}' |   // full-width capitals
        '\u{ff41}'..='\u{ff5a}' |   // full-width small letters
        '\u{ff66}'..='\u{ff9d}'     // half-width katakana
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'t> {
    /// Maximal run of content characters.
    Content(&'t str),
    /// A single punctuation, whitespace or foreign character.
    Mark(&'t str),
}

pub struct TextSplitter<'t> {
    input: &'t str,
    index: usize,
}

impl<'t> TextSplitter<'t> {
    pub fn new(text: &'t str) -> Self {
        Self {
            input: text,
            index: 0,
        }
    }
}

impl<'t> Iterator for TextSplitter<'t> {
    type Item = Segment<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.index;
        let mut chars = self.input[start..].char_indices();
        let (_, c) = chars.next()?;

        if is_content_char(c) {
            let end = chars
                .find(|&(_, c)| !is_content_char(c))
                .map(|(i, _)| start + i)
                .unwrap_or(self.input.len());
            self.index = end;
            Some(Segment::Content(&self.input[start..end]))
        } else {
            let end = start + c.len_utf8();
            self.index = end;
            Some(Segment::Mark(&self.input[start..end]))
        }
    }
}
