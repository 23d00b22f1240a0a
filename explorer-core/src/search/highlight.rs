//! Case-insensitive match highlighting for result names.

use compact_str::CompactString;
use smallvec::{SmallVec, smallvec};

/// One run of a highlighted name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSegment {
    pub text: CompactString,
    pub is_match: bool,
}

impl HighlightSegment {
    fn new(text: &str, is_match: bool) -> Self {
        Self {
            text: CompactString::new(text),
            is_match,
        }
    }
}

pub type Segments = SmallVec<[HighlightSegment; 4]>;

/// Split `text` into matching and non-matching runs.
///
/// Occurrences of `query` are found case-insensitively, scanning left to
/// right without overlap. A blank query, or one that never occurs, yields the
/// whole text as a single non-matching run.
#[must_use]
pub fn highlight_match(text: &str, query: &str) -> Segments {
    let needle: Vec<char> = query.trim().chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return smallvec![HighlightSegment::new(text, false)];
    }

    let mut segments = Segments::new();
    let mut last = 0;
    let mut pos = 0;

    while pos < text.len() {
        match match_len_at(text, pos, &needle) {
            Some(len) => {
                if pos > last {
                    segments.push(HighlightSegment::new(&text[last..pos], false));
                }
                segments.push(HighlightSegment::new(&text[pos..pos + len], true));
                pos += len;
                last = pos;
            }
            None => {
                // advance one char, staying on a boundary
                pos += text[pos..].chars().next().map_or(1, char::len_utf8);
            }
        }
    }

    if last < text.len() {
        segments.push(HighlightSegment::new(&text[last..], false));
    }

    if segments.is_empty() {
        segments.push(HighlightSegment::new(text, false));
    }
    segments
}

/// Byte length of a case-insensitive match of `needle` starting at `start`.
/// The match must end on a char boundary of `text`.
fn match_len_at(text: &str, start: usize, needle: &[char]) -> Option<usize> {
    let mut qi = 0;
    for (offset, ch) in text[start..].char_indices() {
        if qi == needle.len() {
            return Some(offset);
        }
        for lower in ch.to_lowercase() {
            if qi >= needle.len() || needle[qi] != lower {
                return None;
            }
            qi += 1;
        }
    }
    (qi == needle.len()).then_some(text.len() - start)
}
