//! The `<onlyinclude>` pre-pass.
//!
//! When a document contains `<onlyinclude>` sections, only the content of
//! those sections is converted.

use super::Span;
use memchr::memmem;
use std::borrow::Cow;

/// The `<onlyinclude>` start tag.
const START_TAG: &str = "<onlyinclude>";
/// The `<onlyinclude>` end tag.
const END_TAG: &str = "</onlyinclude>";

/// A document after the `<onlyinclude>` pre-pass.
#[derive(Debug)]
pub(super) struct Included<'a> {
    /// The text to convert.
    text: Cow<'a, str>,
    /// The start of each included section in `text` paired with its position
    /// in the original document.
    sections: Vec<(usize, usize)>,
}

impl Included<'_> {
    /// The text to convert.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Maps a position in [`Self::text`] back to the original document.
    pub fn to_original(&self, pos: usize) -> usize {
        let index = self.sections.partition_point(|(start, _)| *start <= pos);
        match index.checked_sub(1).and_then(|index| self.sections.get(index)) {
            Some((start, original)) => original + (pos - start),
            None => pos,
        }
    }

    /// Maps a span in [`Self::text`] back to the original document.
    pub fn span_to_original(&self, span: Span) -> Span {
        let start = self.to_original(span.start);
        let end = if span.is_empty() {
            start
        } else {
            self.to_original(span.end - 1) + 1
        };
        Span::new(start, end)
    }
}

/// Keeps only the content of complete `<onlyinclude>` sections, if there
/// are any. Otherwise, the whole document is kept.
pub(super) fn only_include(source: &str) -> Included<'_> {
    let bytes = source.as_bytes();
    let mut text = String::new();
    let mut sections = Vec::new();
    let mut pos = 0;

    while let Some(open) = memmem::find(&bytes[pos..], START_TAG.as_bytes()) {
        let start = pos + open + START_TAG.len();
        let Some(len) = memmem::find(&bytes[start..], END_TAG.as_bytes()) else {
            break;
        };
        sections.push((text.len(), start));
        text.push_str(&source[start..start + len]);
        pos = start + len + END_TAG.len();
    }

    if sections.is_empty() {
        Included {
            text: Cow::Borrowed(source),
            sections,
        }
    } else {
        Included {
            text: Cow::Owned(text),
            sections,
        }
    }
}
