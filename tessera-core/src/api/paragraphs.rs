//! Paragraph splitting for plain text input

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How paragraphs are delimited in plain text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParagraphSeparator {
    /// Paragraphs span several lines and are separated by blank lines
    #[default]
    EmptyLines,
    /// One paragraph per line
    SingleNewlines,
}

impl ParagraphSeparator {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParagraphSeparator::EmptyLines => "empty_lines",
            ParagraphSeparator::SingleNewlines => "single_newlines",
        }
    }
}

impl FromStr for ParagraphSeparator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "empty_lines" => Ok(ParagraphSeparator::EmptyLines),
            "single_newlines" => Ok(ParagraphSeparator::SingleNewlines),
            _ => Err(Error::UnsupportedParagraphSeparator {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ParagraphSeparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Paragraphs of `text` with their byte offsets
///
/// Blank lines never belong to a paragraph. Line terminators inside a
/// paragraph are kept; the rule pipeline treats them as whitespace.
pub fn split_paragraphs(text: &str, separator: ParagraphSeparator) -> Vec<(usize, &str)> {
    let mut paragraphs = Vec::new();
    let mut current: Option<(usize, usize)> = None;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let start = offset;
        offset += line.len();
        if line.trim().is_empty() {
            if let Some((from, to)) = current.take() {
                paragraphs.push((from, &text[from..to]));
            }
            continue;
        }
        match separator {
            ParagraphSeparator::SingleNewlines => paragraphs.push((start, line)),
            ParagraphSeparator::EmptyLines => {
                current = Some(current.map_or((start, offset), |(from, _)| (from, offset)));
            }
        }
    }
    if let Some((from, to)) = current {
        paragraphs.push((from, &text[from..to]));
    }
    paragraphs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separator_from_str() {
        assert_eq!(
            "empty_lines".parse::<ParagraphSeparator>().unwrap(),
            ParagraphSeparator::EmptyLines
        );
        assert_eq!(
            "single_newlines".parse::<ParagraphSeparator>().unwrap(),
            ParagraphSeparator::SingleNewlines
        );
        assert!(matches!(
            "tabs".parse::<ParagraphSeparator>(),
            Err(Error::UnsupportedParagraphSeparator { .. })
        ));
    }

    #[test]
    fn test_empty_lines() {
        let text = "Heyi:)\n\u{20}\nWas machst du\nmorgen?\n\n\nLust?";
        let paragraphs = split_paragraphs(text, ParagraphSeparator::EmptyLines);
        assert_eq!(
            paragraphs,
            vec![
                (0, "Heyi:)\n"),
                (9, "Was machst du\nmorgen?\n"),
                (33, "Lust?")
            ]
        );
    }

    #[test]
    fn test_single_newlines() {
        let text = "eins\n\nzwei\ndrei";
        let paragraphs = split_paragraphs(text, ParagraphSeparator::SingleNewlines);
        assert_eq!(paragraphs, vec![(0, "eins\n"), (6, "zwei\n"), (11, "drei")]);
    }

    #[test]
    fn test_offsets_point_into_text() {
        let text = "a\n\nb c\n";
        for (offset, paragraph) in split_paragraphs(text, ParagraphSeparator::EmptyLines) {
            assert_eq!(&text[offset..offset + paragraph.len()], paragraph);
        }
    }
}
