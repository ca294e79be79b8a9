//! Token model
//!
//! A [`Token`] is the unit every later stage decorates: the rule pipeline
//! splits and classifies it, the sentence splitter flags it, and alignment
//! attaches a byte span into the raw input.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification assigned to a token by the rule pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TokenClass {
    #[default]
    Regular,
    Number,
    Date,
    Time,
    Url,
    EmailAddress,
    Emoticon,
    Hashtag,
    Mention,
    Abbreviation,
    XmlTag,
    XmlEntity,
    Symbol,
    Ordinal,
    Measurement,
    Amount,
    Semester,
    ActionWord,
}

impl TokenClass {
    /// Name used in tab-separated and JSON output
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenClass::Regular => "regular",
            TokenClass::Number => "number",
            TokenClass::Date => "date",
            TokenClass::Time => "time",
            TokenClass::Url => "URL",
            TokenClass::EmailAddress => "email_address",
            TokenClass::Emoticon => "emoticon",
            TokenClass::Hashtag => "hashtag",
            TokenClass::Mention => "mention",
            TokenClass::Abbreviation => "abbreviation",
            TokenClass::XmlTag => "XML_tag",
            TokenClass::XmlEntity => "XML_entity",
            TokenClass::Symbol => "symbol",
            TokenClass::Ordinal => "ordinal",
            TokenClass::Measurement => "measurement",
            TokenClass::Amount => "amount",
            TokenClass::Semester => "semester",
            TokenClass::ActionWord => "action_word",
        }
    }
}

impl fmt::Display for TokenClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a markup token opens or closes an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkupClass {
    Start,
    End,
}

/// A single token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    /// Verbatim XML tag or declaration
    pub markup: bool,
    pub markup_class: Option<MarkupClass>,
    /// Tag always bounds a sentence (markup only)
    pub markup_eos: bool,
    /// Positively classified; never re-split
    pub locked: bool,
    pub token_class: TokenClass,
    pub space_after: bool,
    pub original_spelling: Option<String>,
    pub first_in_sentence: bool,
    pub last_in_sentence: bool,
    /// Half-open byte span into the raw input
    pub character_offset: Option<(usize, usize)>,
}

impl Default for Token {
    fn default() -> Self {
        Self {
            text: String::new(),
            markup: false,
            markup_class: None,
            markup_eos: false,
            locked: false,
            token_class: TokenClass::Regular,
            space_after: true,
            original_spelling: None,
            first_in_sentence: false,
            last_in_sentence: false,
            character_offset: None,
        }
    }
}

impl Token {
    /// Create an unlocked regular token
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Create a locked markup token for a start or end tag
    pub fn markup(text: impl Into<String>, markup_class: MarkupClass, eos: bool) -> Self {
        Self {
            text: text.into(),
            markup: true,
            markup_class: Some(markup_class),
            markup_eos: eos,
            locked: true,
            token_class: TokenClass::XmlTag,
            ..Self::default()
        }
    }

    /// Builder-style setter for `space_after`
    pub fn with_space_after(mut self, space_after: bool) -> Self {
        self.space_after = space_after;
        self
    }

    /// Builder-style setter for both sentence flags
    pub fn with_sentence_flags(mut self, first: bool, last: bool) -> Self {
        self.first_in_sentence = first;
        self.last_in_sentence = last;
        self
    }

    pub fn is_start_tag(&self) -> bool {
        self.markup && self.markup_class == Some(MarkupClass::Start)
    }

    pub fn is_end_tag(&self) -> bool {
        self.markup && self.markup_class == Some(MarkupClass::End)
    }

    /// Element name of a markup token (`<p class="x">` → `p`)
    pub fn tag_name(&self) -> Option<&str> {
        if !self.markup {
            return None;
        }
        let inner = self
            .text
            .trim_start_matches('<')
            .trim_start_matches('/')
            .trim_end_matches('>');
        inner.split_whitespace().next()
    }

    /// Extra information: `SpaceAfter=No` and/or `OriginalSpelling="…"`
    pub fn extra_info(&self) -> String {
        let mut info = Vec::with_capacity(2);
        if !self.space_after {
            info.push("SpaceAfter=No".to_string());
        }
        if let Some(original) = &self.original_spelling {
            info.push(format!("OriginalSpelling=\"{original}\""));
        }
        info.join(", ")
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
