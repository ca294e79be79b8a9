//! Wrapping sentences in XML elements
//!
//! Sentence boundaries and element boundaries do not nest in general. The
//! tagger keeps a stack of the elements open in the input and closes or
//! reopens them around the sentence element so that the output stays
//! well-formed:
//!
//! ```text
//! <i>Hallo Susi. Hallo</i> Peter.
//! <i> <s> Hallo Susi . </s> </i> <s> <i> Hallo </i> Peter . </s>
//! ```

use crate::token::{MarkupClass, Token};

#[derive(Debug, Clone)]
struct OpenElement {
    /// Start tag as it appeared in the input
    start_tag: String,
    name: String,
    /// Currently open in the output
    open: bool,
    /// Opened inside the current sentence element
    inside: bool,
}

/// Inserts sentence start and end tags into a stream of sentences
#[derive(Debug, Clone)]
pub struct SentenceTagger {
    tag: String,
    stack: Vec<OpenElement>,
}

impl SentenceTagger {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            stack: Vec::new(),
        }
    }

    /// Wrap the next sentence
    ///
    /// Sentences must be passed in document order; the tagger carries the
    /// elements left open by one sentence over to the next.
    pub fn wrap(&mut self, sentence: Vec<Token>) -> Vec<Token> {
        let mut out = Vec::with_capacity(sentence.len() + 4);

        let first = sentence.iter().position(|t| !t.markup);
        let last = sentence.iter().rposition(|t| !t.markup);
        let (Some(first), Some(last)) = (first, last) else {
            for token in sentence {
                self.emit(token, false, &mut out);
            }
            return out;
        };

        // pair up start and end tags within the sentence; an unmatched end
        // tag closes an element opened by an earlier sentence
        let mut local_end: Vec<Option<usize>> = vec![None; sentence.len()];
        let mut local_starts: Vec<usize> = Vec::new();
        let mut unmatched = 0;
        let mut cut: Option<usize> = None;
        for (i, token) in sentence.iter().enumerate() {
            if token.is_start_tag() {
                local_starts.push(i);
            } else if token.is_end_tag() {
                if let Some(start) = local_starts.pop() {
                    local_end[start] = Some(i);
                } else {
                    unmatched += 1;
                    if let Some(depth) = self.stack.len().checked_sub(unmatched) {
                        if first < i && i < last {
                            cut = Some(cut.map_or(depth, |c| c.min(depth)));
                        }
                    }
                }
            }
        }

        let start = match cut {
            Some(depth) => {
                self.close_from(depth, &mut out);
                self.reopen(0, depth, false, &mut out);
                out.push(self.sentence_tag(MarkupClass::Start));
                self.reopen(depth, self.stack.len(), true, &mut out);
                0
            }
            None => {
                self.reopen(0, self.stack.len(), false, &mut out);
                (0..first)
                    .find(|&i| {
                        sentence[i].is_start_tag()
                            && local_end[i].is_some_and(|end| first < end && end < last)
                    })
                    .unwrap_or(first)
            }
        };

        let mut opened = cut.is_some();
        let mut finished = false;
        for (i, token) in sentence.into_iter().enumerate() {
            if !opened && i == start {
                out.push(self.sentence_tag(MarkupClass::Start));
                opened = true;
            }
            if i < start {
                self.emit(token, false, &mut out);
            } else if i <= last || (!finished && self.inside_open()) {
                self.emit(token, true, &mut out);
            } else {
                if !finished {
                    self.finish(&mut out);
                    finished = true;
                }
                self.emit(token, false, &mut out);
            }
        }
        if !finished {
            self.finish(&mut out);
        }
        out
    }

    fn emit(&mut self, token: Token, inside: bool, out: &mut Vec<Token>) {
        if token.is_start_tag() {
            self.stack.push(OpenElement {
                start_tag: token.text.clone(),
                name: token.tag_name().unwrap_or_default().to_string(),
                open: true,
                inside,
            });
        } else if token.is_end_tag() {
            self.stack.pop();
        }
        out.push(token);
    }

    fn inside_open(&self) -> bool {
        self.stack.iter().any(|e| e.open && e.inside)
    }

    /// Close the elements opened inside the sentence, then the sentence
    fn finish(&mut self, out: &mut Vec<Token>) {
        for element in self.stack.iter_mut().rev() {
            if element.open && element.inside {
                out.push(end_tag(&element.name));
                element.open = false;
                element.inside = false;
            }
        }
        out.push(self.sentence_tag(MarkupClass::End));
    }

    /// Close open elements at `depth` and above, innermost first
    fn close_from(&mut self, depth: usize, out: &mut Vec<Token>) {
        for element in self.stack[depth..].iter_mut().rev() {
            if element.open {
                out.push(end_tag(&element.name));
                element.open = false;
            }
        }
    }

    /// Reopen the closed elements in `from..to`, outermost first
    fn reopen(&mut self, from: usize, to: usize, inside: bool, out: &mut Vec<Token>) {
        for element in &mut self.stack[from..to] {
            if !element.open {
                out.push(Token::markup(
                    element.start_tag.clone(),
                    MarkupClass::Start,
                    false,
                ));
                element.open = true;
                element.inside = inside;
            }
        }
    }

    fn sentence_tag(&self, class: MarkupClass) -> Token {
        match class {
            MarkupClass::Start => Token::markup(format!("<{}>", self.tag), class, false),
            MarkupClass::End => end_tag(&self.tag),
        }
    }
}

fn end_tag(name: &str) -> Token {
    Token::markup(format!("</{name}>"), MarkupClass::End, false)
}

/// Wrap every sentence of a document in `<tag>`…`</tag>`
pub fn add_xml_tags<I>(sentences: I, tag: &str) -> Vec<Vec<Token>>
where
    I: IntoIterator<Item = Vec<Token>>,
{
    let mut tagger = SentenceTagger::new(tag);
    sentences
        .into_iter()
        .map(|sentence| tagger.wrap(sentence))
        .collect()
}
