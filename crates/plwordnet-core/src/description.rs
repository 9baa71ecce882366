//! Rich description parsing
//!
//! Unit descriptions embed a small markup dialect:
//!
//! ```text
//! ##K: pot. ##D: zwierzę domowe. [##P: Kot łowi myszy.] {##L: https://pl.wikipedia.org/wiki/Kot}
//! ```
//!
//! The scanner runs left to right without backtracking. Text it cannot
//! attribute to a recognized form ends up in [`Description::leftover`] and,
//! unless it is whitespace, marks the parse as malformed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Structured fields extracted from a free-text description
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Description {
    /// Usage qualifier (`##K:`)
    pub qualifier: Option<String>,

    /// Definition (`##D:`)
    pub definition: Option<String>,

    /// Example blocks (`[##...]`) in source order
    pub examples: Vec<String>,

    /// Link blocks (`{##...}`) in source order
    pub links: Vec<String>,

    /// Labeled fields with markers other than `K` and `D`
    pub fields: BTreeMap<char, String>,

    /// Text the scanner could not attribute to any form
    pub leftover: String,

    /// Whether this description was derived from the owning synset
    pub from_synset: bool,
}

impl Description {
    pub fn is_empty(&self) -> bool {
        self.qualifier.is_none()
            && self.definition.is_none()
            && self.examples.is_empty()
            && self.links.is_empty()
            && self.fields.is_empty()
            && self.leftover.is_empty()
    }
}

/// Parse one description string.
///
/// Returns `(had_error, description)`; `had_error` is set when a
/// non-whitespace character fell outside every recognized form.
pub fn parse_description(text: &str) -> (bool, Description) {
    Scanner::new(text).run()
}

struct Scanner {
    chars: Vec<char>,
    pos: usize,
    error: bool,
    leftover: String,
    description: Description,
}

impl Scanner {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            error: false,
            leftover: String::new(),
            description: Description::default(),
        }
    }

    fn run(mut self) -> (bool, Description) {
        while self.pos < self.chars.len() {
            if self.at_sentiment_block() {
                self.skip_sentiment_block();
            } else if self.peek(0) == Some('<') {
                self.skip_tag();
            } else if self.starts_with("[##") {
                let example = self.take_block(3, ']');
                self.description.examples.push(example);
            } else if self.starts_with("{##") {
                let link = self.take_block(3, '}');
                self.description.links.push(link);
            } else if let Some(marker) = self.field_marker() {
                self.pos += 4;
                let value = self.take_field();
                self.store_field(marker, value);
            } else if self.starts_with("NP") {
                self.pos += 2;
            } else {
                let ch = self.chars[self.pos];
                if !ch.is_whitespace() {
                    self.error = true;
                }
                self.leftover.push(ch);
                self.pos += 1;
            }
        }

        self.description.leftover = self.leftover.trim().to_string();
        (self.error, self.description)
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn starts_with(&self, prefix: &str) -> bool {
        prefix
            .chars()
            .enumerate()
            .all(|(i, c)| self.peek(i) == Some(c))
    }

    /// `##A1`, `##A2`, ...
    fn at_sentiment_block(&self) -> bool {
        self.starts_with("##A") && self.peek(3).is_some_and(|c| c.is_ascii_digit())
    }

    /// `##X:` with a single letter marker
    fn field_marker(&self) -> Option<char> {
        if !self.starts_with("##") || self.peek(3) != Some(':') {
            return None;
        }
        self.peek(2).filter(|c| c.is_alphabetic())
    }

    fn skip_sentiment_block(&mut self) {
        self.pos += 4;
        if self.peek(0) == Some(':') {
            self.pos += 1;
        }
        while let Some(ch) = self.peek(0) {
            match ch {
                '{' | '[' if self.peek(1) == Some('#') && self.peek(2) == Some('#') => break,
                '{' => self.skip_past('}'),
                '[' => self.skip_past(']'),
                '<' => break,
                '#' if self.peek(1) == Some('#') => break,
                _ => self.pos += 1,
            }
        }
    }

    // Tag contents are opaque.
    fn skip_tag(&mut self) {
        self.skip_past('>');
    }

    fn skip_past(&mut self, close: char) {
        while let Some(ch) = self.peek(0) {
            self.pos += 1;
            if ch == close {
                break;
            }
        }
    }

    fn take_block(&mut self, prefix_len: usize, close: char) -> String {
        self.pos += prefix_len;
        let start = self.pos;
        while self.peek(0).is_some_and(|c| c != close) {
            self.pos += 1;
        }
        let content: String = self.chars[start..self.pos].iter().collect();
        if self.pos < self.chars.len() {
            self.pos += 1;
        }
        content.trim().to_string()
    }

    fn take_field(&mut self) -> String {
        let start = self.pos;
        while self.peek(0).is_some_and(|c| !matches!(c, '[' | '{' | '#')) {
            self.pos += 1;
        }
        self.chars[start..self.pos]
            .iter()
            .collect::<String>()
            .trim()
            .to_string()
    }

    fn store_field(&mut self, marker: char, value: String) {
        match marker {
            'K' => self.description.qualifier = Some(value),
            'D' => self.description.definition = Some(value),
            other => {
                self.description.fields.insert(other, value);
            }
        }
    }
}
