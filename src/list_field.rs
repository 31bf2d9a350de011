// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Normalization of list-of-strings fields.
//!
//! Older documents hold `members`/`exercises` as the textual repr of a
//! Python list (`"['ironman', 'spiderman']"`) instead of a native array.
//! Everything that reads or writes those fields goes through this module so
//! API consumers always see a real list.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Error message for list fields that cannot be coerced on write.
pub const EXPECTED_LIST: &str = "Expected a list of strings.";

/// Nesting limit for literal parsing; deeper input is treated as malformed.
const MAX_DEPTH: usize = 32;

/// Canonicalize a stored value into a list of strings.
///
/// Never fails: unparseable text and unexpected types yield an empty list.
pub fn normalize(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        Value::String(text) => parse_literal_list(text).unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Coerce a request value into a list of strings.
///
/// A native list of strings passes through, a string is parsed with the same
/// literal rules as [`normalize`]. Non-string items and anything else are
/// rejected.
pub fn coerce(value: &Value) -> Result<Vec<String>, &'static str> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string).ok_or(EXPECTED_LIST))
            .collect(),
        Value::String(text) => parse_list_items(text)
            .ok_or(EXPECTED_LIST)?
            .into_iter()
            .map(|item| match item {
                Literal::Str(s) => Ok(s),
                _ => Err(EXPECTED_LIST),
            })
            .collect(),
        _ => Err(EXPECTED_LIST),
    }
}

/// Parse a Python-style literal and return its items if it is a list.
///
/// String items come back as-is. Other items are rendered as JSON text, the
/// same way [`normalize`] renders them inside a native list.
pub fn parse_literal_list(text: &str) -> Option<Vec<String>> {
    let items = parse_list_items(text)?;
    Some(items.into_iter().map(Literal::into_text).collect())
}

fn parse_list_items(text: &str) -> Option<Vec<Literal>> {
    let mut parser = LiteralParser::new(text);
    let literal = parser.parse_value()?;
    parser.skip_whitespace();
    if !parser.at_end() {
        return None;
    }

    match literal {
        Literal::List(items) => Some(items),
        _ => None,
    }
}

#[derive(Debug, PartialEq)]
enum Literal {
    Str(String),
    /// `b'...'` literal, kept as decoded text.
    Bytes(String),
    /// Source text with digit separators removed.
    Number(String),
    Bool(bool),
    None,
    List(Vec<Literal>),
    Tuple(Vec<Literal>),
}

impl Literal {
    fn into_value(self) -> Value {
        match self {
            Literal::Str(s) | Literal::Bytes(s) => Value::String(s),
            Literal::Number(raw) => match raw.parse::<serde_json::Number>() {
                Ok(n) => Value::Number(n),
                Err(_) => Value::String(raw),
            },
            Literal::Bool(b) => Value::Bool(b),
            Literal::None => Value::Null,
            Literal::List(items) | Literal::Tuple(items) => {
                Value::Array(items.into_iter().map(Literal::into_value).collect())
            }
        }
    }

    fn into_text(self) -> String {
        match self {
            Literal::Str(s) | Literal::Bytes(s) | Literal::Number(s) => s,
            other => other.into_value().to_string(),
        }
    }
}

/// String prefix flags (`r`, `b`, or both; `u` is a no-op).
#[derive(Debug, Clone, Copy, PartialEq)]
struct StringKind {
    raw: bool,
    bytes: bool,
}

struct LiteralParser {
    chars: Vec<char>,
    pos: usize,
    depth: usize,
}

impl LiteralParser {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            depth: 0,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn parse_value(&mut self) -> Option<Literal> {
        self.skip_whitespace();
        match self.peek()? {
            '[' => {
                self.pos += 1;
                let (items, _) = self.parse_sequence(']')?;
                Some(Literal::List(items))
            }
            '(' => {
                self.pos += 1;
                let (mut items, trailing_comma) = self.parse_sequence(')')?;
                // `(x)` is a parenthesized expression, `(x,)` a 1-tuple.
                if items.len() == 1 && !trailing_comma {
                    items.pop()
                } else {
                    Some(Literal::Tuple(items))
                }
            }
            '\'' | '"' => self.parse_strings(),
            c if c.is_ascii_digit() || matches!(c, '-' | '+' | '.') => self.parse_number(),
            c if c.is_ascii_alphabetic() => {
                if self.at_string_start() {
                    self.parse_strings()
                } else {
                    self.parse_keyword()
                }
            }
            _ => None,
        }
    }

    /// Parse comma-separated values up to `close`. Returns the items and
    /// whether the last item was followed by a comma.
    fn parse_sequence(&mut self, close: char) -> Option<(Vec<Literal>, bool)> {
        if self.depth >= MAX_DEPTH {
            return None;
        }
        self.depth += 1;
        let result = self.parse_items(close);
        self.depth -= 1;
        result
    }

    fn parse_items(&mut self, close: char) -> Option<(Vec<Literal>, bool)> {
        let mut items = Vec::new();
        let mut trailing_comma = false;
        loop {
            self.skip_whitespace();
            if self.peek()? == close {
                self.pos += 1;
                return Some((items, trailing_comma));
            }
            items.push(self.parse_value()?);
            self.skip_whitespace();
            match self.bump()? {
                ',' => trailing_comma = true,
                c if c == close => return Some((items, false)),
                _ => return None,
            }
        }
    }

    /// Length of the prefix before an opening quote, if one starts here.
    fn string_prefix_len(&self) -> Option<usize> {
        let rest = self.chars.get(self.pos..)?;
        let len = rest.iter().take_while(|c| c.is_ascii_alphabetic()).count();
        matches!(rest.get(len).copied()?, '\'' | '"').then_some(len)
    }

    fn at_string_start(&self) -> bool {
        self.string_prefix_len().is_some()
    }

    /// Consume an optional prefix and the opening quote.
    fn string_start(&mut self) -> Option<(char, StringKind)> {
        let len = self.string_prefix_len()?;
        let prefix: String = self.chars[self.pos..self.pos + len]
            .iter()
            .collect::<String>()
            .to_ascii_lowercase();
        let (raw, bytes) = match prefix.as_str() {
            "" | "u" => (false, false),
            "r" => (true, false),
            "b" => (false, true),
            "br" | "rb" => (true, true),
            _ => return None,
        };
        let quote = self.chars[self.pos + len];
        self.pos += len + 1;
        Some((quote, StringKind { raw, bytes }))
    }

    /// Parse one string literal plus any adjacent ones, which are joined.
    fn parse_strings(&mut self) -> Option<Literal> {
        let (quote, kind) = self.string_start()?;
        let mut text = self.parse_string(quote, kind)?;
        loop {
            let resume = self.pos;
            self.skip_whitespace();
            if !self.at_string_start() {
                self.pos = resume;
                break;
            }
            let (quote, next) = self.string_start()?;
            // Text and bytes cannot be joined.
            if next.bytes != kind.bytes {
                return None;
            }
            text.push_str(&self.parse_string(quote, next)?);
        }

        Some(if kind.bytes {
            Literal::Bytes(text)
        } else {
            Literal::Str(text)
        })
    }

    fn parse_string(&mut self, quote: char, kind: StringKind) -> Option<String> {
        let mut out = String::new();
        loop {
            match self.bump()? {
                c if c == quote => return Some(out),
                '\n' => return None,
                '\\' if kind.raw => {
                    out.push('\\');
                    out.push(self.bump()?);
                }
                '\\' => self.parse_escape(&mut out, kind)?,
                c => out.push(c),
            }
        }
    }

    fn parse_escape(&mut self, out: &mut String, kind: StringKind) -> Option<()> {
        let c = self.bump()?;
        match c {
            '\\' | '\'' | '"' => out.push(c),
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0c}'),
            'v' => out.push('\u{0b}'),
            '\n' => {}
            '0'..='7' => out.push(self.parse_octal_escape(c)?),
            'x' => out.push(self.parse_hex_escape(2)?),
            'u' if !kind.bytes => out.push(self.parse_hex_escape(4)?),
            'U' if !kind.bytes => out.push(self.parse_hex_escape(8)?),
            // Unknown escapes keep the backslash, as Python does.
            other => {
                out.push('\\');
                out.push(other);
            }
        }
        Some(())
    }

    /// Up to three octal digits, the first already consumed.
    fn parse_octal_escape(&mut self, first: char) -> Option<char> {
        let mut code = first.to_digit(8)?;
        for _ in 0..2 {
            match self.peek().and_then(|c| c.to_digit(8)) {
                Some(digit) => {
                    code = code * 8 + digit;
                    self.pos += 1;
                }
                None => break,
            }
        }
        char::from_u32(code)
    }

    fn parse_hex_escape(&mut self, digits: usize) -> Option<char> {
        let end = self.pos.checked_add(digits)?;
        let digits = self.chars.get(self.pos..end)?;
        if !digits.iter().all(char::is_ascii_hexdigit) {
            return None;
        }
        let hex: String = digits.iter().collect();
        self.pos = end;
        let code = u32::from_str_radix(&hex, 16).ok()?;
        char::from_u32(code)
    }

    fn parse_number(&mut self) -> Option<Literal> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '+' | '.' | '_'))
        {
            self.pos += 1;
        }
        let raw: String = self.chars[start..self.pos]
            .iter()
            .filter(|c| **c != '_')
            .collect();
        if raw.parse::<i64>().is_ok() || raw.parse::<f64>().is_ok() {
            Some(Literal::Number(raw))
        } else {
            None
        }
    }

    fn parse_keyword(&mut self) -> Option<Literal> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
            self.pos += 1;
        }
        let word: String = self.chars[start..self.pos].iter().collect();
        match word.as_str() {
            "True" => Some(Literal::Bool(true)),
            "False" => Some(Literal::Bool(false)),
            "None" => Some(Literal::None),
            _ => None,
        }
    }
}

/// List-of-strings field that tolerates the textual storage encoding.
///
/// Deserializes from either representation and always serializes as a
/// native list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringList(pub Vec<String>);

impl StringList {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for StringList {
    fn from(items: Vec<String>) -> Self {
        Self(items)
    }
}

impl Serialize for StringList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for StringList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(Self(normalize(&raw)))
    }
}
