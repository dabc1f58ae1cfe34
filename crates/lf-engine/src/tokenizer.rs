//! Delimited line tokenizer with optional quoting.
//!
//! Quoting follows the usual CSV dialect rules: a quote only opens a quoted
//! span at the start of a field, a doubled quote inside a span is a literal
//! quote, and quotes are stripped from the emitted token.

use serde::{Deserialize, Serialize};

/// Delimiter and quote settings for splitting a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizerConfig {
    pub delimiter: char,
    /// `None` disables quoting entirely.
    pub quote: Option<char>,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            delimiter: ' ',
            quote: Some('|'),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    FieldStart,
    Unquoted,
    Quoted,
    /// Saw a quote inside a quoted span: either it closes the span or,
    /// if another quote follows, it is a literal quote.
    QuoteInQuoted,
}

/// Split `line` on unquoted delimiters, keeping empty tokens.
///
/// An empty line yields no tokens. A trailing `\r` or `\n` is ignored.
pub fn split_line(line: &str, config: &TokenizerConfig) -> Vec<String> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.is_empty() {
        return Vec::new();
    }

    let is_quote = |c: char| config.quote == Some(c);
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut state = State::FieldStart;

    for c in line.chars() {
        state = match state {
            State::FieldStart if is_quote(c) => State::Quoted,
            State::FieldStart | State::Unquoted if c == config.delimiter => {
                tokens.push(std::mem::take(&mut current));
                State::FieldStart
            }
            State::FieldStart | State::Unquoted => {
                current.push(c);
                State::Unquoted
            }
            State::Quoted if is_quote(c) => State::QuoteInQuoted,
            State::Quoted => {
                current.push(c);
                State::Quoted
            }
            State::QuoteInQuoted if is_quote(c) => {
                current.push(c);
                State::Quoted
            }
            State::QuoteInQuoted if c == config.delimiter => {
                tokens.push(std::mem::take(&mut current));
                State::FieldStart
            }
            State::QuoteInQuoted => {
                current.push(c);
                State::Unquoted
            }
        };
    }

    // An unterminated quoted span ends with the line.
    tokens.push(current);
    tokens
}

/// Split `line` and drop every empty token.
///
/// The position of a token in the result is what later becomes its field
/// index, so empty tokens shift every following field down by one.
pub fn tokenize(line: &str, config: &TokenizerConfig) -> Vec<String> {
    split_line(line, config)
        .into_iter()
        .filter(|t| !t.is_empty())
        .collect()
}
