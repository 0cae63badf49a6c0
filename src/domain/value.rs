//! Splits the value part of a line into child nodes.
//!
//! A value is either a single token (`name = value`), an inline block of pairs
//! (`{ a = b c = d }`), or a list of bare tokens (`{ a b c }`). Tokens end at
//! the first space unless they start with a double quote, in which case they
//! run to the closing quote and keep both quotes.

use tracing::{instrument, trace};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::Node;
use crate::domain::syntax::{
    self, COMMENT_MARKER, NESTING_END, NESTING_START, STRING_MARKER, TOKEN_SEPARATOR, VALUE_SEPARATOR,
};

/// Parses one or multiple values of one line.
#[derive(Debug, Default, Clone, Copy)]
pub struct ValueSplitter;

impl ValueSplitter {
    pub fn new() -> Self {
        Self
    }

    /// Parse `input` and attach the resulting nodes to `parent`.
    ///
    /// Comments and unquoted braces are removed first, then units are consumed
    /// left to right until the input is exhausted.
    #[instrument(level = "trace", skip(self, parent), fields(parent = %parent.name()))]
    pub fn parse(&self, input: &str, parent: &mut Node, line_number: usize) -> DomainResult<()> {
        if input.trim().is_empty() {
            return Err(DomainError::EmptyValue { line: line_number });
        }

        let prepared = strip_braces(strip_comment(input));
        let mut value = prepared.as_str();
        while !value.trim().is_empty() {
            value = self.next_node(value, parent)?;
        }
        Ok(())
    }

    /// Add each bare token of `input` as a leaf of `parent`.
    ///
    /// Stops at a `}` token and returns the input from that token on;
    /// otherwise returns the (empty) unconsumed remainder.
    pub fn parse_list_value<'a>(&self, input: &'a str, parent: &mut Node) -> DomainResult<&'a str> {
        let mut value = input;
        loop {
            let end = find_end(value);
            if end == 0 {
                return Ok(value);
            }
            let name = &value[..end];
            if syntax::is_nesting_end(name) {
                return Ok(value);
            }
            parent.add_child(Node::create(name)?);
            value = value[end..].trim();
        }
    }

    /// Consume the next unit and return the unparsed rest.
    fn next_node<'a>(&self, input: &'a str, parent: &mut Node) -> DomainResult<&'a str> {
        match split_values(input) {
            (name, Some(value)) => parse_simple_value(name.trim(), value.trim(), parent),
            (_, None) => {
                if list_continues(parent) {
                    if let Some(last) = parent.last_child_mut() {
                        return self.parse_list_value(input.trim(), last);
                    }
                }
                self.parse_list_value(input.trim(), parent)
            }
        }
    }
}

/// Remove everything from the first comment marker to the end.
pub fn strip_comment(value: &str) -> &str {
    match value.find(COMMENT_MARKER) {
        Some(pos) => {
            trace!("Comment found: '{}'", &value[pos..]);
            &value[..pos]
        }
        None => value,
    }
}

/// Split at the first value separator; later separators stay in the value.
pub fn split_values(value: &str) -> (&str, Option<&str>) {
    match value.split_once(VALUE_SEPARATOR) {
        Some((name, rest)) => (name, Some(rest)),
        None => (value, None),
    }
}

/// Byte length of the first token of `value`.
///
/// A token ends at the first space. A token starting with a double quote
/// ends after the next double quote; without one it spans the whole value.
pub fn find_end(value: &str) -> usize {
    let end = if let Some(quoted) = value.strip_prefix(STRING_MARKER) {
        quoted.find(STRING_MARKER).map(|pos| pos + 2)
    } else {
        value.find(TOKEN_SEPARATOR)
    };
    end.unwrap_or(value.len()).min(value.len())
}

/// Opening minus closing braces in `value`, ignoring quoted tokens.
pub fn brace_balance(value: &str) -> isize {
    segments(value)
        .into_iter()
        .filter(|(quoted, _)| !quoted)
        .flat_map(|(_, text)| text.chars())
        .fold(0, |balance, c| match c {
            NESTING_START => balance + 1,
            NESTING_END => balance - 1,
            _ => balance,
        })
}

/// Remove braces outside quoted tokens.
fn strip_braces(value: &str) -> String {
    segments(value)
        .into_iter()
        .map(|(quoted, text)| {
            if quoted {
                text.to_string()
            } else {
                text.replace(&[NESTING_START, NESTING_END][..], "")
            }
        })
        .collect()
}

/// Split `value` into plain and quoted spans, flagged `true` when quoted.
///
/// A quoted span ends as [`find_end`] ends a quoted token, so an unterminated
/// quote runs to the end of the value.
fn segments(value: &str) -> Vec<(bool, &str)> {
    let mut spans = Vec::new();
    let mut rest = value;
    while let Some(start) = rest.find(STRING_MARKER) {
        if start > 0 {
            spans.push((false, &rest[..start]));
        }
        let quoted = &rest[start..];
        let end = find_end(quoted);
        spans.push((true, &quoted[..end]));
        rest = &quoted[end..];
    }
    if !rest.is_empty() {
        spans.push((false, rest));
    }
    spans
}

fn list_continues(parent: &Node) -> bool {
    parent.last_child().is_some_and(Node::is_leaf)
}

/// Create `name` under `parent` holding the first token of `value`.
fn parse_simple_value<'a>(name: &str, value: &'a str, parent: &mut Node) -> DomainResult<&'a str> {
    let mut property = Node::create(name)?;
    let end = find_end(value);
    if end > 0 {
        property.add_child(Node::create(&value[..end])?);
    }
    parent.add_child(property);
    Ok(value[end..].trim())
}
