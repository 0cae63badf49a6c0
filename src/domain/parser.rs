//! Line-oriented structural parser.
//!
//! Reads the text line by line, recursing into nested blocks, and assembles a
//! [`Node`] tree below a synthetic root. Values on a line are handed to the
//! [`ValueSplitter`].

use std::str::Lines;

use tracing::{debug, error, instrument, warn};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::Node;
use crate::domain::syntax::{NESTING_END, NESTING_START};
use crate::domain::value::{brace_balance, split_values, strip_comment, ValueSplitter};

/// Switches for input the grammar leaves undefined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Reject blocks still open at end of input and stray closing braces at
    /// top level instead of accepting them silently.
    pub strict_blocks: bool,
}

/// Outcome of reading one unit of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Closed,
    Eof,
}

/// Line source with a 1-based counter of lines read so far.
struct Cursor<'a> {
    lines: Lines<'a>,
    line_number: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            lines: input.lines(),
            line_number: 0,
        }
    }

    fn next_line(&mut self) -> Option<&'a str> {
        let line = self.lines.next()?;
        self.line_number += 1;
        Some(line)
    }
}

/// A parser accepts the text of one file and produces a tree of values.
#[derive(Debug, Default, Clone)]
pub struct Parser {
    splitter: ValueSplitter,
    options: ParseOptions,
}

impl Parser {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            splitter: ValueSplitter::new(),
            options,
        }
    }

    /// Parse a whole document.
    ///
    /// Empty input yields a leaf root. Errors carry the line they occurred on.
    #[instrument(level = "debug", skip_all, fields(len = input.len()))]
    pub fn parse_str(&self, input: &str) -> DomainResult<Node> {
        let mut cursor = Cursor::new(input);
        let mut root = Node::create_root();

        match self.parse_nested(&mut cursor, &mut root, 0) {
            Ok(_) => {
                debug!("Finished parsing on line {}", cursor.line_number);
                Ok(root)
            }
            Err(e) => {
                error!("Exception on line #{}: {}", cursor.line_number, e);
                Err(e.at_line(cursor.line_number))
            }
        }
    }

    /// Read lines into `parent` until its block is closed or input ends.
    fn parse_nested(&self, cursor: &mut Cursor<'_>, parent: &mut Node, depth: usize) -> DomainResult<Step> {
        loop {
            match self.parse_next_line(cursor, parent, depth)? {
                Step::Continue => {}
                Step::Closed if depth == 0 => {
                    if self.options.strict_blocks {
                        return Err(DomainError::Structure(
                            "closing brace without an open block".to_string(),
                        ));
                    }
                    warn!("Ignoring stray closing brace on line {}", cursor.line_number);
                }
                Step::Closed => return Ok(Step::Continue),
                Step::Eof => {
                    if depth > 0 && self.options.strict_blocks {
                        return Err(DomainError::Structure(format!(
                            "block '{}' not closed before end of input",
                            parent.name()
                        )));
                    }
                    return Ok(Step::Eof);
                }
            }
        }
    }

    fn parse_next_line(&self, cursor: &mut Cursor<'_>, parent: &mut Node, depth: usize) -> DomainResult<Step> {
        let Some(raw) = cursor.next_line() else {
            return Ok(Step::Eof);
        };
        let line = strip_comment(raw).trim();

        if line.is_empty() {
            return Ok(Step::Continue);
        }
        if line.starts_with(NESTING_END) {
            return Ok(Step::Closed);
        }
        if line.starts_with(NESTING_START) {
            // the block belongs to the preceding property
            let target = parent.last_child_mut().ok_or_else(|| {
                DomainError::Structure("block opened without a preceding property".to_string())
            })?;
            return self.parse_value(cursor, target, line, depth + 1);
        }

        match split_values(line) {
            (_, None) => {
                let unparsed = self.splitter.parse_list_value(line, parent)?;
                if unparsed.starts_with(NESTING_END) {
                    Ok(Step::Closed)
                } else {
                    Ok(Step::Continue)
                }
            }
            (name, Some(value)) => {
                let mut property = Node::create(name.trim())?;
                let value = value.trim();
                let step = if value.is_empty() {
                    Step::Continue
                } else {
                    self.parse_value(cursor, &mut property, value, depth + 1)?
                };
                parent.add_child(property);
                Ok(step)
            }
        }
    }

    /// Fill `node` from `value` and follow any block the value leaves open.
    ///
    /// Returns `Closed` when the value closes more blocks than it opens, which
    /// ends the block enclosing `node`.
    fn parse_value(
        &self,
        cursor: &mut Cursor<'_>,
        node: &mut Node,
        value: &str,
        depth: usize,
    ) -> DomainResult<Step> {
        self.splitter.parse(value, node, cursor.line_number)?;

        let balance = brace_balance(value);
        if balance > 0 {
            self.open_blocks(cursor, node, balance.unsigned_abs(), depth)
        } else if balance < 0 {
            Ok(Step::Closed)
        } else {
            Ok(Step::Continue)
        }
    }

    /// Parse `levels` blocks opened on one line, innermost first.
    ///
    /// The inner blocks belong to the chain of last children below `node`.
    fn open_blocks(
        &self,
        cursor: &mut Cursor<'_>,
        node: &mut Node,
        levels: usize,
        depth: usize,
    ) -> DomainResult<Step> {
        if levels > 1 {
            if let Some(child) = node.last_child_mut() {
                if self.open_blocks(cursor, child, levels - 1, depth + 1)? == Step::Eof {
                    return self.parse_nested(cursor, node, depth);
                }
            }
        }
        match self.parse_nested(cursor, node, depth)? {
            Step::Eof => Ok(Step::Eof),
            _ => Ok(Step::Continue),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Node {
        Parser::default().parse_str(input).unwrap()
    }

    fn names(node: &Node) -> Vec<&str> {
        node.children().iter().map(Node::name).collect()
    }

    #[test]
    fn given_empty_input_when_parsing_then_root_is_leaf() {
        let root = parse("");
        assert!(root.is_root());
        assert!(root.is_leaf());
    }

    #[test]
    fn given_only_comments_when_parsing_then_root_is_leaf() {
        assert!(parse("# first\n   # second\n").is_leaf());
    }

    #[test]
    fn given_pair_with_trailing_comment_when_parsing_then_ignores_comment() {
        let root = parse("simple = value # comment\n");
        assert_eq!(root.children()[0].name(), "simple");
        assert_eq!(root.children()[0].first_value(), Some("value"));
    }

    #[test]
    fn given_empty_value_when_parsing_then_property_is_leaf() {
        let root = parse("property =\nother = x\n");
        assert_eq!(names(&root), vec!["property", "other"]);
        assert!(root.children()[0].is_leaf());
    }

    #[test]
    fn given_block_opened_on_next_line_when_parsing_then_attaches_to_previous_property() {
        let root = parse("list =\n{\n\ta b c\n}\nother = x\n");
        assert_eq!(names(&root), vec!["list", "other"]);
        assert_eq!(names(&root.children()[0]), vec!["a", "b", "c"]);
    }

    #[test]
    fn given_complete_block_on_next_line_when_parsing_then_closes_it_on_same_line() {
        let root = parse("list =\n{ a b c }\nother = x\n");
        assert_eq!(names(&root), vec!["list", "other"]);
        assert_eq!(names(&root.children()[0]), vec!["a", "b", "c"]);
    }

    #[test]
    fn given_block_start_without_property_when_parsing_then_fails_with_line() {
        let err = Parser::default().parse_str("\n{\n}\n").unwrap_err();
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn given_list_ending_on_same_line_when_parsing_then_closes_block() {
        let root = parse("list = {\n\ta b c }\nother = x\n");
        assert_eq!(names(&root), vec!["list", "other"]);
        assert_eq!(names(&root.children()[0]), vec!["a", "b", "c"]);
    }

    #[test]
    fn given_inline_block_left_open_when_parsing_then_following_lines_belong_to_it() {
        let root = parse("list = { a b\n\tc d\n}\nother = x\n");
        assert_eq!(names(&root), vec!["list", "other"]);
        assert_eq!(names(&root.children()[0]), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn given_pair_closing_block_when_parsing_then_next_line_is_sibling() {
        let root = parse("outer = {\n\tinner = x }\nnext = y\n");
        assert_eq!(names(&root), vec!["outer", "next"]);
        assert_eq!(names(&root.children()[0]), vec!["inner"]);
    }

    #[test]
    fn given_two_blocks_opened_on_one_line_when_parsing_then_nests_both() {
        let root = parse("a = { b = {\n\tc = d\n}\ne = f\n}\n");
        let a = &root.children()[0];
        assert_eq!(names(a), vec!["b", "e"]);
        assert_eq!(names(&a.children()[0]), vec!["c"]);
    }

    #[test]
    fn given_unterminated_block_when_lenient_then_accepts() {
        let root = parse("outer = {\n\tinner = x\n");
        assert_eq!(names(&root.children()[0]), vec!["inner"]);
    }

    #[test]
    fn given_unterminated_block_when_strict_then_fails() {
        let parser = Parser::new(ParseOptions {
            strict_blocks: true,
        });
        let err = parser.parse_str("outer = {\n\tinner = x\n").unwrap_err();
        assert!(matches!(
            err,
            DomainError::AtLine { line: 2, ref source } if matches!(**source, DomainError::Structure(_))
        ));
    }

    #[test]
    fn given_stray_closing_brace_when_lenient_then_keeps_parsing() {
        let root = parse("a = 1\n}\nb = 2\n");
        assert_eq!(names(&root), vec!["a", "b"]);
    }

    #[test]
    fn given_stray_closing_brace_when_strict_then_fails() {
        let parser = Parser::new(ParseOptions {
            strict_blocks: true,
        });
        assert_eq!(parser.parse_str("a = 1\n}\n").unwrap_err().line(), Some(2));
    }

    #[test]
    fn given_reserved_name_when_parsing_then_error_carries_line_number() {
        let err = Parser::default().parse_str("a = 1\nb = 2\n\" = 3\n").unwrap_err();
        assert_eq!(
            err,
            DomainError::AtLine {
                line: 3,
                source: Box::new(DomainError::InvalidName("\"".to_string())),
            }
        );
    }

    #[test]
    fn given_crlf_input_when_parsing_then_strips_carriage_returns() {
        let root = parse("a = 1\r\nb = { x y }\r\n");
        assert_eq!(root.children()[0].first_value(), Some("1"));
        assert_eq!(names(&root.children()[1]), vec!["x", "y"]);
    }

    #[test]
    fn given_quoted_braces_when_parsing_then_block_structure_is_kept() {
        let root = parse("desc = \"a { b\"\nblock = {\n\ttitle = \"x }\"\n\tinner = 1\n}\nafter = 2\n");
        assert_eq!(names(&root), vec!["desc", "block", "after"]);
        assert_eq!(names(&root.children()[1]), vec!["title", "inner"]);
    }
}
