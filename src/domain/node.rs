//! Generic labelled tree produced by the parser and consumed by record mappers.

use std::fmt;

use itertools::Itertools;
use tracing::{trace, warn};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::syntax::{self, INDENTATION, NEW_LINE};

/// A node consists of a name and an ordered list of child nodes.
///
/// Exactly one node per tree is the root. It carries a sentinel name and is
/// never printed itself; only its children are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    name: String,
    children: Vec<Node>,
    root: bool,
}

impl Node {
    /// Sentinel name of the root node.
    pub const ROOT_NAME: &'static str = "[ROOT]";

    /// Create the root of a new tree.
    pub fn create_root() -> Self {
        Self {
            name: Self::ROOT_NAME.to_string(),
            children: Vec::new(),
            root: true,
        }
    }

    /// Create a regular node.
    ///
    /// Fails if the trimmed name is empty or one of `= { } # "`.
    pub fn create(name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() || syntax::is_restricted(&name) {
            return Err(DomainError::InvalidName(name));
        }
        Ok(Self {
            name,
            children: Vec::new(),
            root: false,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Children in insertion order; empty for leaves.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn last_child(&self) -> Option<&Node> {
        self.children.last()
    }

    pub(crate) fn last_child_mut(&mut self) -> Option<&mut Node> {
        self.children.last_mut()
    }

    /// Name of the first child, i.e. the value of a `name = value` pair.
    pub fn first_value(&self) -> Option<&str> {
        self.children.first().map(Node::name)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.root
    }

    /// Exactly one leaf child: printed as `name = value`.
    pub fn is_simple_value(&self) -> bool {
        self.children.len() == 1 && self.children[0].is_leaf()
    }

    /// Two or more children, all leaves: printed as `name = { a b c }`.
    pub fn is_list(&self) -> bool {
        self.children.len() > 1 && self.children.iter().all(Node::is_leaf)
    }

    /// Append a child node.
    pub fn add_child(&mut self, child: Node) -> &mut Self {
        trace!(parent = %self.name, child = %child.name, "add_child");
        self.children.push(child);
        self
    }

    /// Append a new leaf with the given name.
    pub fn add_child_named(&mut self, name: impl Into<String>) -> DomainResult<&mut Self> {
        let child = Node::create(name)?;
        Ok(self.add_child(child))
    }

    /// Consuming variant of [`Node::add_child`] for building trees in one expression.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Append `name` holding a single leaf `value`.
    ///
    /// The value is printed as is. A value containing spaces must carry its
    /// own double quotes, otherwise it reads back as a list of its words.
    pub fn add_pair(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> DomainResult<&mut Self> {
        let pair = Node::create(name)?.with_child(Node::create(value)?);
        Ok(self.add_child(pair))
    }

    /// Append `name` holding one leaf per value.
    ///
    /// An empty list adds nothing.
    pub fn add_list<I, S>(&mut self, name: impl Into<String>, values: I) -> DomainResult<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Node::create(name)?;
        for value in values {
            list.add_child(Node::create(value)?);
        }
        if list.is_leaf() {
            warn!(
                "Tried to add empty list of values with property name '{}' to node '{}'",
                list.name, self.name
            );
            return Ok(self);
        }
        Ok(self.add_child(list))
    }

    /// Print this node and its descendants in the source format.
    ///
    /// Every emitted line is prefixed by one tab per indentation level and
    /// terminated by CRLF.
    pub fn print(&self, indentations: usize) -> String {
        let mut out = String::new();
        self.print_into(&mut out, indentations);
        out
    }

    fn print_into(&self, out: &mut String, indentations: usize) {
        indent(out, indentations);
        out.push_str(&self.name);

        if self.is_leaf() {
            out.push_str(NEW_LINE);
        } else if self.is_simple_value() {
            out.push_str(" = ");
            out.push_str(&self.children[0].name);
            out.push_str(NEW_LINE);
        } else if self.is_list() {
            out.push_str(" = { ");
            out.push_str(&self.children.iter().map(Node::name).join(" "));
            out.push_str(" }");
            out.push_str(NEW_LINE);
        } else {
            out.push_str(" = {");
            out.push_str(NEW_LINE);
            for child in &self.children {
                child.print_into(out, indentations + 1);
            }
            indent(out, indentations);
            out.push(syntax::NESTING_END);
            out.push_str(NEW_LINE);
        }
    }

    /// Text form of a whole tree.
    ///
    /// The root contributes only its children; a leaf root renders as its
    /// sentinel name. Any other node renders as `print(0)`.
    pub fn to_text(&self) -> String {
        if !self.root {
            return self.print(0);
        }
        if self.is_leaf() {
            return self.name.clone();
        }
        let mut out = String::new();
        for child in &self.children {
            child.print_into(&mut out, 0);
        }
        out
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

fn indent(out: &mut String, indentations: usize) {
    for _ in 0..indentations {
        out.push_str(INDENTATION);
    }
}
