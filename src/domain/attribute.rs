//! Projection of parsed trees onto typed records and back.
//!
//! Each record type names its recognised attributes through a field enum
//! implementing [`AttributeField`]. An [`AttributeMap`] built once from that
//! enum resolves child names to fields; values are extracted into
//! [`AttributeValue`]s and handed to the record's [`Record::apply`].
//! Writing goes the other way through [`Record::attributes`].

use std::collections::HashMap;
use std::fmt;

use rayon::prelude::*;
use tracing::trace;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::Node;
use crate::domain::syntax::YES;

/// Declared type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    String,
    Integer,
    Boolean,
    List,
}

/// A value taken from, or destined for, a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    Str(String),
    Int(i64),
    Bool(bool),
    List(Vec<String>),
}

impl AttributeValue {
    /// Convert the children of `node` according to `kind`.
    ///
    /// Strings keep surrounding quotes. Integers are base 10. Only `yes` is
    /// true. Lists take every child name in order.
    pub fn from_node(kind: ValueKind, node: &Node) -> DomainResult<Self> {
        let value = match kind {
            ValueKind::String => AttributeValue::Str(required_value(node)?.to_string()),
            ValueKind::Integer => {
                let raw = required_value(node)?;
                let parsed = raw.parse::<i64>().map_err(|e| DomainError::Format {
                    name: node.name().to_string(),
                    value: raw.to_string(),
                    reason: e.to_string(),
                })?;
                AttributeValue::Int(parsed)
            }
            ValueKind::Boolean => AttributeValue::Bool(node.first_value() == Some(YES)),
            ValueKind::List => AttributeValue::List(
                node.children()
                    .iter()
                    .map(|child| child.name().to_string())
                    .collect(),
            ),
        };
        Ok(value)
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            AttributeValue::Str(_) => ValueKind::String,
            AttributeValue::Int(_) => ValueKind::Integer,
            AttributeValue::Bool(_) => ValueKind::Boolean,
            AttributeValue::List(_) => ValueKind::List,
        }
    }

    pub fn into_string(self, field: &str) -> DomainResult<String> {
        match self {
            AttributeValue::Str(s) => Ok(s),
            other => Err(other.mismatch(field, ValueKind::String)),
        }
    }

    pub fn into_int(self, field: &str) -> DomainResult<i64> {
        match self {
            AttributeValue::Int(i) => Ok(i),
            other => Err(other.mismatch(field, ValueKind::Integer)),
        }
    }

    pub fn into_bool(self, field: &str) -> DomainResult<bool> {
        match self {
            AttributeValue::Bool(b) => Ok(b),
            other => Err(other.mismatch(field, ValueKind::Boolean)),
        }
    }

    pub fn into_list(self, field: &str) -> DomainResult<Vec<String>> {
        match self {
            AttributeValue::List(l) => Ok(l),
            other => Err(other.mismatch(field, ValueKind::List)),
        }
    }

    fn mismatch(&self, field: &str, expected: ValueKind) -> DomainError {
        DomainError::Format {
            name: field.to_string(),
            value: self.to_string(),
            reason: format!("expected {:?} but got {:?}", expected, self.kind()),
        }
    }

    /// Add this value below `parent` unless it is a default.
    ///
    /// `false` and empty lists are never written.
    pub fn write_to(&self, parent: &mut Node, name: &str) -> DomainResult<()> {
        match self {
            AttributeValue::Str(s) => {
                parent.add_pair(name, s.as_str())?;
            }
            AttributeValue::Int(i) => {
                parent.add_pair(name, i.to_string())?;
            }
            AttributeValue::Bool(true) => {
                parent.add_pair(name, YES)?;
            }
            AttributeValue::Bool(false) => {
                trace!("Skipping negative boolean for {}", name);
            }
            AttributeValue::List(values) if values.is_empty() => {
                trace!("Skipping empty list for {}", name);
            }
            AttributeValue::List(values) => {
                parent.add_list(name, values.iter().map(String::as_str))?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Str(s) => f.write_str(s),
            AttributeValue::Int(i) => write!(f, "{}", i),
            AttributeValue::Bool(true) => f.write_str(YES),
            AttributeValue::Bool(false) => f.write_str("no"),
            AttributeValue::List(values) => write!(f, "{{ {} }}", values.join(" ")),
        }
    }
}

fn required_value(node: &Node) -> DomainResult<&str> {
    node.first_value().ok_or_else(|| DomainError::Format {
        name: node.name().to_string(),
        value: String::new(),
        reason: "value is missing".to_string(),
    })
}

/// A recognised attribute of some record type.
pub trait AttributeField: Copy + Send + Sync + 'static {
    /// Every field of the record, in writing order.
    const ALL: &'static [Self];

    /// Name of the node carrying this attribute.
    fn name(self) -> &'static str;

    fn kind(self) -> ValueKind;
}

/// Immutable lookup from node name to field, built once per record type.
#[derive(Debug, Clone)]
pub struct AttributeMap<F> {
    fields: HashMap<&'static str, F>,
}

impl<F: AttributeField> AttributeMap<F> {
    pub fn new() -> Self {
        Self {
            fields: F::ALL.iter().map(|f| (f.name(), *f)).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<F> {
        self.fields.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Extract the values of all recognised children of `node`.
    ///
    /// Children are converted in parallel; the result keeps child order.
    /// Unknown names are skipped.
    pub fn project(&self, node: &Node) -> DomainResult<Vec<(F, AttributeValue)>> {
        node.children()
            .par_iter()
            .filter_map(|child| self.get(child.name()).map(|field| (field, child)))
            .map(|(field, child)| AttributeValue::from_node(field.kind(), child).map(|v| (field, v)))
            .collect()
    }
}

impl<F: AttributeField> Default for AttributeMap<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// A typed record readable from and writable to a node's children.
pub trait Record {
    type Field: AttributeField;

    /// Store one extracted value. Repeated fields may accumulate.
    fn apply(&mut self, field: Self::Field, value: AttributeValue) -> DomainResult<()>;

    /// Values to write, in writing order. Absent values are left out.
    fn attributes(&self) -> Vec<(Self::Field, AttributeValue)>;

    /// Fill this record from the children of `node`.
    fn read_from(&mut self, map: &AttributeMap<Self::Field>, node: &Node) -> DomainResult<()> {
        for (field, value) in map.project(node)? {
            self.apply(field, value)?;
        }
        Ok(())
    }

    /// Append this record's attributes to `node`.
    fn write_into(&self, node: &mut Node) -> DomainResult<()> {
        for (field, value) in self.attributes() {
            value.write_to(node, field.name())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Probe {
        Label,
        Count,
        Active,
        Items,
    }

    impl AttributeField for Probe {
        const ALL: &'static [Self] = &[Probe::Label, Probe::Count, Probe::Active, Probe::Items];

        fn name(self) -> &'static str {
            match self {
                Probe::Label => "label",
                Probe::Count => "count",
                Probe::Active => "active",
                Probe::Items => "items",
            }
        }

        fn kind(self) -> ValueKind {
            match self {
                Probe::Label => ValueKind::String,
                Probe::Count => ValueKind::Integer,
                Probe::Active => ValueKind::Boolean,
                Probe::Items => ValueKind::List,
            }
        }
    }

    fn pair(name: &str, value: &str) -> Node {
        Node::create(name)
            .unwrap()
            .with_child(Node::create(value).unwrap())
    }

    #[rstest]
    #[case("yes", true)]
    #[case("no", false)]
    #[case("YES", false)]
    #[case("1", false)]
    fn given_token_when_reading_boolean_then_only_yes_is_true(#[case] token: &str, #[case] expected: bool) {
        let value = AttributeValue::from_node(ValueKind::Boolean, &pair("flag", token)).unwrap();
        assert_eq!(value, AttributeValue::Bool(expected));
    }

    #[test]
    fn given_flag_without_value_when_reading_boolean_then_false() {
        let node = Node::create("flag").unwrap();
        let value = AttributeValue::from_node(ValueKind::Boolean, &node).unwrap();
        assert_eq!(value, AttributeValue::Bool(false));
    }

    #[rstest]
    #[case("42", 42)]
    #[case("-10", -10)]
    #[case("0", 0)]
    fn given_number_when_reading_integer_then_parses_base_10(#[case] token: &str, #[case] expected: i64) {
        let value = AttributeValue::from_node(ValueKind::Integer, &pair("n", token)).unwrap();
        assert_eq!(value, AttributeValue::Int(expected));
    }

    #[test]
    fn given_text_when_reading_integer_then_format_error() {
        let err = AttributeValue::from_node(ValueKind::Integer, &pair("opinion", "many")).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Format { ref name, ref value, .. } if name == "opinion" && value == "many"
        ));
    }

    #[test]
    fn given_missing_value_when_reading_string_then_format_error() {
        let node = Node::create("name").unwrap();
        assert!(matches!(
            AttributeValue::from_node(ValueKind::String, &node),
            Err(DomainError::Format { .. })
        ));
    }

    #[test]
    fn given_quoted_text_when_reading_string_then_keeps_quotes() {
        let value = AttributeValue::from_node(ValueKind::String, &pair("name", "\"My Mod\"")).unwrap();
        assert_eq!(value, AttributeValue::Str("\"My Mod\"".to_string()));
    }

    #[test]
    fn given_list_with_duplicates_when_reading_then_keeps_all_in_order() {
        let node = Node::create("tags")
            .unwrap()
            .with_child(Node::create("b").unwrap())
            .with_child(Node::create("a").unwrap())
            .with_child(Node::create("b").unwrap());
        let value = AttributeValue::from_node(ValueKind::List, &node).unwrap();
        assert_eq!(
            value,
            AttributeValue::List(vec!["b".into(), "a".into(), "b".into()])
        );
    }

    #[test]
    fn given_map_when_projecting_then_skips_unknown_and_keeps_order() {
        let map = AttributeMap::<Probe>::new();
        let mut root = Node::create_root();
        root.add_pair("count", "3")
            .unwrap()
            .add_pair("unknown", "x")
            .unwrap()
            .add_pair("label", "abc")
            .unwrap();

        let projected = map.project(&root).unwrap();

        assert_eq!(
            projected,
            vec![
                (Probe::Count, AttributeValue::Int(3)),
                (Probe::Label, AttributeValue::Str("abc".into())),
            ]
        );
    }

    #[test]
    fn given_map_then_contains_every_field() {
        let map = AttributeMap::<Probe>::new();
        assert_eq!(map.len(), Probe::ALL.len());
        assert_eq!(map.get("items"), Some(Probe::Items));
        assert_eq!(map.get("missing"), None);
    }

    #[test]
    fn given_default_values_when_writing_then_omits_them() {
        let mut node = Node::create_root();
        AttributeValue::Bool(false).write_to(&mut node, "flag").unwrap();
        AttributeValue::List(vec![]).write_to(&mut node, "tags").unwrap();
        assert!(node.is_leaf());

        AttributeValue::Bool(true).write_to(&mut node, "flag").unwrap();
        AttributeValue::Int(-5).write_to(&mut node, "n").unwrap();
        assert_eq!(node.to_text(), "flag = yes\r\nn = -5\r\n");
    }

    #[test]
    fn given_wrong_kind_when_converting_then_format_error() {
        let err = AttributeValue::Int(1).into_string("name").unwrap_err();
        assert!(matches!(err, DomainError::Format { ref name, .. } if name == "name"));
        assert_eq!(AttributeValue::Bool(true).into_bool("b"), Ok(true));
    }
}
