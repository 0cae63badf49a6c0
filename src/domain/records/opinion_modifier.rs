//! Opinion modifier files (`common/opinion_modifiers/*.txt`).
//!
//! Every top-level block is one modifier:
//!
//! ```text
//! opinion_traitor = {
//!     opinion = -50
//!     months = 120
//!     revoke_reason = yes
//! }
//! ```

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::attribute::{AttributeField, AttributeMap, AttributeValue, Record, ValueKind};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpinionField {
    Opinion,
    Months,
    PrisonReason,
    BanishReason,
    ExecuteReason,
    RevokeReason,
    DivorceReason,
    Inherit,
    Enemy,
    Crime,
}

impl AttributeField for OpinionField {
    const ALL: &'static [Self] = &[
        OpinionField::Opinion,
        OpinionField::Months,
        OpinionField::PrisonReason,
        OpinionField::BanishReason,
        OpinionField::ExecuteReason,
        OpinionField::RevokeReason,
        OpinionField::DivorceReason,
        OpinionField::Inherit,
        OpinionField::Enemy,
        OpinionField::Crime,
    ];

    fn name(self) -> &'static str {
        match self {
            OpinionField::Opinion => "opinion",
            OpinionField::Months => "months",
            OpinionField::PrisonReason => "prison_reason",
            OpinionField::BanishReason => "banish_reason",
            OpinionField::ExecuteReason => "execute_reason",
            OpinionField::RevokeReason => "revoke_reason",
            OpinionField::DivorceReason => "divorce_reason",
            OpinionField::Inherit => "inherit",
            OpinionField::Enemy => "enemy",
            OpinionField::Crime => "crime",
        }
    }

    fn kind(self) -> ValueKind {
        match self {
            OpinionField::Opinion | OpinionField::Months => ValueKind::Integer,
            _ => ValueKind::Boolean,
        }
    }
}

/// A named change of opinion between characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpinionModifier {
    name: String,
    pub opinion: i64,
    /// `months`; `None` means the modifier does not expire.
    pub duration: Option<i64>,
    pub prison_reason: bool,
    pub banish_reason: bool,
    pub execute_reason: bool,
    pub revoke_reason: bool,
    pub divorce_reason: bool,
    pub inherit: bool,
    pub enemy: bool,
    pub crime: bool,
}

impl OpinionModifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of the reason flags that are set.
    pub fn flags(&self) -> Vec<&'static str> {
        self.attributes()
            .into_iter()
            .filter(|(_, value)| *value == AttributeValue::Bool(true))
            .map(|(field, _)| field.name())
            .collect()
    }
}

impl Record for OpinionModifier {
    type Field = OpinionField;

    fn apply(&mut self, field: OpinionField, value: AttributeValue) -> DomainResult<()> {
        let key = field.name();
        match field {
            OpinionField::Opinion => self.opinion = value.into_int(key)?,
            OpinionField::Months => self.duration = Some(value.into_int(key)?),
            OpinionField::PrisonReason => self.prison_reason = value.into_bool(key)?,
            OpinionField::BanishReason => self.banish_reason = value.into_bool(key)?,
            OpinionField::ExecuteReason => self.execute_reason = value.into_bool(key)?,
            OpinionField::RevokeReason => self.revoke_reason = value.into_bool(key)?,
            OpinionField::DivorceReason => self.divorce_reason = value.into_bool(key)?,
            OpinionField::Inherit => self.inherit = value.into_bool(key)?,
            OpinionField::Enemy => self.enemy = value.into_bool(key)?,
            OpinionField::Crime => self.crime = value.into_bool(key)?,
        }
        Ok(())
    }

    fn attributes(&self) -> Vec<(OpinionField, AttributeValue)> {
        let mut attributes = vec![(OpinionField::Opinion, AttributeValue::Int(self.opinion))];
        if let Some(months) = self.duration {
            attributes.push((OpinionField::Months, AttributeValue::Int(months)));
        }
        attributes.extend(
            [
                (OpinionField::PrisonReason, self.prison_reason),
                (OpinionField::BanishReason, self.banish_reason),
                (OpinionField::ExecuteReason, self.execute_reason),
                (OpinionField::RevokeReason, self.revoke_reason),
                (OpinionField::DivorceReason, self.divorce_reason),
                (OpinionField::Inherit, self.inherit),
                (OpinionField::Enemy, self.enemy),
                (OpinionField::Crime, self.crime),
            ]
            .into_iter()
            .map(|(field, flag)| (field, AttributeValue::Bool(flag))),
        );
        attributes
    }
}

/// All modifiers of one file, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpinionModifierFile {
    path: PathBuf,
    modifiers: Vec<OpinionModifier>,
}

impl OpinionModifierFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            modifiers: Vec::new(),
        }
    }

    /// Map each top-level block of a parsed file onto a modifier.
    pub fn from_node(
        path: impl Into<PathBuf>,
        map: &AttributeMap<OpinionField>,
        root: &Node,
    ) -> DomainResult<Self> {
        let mut file = Self::new(path);
        for block in root.children() {
            let mut modifier = OpinionModifier::new(block.name());
            modifier.read_from(map, block)?;
            file.add(modifier);
        }
        debug!("Read {} opinion modifiers from {}", file.modifiers.len(), file.name());
        Ok(file)
    }

    /// Build the tree to write. A file without modifiers is rejected.
    pub fn to_node(&self) -> DomainResult<Node> {
        if self.modifiers.is_empty() {
            return Err(DomainError::Validation(format!(
                "Cannot save opinion modifier file '{}': no opinion modifiers defined.",
                self.name()
            )));
        }
        let mut root = Node::create_root();
        for modifier in &self.modifiers {
            let mut block = Node::create(modifier.name())?;
            modifier.write_into(&mut block)?;
            root.add_child(block);
        }
        Ok(root)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without directories.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    pub fn modifiers(&self) -> &[OpinionModifier] {
        &self.modifiers
    }

    pub fn add(&mut self, modifier: OpinionModifier) {
        self.modifiers.push(modifier);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(name: &str, pairs: &[(&str, &str)]) -> Node {
        let mut node = Node::create(name).unwrap();
        for (k, v) in pairs {
            node.add_pair(*k, *v).unwrap();
        }
        node
    }

    #[test]
    fn given_blocks_when_reading_then_maps_each_modifier() {
        let map = AttributeMap::new();
        let root = Node::create_root()
            .with_child(block(
                "opinion_traitor",
                &[("opinion", "-50"), ("months", "120"), ("revoke_reason", "yes"), ("crime", "no")],
            ))
            .with_child(block("opinion_friend", &[("opinion", "25"), ("unknown", "x")]));

        let file = OpinionModifierFile::from_node("mods/00_test.txt", &map, &root).unwrap();

        assert_eq!(file.name(), "00_test.txt");
        let [traitor, friend] = file.modifiers() else {
            panic!("expected two modifiers");
        };
        assert_eq!(traitor.name(), "opinion_traitor");
        assert_eq!(traitor.opinion, -50);
        assert_eq!(traitor.duration, Some(120));
        assert!(traitor.revoke_reason);
        assert!(!traitor.crime);
        assert_eq!(friend.duration, None);
        assert!(friend.flags().is_empty());
    }

    #[test]
    fn given_non_numeric_opinion_when_reading_then_format_error() {
        let map = AttributeMap::new();
        let root = Node::create_root().with_child(block("bad", &[("opinion", "lots")]));
        let err = OpinionModifierFile::from_node("x.txt", &map, &root).unwrap_err();
        assert!(matches!(err, DomainError::Format { .. }));
    }

    #[test]
    fn given_modifier_when_writing_then_omits_unset_values() {
        let mut file = OpinionModifierFile::new("out.txt");
        let mut modifier = OpinionModifier::new("opinion_test");
        modifier.opinion = 0;
        modifier.enemy = true;
        file.add(modifier);

        let text = file.to_node().unwrap().to_text();

        assert_eq!(
            text,
            "opinion_test = {\r\n\topinion = 0\r\n\tenemy = yes\r\n}\r\n"
        );
    }

    #[test]
    fn given_zero_duration_when_writing_then_months_is_kept() {
        let mut modifier = OpinionModifier::new("m");
        modifier.duration = Some(0);
        let mut node = Node::create("m").unwrap();
        modifier.write_into(&mut node).unwrap();
        assert_eq!(node.children()[1].name(), "months");
        assert_eq!(node.children()[1].first_value(), Some("0"));
    }

    #[test]
    fn given_no_modifiers_when_writing_then_validation_error() {
        let err = OpinionModifierFile::new("empty.txt").to_node().unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref m) if m.contains("empty.txt")));
    }

    #[test]
    fn given_modifier_then_flags_lists_set_reasons() {
        let mut modifier = OpinionModifier::new("m");
        modifier.prison_reason = true;
        modifier.inherit = true;
        assert_eq!(modifier.flags(), vec!["prison_reason", "inherit"]);
    }
}
