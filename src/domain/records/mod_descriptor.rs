//! Mod descriptor (`<mod>.mod`) record.

use std::path::{Path, PathBuf};

use crate::domain::attribute::{AttributeField, AttributeMap, AttributeValue, Record, ValueKind};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::Node;
use crate::domain::syntax::STRING_MARKER;

/// Top-level attributes of a mod descriptor, in writing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModField {
    Name,
    Path,
    UserDir,
    Archive,
    ReplacePath,
    Picture,
    Tags,
    Dependencies,
}

impl AttributeField for ModField {
    const ALL: &'static [Self] = &[
        ModField::Name,
        ModField::Path,
        ModField::UserDir,
        ModField::Archive,
        ModField::ReplacePath,
        ModField::Picture,
        ModField::Tags,
        ModField::Dependencies,
    ];

    fn name(self) -> &'static str {
        match self {
            ModField::Name => "name",
            ModField::Path => "path",
            ModField::UserDir => "user_dir",
            ModField::Archive => "archive",
            ModField::ReplacePath => "replace_path",
            ModField::Picture => "picture",
            ModField::Tags => "tags",
            ModField::Dependencies => "dependencies",
        }
    }

    fn kind(self) -> ValueKind {
        match self {
            ModField::Tags | ModField::Dependencies => ValueKind::List,
            _ => ValueKind::String,
        }
    }
}

/// Description of a mod as found in the game's `mod` directory.
///
/// String values are stored as written, quotes included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModDescriptor {
    pub name: Option<String>,
    pub path: Option<String>,
    pub user_dir: Option<String>,
    pub archive: Option<String>,
    pub replace_paths: Vec<String>,
    pub picture: Option<String>,
    pub tags: Vec<String>,
    pub dependencies: Vec<String>,
}

impl ModDescriptor {
    /// Map the top-level children of a parsed descriptor.
    pub fn from_node(map: &AttributeMap<ModField>, root: &Node) -> DomainResult<Self> {
        let mut descriptor = Self::default();
        descriptor.read_from(map, root)?;
        Ok(descriptor)
    }

    /// Build the tree to write, after validating required fields.
    pub fn to_node(&self) -> DomainResult<Node> {
        self.validate()?;
        let mut root = Node::create_root();
        self.write_into(&mut root)?;
        Ok(root)
    }

    /// `name` and `path` must be present and not blank.
    pub fn validate(&self) -> DomainResult<()> {
        let name = match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => {
                return Err(DomainError::Validation(
                    "Cannot save mod. Name is required.".to_string(),
                ))
            }
        };
        if self.path.as_deref().map_or(true, |p| p.trim().is_empty()) {
            return Err(DomainError::Validation(format!(
                "Cannot save mod {}. Path is required.",
                name
            )));
        }
        Ok(())
    }

    /// Name without surrounding quotes, for display.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().map(unquote)
    }

    /// Directory holding the mod's content.
    ///
    /// `path` is relative to the directory above the one holding the
    /// descriptor, i.e. the game's user directory.
    pub fn content_dir(&self, descriptor_file: &Path) -> Option<PathBuf> {
        let path = self.path.as_deref()?;
        let base = descriptor_file.parent()?.parent()?;
        Some(base.join(unquote(path)))
    }
}

impl Record for ModDescriptor {
    type Field = ModField;

    fn apply(&mut self, field: ModField, value: AttributeValue) -> DomainResult<()> {
        let key = field.name();
        match field {
            ModField::Name => self.name = Some(value.into_string(key)?),
            ModField::Path => self.path = Some(value.into_string(key)?),
            ModField::UserDir => self.user_dir = Some(value.into_string(key)?),
            ModField::Archive => self.archive = Some(value.into_string(key)?),
            ModField::ReplacePath => self.replace_paths.push(value.into_string(key)?),
            ModField::Picture => self.picture = Some(value.into_string(key)?),
            ModField::Tags => self.tags = value.into_list(key)?,
            ModField::Dependencies => self.dependencies = value.into_list(key)?,
        }
        Ok(())
    }

    fn attributes(&self) -> Vec<(ModField, AttributeValue)> {
        let string = |field: ModField, value: &Option<String>| {
            value.clone().map(|v| (field, AttributeValue::Str(v)))
        };

        let mut attributes: Vec<_> = [
            string(ModField::Name, &self.name),
            string(ModField::Path, &self.path),
            string(ModField::UserDir, &self.user_dir),
            string(ModField::Archive, &self.archive),
        ]
        .into_iter()
        .flatten()
        .collect();
        attributes.extend(
            self.replace_paths
                .iter()
                .map(|p| (ModField::ReplacePath, AttributeValue::Str(p.clone()))),
        );
        attributes.extend(string(ModField::Picture, &self.picture));
        attributes.push((ModField::Tags, AttributeValue::List(self.tags.clone())));
        attributes.push((
            ModField::Dependencies,
            AttributeValue::List(self.dependencies.clone()),
        ));
        attributes
    }
}

fn unquote(value: &str) -> &str {
    value.trim_matches(STRING_MARKER)
}
