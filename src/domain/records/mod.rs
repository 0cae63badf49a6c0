//! Typed records built on the tree and their file codecs.

pub mod localisation;
pub mod mod_descriptor;
pub mod opinion_modifier;

pub use localisation::{Language, Localisation, LocalisationFile};
pub use mod_descriptor::{ModDescriptor, ModField};
pub use opinion_modifier::{OpinionField, OpinionModifier, OpinionModifierFile};
