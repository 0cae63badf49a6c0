//! File-level services
//!
//! `DocumentService` owns decoding and parsing; the record services build on
//! it. All of them reach the disk only through `FileSystem`.

mod document;
mod localisation;
mod mod_descriptor;
mod opinion_modifier;

pub use document::DocumentService;
pub use localisation::LocalisationService;
pub use mod_descriptor::{LoadedMod, ModService, DESCRIPTOR_EXTENSION, OPINION_MODIFIERS_DIR};
pub use opinion_modifier::OpinionModifierService;
