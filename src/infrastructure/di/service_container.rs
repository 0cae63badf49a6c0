//! Builds every service once per process from the effective settings

use std::sync::Arc;

use crate::application::services::{
    DocumentService, LocalisationService, ModService, OpinionModifierService,
};
use crate::config::Settings;
use crate::domain::{AttributeMap, Parser};
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding all application services.
///
/// Attribute maps are built once here and shared by the services that
/// read records.
pub struct ServiceContainer {
    pub settings: Arc<Settings>,
    pub fs: Arc<dyn FileSystem>,

    pub documents: Arc<DocumentService>,
    pub opinion_modifiers: Arc<OpinionModifierService>,
    pub mods: ModService,
    pub localisation: LocalisationService,
}

impl ServiceContainer {
    /// Services backed by the real filesystem.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Services backed by `fs`.
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);

        let parser = Parser::new(settings.parse_options());
        let documents = Arc::new(DocumentService::new(fs.clone(), parser));
        let opinion_modifiers = Arc::new(OpinionModifierService::new(
            documents.clone(),
            Arc::new(AttributeMap::new()),
        ));
        let mods = ModService::new(
            fs.clone(),
            documents.clone(),
            opinion_modifiers.clone(),
            Arc::new(AttributeMap::new()),
        );
        let localisation = LocalisationService::new(documents.clone());

        Self {
            settings,
            fs,
            documents,
            opinion_modifiers,
            mods,
            localisation,
        }
    }
}
