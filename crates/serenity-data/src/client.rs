// SerenityData: the root handle that wires every service from one options
// struct.

use std::sync::Arc;

use serenity_core::error::DataResult;
use serenity_core::options::SerenityOptions;
use serenity_core::store::adapter::StoreAdapter;

use crate::services::{
    CatalogService, MessageService, MoodService, ProfileService, ProgressService, ServiceConfig,
    SessionService,
};

/// Root handle over all data services.
///
/// Construct once with the store backend, then hand out per-entity
/// services. Every service shares the same `Arc<dyn StoreAdapter>`, so a
/// single backend connection serves the whole layer.
#[derive(Debug)]
pub struct SerenityData {
    profiles: ProfileService,
    sessions: SessionService,
    moods: MoodService,
    catalog: CatalogService,
    messages: MessageService,
    progress: ProgressService,
}

impl SerenityData {
    /// Build with default options.
    pub fn new(store: Arc<dyn StoreAdapter>) -> Self {
        Self::build(store, &SerenityOptions::default())
    }

    /// Build with explicit options. Incoherent options are rejected with
    /// `DataError::Config` before any service exists.
    pub fn with_options(
        store: Arc<dyn StoreAdapter>,
        options: SerenityOptions,
    ) -> DataResult<Self> {
        options.validate()?;
        Ok(Self::build(store, &options))
    }

    fn build(store: Arc<dyn StoreAdapter>, options: &SerenityOptions) -> Self {
        let config = ServiceConfig::from_options(options);
        Self {
            profiles: ProfileService::with_config(store.clone(), config.clone()),
            sessions: SessionService::with_config(store.clone(), config.clone()),
            moods: MoodService::with_config(store.clone(), config.clone(), options.moods.clone()),
            catalog: CatalogService::with_config(store.clone(), config.clone()),
            messages: MessageService::with_config(store.clone(), config.clone()),
            progress: ProgressService::with_config(store, config),
        }
    }

    pub fn profiles(&self) -> &ProfileService {
        &self.profiles
    }

    pub fn sessions(&self) -> &SessionService {
        &self.sessions
    }

    pub fn moods(&self) -> &MoodService {
        &self.moods
    }

    pub fn catalog(&self) -> &CatalogService {
        &self.catalog
    }

    pub fn messages(&self) -> &MessageService {
        &self.messages
    }

    pub fn progress(&self) -> &ProgressService {
        &self.progress
    }
}
