//! Shared application state
//!
//! One instance is built at startup and shared across all connection
//! tasks behind an `Arc`. Everything inside is immutable after
//! construction.

use crate::config::Config;
use crate::db::MessageStore;
use crate::search::SearchClient;
use tera::Tera;

pub struct AppState {
    pub config: Config,
    pub store: MessageStore,
    pub templates: Tera,
    pub search: SearchClient,
}

impl AppState {
    pub fn new(config: Config, store: MessageStore, templates: Tera, search: SearchClient) -> Self {
        Self {
            config,
            store,
            templates,
            search,
        }
    }
}
