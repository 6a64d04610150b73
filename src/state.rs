use std::sync::Arc;

use crate::config::{AppConfig, StoreBackend};
use crate::database::{DatabaseError, DatabaseManager, MemoryNoteStore, NoteStore, PgNoteStore};
use crate::notes::NotesService;

/// Everything a request handler may touch. Built once at startup and never mutated.
#[derive(Clone)]
pub struct AppState {
    pub notes: NotesService,
    pub jwt_secret: Arc<str>,
    /// Where the note routes are mounted ("" for the root)
    pub base_path: Arc<str>,
}

impl AppState {
    /// Wire `store` with the secret, update rules and mount point from `config`
    pub fn new(store: Arc<dyn NoteStore>, config: &AppConfig) -> Self {
        Self {
            notes: NotesService::new(store).with_update_validation(config.api.validate_updates),
            jwt_secret: config.security.jwt_secret.as_str().into(),
            base_path: config.api.base_path.as_str().into(),
        }
    }

    /// Open the configured store, then build the state around it
    pub async fn from_config(config: &AppConfig) -> Result<Self, DatabaseError> {
        let store: Arc<dyn NoteStore> = match config.database.backend {
            StoreBackend::Postgres => {
                let pool = DatabaseManager::connect(&config.database).await?;
                Arc::new(PgNoteStore::new(pool))
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory note store; notes are lost on restart");
                Arc::new(MemoryNoteStore::new())
            }
        };

        Ok(Self::new(store, config))
    }
}
