use std::sync::Arc;

use potpourri_core::compose::PlaylistLocks;
use potpourri_core::lyrics::LyricsSource;
use sea_orm::DatabaseConnection;

/// Shared state of every request handler.
pub struct BackendContext {
    pub db: DatabaseConnection,
    pub lyrics: Arc<dyn LyricsSource>,
    pub locks: PlaylistLocks,
}

impl BackendContext {
    pub fn new(db: DatabaseConnection, lyrics: Arc<dyn LyricsSource>) -> Arc<Self> {
        Arc::new(Self {
            db,
            lyrics,
            locks: PlaylistLocks::new(),
        })
    }
}
