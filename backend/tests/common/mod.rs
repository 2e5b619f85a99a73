#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use migration::{Migrator, MigratorTrait};
use potpourri_backend::BackendContext;
use potpourri_core::db::{self, song::SongFields};
use potpourri_core::lyrics::{Lyrics, LyricsSource};
use potpourri_core::model::song;
use potpourri_core::Result;
use sea_orm::DatabaseConnection;

pub const CHUVA: &str = "https://www.cifraclub.com.br/beth-carvalho/agua-de-chuva-no-mar/";
pub const BROKEN: &str = "https://www.cifraclub.com.br/broken/";

/// Serves canned pages, unknown urls have no lyrics block.
#[derive(Default)]
pub struct StubLyrics {
    pages: HashMap<String, Lyrics>,
}

impl StubLyrics {
    pub fn with_page(mut self, url: &str, title: &str, text: &str) -> Self {
        self.pages.insert(
            url.to_string(),
            Lyrics {
                title: title.to_string(),
                text: text.to_string(),
            },
        );
        self
    }
}

#[async_trait]
impl LyricsSource for StubLyrics {
    async fn fetch(&self, url: &str) -> Result<Option<Lyrics>> {
        Ok(self.pages.get(url).cloned())
    }
}

pub fn stub() -> StubLyrics {
    StubLyrics::default().with_page(
        CHUVA,
        "Agua de Chuva No Mar - Beth Carvalho - Cifra Club",
        "[Intro] C G\nAm F",
    )
}

pub async fn memory_db() -> DatabaseConnection {
    let db = db::connect("sqlite::memory:", 1).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub async fn context() -> Arc<BackendContext> {
    BackendContext::new(memory_db().await, Arc::new(stub()))
}

pub async fn seed_song(db: &DatabaseConnection, link: &str, name: &str, artist: &str) -> song::Model {
    db::song::create(
        db,
        SongFields {
            name: Some(name.to_string()),
            artist: Some(artist.to_string()),
            link: link.to_string(),
            lyrics: Some("C G Am F".to_string()),
            scroll_speed: song::DEFAULT_SCROLL_SPEED,
        },
    )
    .await
    .unwrap()
}

/// Three songs with ids 1, 2 and 3.
pub async fn seed_songs(db: &DatabaseConnection) -> Vec<song::Model> {
    vec![
        seed_song(db, "https://x/1", "Trem das Onze", "Adoniran Barbosa").await,
        seed_song(db, "https://x/2", "Saudosa Maloca", "Adoniran Barbosa").await,
        seed_song(db, "https://x/3", "Coisinha do Pai", "Beth Carvalho").await,
    ]
}
