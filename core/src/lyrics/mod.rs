pub mod html;
pub mod title;

use async_trait::async_trait;

use crate::error::Result;
use crate::http::HttpClient;

pub use title::parse_title;

/// Chord page content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lyrics {
    pub title: String,
    pub text: String,
}

#[async_trait]
pub trait LyricsSource: Send + Sync {
    /// `Ok(None)` when the page has no lyrics block.
    async fn fetch(&self, url: &str) -> Result<Option<Lyrics>>;
}

pub struct HttpLyricsSource {
    client: HttpClient,
}

impl HttpLyricsSource {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LyricsSource for HttpLyricsSource {
    async fn fetch(&self, url: &str) -> Result<Option<Lyrics>> {
        log::debug!(target: "lyrics", "GET {}", url);
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(html::extract(&body).map(|(title, text)| Lyrics { title, text }))
    }
}
