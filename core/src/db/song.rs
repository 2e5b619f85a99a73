use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};
use serde_json::Value;

use super::{
    is_unique_violation, key_contains, search_key,
    page::{fetch_page, Page, PageParams},
    values::Timestamp,
};
use crate::error::{self, Error, Result};
use crate::json::{text_field, TextField};
use crate::lyrics::{parse_title, LyricsSource};
use crate::model::{rel_playlist_song, song};

pub const DUPLICATE_LINK: &str = "Música já existe no banco de dados";

const UPDATE_KEYS: [&str; 5] = ["nome", "artista", "link_musica", "cifra", "velocidade_rolamento"];

/// Every mutable column of a song.
#[derive(Debug, Clone, PartialEq)]
pub struct SongFields {
    pub name: Option<String>,
    pub artist: Option<String>,
    pub link: String,
    pub lyrics: Option<String>,
    pub scroll_speed: f64,
}

impl SongFields {
    /// Full field set of an update body, every key must be present.
    pub fn from_json(body: &Value) -> Result<Self> {
        if let Some(key) = UPDATE_KEYS.iter().find(|k| body.get(**k).is_none()) {
            return Err(Error::MissingField(format!("{} é obrigatório", key)));
        }
        Ok(Self {
            name: optional_text(body, "nome")?,
            artist: optional_text(body, "artista")?,
            link: link_from_json(body)?,
            lyrics: optional_text(body, "cifra")?,
            scroll_speed: match body.get("velocidade_rolamento") {
                None | Some(Value::Null) => song::DEFAULT_SCROLL_SPEED,
                Some(v) => v.as_f64().filter(|v| v.is_finite()).ok_or_else(|| {
                    Error::Validation("velocidade_rolamento deve ser um número".to_string())
                })?,
            },
        })
    }
}

fn optional_text(body: &Value, key: &str) -> Result<Option<String>> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(Error::Validation(format!("{} deve ser um texto", key))),
    }
}

/// `link_musica` of a request body, trimmed.
pub fn link_from_json(body: &Value) -> Result<String> {
    match text_field(body.get("link_musica")) {
        TextField::Value(s) => Ok(s.trim().to_string()),
        TextField::Missing => Err(Error::MissingField(
            "link_musica é obrigatório".to_string(),
        )),
        TextField::Invalid => Err(Error::Validation(
            "link_musica deve ser um texto".to_string(),
        )),
    }
}

fn map_write_err(e: DbErr) -> Error {
    if is_unique_violation(&e) {
        Error::Duplicate(DUPLICATE_LINK.to_string())
    } else {
        e.into()
    }
}

pub async fn find_by_link<C: ConnectionTrait>(conn: &C, link: &str) -> Result<Option<song::Model>> {
    Ok(song::Entity::find()
        .filter(song::Column::Link.eq(link))
        .one(conn)
        .await?)
}

pub async fn create<C: ConnectionTrait>(conn: &C, fields: SongFields) -> Result<song::Model> {
    if find_by_link(conn, &fields.link).await?.is_some() {
        return Err(Error::Duplicate(DUPLICATE_LINK.to_string()));
    }
    let now = Timestamp::now();
    let key = search_key([fields.name.as_deref(), fields.artist.as_deref()]);
    song::ActiveModel {
        id: NotSet,
        search_key: Set(key),
        name: Set(fields.name),
        artist: Set(fields.artist),
        link: Set(fields.link),
        lyrics: Set(fields.lyrics),
        scroll_speed: Set(fields.scroll_speed),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
    .map_err(map_write_err)
}

/// Scrape `link` and store the song found there.
pub async fn import<C: ConnectionTrait>(
    conn: &C,
    source: &dyn LyricsSource,
    link: &str,
) -> Result<song::Model> {
    let link = link.trim();
    if link.is_empty() {
        return Err(Error::MissingField("link_musica é obrigatório".to_string()));
    }
    if find_by_link(conn, link).await?.is_some() {
        return Err(Error::Duplicate(DUPLICATE_LINK.to_string()));
    }

    let lyrics = match source.fetch(link).await {
        Ok(Some(lyrics)) => lyrics,
        Ok(None) => {
            log::warn!(target: "lyrics", "no lyrics block at {}", link);
            return Err(Error::LyricsNotFound);
        }
        Err(e) => {
            log::warn!(target: "lyrics", "fetch {} failed: {}", link, e);
            return Err(Error::LyricsNotFound);
        }
    };

    let (name, artist) = parse_title(&lyrics.title);
    create(
        conn,
        SongFields {
            name,
            artist,
            link: link.to_string(),
            lyrics: Some(lyrics.text),
            scroll_speed: song::DEFAULT_SCROLL_SPEED,
        },
    )
    .await
}

pub async fn get<C: ConnectionTrait>(conn: &C, id: i64) -> Result<song::Model> {
    song::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(Error::NotFound(error::Entity::Song))
}

pub async fn list<C: ConnectionTrait>(conn: &C, params: PageParams) -> Result<Page<song::Model>> {
    let select = song::Entity::find().order_by_asc(song::Column::Id);
    Ok(fetch_page(conn, select, params).await?)
}

/// Substring match on name or artist, case folded on both sides.
pub async fn search<C: ConnectionTrait>(
    conn: &C,
    term: &str,
    params: PageParams,
) -> Result<Page<song::Model>> {
    let select = song::Entity::find()
        .filter(key_contains(song::Column::SearchKey, term))
        .order_by_asc(song::Column::Id);
    Ok(fetch_page(conn, select, params).await?)
}

pub async fn update<C: ConnectionTrait>(
    conn: &C,
    id: i64,
    fields: SongFields,
) -> Result<song::Model> {
    let current = get(conn, id).await?;
    if current.link != fields.link {
        if let Some(other) = find_by_link(conn, &fields.link).await? {
            if other.id != id {
                return Err(Error::Duplicate(DUPLICATE_LINK.to_string()));
            }
        }
    }

    let mut model: song::ActiveModel = current.into();
    model.search_key = Set(search_key([fields.name.as_deref(), fields.artist.as_deref()]));
    model.name = Set(fields.name);
    model.artist = Set(fields.artist);
    model.link = Set(fields.link);
    model.lyrics = Set(fields.lyrics);
    model.scroll_speed = Set(fields.scroll_speed);
    model.updated_at = Set(Timestamp::now());
    model.update(conn).await.map_err(map_write_err)
}

/// Removes the song and every playlist entry pointing at it.
pub async fn delete<C>(db: &C, id: i64) -> Result<()>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;
    get(&txn, id).await?;

    let removed = rel_playlist_song::Entity::delete_many()
        .filter(rel_playlist_song::Column::SongId.eq(id))
        .exec(&txn)
        .await?;
    song::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    log::debug!("song {} deleted with {} playlist entries", id, removed.rows_affected);
    Ok(())
}

pub async fn count<C: ConnectionTrait>(conn: &C) -> Result<u64> {
    Ok(song::Entity::find().count(conn).await?)
}
