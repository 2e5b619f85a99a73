use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use serde_json::Value;

use super::{
    page::{fetch_page, Page, PageParams},
    playlist as playlist_store,
    values::Timestamp,
};
use crate::error::{self, Error, Result};
use crate::json::{int_field, IntField};
use crate::model::{rel_playlist_song, song};

/// Playlist entry as submitted on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewMembership {
    pub playlist_id: i64,
    pub song_id: i64,
    pub play_order: i64,
}

fn required_int(body: &Value, key: &str, missing: &str) -> Result<i64> {
    match int_field(body.get(key)) {
        IntField::Value(v) => Ok(v),
        IntField::Missing => Err(Error::MissingField(missing.to_string())),
        IntField::Invalid => Err(Error::Validation(format!(
            "{} deve ser um número inteiro",
            key
        ))),
    }
}

impl NewMembership {
    pub fn from_json(body: &Value) -> Result<Self> {
        Ok(Self {
            playlist_id: required_int(body, "potpourri_id", "ID do potpourri é obrigatório")?,
            song_id: required_int(body, "musica_id", "ID da música é obrigatório")?,
            play_order: required_int(body, "ordem_tocagem", "Ordem de tocagem é obrigatória")?,
        })
    }
}

pub(crate) async fn ensure_song<C: ConnectionTrait>(conn: &C, song_id: i64) -> Result<()> {
    let found = song::Entity::find_by_id(song_id)
        .select_only()
        .column(song::Column::Id)
        .into_tuple::<i64>()
        .one(conn)
        .await?;
    match found {
        Some(_) => Ok(()),
        None => Err(Error::SongNotFound(song_id)),
    }
}

pub(crate) async fn insert<C: ConnectionTrait>(
    conn: &C,
    m: NewMembership,
) -> Result<rel_playlist_song::Model> {
    let now = Timestamp::now();
    let model = rel_playlist_song::ActiveModel {
        id: NotSet,
        playlist_id: Set(m.playlist_id),
        song_id: Set(m.song_id),
        play_order: Set(m.play_order),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await?;
    Ok(model)
}

pub async fn create<C: ConnectionTrait>(
    conn: &C,
    m: NewMembership,
) -> Result<rel_playlist_song::Model> {
    playlist_store::get(conn, m.playlist_id).await?;
    ensure_song(conn, m.song_id).await?;
    insert(conn, m).await
}

pub async fn get<C: ConnectionTrait>(conn: &C, id: i64) -> Result<rel_playlist_song::Model> {
    rel_playlist_song::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(Error::NotFound(error::Entity::Membership))
}

pub async fn list<C: ConnectionTrait>(
    conn: &C,
    params: PageParams,
) -> Result<Page<rel_playlist_song::Model>> {
    let select = rel_playlist_song::Entity::find().order_by_asc(rel_playlist_song::Column::Id);
    Ok(fetch_page(conn, select, params).await?)
}

/// Entries of one playlist in play order.
pub async fn list_by_playlist<C: ConnectionTrait>(
    conn: &C,
    playlist_id: i64,
    params: PageParams,
) -> Result<Page<rel_playlist_song::Model>> {
    playlist_store::get(conn, playlist_id).await?;
    let select = rel_playlist_song::Entity::find()
        .filter(rel_playlist_song::Column::PlaylistId.eq(playlist_id))
        .order_by_asc(rel_playlist_song::Column::PlayOrder)
        .order_by_asc(rel_playlist_song::Column::Id);
    Ok(fetch_page(conn, select, params).await?)
}

pub async fn update<C: ConnectionTrait>(
    conn: &C,
    id: i64,
    m: NewMembership,
) -> Result<rel_playlist_song::Model> {
    let current = get(conn, id).await?;
    ensure_song(conn, m.song_id).await?;
    playlist_store::get(conn, m.playlist_id).await?;

    let mut model: rel_playlist_song::ActiveModel = current.into();
    model.playlist_id = Set(m.playlist_id);
    model.song_id = Set(m.song_id);
    model.play_order = Set(m.play_order);
    model.updated_at = Set(Timestamp::now());
    Ok(model.update(conn).await?)
}

pub async fn delete<C: ConnectionTrait>(conn: &C, id: i64) -> Result<()> {
    get(conn, id).await?;
    rel_playlist_song::Entity::delete_by_id(id).exec(conn).await?;
    Ok(())
}
