use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use serde_json::Value;

use super::{
    key_contains,
    page::{fetch_page, Page, PageParams},
    search_key,
    values::Timestamp,
};
use crate::error::{self, Error, Result};
use crate::json::{text_field, TextField};
use crate::model::{playlist, rel_playlist_song};

pub const NAME_REQUIRED: &str = "Nome do potpourri é obrigatório";

/// `nome_potpourri` of a request body, `None` when absent or blank.
pub fn name_from_json(body: &Value) -> Result<Option<String>> {
    match text_field(body.get("nome_potpourri")) {
        TextField::Value(s) => Ok(Some(s.trim().to_string())),
        TextField::Missing => Ok(None),
        TextField::Invalid => Err(Error::Validation(
            "nome_potpourri deve ser um texto".to_string(),
        )),
    }
}

pub fn require_name(name: Option<String>) -> Result<String> {
    name.filter(|s| !s.trim().is_empty())
        .ok_or_else(|| Error::MissingField(NAME_REQUIRED.to_string()))
}

pub async fn create<C: ConnectionTrait>(conn: &C, name: &str) -> Result<playlist::Model> {
    let name = require_name(Some(name.to_string()))?;
    let now = Timestamp::now();
    let model = playlist::ActiveModel {
        id: NotSet,
        search_key: Set(search_key([Some(name.as_str())])),
        name: Set(name),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await?;
    Ok(model)
}

pub async fn get<C: ConnectionTrait>(conn: &C, id: i64) -> Result<playlist::Model> {
    playlist::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(Error::NotFound(error::Entity::Playlist))
}

pub async fn list<C: ConnectionTrait>(
    conn: &C,
    params: PageParams,
) -> Result<Page<playlist::Model>> {
    let select = playlist::Entity::find().order_by_asc(playlist::Column::Id);
    Ok(fetch_page(conn, select, params).await?)
}

pub async fn search<C: ConnectionTrait>(
    conn: &C,
    term: &str,
    params: PageParams,
) -> Result<Page<playlist::Model>> {
    let select = playlist::Entity::find()
        .filter(key_contains(playlist::Column::SearchKey, term))
        .order_by_asc(playlist::Column::Id);
    Ok(fetch_page(conn, select, params).await?)
}

pub async fn update<C: ConnectionTrait>(
    conn: &C,
    id: i64,
    name: &str,
) -> Result<playlist::Model> {
    let current = get(conn, id).await?;
    let name = require_name(Some(name.to_string()))?;
    rename(conn, current, name).await
}

/// Writes a new name and refreshes `updated_at`.
pub(crate) async fn rename<C: ConnectionTrait>(
    conn: &C,
    current: playlist::Model,
    name: String,
) -> Result<playlist::Model> {
    let mut model: playlist::ActiveModel = current.into();
    model.search_key = Set(search_key([Some(name.as_str())]));
    model.name = Set(name);
    model.updated_at = Set(Timestamp::now());
    Ok(model.update(conn).await?)
}

/// Removes the playlist with all of its entries.
pub async fn delete<C>(db: &C, id: i64) -> Result<()>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;
    get(&txn, id).await?;

    let removed = rel_playlist_song::Entity::delete_many()
        .filter(rel_playlist_song::Column::PlaylistId.eq(id))
        .exec(&txn)
        .await?;
    playlist::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    log::debug!("playlist {} deleted with {} entries", id, removed.rows_affected);
    Ok(())
}
