//! Whole-list playlist writes.
//!
//! Both workflows stage every row inside one transaction and commit at the
//! end. Returning early on any error drops the transaction, which rolls it
//! back, so a failed call never leaves a playlist without its songs.

mod lock;
mod validate;

pub use lock::PlaylistLocks;
pub use validate::{Composition, SongEntry};

use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, QueryFilter, QuerySelect,
    TransactionTrait,
};
use serde::Serialize;

use crate::db::{playlist as playlist_store, playlist_song as membership_store};
use crate::error::{Error, Result};
use crate::model::{playlist, rel_playlist_song, song};

#[derive(Debug, Clone, Serialize)]
pub struct ComposedPlaylist {
    #[serde(rename = "potpourri")]
    pub playlist: playlist::Model,
    #[serde(rename = "musicas_potpourri")]
    pub memberships: Vec<rel_playlist_song::Model>,
    #[serde(rename = "total_musicas")]
    pub total: usize,
}

/// Fails with the smallest id that has no song row.
async fn ensure_songs_exist(txn: &DatabaseTransaction, composition: &Composition) -> Result<()> {
    let wanted = composition.song_ids();
    let found: Vec<i64> = song::Entity::find()
        .select_only()
        .column(song::Column::Id)
        .filter(song::Column::Id.is_in(wanted.iter().copied()))
        .into_tuple()
        .all(txn)
        .await?;
    match wanted.into_iter().find(|id| !found.contains(id)) {
        Some(id) => Err(Error::SongNotFound(id)),
        None => Ok(()),
    }
}

async fn insert_entries(
    txn: &DatabaseTransaction,
    playlist_id: i64,
    entries: &[SongEntry],
) -> Result<Vec<rel_playlist_song::Model>> {
    let mut out = Vec::with_capacity(entries.len());
    for e in entries {
        let m = membership_store::insert(
            txn,
            membership_store::NewMembership {
                playlist_id,
                song_id: e.song_id,
                play_order: e.play_order,
            },
        )
        .await?;
        out.push(m);
    }
    Ok(out)
}

/// Creates a playlist and all of its entries atomically.
pub async fn create_playlist_with_songs<C>(db: &C, composition: Composition) -> Result<ComposedPlaylist>
where
    C: ConnectionTrait + TransactionTrait,
{
    let name = playlist_store::require_name(composition.name.clone())?;
    composition.validate()?;

    let txn = db.begin().await?;
    ensure_songs_exist(&txn, &composition).await?;

    let playlist = playlist_store::create(&txn, &name).await?;
    let memberships = insert_entries(&txn, playlist.id, &composition.entries).await?;
    txn.commit().await?;

    log::info!(
        "playlist {} '{}' created with {} songs",
        playlist.id,
        playlist.name,
        memberships.len()
    );
    Ok(ComposedPlaylist {
        total: memberships.len(),
        playlist,
        memberships,
    })
}

/// Swaps the full song list of an existing playlist, renaming it when a
/// name is given.
///
/// Calls for the same playlist are serialized through `locks`.
pub async fn replace_playlist_songs<C>(
    db: &C,
    locks: &PlaylistLocks,
    playlist_id: i64,
    composition: Composition,
) -> Result<ComposedPlaylist>
where
    C: ConnectionTrait + TransactionTrait,
{
    let _guard = locks.lock(playlist_id).await;

    let txn = db.begin().await?;
    let current = playlist_store::get(&txn, playlist_id).await?;
    composition.validate()?;
    ensure_songs_exist(&txn, &composition).await?;

    let playlist = match composition.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => {
            playlist_store::rename(&txn, current, name.to_string()).await?
        }
        _ => current,
    };

    let removed = rel_playlist_song::Entity::delete_many()
        .filter(rel_playlist_song::Column::PlaylistId.eq(playlist_id))
        .exec(&txn)
        .await?;
    let memberships = insert_entries(&txn, playlist_id, &composition.entries).await?;
    txn.commit().await?;

    log::info!(
        "playlist {} songs replaced: {} removed, {} added",
        playlist_id,
        removed.rows_affected,
        memberships.len()
    );
    Ok(ComposedPlaylist {
        total: memberships.len(),
        playlist,
        memberships,
    })
}
