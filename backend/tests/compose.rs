mod common;

use potpourri_core::compose::{
    create_playlist_with_songs, replace_playlist_songs, Composition, PlaylistLocks, SongEntry,
};
use potpourri_core::db::{page::PageParams, playlist as playlist_store, playlist_song};
use potpourri_core::error::{Entity, Error};
use potpourri_core::model::{playlist, rel_playlist_song};
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait};

use common::{memory_db, seed_songs};

fn entries(pairs: &[(i64, i64)]) -> Vec<SongEntry> {
    pairs
        .iter()
        .map(|&(song_id, play_order)| SongEntry {
            song_id,
            play_order,
        })
        .collect()
}

async fn counts(db: &DatabaseConnection) -> (u64, u64) {
    (
        playlist::Entity::find().count(db).await.unwrap(),
        rel_playlist_song::Entity::find().count(db).await.unwrap(),
    )
}

async fn pairs_of(db: &DatabaseConnection, playlist_id: i64) -> Vec<(i64, i64)> {
    playlist_song::list_by_playlist(db, playlist_id, PageParams::new(1, 100))
        .await
        .unwrap()
        .items
        .iter()
        .map(|m| (m.song_id, m.play_order))
        .collect()
}

/// Makes every entry insert with `play_order` 99 abort inside SQLite.
async fn reject_order_99(db: &DatabaseConnection) {
    db.execute_unprepared(
        "CREATE TRIGGER reject_order_99 BEFORE INSERT ON musicas_potpourri \
         WHEN NEW.play_order = 99 BEGIN SELECT RAISE(ABORT, 'ordem rejeitada'); END",
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn creates_playlist_with_entries() {
    let db = memory_db().await;
    let songs = seed_songs(&db).await;

    let composed = create_playlist_with_songs(
        &db,
        Composition::new(
            Some("Mix1".to_string()),
            entries(&[(songs[0].id, 1), (songs[1].id, 2)]),
        ),
    )
    .await
    .unwrap();

    assert_eq!(composed.playlist.name, "Mix1");
    assert_eq!(composed.total, 2);
    assert_eq!(composed.memberships.len(), 2);
    for (m, (song_id, order)) in composed
        .memberships
        .iter()
        .zip([(songs[0].id, 1), (songs[1].id, 2)])
    {
        assert_eq!(m.playlist_id, composed.playlist.id);
        assert_eq!(m.song_id, song_id);
        assert_eq!(m.play_order, order);
    }
    assert_eq!(counts(&db).await, (1, 2));

    let json = serde_json::to_value(&composed).unwrap();
    assert_eq!(json["total_musicas"], 2);
    assert_eq!(json["potpourri"]["nome_potpourri"], "Mix1");
    assert_eq!(json["musicas_potpourri"][1]["ordem_tocagem"], 2);
}

#[tokio::test]
async fn duplicate_orders_leave_nothing() {
    let db = memory_db().await;
    let songs = seed_songs(&db).await;

    let r = create_playlist_with_songs(
        &db,
        Composition::new(
            Some("Mix2".to_string()),
            entries(&[(songs[0].id, 1), (songs[1].id, 1)]),
        ),
    )
    .await;
    assert!(matches!(r, Err(Error::DuplicateOrder)));
    assert_eq!(counts(&db).await, (0, 0));
}

#[tokio::test]
async fn unknown_song_rolls_back() {
    let db = memory_db().await;
    let songs = seed_songs(&db).await;

    let r = create_playlist_with_songs(
        &db,
        Composition::new(
            Some("Mix3".to_string()),
            entries(&[(songs[0].id, 1), (999, 2), (998, 3)]),
        ),
    )
    .await;
    assert!(matches!(r, Err(Error::SongNotFound(998))));
    assert_eq!(counts(&db).await, (0, 0));
}

#[tokio::test]
async fn failed_entry_insert_rolls_back_playlist() {
    let db = memory_db().await;
    let songs = seed_songs(&db).await;
    reject_order_99(&db).await;

    let r = create_playlist_with_songs(
        &db,
        Composition::new(
            Some("Mix4".to_string()),
            entries(&[(songs[0].id, 1), (songs[1].id, 99)]),
        ),
    )
    .await;
    assert!(matches!(r, Err(Error::Db(_))));
    assert_eq!(counts(&db).await, (0, 0));

    create_playlist_with_songs(
        &db,
        Composition::new(Some("Mix4".to_string()), entries(&[(songs[0].id, 1)])),
    )
    .await
    .unwrap();
    assert_eq!(counts(&db).await, (1, 1));
}

#[tokio::test]
async fn create_requires_name_and_songs() {
    let db = memory_db().await;
    let songs = seed_songs(&db).await;

    let r = create_playlist_with_songs(
        &db,
        Composition::new(Some(" ".to_string()), entries(&[(songs[0].id, 1)])),
    )
    .await;
    assert!(matches!(r, Err(Error::MissingField(_))));

    let r = create_playlist_with_songs(&db, Composition::new(Some("A".to_string()), Vec::new())).await;
    assert!(matches!(r, Err(Error::InvalidList(_))));
    assert_eq!(counts(&db).await, (0, 0));
}

#[tokio::test]
async fn replace_swaps_entries() {
    let db = memory_db().await;
    let songs = seed_songs(&db).await;
    let locks = PlaylistLocks::new();

    let created = create_playlist_with_songs(
        &db,
        Composition::new(
            Some("Mix1".to_string()),
            entries(&[(songs[0].id, 1), (songs[1].id, 2)]),
        ),
    )
    .await
    .unwrap();
    let id = created.playlist.id;

    let replaced = replace_playlist_songs(
        &db,
        &locks,
        id,
        Composition::new(None, entries(&[(songs[2].id, 1), (songs[0].id, 2)])),
    )
    .await
    .unwrap();
    assert_eq!(replaced.playlist.name, "Mix1");
    assert_eq!(replaced.total, 2);
    assert_eq!(pairs_of(&db, id).await, vec![(songs[2].id, 1), (songs[0].id, 2)]);

    let renamed = replace_playlist_songs(
        &db,
        &locks,
        id,
        Composition::new(Some("Mix Novo".to_string()), entries(&[(songs[1].id, 5)])),
    )
    .await
    .unwrap();
    assert_eq!(renamed.playlist.name, "Mix Novo");
    assert_eq!(playlist_store::get(&db, id).await.unwrap().name, "Mix Novo");
    assert_eq!(pairs_of(&db, id).await, vec![(songs[1].id, 5)]);
    assert_eq!(counts(&db).await, (1, 1));
}

#[tokio::test]
async fn failed_replace_keeps_previous_entries() {
    let db = memory_db().await;
    let songs = seed_songs(&db).await;
    let locks = PlaylistLocks::new();

    let id = create_playlist_with_songs(
        &db,
        Composition::new(Some("Mix1".to_string()), entries(&[(songs[0].id, 1)])),
    )
    .await
    .unwrap()
    .playlist
    .id;

    let r = replace_playlist_songs(
        &db,
        &locks,
        id,
        Composition::new(Some("Outro".to_string()), entries(&[(songs[1].id, 1), (404, 2)])),
    )
    .await;
    assert!(matches!(r, Err(Error::SongNotFound(404))));
    assert_eq!(pairs_of(&db, id).await, vec![(songs[0].id, 1)]);
    assert_eq!(playlist_store::get(&db, id).await.unwrap().name, "Mix1");

    let r = replace_playlist_songs(
        &db,
        &locks,
        id,
        Composition::new(None, entries(&[(songs[1].id, 1), (songs[2].id, 1)])),
    )
    .await;
    assert!(matches!(r, Err(Error::DuplicateOrder)));
    assert_eq!(pairs_of(&db, id).await, vec![(songs[0].id, 1)]);
}

#[tokio::test]
async fn failed_entry_insert_restores_replaced_entries() {
    let db = memory_db().await;
    let songs = seed_songs(&db).await;
    let locks = PlaylistLocks::new();

    let id = create_playlist_with_songs(
        &db,
        Composition::new(
            Some("Antes".to_string()),
            entries(&[(songs[0].id, 1), (songs[1].id, 2)]),
        ),
    )
    .await
    .unwrap()
    .playlist
    .id;
    reject_order_99(&db).await;

    let r = replace_playlist_songs(
        &db,
        &locks,
        id,
        Composition::new(
            Some("Depois".to_string()),
            entries(&[(songs[2].id, 1), (songs[0].id, 99)]),
        ),
    )
    .await;
    assert!(matches!(r, Err(Error::Db(_))));
    assert_eq!(playlist_store::get(&db, id).await.unwrap().name, "Antes");
    assert_eq!(pairs_of(&db, id).await, vec![(songs[0].id, 1), (songs[1].id, 2)]);
    assert_eq!(counts(&db).await, (1, 2));
    assert!(locks.is_empty());
}

#[tokio::test]
async fn replace_locates_playlist_first() {
    let db = memory_db().await;
    let locks = PlaylistLocks::new();

    let r = replace_playlist_songs(
        &db,
        &locks,
        42,
        Composition::new(None, entries(&[(1, 1), (2, 1)])),
    )
    .await;
    assert!(matches!(r, Err(Error::NotFound(Entity::Playlist))));
}

#[tokio::test]
async fn concurrent_replaces_do_not_interleave() {
    let db = memory_db().await;
    let songs = seed_songs(&db).await;
    let locks = PlaylistLocks::new();

    let id = create_playlist_with_songs(
        &db,
        Composition::new(Some("Mix".to_string()), entries(&[(songs[0].id, 1)])),
    )
    .await
    .unwrap()
    .playlist
    .id;

    let a = entries(&[(songs[1].id, 1), (songs[2].id, 2)]);
    let b = entries(&[(songs[2].id, 1), (songs[0].id, 2), (songs[1].id, 3)]);
    let (ra, rb) = tokio::join!(
        replace_playlist_songs(&db, &locks, id, Composition::new(None, a.clone())),
        replace_playlist_songs(&db, &locks, id, Composition::new(None, b.clone())),
    );
    ra.unwrap();
    rb.unwrap();

    let stored = pairs_of(&db, id).await;
    let as_pairs = |e: &[SongEntry]| -> Vec<(i64, i64)> {
        e.iter().map(|e| (e.song_id, e.play_order)).collect()
    };
    assert!(stored == as_pairs(&a) || stored == as_pairs(&b));
    assert!(locks.is_empty());
}
