use potpourri_core::db::values::Timestamp;
use potpourri_core::model::*;
use sea_orm_migration::prelude::*;

use crate::{index, unique_index};

#[derive(DeriveMigrationName)]
pub struct Migration;

fn timestamp_col<C: IntoIden + 'static>(col: C) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .default(Timestamp::now_expr())
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(song::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(song::Column::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(song::Column::Name).text())
                    .col(ColumnDef::new(song::Column::Artist).text())
                    .col(ColumnDef::new(song::Column::Link).text().not_null())
                    .col(ColumnDef::new(song::Column::Lyrics).text())
                    .col(
                        ColumnDef::new(song::Column::ScrollSpeed)
                            .double()
                            .not_null()
                            .default(song::DEFAULT_SCROLL_SPEED),
                    )
                    .col(
                        ColumnDef::new(song::Column::SearchKey)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(timestamp_col(song::Column::CreatedAt))
                    .col(timestamp_col(song::Column::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(unique_index!(song::Entity, song::Column::Link))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(playlist::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(playlist::Column::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(playlist::Column::Name).text().not_null())
                    .col(
                        ColumnDef::new(playlist::Column::SearchKey)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(timestamp_col(playlist::Column::CreatedAt))
                    .col(timestamp_col(playlist::Column::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(rel_playlist_song::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(rel_playlist_song::Column::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(rel_playlist_song::Column::PlaylistId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(rel_playlist_song::Column::SongId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(rel_playlist_song::Column::PlayOrder)
                            .big_integer()
                            .not_null(),
                    )
                    .col(timestamp_col(rel_playlist_song::Column::CreatedAt))
                    .col(timestamp_col(rel_playlist_song::Column::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_musicas_potpourri_potpourri")
                            .from(rel_playlist_song::Entity, rel_playlist_song::Column::PlaylistId)
                            .to(playlist::Entity, playlist::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_musicas_potpourri_musicas")
                            .from(rel_playlist_song::Entity, rel_playlist_song::Column::SongId)
                            .to(song::Entity, song::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(index!(
                rel_playlist_song::Entity,
                rel_playlist_song::Column::PlaylistId,
                rel_playlist_song::Column::PlayOrder
            ))
            .await?;

        manager
            .create_index(index!(
                rel_playlist_song::Entity,
                rel_playlist_song::Column::SongId
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(rel_playlist_song::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(playlist::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(song::Entity).to_owned())
            .await?;
        Ok(())
    }
}
