use crate::db::values::Timestamp;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "potpourri")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[serde(rename = "nome_potpourri")]
    pub name: String,
    #[serde(skip)]
    pub search_key: String,
    #[sea_orm(default_expr = "Timestamp::now_expr()")]
    pub created_at: Timestamp,
    #[sea_orm(default_expr = "Timestamp::now_expr()")]
    pub updated_at: Timestamp,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::rel_playlist_song::Entity")]
    RelSong,
}

impl Related<super::rel_playlist_song::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RelSong.def()
    }
}

impl Related<super::song::Entity> for Entity {
    fn to() -> RelationDef {
        super::rel_playlist_song::Relation::Song.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::rel_playlist_song::Relation::Playlist.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
