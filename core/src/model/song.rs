use crate::db::values::Timestamp;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SCROLL_SPEED: f64 = 1.0;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "musicas")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: Option<String>,
    #[serde(rename = "artista")]
    pub artist: Option<String>,
    #[sea_orm(unique)]
    #[serde(rename = "link_musica")]
    pub link: String,
    #[sea_orm(column_type = "Text", nullable)]
    #[serde(rename = "cifra")]
    pub lyrics: Option<String>,
    #[sea_orm(default_value = 1.0)]
    #[serde(rename = "velocidade_rolamento")]
    pub scroll_speed: f64,
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
    RelPlaylist,
}

impl Related<super::rel_playlist_song::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RelPlaylist.def()
    }
}

impl Related<super::playlist::Entity> for Entity {
    fn to() -> RelationDef {
        super::rel_playlist_song::Relation::Playlist.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::rel_playlist_song::Relation::Song.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
