use strum_macros::Display;
use thiserror::Error;

/// Tables addressed by id through the stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Entity {
    Song,
    Playlist,
    Membership,
}

impl Entity {
    pub fn not_found(&self) -> &'static str {
        match self {
            Entity::Song => "Música não encontrada",
            Entity::Playlist => "Potpourri não encontrado",
            Entity::Membership => "Relacionamento música-potpourri não encontrado",
        }
    }
}

/// Coarse classification the outer layers map to status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    Duplicate,
    Fetch,
    Persistence,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    MissingField(String),
    #[error("{0}")]
    InvalidList(String),
    #[error("{0}")]
    Validation(String),
    #[error("Ordens de tocagem devem ser únicas")]
    DuplicateOrder,
    #[error("Música {0} não encontrada")]
    SongNotFound(i64),
    #[error("{}", .0.not_found())]
    NotFound(Entity),
    #[error("{0}")]
    Duplicate(String),
    #[error("Cifra não encontrada")]
    LyricsNotFound,
    #[error("Erro ao buscar cifra: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("Erro de banco de dados: {0}")]
    Db(#[from] sea_orm::DbErr),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingField(_)
            | Error::InvalidList(_)
            | Error::Validation(_)
            | Error::DuplicateOrder => ErrorKind::Validation,
            Error::SongNotFound(_) | Error::NotFound(_) => ErrorKind::NotFound,
            Error::Duplicate(_) => ErrorKind::Duplicate,
            Error::LyricsNotFound | Error::Fetch(_) => ErrorKind::Fetch,
            Error::Db(_) => ErrorKind::Persistence,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
