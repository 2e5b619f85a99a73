use std::collections::BTreeSet;

use serde_json::Value;

use crate::db::playlist as playlist_store;
use crate::error::{Error, Result};
use crate::json::{int_field, IntField};

pub const LIST_REQUIRED: &str = "Lista de músicas é obrigatória";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SongEntry {
    pub song_id: i64,
    pub play_order: i64,
}

/// A playlist name plus its full song list, in submission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    pub name: Option<String>,
    pub entries: Vec<SongEntry>,
}

fn entry_field(item: &Value, key: &str, missing: String, n: usize) -> Result<i64> {
    match int_field(item.get(key)) {
        IntField::Value(v) => Ok(v),
        IntField::Missing => Err(Error::MissingField(missing)),
        IntField::Invalid => Err(Error::Validation(format!(
            "{} deve ser um número inteiro (música {})",
            key, n
        ))),
    }
}

fn entries_from_json(list: Option<&Value>) -> Result<Vec<SongEntry>> {
    let items = match list {
        None | Some(Value::Null) => return Err(Error::InvalidList(LIST_REQUIRED.to_string())),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(Error::InvalidList(
                "musicas_potpourri deve ser uma lista".to_string(),
            ))
        }
    };
    if items.is_empty() {
        return Err(Error::InvalidList(LIST_REQUIRED.to_string()));
    }

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let n = i + 1;
            if !item.is_object() {
                return Err(Error::InvalidList(format!(
                    "Item {} da lista deve ser um objeto",
                    n
                )));
            }
            Ok(SongEntry {
                song_id: entry_field(
                    item,
                    "musica_id",
                    format!("musica_id é obrigatório para a música {}", n),
                    n,
                )?,
                play_order: entry_field(
                    item,
                    "ordem_tocagem",
                    format!("ordem_tocagem é obrigatória para a música {}", n),
                    n,
                )?,
            })
        })
        .collect()
}

impl Composition {
    pub fn new(name: Option<String>, entries: Vec<SongEntry>) -> Self {
        Self { name, entries }
    }

    /// Reads `{nome_potpourri, musicas_potpourri}` and checks its shape.
    ///
    /// A missing name is an error only when `name_required`, otherwise it
    /// stays `None`. Order uniqueness is left to [`Composition::validate`].
    pub fn from_json(body: &Value, name_required: bool) -> Result<Self> {
        let name = playlist_store::name_from_json(body)?;
        let name = if name_required {
            Some(playlist_store::require_name(name)?)
        } else {
            name
        };
        Ok(Self {
            name,
            entries: entries_from_json(body.get("musicas_potpourri"))?,
        })
    }

    /// Checks that do not need the database.
    pub fn validate(&self) -> Result<()> {
        if self.entries.is_empty() {
            return Err(Error::InvalidList(LIST_REQUIRED.to_string()));
        }
        let mut orders = BTreeSet::new();
        if !self.entries.iter().all(|e| orders.insert(e.play_order)) {
            return Err(Error::DuplicateOrder);
        }
        Ok(())
    }

    /// Distinct song ids, ascending.
    pub fn song_ids(&self) -> Vec<i64> {
        self.entries
            .iter()
            .map(|e| e.song_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
