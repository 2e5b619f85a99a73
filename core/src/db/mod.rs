pub mod page;
pub mod playlist;
pub mod playlist_song;
pub mod song;
pub mod values;

use std::time::Duration;

use sea_orm::{
    sea_query::{Expr, IntoColumnRef, LikeExpr, SimpleExpr},
    ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr,
};

pub use page::{Page, PageParams};

pub async fn connect(url: &str, max_connections: u32) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(url.to_owned());
    opt.max_connections(max_connections.max(1))
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    Database::connect(opt).await
}

pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

const KEY_SEPARATOR: &str = "\u{1f}";

/// Value of a `search_key` column: the present parts lowercased and joined.
///
/// Folded in Rust, SQLite `lower()` only maps ASCII letters.
pub fn search_key<'a>(parts: impl IntoIterator<Item = Option<&'a str>>) -> String {
    parts
        .into_iter()
        .flatten()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(KEY_SEPARATOR)
}

/// Case-insensitive substring match on a `search_key` column, `%` and `_`
/// in `term` are literal.
pub fn key_contains<C: IntoColumnRef>(col: C, term: &str) -> SimpleExpr {
    let escaped = term
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    Expr::col(col).like(LikeExpr::new(format!("%{}%", escaped)).escape('\\'))
}
