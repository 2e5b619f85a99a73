use std::sync::Arc;

use hyper::body::{Body, Bytes};
use hyper::{Method, Response, StatusCode};
use potpourri_core::db::song as song_store;
use serde_json::json;

use super::handler::parse_id;
use super::pagination::{ListQuery, Pagination};
use crate::context::BackendContext;
use crate::error::ProcessError;
use crate::http::{body, BoxBody};

/// `/api/musicas/...`
pub async fn process<B>(
    ctx: &Arc<BackendContext>,
    method: &Method,
    path_segments: &[&str],
    query: Option<&str>,
    req_body: B,
) -> Result<Response<BoxBody>, ProcessError>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let db = &ctx.db;

    match (method, path_segments) {
        (&Method::POST, []) => {
            let data = body::read_json(req_body).await?;
            let link = song_store::link_from_json(&data)?;
            let song = song_store::import(db, ctx.lyrics.as_ref(), &link).await?;
            log::info!("song {} imported from {}", song.id, song.link);
            Ok(body::json(
                StatusCode::CREATED,
                &json!({ "message": "Música criada com sucesso", "musica": song }),
            ))
        }
        (&Method::GET, []) => {
            let q = ListQuery::parse(query)?;
            let page = match q.search() {
                Some(term) => song_store::search(db, term, q.page_params()).await?,
                None => song_store::list(db, q.page_params()).await?,
            };
            Ok(body::json(
                StatusCode::OK,
                &json!({ "musicas": page.items, "pagination": Pagination::from(&page) }),
            ))
        }
        (&Method::GET, ["search"]) => {
            let q = ListQuery::parse(query)?;
            let term = q.term()?;
            let page = song_store::search(db, term, q.page_params()).await?;
            Ok(body::json(
                StatusCode::OK,
                &json!({
                    "musicas": page.items,
                    "search_term": term,
                    "pagination": Pagination::from(&page),
                }),
            ))
        }
        (_, ["search"]) => Err(ProcessError::MethodNotAllowed),
        (&Method::GET, [id]) => {
            let song = song_store::get(db, parse_id(id)?).await?;
            Ok(body::json(StatusCode::OK, &json!({ "musica": song })))
        }
        (&Method::PUT, [id]) => {
            let id = parse_id(id)?;
            let data = body::read_json(req_body).await?;
            let fields = song_store::SongFields::from_json(&data)?;
            let song = song_store::update(db, id, fields).await?;
            Ok(body::json(
                StatusCode::OK,
                &json!({ "message": "Música atualizada com sucesso", "musica": song }),
            ))
        }
        (&Method::DELETE, [id]) => {
            song_store::delete(db, parse_id(id)?).await?;
            Ok(body::json(
                StatusCode::OK,
                &json!({ "message": "Música deletada com sucesso" }),
            ))
        }
        (_, [] | [_]) => Err(ProcessError::MethodNotAllowed),
        _ => Err(ProcessError::NoSuchRoute),
    }
}
