use std::sync::Arc;

use hyper::body::{Body, Bytes};
use hyper::{Method, Response, StatusCode};
use potpourri_core::compose::{self, Composition};
use potpourri_core::db::playlist as playlist_store;
use serde_json::json;

use super::handler::parse_id;
use super::pagination::{ListQuery, Pagination};
use crate::context::BackendContext;
use crate::error::ProcessError;
use crate::http::{body, BoxBody};

/// `/api/potpourri/...`
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
            let name = playlist_store::require_name(playlist_store::name_from_json(&data)?)?;
            let playlist = playlist_store::create(db, &name).await?;
            Ok(body::json(
                StatusCode::CREATED,
                &json!({ "message": "Potpourri criado com sucesso", "potpourri": playlist }),
            ))
        }
        (&Method::GET, []) => {
            let q = ListQuery::parse(query)?;
            let page = match q.search() {
                Some(term) => playlist_store::search(db, term, q.page_params()).await?,
                None => playlist_store::list(db, q.page_params()).await?,
            };
            Ok(body::json(
                StatusCode::OK,
                &json!({ "potpourri": page.items, "pagination": Pagination::from(&page) }),
            ))
        }
        (&Method::GET, ["search"]) => {
            let q = ListQuery::parse(query)?;
            let term = q.term()?;
            let page = playlist_store::search(db, term, q.page_params()).await?;
            Ok(body::json(
                StatusCode::OK,
                &json!({
                    "potpourri": page.items,
                    "search_term": term,
                    "pagination": Pagination::from(&page),
                }),
            ))
        }
        (&Method::POST, ["create-with-musics"]) => {
            let data = body::read_json(req_body).await?;
            let composition = Composition::from_json(&data, true)?;
            let composed = compose::create_playlist_with_songs(db, composition).await?;
            Ok(body::json(
                StatusCode::CREATED,
                &json!({
                    "message": "Potpourri criado com músicas com sucesso",
                    "data": composed,
                }),
            ))
        }
        (_, ["search" | "create-with-musics"]) => Err(ProcessError::MethodNotAllowed),
        (&Method::PUT, [id, "replace-musics"]) => {
            let id = parse_id(id)?;
            let data = body::read_json(req_body).await?;
            let composition = Composition::from_json(&data, false)?;
            let composed = compose::replace_playlist_songs(db, &ctx.locks, id, composition).await?;
            Ok(body::json(
                StatusCode::OK,
                &json!({
                    "message": "Potpourri atualizado e músicas substituídas com sucesso",
                    "data": composed,
                }),
            ))
        }
        (&Method::GET, [id]) => {
            let playlist = playlist_store::get(db, parse_id(id)?).await?;
            Ok(body::json(StatusCode::OK, &json!({ "potpourri": playlist })))
        }
        (&Method::PUT, [id]) => {
            let id = parse_id(id)?;
            let data = body::read_json(req_body).await?;
            let name = playlist_store::require_name(playlist_store::name_from_json(&data)?)?;
            let playlist = playlist_store::update(db, id, &name).await?;
            Ok(body::json(
                StatusCode::OK,
                &json!({ "message": "Potpourri atualizado com sucesso", "potpourri": playlist }),
            ))
        }
        (&Method::DELETE, [id]) => {
            let id = parse_id(id)?;
            let _guard = ctx.locks.lock(id).await;
            playlist_store::delete(db, id).await?;
            Ok(body::json(
                StatusCode::OK,
                &json!({ "message": "Potpourri deletado com sucesso" }),
            ))
        }
        (_, [] | [_] | [_, "replace-musics"]) => Err(ProcessError::MethodNotAllowed),
        _ => Err(ProcessError::NoSuchRoute),
    }
}
