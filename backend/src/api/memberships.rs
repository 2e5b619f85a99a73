use std::sync::Arc;

use hyper::body::{Body, Bytes};
use hyper::{Method, Response, StatusCode};
use potpourri_core::db::playlist_song::{self as membership_store, NewMembership};
use serde_json::json;

use super::handler::parse_id;
use super::pagination::{ListQuery, Pagination};
use crate::context::BackendContext;
use crate::error::ProcessError;
use crate::http::{body, BoxBody};

/// `/api/musicas-potpourri/...`
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
            let membership = membership_store::create(db, NewMembership::from_json(&data)?).await?;
            Ok(body::json(
                StatusCode::CREATED,
                &json!({
                    "message": "Relacionamento música-potpourri criado com sucesso",
                    "musicas_potpourri": membership,
                }),
            ))
        }
        (&Method::GET, []) => {
            let q = ListQuery::parse(query)?;
            let page = membership_store::list(db, q.page_params()).await?;
            Ok(body::json(
                StatusCode::OK,
                &json!({ "musicas_potpourri": page.items, "pagination": Pagination::from(&page) }),
            ))
        }
        (&Method::GET, ["by-potpourri", id]) => {
            let playlist_id = parse_id(id)?;
            let q = ListQuery::parse(query)?;
            let page = membership_store::list_by_playlist(db, playlist_id, q.page_params()).await?;
            Ok(body::json(
                StatusCode::OK,
                &json!({
                    "potpourri_id": playlist_id,
                    "musicas_potpourri": page.items,
                    "pagination": Pagination::from(&page),
                }),
            ))
        }
        (_, ["by-potpourri", _]) => Err(ProcessError::MethodNotAllowed),
        (&Method::GET, [id]) => {
            let membership = membership_store::get(db, parse_id(id)?).await?;
            Ok(body::json(StatusCode::OK, &json!({ "musicas_potpourri": membership })))
        }
        (&Method::PUT, [id]) => {
            let id = parse_id(id)?;
            let data = body::read_json(req_body).await?;
            let membership =
                membership_store::update(db, id, NewMembership::from_json(&data)?).await?;
            Ok(body::json(
                StatusCode::OK,
                &json!({
                    "message": "Relacionamento música-potpourri atualizado com sucesso",
                    "musicas_potpourri": membership,
                }),
            ))
        }
        (&Method::DELETE, [id]) => {
            membership_store::delete(db, parse_id(id)?).await?;
            Ok(body::json(
                StatusCode::OK,
                &json!({ "message": "Relacionamento música-potpourri deletado com sucesso" }),
            ))
        }
        (_, [] | [_]) => Err(ProcessError::MethodNotAllowed),
        _ => Err(ProcessError::NoSuchRoute),
    }
}
