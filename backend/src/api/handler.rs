use std::sync::Arc;

use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, StatusCode};
use serde_json::json;

use super::{memberships, playlists, songs};
use crate::context::BackendContext;
use crate::error::ProcessError;
use crate::http::{body, BoxBody};

pub(crate) fn parse_id(id: &str) -> Result<i64, ProcessError> {
    id.parse()
        .map_err(|_| ProcessError::WrongId(id.to_string()))
}

fn index() -> Response<BoxBody> {
    body::json(
        StatusCode::OK,
        &json!({ "message": "Potpourri Music API", "status": "running" }),
    )
}

async fn route<B>(
    ctx: &Arc<BackendContext>,
    method: &Method,
    path: &str,
    query: Option<&str>,
    req_body: B,
) -> Result<Response<BoxBody>, ProcessError>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let path_segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match path_segments.as_slice() {
        [] if method == Method::GET => Ok(index()),
        [] => Err(ProcessError::MethodNotAllowed),
        ["api", "musicas", rest @ ..] => songs::process(ctx, method, rest, query, req_body).await,
        ["api", "potpourri", rest @ ..] => {
            playlists::process(ctx, method, rest, query, req_body).await
        }
        ["api", "musicas-potpourri", rest @ ..] => {
            memberships::process(ctx, method, rest, query, req_body).await
        }
        _ => Err(ProcessError::NoSuchRoute),
    }
}

/// Entry point of every http request, errors are rendered as `{message}`.
pub async fn process_http<B>(ctx: &Arc<BackendContext>, req: Request<B>) -> Response<BoxBody>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let (parts, req_body) = req.into_parts();
    log::debug!("{} {}", parts.method, parts.uri);

    if parts.method == Method::OPTIONS {
        return body::preflight();
    }

    match route(ctx, &parts.method, parts.uri.path(), parts.uri.query(), req_body).await {
        Ok(rsp) => rsp,
        Err(e) => e.into_response(),
    }
}
