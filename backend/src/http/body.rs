use http_body_util::{combinators, BodyExt, Empty, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::{self, HeaderValue};
use hyper::{Response, StatusCode};
use serde_json::Value;

use super::error::HttpError;
use crate::error::ProcessError;

/// Type for synthetic boxed body
pub type BoxBody = combinators::BoxBody<Bytes, HttpError>;

/// Request bodies above this size are rejected.
pub const MAX_BODY_SIZE: usize = 1024 * 1024;

pub const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type, Authorization";

/// helper function to build a empty body
pub(crate) fn empty() -> BoxBody {
    Empty::<Bytes>::new()
        .map_err(|never| match never {})
        .boxed()
}

/// helper function to build a full body
pub(crate) fn full(body: Bytes) -> BoxBody {
    Full::new(body).map_err(|never| match never {}).boxed()
}

fn with_cors(mut rsp: Response<BoxBody>) -> Response<BoxBody> {
    rsp.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    rsp
}

pub(crate) fn json(status: StatusCode, value: &Value) -> Response<BoxBody> {
    let mut rsp = Response::new(full(Bytes::from(value.to_string())));
    *rsp.status_mut() = status;
    rsp.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    with_cors(rsp)
}

/// Answer to a CORS preflight.
pub(crate) fn preflight() -> Response<BoxBody> {
    let mut rsp = Response::new(empty());
    *rsp.status_mut() = StatusCode::NO_CONTENT;
    let headers = rsp.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    with_cors(rsp)
}

/// Collects at most [`MAX_BODY_SIZE`] bytes and parses them as a JSON object.
///
/// An empty body, invalid JSON and an empty object all count as missing data.
pub async fn read_json<B>(body: B) -> Result<Value, ProcessError>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let data = Limited::new(body, MAX_BODY_SIZE)
        .collect()
        .await
        .map_err(|e| {
            if e.downcast_ref::<LengthLimitError>().is_some() {
                HttpError::TooLarge(MAX_BODY_SIZE)
            } else {
                HttpError::Body(e)
            }
        })?
        .to_bytes();

    match serde_json::from_slice::<Value>(&data) {
        Ok(Value::Object(map)) if !map.is_empty() => Ok(Value::Object(map)),
        Ok(_) => Err(ProcessError::MissingBody),
        Err(e) => {
            log::debug!("invalid json body: {}", e);
            Err(ProcessError::MissingBody)
        }
    }
}
