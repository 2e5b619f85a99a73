use hyper::{Response, StatusCode};
use potpourri_core::ErrorKind;
use serde_json::json;
use thiserror::Error;

use crate::http::{body, BoxBody, HttpError};

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    Core(#[from] potpourri_core::Error),
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error("Dados não fornecidos")]
    MissingBody,
    #[error("Termo de busca é obrigatório")]
    MissingSearchTerm,
    #[error("ID inválido: {0}")]
    WrongId(String),
    #[error("Parâmetros de consulta inválidos: {0}")]
    Query(#[from] serde_urlencoded::de::Error),
    #[error("Rota não encontrada")]
    NoSuchRoute,
    #[error("Método não permitido")]
    MethodNotAllowed,
}

impl ProcessError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProcessError::Core(e) => match e.kind() {
                ErrorKind::Validation => StatusCode::BAD_REQUEST,
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Duplicate => StatusCode::CONFLICT,
                ErrorKind::Fetch => StatusCode::BAD_GATEWAY,
                ErrorKind::Persistence => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ProcessError::Http(HttpError::TooLarge(_)) => StatusCode::PAYLOAD_TOO_LARGE,
            ProcessError::Http(HttpError::Body(_)) => StatusCode::BAD_REQUEST,
            ProcessError::MissingBody
            | ProcessError::MissingSearchTerm
            | ProcessError::WrongId(_)
            | ProcessError::Query(_) => StatusCode::BAD_REQUEST,
            ProcessError::NoSuchRoute => StatusCode::NOT_FOUND,
            ProcessError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    /// `{message}` envelope with the matching status.
    pub fn into_response(self) -> Response<BoxBody> {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{} -> {}", status, self);
        } else {
            log::warn!("{} -> {}", status, self);
        }
        body::json(status, &json!({ "message": self.to_string() }))
    }
}
