use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Corpo da requisição excede {0} bytes")]
    TooLarge(usize),
    #[error("Erro ao ler corpo da requisição: {0}")]
    Body(Box<dyn std::error::Error + Send + Sync>),
}
