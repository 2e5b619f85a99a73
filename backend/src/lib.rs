pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod server;

pub use context::BackendContext;
pub use error::ProcessError;
