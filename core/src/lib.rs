pub mod compose;
pub mod db;
pub mod error;
pub mod http;
pub mod json;
pub mod lyrics;
pub mod model;

pub use error::{Error, ErrorKind, Result};
