pub mod body;
pub mod error;

pub use body::BoxBody;
pub use error::HttpError;
