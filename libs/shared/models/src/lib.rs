pub mod error;
pub mod healthie;

pub use error::ApiError;
