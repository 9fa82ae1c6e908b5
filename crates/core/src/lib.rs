#![forbid(unsafe_code)]

pub mod error;
pub mod model;

pub use error::{ApiResult, AppError, ErrorKind, FailureSource, classify_by_status};
