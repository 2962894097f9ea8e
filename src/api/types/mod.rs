//! Shared API types

mod error;
mod extract;

pub use error::{ApiError, ApiErrorDetail, ApiErrorResponse, ApiErrorType};
pub use extract::{Json, Query};
