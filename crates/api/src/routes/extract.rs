//! Request extractors.

use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` whose rejections become `400 {"message": ...}`.
///
/// Axum answers a body with missing fields with 422 and a plain-text body;
/// this API reports every malformed body as a client error in the common
/// JSON error shape.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
