use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;

/// The principal the bearer token resolved to.
pub async fn me(
    Extension(principal): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<PrincipalData>, ApiError> {
    Ok(ApiSuccess::new(
        StatusCode::OK,
        PrincipalData {
            id: principal.user_id.to_string(),
            email: principal.email.as_str().to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrincipalData {
    pub id: String,
    pub email: String,
}
