use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::PostCountsData;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn count_posts(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<PostCountsData>, ApiError> {
    state
        .post_service
        .count_posts(principal.user_id)
        .await
        .map_err(ApiError::from)
        .map(|counts| ApiSuccess::new(StatusCode::OK, counts.into()))
}
