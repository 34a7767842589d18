use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::PostData;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn list_posts(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<Vec<PostData>>, ApiError> {
    state
        .post_service
        .list_posts(principal.user_id)
        .await
        .map_err(ApiError::from)
        .map(|posts| ApiSuccess::new(StatusCode::OK, posts.iter().map(PostData::from).collect()))
}
