use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::PostData;
use crate::domain::post::models::PostId;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::post::errors::PostError;

pub async fn get_post(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedUser>,
    path: Result<Path<String>, PathRejection>,
) -> Result<ApiSuccess<PostData>, ApiError> {
    let Path(post_id) = path?;
    let post_id = PostId::from_string(&post_id).map_err(PostError::from)?;

    state
        .post_service
        .get_post(post_id, principal.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref post| ApiSuccess::new(StatusCode::OK, post.into()))
}
