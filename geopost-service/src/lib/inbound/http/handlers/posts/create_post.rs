use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::LocationData;
use super::PostData;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::GeoPoint;
use crate::domain::post::models::PostBody;
use crate::domain::post::models::PostTitle;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::post::errors::PostError;

pub async fn create_post(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedUser>,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> Result<ApiSuccess<PostData>, ApiError> {
    let Json(body) = payload?;
    let command = body.try_into_command()?;

    state
        .post_service
        .create_post(command, principal.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref post| ApiSuccess::new(StatusCode::CREATED, post.into()))
}

/// HTTP request body for creating a post (raw JSON)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatePostRequest {
    title: String,
    body: String,
    location: LocationData,
}

impl CreatePostRequest {
    fn try_into_command(self) -> Result<CreatePostCommand, PostError> {
        Ok(CreatePostCommand {
            title: PostTitle::new(self.title)?,
            body: PostBody::new(self.body)?,
            location: GeoPoint::try_from(self.location)?,
        })
    }
}
