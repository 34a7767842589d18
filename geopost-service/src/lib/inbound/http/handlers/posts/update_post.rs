use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::LocationData;
use super::PostData;
use crate::domain::post::models::GeoPoint;
use crate::domain::post::models::PostBody;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostTitle;
use crate::domain::post::models::UpdatePostCommand;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::post::errors::PostError;

/// HTTP request body for updating a post (raw JSON)
///
/// Absent fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub location: Option<LocationData>,
    pub active: Option<bool>,
}

impl UpdatePostRequest {
    fn try_into_command(self) -> Result<UpdatePostCommand, PostError> {
        Ok(UpdatePostCommand {
            title: self.title.map(PostTitle::new).transpose()?,
            body: self.body.map(PostBody::new).transpose()?,
            location: self.location.map(GeoPoint::try_from).transpose()?,
            active: self.active,
        })
    }
}

pub async fn update_post(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedUser>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<UpdatePostRequest>, JsonRejection>,
) -> Result<ApiSuccess<PostData>, ApiError> {
    let Path(post_id) = path?;
    let post_id = PostId::from_string(&post_id).map_err(PostError::from)?;
    let Json(body) = payload?;
    let command = body.try_into_command()?;

    state
        .post_service
        .update_post(post_id, principal.user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref post| ApiSuccess::new(StatusCode::OK, post.into()))
}
