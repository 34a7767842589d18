use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::NearbyPostData;
use crate::domain::post::models::GeoPoint;
use crate::domain::post::models::NearbyQuery;
use crate::domain::post::models::SearchRadius;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::post::errors::PostError;

/// Posts from every user within `radius` kilometers of the point.
///
/// Still behind authentication, but not scoped to the principal.
pub async fn nearby_posts(
    State(state): State<AppState>,
    params: Result<Query<NearbyPostsParams>, QueryRejection>,
) -> Result<ApiSuccess<Vec<NearbyPostData>>, ApiError> {
    let Query(params) = params?;
    let query = params.try_into_query()?;

    state
        .post_service
        .find_nearby(query)
        .await
        .map_err(ApiError::from)
        .map(|posts| {
            ApiSuccess::new(
                StatusCode::OK,
                posts.iter().map(NearbyPostData::from).collect(),
            )
        })
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NearbyPostsParams {
    latitude: f64,
    longitude: f64,
    /// Kilometers
    radius: f64,
}

impl NearbyPostsParams {
    fn try_into_query(self) -> Result<NearbyQuery, PostError> {
        Ok(NearbyQuery {
            center: GeoPoint::new(self.longitude, self.latitude)?,
            radius: SearchRadius::from_kilometers(self.radius)?,
        })
    }
}
