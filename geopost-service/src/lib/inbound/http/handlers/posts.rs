use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::post::models::GeoPoint;
use crate::domain::post::models::NearbyPost;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostCounts;
use crate::post::errors::GeoPointError;

pub mod count_posts;
pub mod create_post;
pub mod delete_post;
pub mod get_post;
pub mod list_posts;
pub mod nearby_posts;
pub mod update_post;

pub use count_posts::count_posts;
pub use create_post::create_post;
pub use delete_post::delete_post;
pub use get_post::get_post;
pub use list_posts::list_posts;
pub use nearby_posts::nearby_posts;
pub use update_post::update_post;

/// Coordinates as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationData {
    pub longitude: f64,
    pub latitude: f64,
}

impl TryFrom<LocationData> for GeoPoint {
    type Error = GeoPointError;

    fn try_from(location: LocationData) -> Result<Self, Self::Error> {
        GeoPoint::new(location.longitude, location.latitude)
    }
}

impl From<&GeoPoint> for LocationData {
    fn from(point: &GeoPoint) -> Self {
        Self {
            longitude: point.longitude(),
            latitude: point.latitude(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostData {
    pub id: String,
    pub title: String,
    pub body: String,
    pub location: LocationData,
    pub active: bool,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Post> for PostData {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.to_string(),
            title: post.title.as_str().to_string(),
            body: post.body.as_str().to_string(),
            location: (&post.location).into(),
            active: post.active,
            created_by: post.created_by.to_string(),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyPostData {
    #[serde(flatten)]
    pub post: PostData,
    pub distance_meters: f64,
}

impl From<&NearbyPost> for NearbyPostData {
    fn from(nearby: &NearbyPost) -> Self {
        Self {
            post: (&nearby.post).into(),
            distance_meters: nearby.distance_meters,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PostCountsData {
    pub active: i64,
    pub inactive: i64,
}

impl From<PostCounts> for PostCountsData {
    fn from(counts: PostCounts) -> Self {
        Self {
            active: counts.active,
            inactive: counts.inactive,
        }
    }
}
