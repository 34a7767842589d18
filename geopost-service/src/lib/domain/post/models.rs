use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::post::errors::ContentError;
use crate::domain::post::errors::GeoPointError;
use crate::domain::post::errors::PostIdError;
use crate::domain::post::errors::RadiusError;
use crate::domain::user::models::UserId;

/// Mean Earth radius used for all distance computations, in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_378_100.0;

/// Geotagged post owned by the user who created it.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: PostId,
    pub title: PostTitle,
    pub body: PostBody,
    pub location: GeoPoint,
    pub active: bool,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Build a new active post owned by `owner`.
    pub fn new(command: CreatePostCommand, owner: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: PostId::new(),
            title: command.title,
            body: command.body,
            location: command.location,
            active: true,
            created_by: owner,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply the fields present in `command`; absent fields are left alone.
    pub fn apply(&mut self, command: UpdatePostCommand) {
        if let Some(title) = command.title {
            self.title = title;
        }
        if let Some(body) = command.body {
            self.body = body;
        }
        if let Some(location) = command.location {
            self.location = location;
        }
        if let Some(active) = command.active {
            self.active = active;
        }
        self.updated_at = Utc::now();
    }
}

/// Post unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostId(pub Uuid);

impl PostId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, PostIdError> {
        Uuid::parse_str(s)
            .map(PostId)
            .map_err(|e| PostIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for PostId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Non-blank post title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTitle(String);

impl PostTitle {
    pub fn new(title: String) -> Result<Self, ContentError> {
        non_blank(title, "title").map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Non-blank post body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostBody(String);

impl PostBody {
    pub fn new(body: String) -> Result<Self, ContentError> {
        non_blank(body, "body").map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn non_blank(value: String, field: &'static str) -> Result<String, ContentError> {
    if value.trim().is_empty() {
        Err(ContentError::Blank(field))
    } else {
        Ok(value)
    }
}

/// A point on the Earth's surface in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    longitude: f64,
    latitude: f64,
}

impl GeoPoint {
    /// # Errors
    /// * `NotFinite` - Either coordinate is NaN or infinite
    /// * `LongitudeOutOfRange` - Longitude outside [-180, 180]
    /// * `LatitudeOutOfRange` - Latitude outside [-90, 90]
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, GeoPointError> {
        if !longitude.is_finite() || !latitude.is_finite() {
            return Err(GeoPointError::NotFinite);
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoPointError::LongitudeOutOfRange(longitude));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoPointError::LatitudeOutOfRange(latitude));
        }
        Ok(Self {
            longitude,
            latitude,
        })
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Great-circle distance in meters (haversine).
    ///
    /// Matches the expression the Postgres repository evaluates.
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2)
            + self.latitude.to_radians().cos()
                * other.latitude.to_radians().cos()
                * (d_lon / 2.0).sin().powi(2);

        2.0 * EARTH_RADIUS_METERS * a.sqrt().min(1.0).asin()
    }
}

/// Search radius in kilometers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchRadius(f64);

impl SearchRadius {
    /// # Errors
    /// * `Invalid` - Radius is negative, NaN or infinite
    pub fn from_kilometers(kilometers: f64) -> Result<Self, RadiusError> {
        if kilometers.is_finite() && kilometers >= 0.0 {
            Ok(Self(kilometers))
        } else {
            Err(RadiusError::Invalid(kilometers))
        }
    }

    pub fn meters(&self) -> f64 {
        self.0 * 1000.0
    }
}

/// Proximity query: everything within `radius` of `center`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyQuery {
    pub center: GeoPoint,
    pub radius: SearchRadius,
}

/// Post returned by a proximity query together with its distance.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyPost {
    pub post: Post,
    pub distance_meters: f64,
}

/// Number of a user's posts by status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PostCounts {
    pub active: i64,
    pub inactive: i64,
}

/// Command to create a post with validated fields
#[derive(Debug)]
pub struct CreatePostCommand {
    pub title: PostTitle,
    pub body: PostBody,
    pub location: GeoPoint,
}

/// Command to update a post.
///
/// All fields are optional to support partial updates.
#[derive(Debug, Default)]
pub struct UpdatePostCommand {
    pub title: Option<PostTitle>,
    pub body: Option<PostBody>,
    pub location: Option<GeoPoint>,
    pub active: Option<bool>,
}
