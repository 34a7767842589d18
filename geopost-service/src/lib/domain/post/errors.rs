use thiserror::Error;

/// Error for PostId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PostIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for title and body validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContentError {
    #[error("{0} must not be blank")]
    Blank(&'static str),
}

/// Error for coordinate validation failures
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GeoPointError {
    #[error("Coordinates must be finite numbers")]
    NotFinite,

    #[error("Longitude must be between -180 and 180, got {0}")]
    LongitudeOutOfRange(f64),

    #[error("Latitude must be between -90 and 90, got {0}")]
    LatitudeOutOfRange(f64),
}

/// Error for search radius validation failures
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RadiusError {
    #[error("Radius must be a non-negative number of kilometers, got {0}")]
    Invalid(f64),
}

/// Top-level error for all post-related operations
#[derive(Debug, Clone, Error)]
pub enum PostError {
    #[error("Invalid post ID: {0}")]
    InvalidPostId(#[from] PostIdError),

    #[error("Invalid post: {0}")]
    InvalidContent(#[from] ContentError),

    #[error("Invalid location: {0}")]
    InvalidLocation(#[from] GeoPointError),

    #[error("Invalid radius: {0}")]
    InvalidRadius(#[from] RadiusError),

    #[error("Post not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
