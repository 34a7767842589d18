use std::fmt;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::GeoPoint;
use crate::domain::post::models::NearbyPost;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostBody;
use crate::domain::post::models::PostCounts;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostTitle;
use crate::domain::post::models::EARTH_RADIUS_METERS;
use crate::domain::post::ports::PostRepository;
use crate::domain::user::models::UserId;

pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    title: String,
    body: String,
    longitude: f64,
    latitude: f64,
    active: bool,
    created_by: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct NearbyPostRow {
    #[sqlx(flatten)]
    post: PostRow,
    distance_meters: f64,
}

#[derive(sqlx::FromRow)]
struct PostCountsRow {
    active: i64,
    inactive: i64,
}

impl TryFrom<PostRow> for Post {
    type Error = PostError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        let id = row.id;

        Ok(Post {
            id: PostId(id),
            title: PostTitle::new(row.title).map_err(|e| corrupt_row(id, e))?,
            body: PostBody::new(row.body).map_err(|e| corrupt_row(id, e))?,
            location: GeoPoint::new(row.longitude, row.latitude)
                .map_err(|e| corrupt_row(id, e))?,
            active: row.active,
            created_by: UserId(row.created_by),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// A stored row that no longer passes domain validation.
fn corrupt_row(id: Uuid, e: impl fmt::Display) -> PostError {
    PostError::DatabaseError(format!("Stored post {} is invalid: {}", id, e))
}

fn database_error(e: sqlx::Error) -> PostError {
    PostError::DatabaseError(e.to_string())
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, post: Post) -> Result<Post, PostError> {
        sqlx::query(
            r#"
            INSERT INTO posts
                (id, title, body, longitude, latitude, active, created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(post.id.0)
        .bind(post.title.as_str())
        .bind(post.body.as_str())
        .bind(post.location.longitude())
        .bind(post.location.latitude())
        .bind(post.active)
        .bind(post.created_by.0)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(post)
    }

    async fn find_by_owner(&self, owner: &UserId) -> Result<Vec<Post>, PostError> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, title, body, longitude, latitude, active, created_by, created_at, updated_at
            FROM posts
            WHERE created_by = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner.0)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(Post::try_from).collect()
    }

    async fn find_owned(&self, id: &PostId, owner: &UserId) -> Result<Option<Post>, PostError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, title, body, longitude, latitude, active, created_by, created_at, updated_at
            FROM posts
            WHERE id = $1 AND created_by = $2
            "#,
        )
        .bind(id.0)
        .bind(owner.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Post::try_from).transpose()
    }

    async fn find_near(
        &self,
        center: &GeoPoint,
        max_distance_meters: f64,
    ) -> Result<Vec<NearbyPost>, PostError> {
        // Haversine; LEAST guards ASIN against rounding just above 1.
        let rows = sqlx::query_as::<_, NearbyPostRow>(
            r#"
            SELECT id, title, body, longitude, latitude, active, created_by, created_at, updated_at,
                   distance_meters
            FROM (
                SELECT p.*,
                       2 * $3 * ASIN(LEAST(1.0, SQRT(
                           POWER(SIN(RADIANS(p.latitude - $2) / 2), 2)
                           + COS(RADIANS($2)) * COS(RADIANS(p.latitude))
                             * POWER(SIN(RADIANS(p.longitude - $1) / 2), 2)
                       ))) AS distance_meters
                FROM posts p
            ) AS candidates
            WHERE distance_meters <= $4
            ORDER BY distance_meters ASC
            "#,
        )
        .bind(center.longitude())
        .bind(center.latitude())
        .bind(EARTH_RADIUS_METERS)
        .bind(max_distance_meters)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter()
            .map(|row| {
                Ok(NearbyPost {
                    post: Post::try_from(row.post)?,
                    distance_meters: row.distance_meters,
                })
            })
            .collect()
    }

    async fn count_by_owner(&self, owner: &UserId) -> Result<PostCounts, PostError> {
        let row = sqlx::query_as::<_, PostCountsRow>(
            r#"
            SELECT COUNT(*) FILTER (WHERE active) AS active,
                   COUNT(*) FILTER (WHERE NOT active) AS inactive
            FROM posts
            WHERE created_by = $1
            "#,
        )
        .bind(owner.0)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(PostCounts {
            active: row.active,
            inactive: row.inactive,
        })
    }

    async fn update(&self, post: Post) -> Result<Post, PostError> {
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET title = $3, body = $4, longitude = $5, latitude = $6, active = $7, updated_at = $8
            WHERE id = $1 AND created_by = $2
            "#,
        )
        .bind(post.id.0)
        .bind(post.created_by.0)
        .bind(post.title.as_str())
        .bind(post.body.as_str())
        .bind(post.location.longitude())
        .bind(post.location.latitude())
        .bind(post.active)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(PostError::NotFound(post.id.to_string()));
        }

        Ok(post)
    }

    async fn delete(&self, id: &PostId, owner: &UserId) -> Result<(), PostError> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = $1 AND created_by = $2
            "#,
        )
        .bind(id.0)
        .bind(owner.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(PostError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
