use async_trait::async_trait;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::GeoPoint;
use crate::domain::post::models::NearbyPost;
use crate::domain::post::models::NearbyQuery;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostCounts;
use crate::domain::post::models::PostId;
use crate::domain::post::models::UpdatePostCommand;
use crate::domain::user::models::UserId;

/// Port for post domain service operations.
///
/// Every operation except `find_nearby` is scoped to `owner`: a post that
/// exists but belongs to someone else is reported as not found.
#[async_trait]
pub trait PostServicePort: Send + Sync + 'static {
    /// Create a new active post.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_post(&self, command: CreatePostCommand, owner: UserId)
        -> Result<Post, PostError>;

    /// List the owner's posts, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_posts(&self, owner: UserId) -> Result<Vec<Post>, PostError>;

    /// Find posts from any user within the query radius, nearest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_nearby(&self, query: NearbyQuery) -> Result<Vec<NearbyPost>, PostError>;

    /// Count the owner's active and inactive posts.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn count_posts(&self, owner: UserId) -> Result<PostCounts, PostError>;

    /// Retrieve one of the owner's posts.
    ///
    /// # Errors
    /// * `NotFound` - No such post for this owner
    /// * `DatabaseError` - Database operation failed
    async fn get_post(&self, id: PostId, owner: UserId) -> Result<Post, PostError>;

    /// Apply a partial update to one of the owner's posts.
    ///
    /// # Errors
    /// * `NotFound` - No such post for this owner
    /// * `DatabaseError` - Database operation failed
    async fn update_post(
        &self,
        id: PostId,
        owner: UserId,
        command: UpdatePostCommand,
    ) -> Result<Post, PostError>;

    /// Delete one of the owner's posts.
    ///
    /// # Errors
    /// * `NotFound` - No such post for this owner
    /// * `DatabaseError` - Database operation failed
    async fn delete_post(&self, id: PostId, owner: UserId) -> Result<(), PostError>;
}

/// Persistence operations for posts.
#[async_trait]
pub trait PostRepository: Send + Sync + 'static {
    /// Persist a new post.
    async fn create(&self, post: Post) -> Result<Post, PostError>;

    /// All posts created by `owner`, newest first.
    async fn find_by_owner(&self, owner: &UserId) -> Result<Vec<Post>, PostError>;

    /// The post with `id` if it belongs to `owner`.
    async fn find_owned(&self, id: &PostId, owner: &UserId) -> Result<Option<Post>, PostError>;

    /// Posts within `max_distance_meters` of `center`, ordered by distance.
    async fn find_near(
        &self,
        center: &GeoPoint,
        max_distance_meters: f64,
    ) -> Result<Vec<NearbyPost>, PostError>;

    /// Active/inactive counts for `owner`.
    async fn count_by_owner(&self, owner: &UserId) -> Result<PostCounts, PostError>;

    /// Overwrite a stored post, matching on both id and owner.
    ///
    /// # Errors
    /// * `NotFound` - No post with this id for this owner
    async fn update(&self, post: Post) -> Result<Post, PostError>;

    /// Remove the post with `id` if it belongs to `owner`.
    ///
    /// # Errors
    /// * `NotFound` - No post with this id for this owner
    async fn delete(&self, id: &PostId, owner: &UserId) -> Result<(), PostError>;
}
