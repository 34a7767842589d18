use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::NearbyPost;
use crate::domain::post::models::NearbyQuery;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostCounts;
use crate::domain::post::models::PostId;
use crate::domain::post::models::UpdatePostCommand;
use crate::domain::post::ports::PostRepository;
use crate::domain::post::ports::PostServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for post operations.
pub struct PostService<PR>
where
    PR: PostRepository,
{
    repository: Arc<PR>,
}

impl<PR> PostService<PR>
where
    PR: PostRepository,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<PR> PostServicePort for PostService<PR>
where
    PR: PostRepository,
{
    async fn create_post(
        &self,
        command: CreatePostCommand,
        owner: UserId,
    ) -> Result<Post, PostError> {
        let post = self.repository.create(Post::new(command, owner)).await?;
        tracing::info!(post_id = %post.id, user_id = %owner, "Post created");
        Ok(post)
    }

    async fn list_posts(&self, owner: UserId) -> Result<Vec<Post>, PostError> {
        self.repository.find_by_owner(&owner).await
    }

    async fn find_nearby(&self, query: NearbyQuery) -> Result<Vec<NearbyPost>, PostError> {
        self.repository
            .find_near(&query.center, query.radius.meters())
            .await
    }

    async fn count_posts(&self, owner: UserId) -> Result<PostCounts, PostError> {
        self.repository.count_by_owner(&owner).await
    }

    async fn get_post(&self, id: PostId, owner: UserId) -> Result<Post, PostError> {
        self.repository
            .find_owned(&id, &owner)
            .await?
            .ok_or(PostError::NotFound(id.to_string()))
    }

    async fn update_post(
        &self,
        id: PostId,
        owner: UserId,
        command: UpdatePostCommand,
    ) -> Result<Post, PostError> {
        let mut post = self
            .repository
            .find_owned(&id, &owner)
            .await?
            .ok_or(PostError::NotFound(id.to_string()))?;

        post.apply(command);

        let updated = self.repository.update(post).await?;
        tracing::info!(post_id = %id, user_id = %owner, "Post updated");
        Ok(updated)
    }

    async fn delete_post(&self, id: PostId, owner: UserId) -> Result<(), PostError> {
        self.repository.delete(&id, &owner).await?;
        tracing::info!(post_id = %id, user_id = %owner, "Post deleted");
        Ok(())
    }
}
