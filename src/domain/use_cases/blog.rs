use std::path::PathBuf;

use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::blog_post::{BlogPost, BlogPostInsert, BlogPostUpdate, NewBlogPostFields},
    errors::AppError,
    infrastructure::storage::{
        remote::{release_assets, AssetHandle, AssetStore, ResourceKind},
        scratch::ScratchStorage,
    },
    repositories::blog_post::BlogPostRepository,
};

const IMAGE_FOLDER: &str = "blog/images";

#[derive(Debug)]
pub struct NewBlogPostInput {
    pub fields: NewBlogPostFields,
    pub image_path: PathBuf,
}

#[derive(Debug, Default)]
pub struct UpdateBlogPostInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_path: Option<PathBuf>,
}

/// Single-image variant of the book pipeline: upload cover, persist record,
/// release the replaced asset after the record points at the new one.
pub struct BlogPostHandler<R, S>
where
    R: BlogPostRepository,
    S: AssetStore,
{
    pub blog_post_repo: R,
    store: S,
    scratch: ScratchStorage,
}

impl<R, S> BlogPostHandler<R, S>
where
    R: BlogPostRepository,
    S: AssetStore,
{
    pub fn new(blog_post_repo: R, store: S, scratch: ScratchStorage) -> Self {
        BlogPostHandler { blog_post_repo, store, scratch }
    }

    #[instrument(skip(self, input))]
    pub async fn create_blog_post(&self, input: NewBlogPostInput) -> Result<BlogPost, AppError> {
        input.fields.validate()?;

        let result = self.run_create(&input).await;
        self.scratch.discard_file(&input.image_path).await;
        result
    }

    async fn run_create(&self, input: &NewBlogPostInput) -> Result<BlogPost, AppError> {
        let image = self
            .store
            .upload(&input.image_path, IMAGE_FOLDER, ResourceKind::Image)
            .await?;
        info!(asset_id = %image.asset_id, "uploaded blog image");
        self.scratch.discard_file(&input.image_path).await;

        let insert = BlogPostInsert {
            title: input.fields.title.clone(),
            description: input.fields.description.clone(),
            image,
        };

        self.blog_post_repo.create_blog_post(&insert).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_blog_post(
        &self,
        id: &Uuid,
        input: UpdateBlogPostInput,
    ) -> Result<BlogPost, AppError> {
        let existing = self.blog_post_repo.get_blog_post_by_id(id).await?;

        let result = self.run_update(id, &existing, &input).await;
        if let Some(image_path) = &input.image_path {
            self.scratch.discard_file(image_path).await;
        }
        result
    }

    async fn run_update(
        &self,
        id: &Uuid,
        existing: &BlogPost,
        input: &UpdateBlogPostInput,
    ) -> Result<BlogPost, AppError> {
        let mut changes = BlogPostUpdate {
            title: input.title.clone(),
            description: input.description.clone(),
            image: None,
        };
        let mut superseded: Vec<AssetHandle> = Vec::new();

        if let Some(image_path) = &input.image_path {
            let image = self
                .store
                .upload(image_path, IMAGE_FOLDER, ResourceKind::Image)
                .await?;
            info!(asset_id = %image.asset_id, "uploaded replacement blog image");
            self.scratch.discard_file(image_path).await;

            superseded.push(AssetHandle::image(&existing.image_asset_id));
            changes.image = Some(image);
        }

        let updated = self.blog_post_repo.update_blog_post(id, &changes).await?;

        if !superseded.is_empty() {
            release_assets(&self.store, &superseded).await;
        }

        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_blog_post(&self, id: &Uuid) -> Result<BlogPost, AppError> {
        let deleted = self.blog_post_repo.delete_blog_post(id).await?;
        release_assets(&self.store, &[AssetHandle::image(&deleted.image_asset_id)]).await;
        Ok(deleted)
    }

    pub async fn get_blog_post_by_id(&self, id: &Uuid) -> Result<BlogPost, AppError> {
        self.blog_post_repo.get_blog_post_by_id(id).await
    }

    pub async fn list_blog_posts(&self) -> Result<Vec<BlogPost>, AppError> {
        self.blog_post_repo.list_blog_posts().await
    }
}
