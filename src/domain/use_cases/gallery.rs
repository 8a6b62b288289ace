use std::path::PathBuf;

use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    entities::gallery_image::{GalleryImage, GalleryImageInsert},
    errors::AppError,
    infrastructure::storage::{
        remote::{release_assets, AssetHandle, AssetStore, ResourceKind},
        scratch::ScratchStorage,
    },
    repositories::gallery_image::GalleryRepository,
};

const GALLERY_FOLDER: &str = "gallery";

pub struct GalleryHandler<R, S>
where
    R: GalleryRepository,
    S: AssetStore,
{
    pub gallery_repo: R,
    store: S,
    scratch: ScratchStorage,
}

impl<R, S> GalleryHandler<R, S>
where
    R: GalleryRepository,
    S: AssetStore,
{
    pub fn new(gallery_repo: R, store: S, scratch: ScratchStorage) -> Self {
        GalleryHandler { gallery_repo, store, scratch }
    }

    #[instrument(skip(self, image_paths))]
    pub async fn add_images(&self, image_paths: Vec<PathBuf>) -> Result<Vec<GalleryImage>, AppError> {
        if image_paths.is_empty() {
            return Err(AppError::missing_field("images"));
        }

        let result = self.run_add(&image_paths).await;
        for path in &image_paths {
            self.scratch.discard_file(path).await;
        }
        result
    }

    async fn run_add(&self, image_paths: &[PathBuf]) -> Result<Vec<GalleryImage>, AppError> {
        let mut inserts = Vec::with_capacity(image_paths.len());
        for path in image_paths {
            let asset = self
                .store
                .upload(path, GALLERY_FOLDER, ResourceKind::Image)
                .await?;
            info!(asset_id = %asset.asset_id, "uploaded gallery image");
            self.scratch.discard_file(path).await;
            inserts.push(GalleryImageInsert { asset, position: None });
        }

        self.gallery_repo.insert_images(&inserts).await
    }

    pub async fn list_images(&self) -> Result<Vec<GalleryImage>, AppError> {
        self.gallery_repo.list_images().await
    }

    /// Removes the given records and issues one best-effort remote delete per
    /// found image. Returns how many rows were removed.
    #[instrument(skip(self, ids))]
    pub async fn bulk_delete(&self, ids: &[Uuid]) -> Result<u64, AppError> {
        if ids.is_empty() {
            return Err(AppError::missing_field("ids"));
        }

        let images = self.gallery_repo.find_images_by_ids(ids).await?;
        let removed = self.gallery_repo.delete_images_by_ids(ids).await?;

        let handles: Vec<AssetHandle> = images
            .iter()
            .map(|image| AssetHandle::image(&image.asset_id))
            .collect();
        release_assets(&self.store, &handles).await;

        Ok(removed)
    }
}
