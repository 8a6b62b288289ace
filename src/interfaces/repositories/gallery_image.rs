use async_trait::async_trait;
use uuid::Uuid;
use sqlx::PgPool;

use crate::{
    entities::gallery_image::{GalleryImage, GalleryImageInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxGalleryRepo,
};

#[async_trait]
pub trait GalleryRepository: Send + Sync {
    async fn insert_images(&self, images: &[GalleryImageInsert]) -> Result<Vec<GalleryImage>, AppError>;
    async fn list_images(&self) -> Result<Vec<GalleryImage>, AppError>;
    async fn find_images_by_ids(&self, ids: &[Uuid]) -> Result<Vec<GalleryImage>, AppError>;
    /// Returns how many rows were actually removed.
    async fn delete_images_by_ids(&self, ids: &[Uuid]) -> Result<u64, AppError>;
}

impl SqlxGalleryRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxGalleryRepo { pool }
    }
}

#[async_trait]
impl GalleryRepository for SqlxGalleryRepo {
    async fn insert_images(&self, images: &[GalleryImageInsert]) -> Result<Vec<GalleryImage>, AppError> {
        let mut tx = self.pool.begin().await?;
        let mut saved = Vec::with_capacity(images.len());

        for image in images {
            let row = sqlx::query_as::<_, GalleryImage>(
                r#"
                INSERT INTO gallery_images (url, asset_id, position)
                VALUES ($1, $2, $3)
                RETURNING *
                "#,
            )
            .bind(&image.asset.url)
            .bind(&image.asset.asset_id)
            .bind(image.position)
            .fetch_one(&mut *tx)
            .await?;
            saved.push(row);
        }

        tx.commit().await?;
        Ok(saved)
    }

    async fn list_images(&self) -> Result<Vec<GalleryImage>, AppError> {
        let images = sqlx::query_as::<_, GalleryImage>(
            "SELECT * FROM gallery_images ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(images)
    }

    async fn find_images_by_ids(&self, ids: &[Uuid]) -> Result<Vec<GalleryImage>, AppError> {
        let images = sqlx::query_as::<_, GalleryImage>(
            "SELECT * FROM gallery_images WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(images)
    }

    async fn delete_images_by_ids(&self, ids: &[Uuid]) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM gallery_images WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
