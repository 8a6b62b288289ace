use async_trait::async_trait;
use sqlx::PgPool;

use crate::{errors::AppError, repositories::sqlx_repo::SqlxVisitorRepo};

#[async_trait]
pub trait VisitorRepository: Send + Sync {
    /// Bumps the site-wide counter and returns the new total.
    async fn increment(&self) -> Result<i64, AppError>;
}

impl SqlxVisitorRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxVisitorRepo { pool }
    }
}

#[async_trait]
impl VisitorRepository for SqlxVisitorRepo {
    async fn increment(&self) -> Result<i64, AppError> {
        // Upsert so a wiped table self-heals
        let count: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO visitor_counter (id, count) VALUES (1, 1)
            ON CONFLICT (id) DO UPDATE SET count = visitor_counter.count + 1
            RETURNING count
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
