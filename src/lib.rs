use std::time::Duration;

use sqlx::PgPool;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod graceful_shutdown;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, middlewares, routes};
pub use infrastructure::{auth, db, render, storage};

use auth::jwt::JwtService;
use render::{PdfRenderer, RenderOptions};
use repositories::sqlx_repo::{
    SqlxBlogPostRepo, SqlxBookRepo, SqlxCategoryRepo, SqlxCommentRepo, SqlxContactRepo,
    SqlxGalleryRepo, SqlxStoryRepo, SqlxUserRepo, SqlxVideoRepo, SqlxVisitorRepo,
};
use settings::AppConfig;
use storage::{remote::HttpAssetStore, scratch::ScratchStorage};
use use_cases::{
    auth::AuthHandler, blog::BlogPostHandler, books::BookHandler, gallery::GalleryHandler,
};

pub type AppAuthHandler = AuthHandler<SqlxUserRepo>;
pub type AppBookHandler = BookHandler<SqlxBookRepo, HttpAssetStore, PdfRenderer>;
pub type AppBlogHandler = BlogPostHandler<SqlxBlogPostRepo, HttpAssetStore>;
pub type AppGalleryHandler = GalleryHandler<SqlxGalleryRepo, HttpAssetStore>;

pub struct AppState {
    pub auth_handler: AppAuthHandler,
    pub book_handler: AppBookHandler,
    pub blog_handler: AppBlogHandler,
    pub gallery_handler: AppGalleryHandler,
    pub comment_repo: SqlxCommentRepo,
    pub category_repo: SqlxCategoryRepo,
    pub contact_repo: SqlxContactRepo,
    pub story_repo: SqlxStoryRepo,
    pub video_repo: SqlxVideoRepo,
    pub visitor_repo: SqlxVisitorRepo,
    pub scratch: ScratchStorage,
}

impl AppState {
    pub fn new(
        config: &AppConfig,
        pool: PgPool,
        store: HttpAssetStore,
        renderer: PdfRenderer,
    ) -> Self {
        let scratch = ScratchStorage::new(config.scratch_dir.clone());
        let render_options = RenderOptions {
            timeout: Duration::from_secs(config.render_timeout_secs),
            ..RenderOptions::default()
        };

        let jwt_service = JwtService::new(config);
        let auth_handler = AuthHandler::new(SqlxUserRepo::new(pool.clone()), jwt_service);

        let book_handler = BookHandler::new(
            SqlxBookRepo::new(pool.clone()),
            store.clone(),
            renderer,
            scratch.clone(),
            render_options,
        );
        let blog_handler = BlogPostHandler::new(
            SqlxBlogPostRepo::new(pool.clone()),
            store.clone(),
            scratch.clone(),
        );
        let gallery_handler =
            GalleryHandler::new(SqlxGalleryRepo::new(pool.clone()), store, scratch.clone());

        AppState {
            auth_handler,
            book_handler,
            blog_handler,
            gallery_handler,
            comment_repo: SqlxCommentRepo::new(pool.clone()),
            category_repo: SqlxCategoryRepo::new(pool.clone()),
            contact_repo: SqlxContactRepo::new(pool.clone()),
            story_repo: SqlxStoryRepo::new(pool.clone()),
            video_repo: SqlxVideoRepo::new(pool.clone()),
            visitor_repo: SqlxVisitorRepo::new(pool),
            scratch,
        }
    }
}
