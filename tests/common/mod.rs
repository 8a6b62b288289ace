use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use mockall::mock;
use uuid::Uuid;

use archive_backend::{
    entities::{
        blog_post::{BlogPost, BlogPostInsert, BlogPostUpdate},
        book::{Book, BookInsert, BookUpdate},
        gallery_image::{GalleryImage, GalleryImageInsert},
    },
    errors::AppError,
    render::{DocumentRenderer, RenderOptions},
    repositories::{
        blog_post::BlogPostRepository, book::BookRepository, gallery_image::GalleryRepository,
    },
    storage::remote::{AssetStore, ResourceKind, StoredAsset},
    storage::scratch::ScratchStorage,
};

mock! {
    pub Store {}

    #[async_trait]
    impl AssetStore for Store {
        async fn upload(
            &self,
            local_path: &Path,
            folder: &str,
            kind: ResourceKind,
        ) -> Result<StoredAsset, AppError>;
        async fn delete(&self, asset_id: &str, kind: ResourceKind) -> Result<(), AppError>;
    }
}

mock! {
    pub BookRepo {}

    #[async_trait]
    impl BookRepository for BookRepo {
        async fn create_book(&self, book: &BookInsert) -> Result<Book, AppError>;
        async fn get_book_by_id(&self, id: &Uuid) -> Result<Book, AppError>;
        async fn list_books(&self) -> Result<Vec<Book>, AppError>;
        async fn list_books_by_category(&self, category: &str) -> Result<Vec<Book>, AppError>;
        async fn search_books(&self, query: &str) -> Result<Vec<Book>, AppError>;
        async fn update_book(&self, id: &Uuid, changes: &BookUpdate) -> Result<Book, AppError>;
        async fn delete_book(&self, id: &Uuid) -> Result<Book, AppError>;
    }
}

mock! {
    pub BlogRepo {}

    #[async_trait]
    impl BlogPostRepository for BlogRepo {
        async fn create_blog_post(&self, post: &BlogPostInsert) -> Result<BlogPost, AppError>;
        async fn get_blog_post_by_id(&self, id: &Uuid) -> Result<BlogPost, AppError>;
        async fn list_blog_posts(&self) -> Result<Vec<BlogPost>, AppError>;
        async fn update_blog_post(&self, id: &Uuid, changes: &BlogPostUpdate) -> Result<BlogPost, AppError>;
        async fn delete_blog_post(&self, id: &Uuid) -> Result<BlogPost, AppError>;
    }
}

mock! {
    pub GalleryRepo {}

    #[async_trait]
    impl GalleryRepository for GalleryRepo {
        async fn insert_images(&self, images: &[GalleryImageInsert]) -> Result<Vec<GalleryImage>, AppError>;
        async fn list_images(&self) -> Result<Vec<GalleryImage>, AppError>;
        async fn find_images_by_ids(&self, ids: &[Uuid]) -> Result<Vec<GalleryImage>, AppError>;
        async fn delete_images_by_ids(&self, ids: &[Uuid]) -> Result<u64, AppError>;
    }
}

/// Renderer that writes `pages` fake page files in render order.
pub struct FakeRenderer {
    pub pages: usize,
}

#[async_trait]
impl DocumentRenderer for FakeRenderer {
    async fn render(
        &self,
        _document: &Path,
        output_dir: &Path,
        options: &RenderOptions,
    ) -> Result<Vec<PathBuf>, AppError> {
        tokio::fs::create_dir_all(output_dir).await?;
        let mut paths = Vec::with_capacity(self.pages);
        for n in 1..=self.pages {
            let path = output_dir.join(format!("{}-{}.jpg", options.page_prefix, n));
            tokio::fs::write(&path, b"page bytes").await?;
            paths.push(path);
        }
        Ok(paths)
    }
}

/// Renderer that fails the way a crashed external tool does.
pub struct FailingRenderer;

#[async_trait]
impl DocumentRenderer for FailingRenderer {
    async fn render(
        &self,
        _document: &Path,
        _output_dir: &Path,
        _options: &RenderOptions,
    ) -> Result<Vec<PathBuf>, AppError> {
        Err(AppError::Conversion(
            "pdftocairo exited with exit status: 1: Syntax Error: couldn't read xref table".into(),
        ))
    }
}

/// Scratch storage rooted in a fresh temp directory, plus stashed cover and
/// document files, mirroring what the intake layer hands to the orchestrator.
pub struct TestScratch {
    pub scratch: ScratchStorage,
    // removing the tempdir removes all scratch contents with it
    #[allow(dead_code)]
    pub dir: tempfile::TempDir,
}

pub async fn scratch_with_inputs() -> (TestScratch, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let scratch = ScratchStorage::new(dir.path());
    scratch.ensure_layout().await.expect("scratch layout");

    let cover_path = dir.path().join("covers").join(format!("cover_{}.jpg", Uuid::new_v4()));
    tokio::fs::write(&cover_path, b"cover bytes").await.unwrap();

    let document_path = dir
        .path()
        .join("documents")
        .join(format!("document_{}.pdf", Uuid::new_v4()));
    tokio::fs::write(&document_path, b"%PDF-1.4 bytes").await.unwrap();

    (TestScratch { scratch, dir }, cover_path, document_path)
}

/// Upload stub that derives a stable url/asset id from the uploaded path, so
/// page order is observable in the persisted record.
pub fn asset_for(path: &Path, folder: &str) -> StoredAsset {
    let name = path.file_name().unwrap().to_str().unwrap();
    StoredAsset {
        url: format!("https://assets.test/{}/{}", folder, name),
        asset_id: format!("{}/{}", folder, name),
    }
}

pub fn book_from_insert(insert: &BookInsert) -> Book {
    Book {
        id: Uuid::new_v4(),
        title: insert.title.clone(),
        description: insert.description.clone(),
        category: insert.category.clone(),
        cover_url: insert.cover.url.clone(),
        cover_asset_id: insert.cover.asset_id.clone(),
        document_url: Some(insert.document.url.clone()),
        document_asset_id: Some(insert.document.asset_id.clone()),
        page_urls: insert.page_urls(),
        page_asset_ids: insert.page_asset_ids(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn stored_book(pages: &[&str]) -> Book {
    Book {
        id: Uuid::new_v4(),
        title: "Stored".into(),
        description: "A stored book".into(),
        category: "history".into(),
        cover_url: "https://assets.test/books/covers/old-cover.jpg".into(),
        cover_asset_id: "books/covers/old-cover".into(),
        document_url: Some("https://assets.test/books/pdf/old-doc.pdf".into()),
        document_asset_id: Some("books/pdf/old-doc".into()),
        page_urls: pages.iter().map(|p| format!("https://assets.test/{}.jpg", p)).collect(),
        page_asset_ids: pages.iter().map(|p| p.to_string()).collect(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
