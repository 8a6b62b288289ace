use std::path::{Path, PathBuf};

use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::book::{Book, BookInsert, BookUpdate, DocumentReplacement, NewBookFields},
    errors::AppError,
    infrastructure::{
        render::{DocumentRenderer, RenderOptions},
        storage::{
            remote::{release_assets, AssetHandle, AssetStore, ResourceKind, StoredAsset},
            scratch::ScratchStorage,
        },
    },
    repositories::book::BookRepository,
};

const COVER_FOLDER: &str = "books/covers";
const DOCUMENT_FOLDER: &str = "books/pdf";
const PAGES_FOLDER: &str = "books/pages";

/// Stashed local files plus the validated text fields for a new book.
#[derive(Debug)]
pub struct NewBookInput {
    pub fields: NewBookFields,
    pub cover_path: PathBuf,
    pub document_path: PathBuf,
}

/// Partial update; absent fields keep their stored values. A new document
/// implies re-rendering and replacing every page.
#[derive(Debug, Default)]
pub struct UpdateBookInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub cover_path: Option<PathBuf>,
    pub document_path: Option<PathBuf>,
}

/// Coordinates the book asset lifecycle: intake -> conversion -> per-page
/// upload -> record persistence -> scratch cleanup, with best-effort remote
/// cleanup on update and delete. Each call is one-shot; nothing is persisted
/// until the final repository call, and remote uploads that complete before
/// a failure are left behind (their handles are logged for reconciliation).
pub struct BookHandler<R, S, D>
where
    R: BookRepository,
    S: AssetStore,
    D: DocumentRenderer,
{
    pub book_repo: R,
    store: S,
    renderer: D,
    scratch: ScratchStorage,
    render_options: RenderOptions,
}

impl<R, S, D> BookHandler<R, S, D>
where
    R: BookRepository,
    S: AssetStore,
    D: DocumentRenderer,
{
    pub fn new(
        book_repo: R,
        store: S,
        renderer: D,
        scratch: ScratchStorage,
        render_options: RenderOptions,
    ) -> Self {
        BookHandler { book_repo, store, renderer, scratch, render_options }
    }

    #[instrument(skip(self, input))]
    pub async fn create_book(&self, input: NewBookInput) -> Result<Book, AppError> {
        let result = self.run_create(&input).await;

        // Scratch is transient whatever the outcome. The happy path has
        // already removed everything below; this sweep covers error paths.
        self.scratch.discard_file(&input.cover_path).await;
        self.scratch.discard_file(&input.document_path).await;
        self.scratch
            .discard_dir(&self.scratch.pages_dir_for(&input.document_path))
            .await;

        result
    }

    async fn run_create(&self, input: &NewBookInput) -> Result<Book, AppError> {
        // terminal, before any upload happens
        input.fields.validate()?;

        let cover = self
            .store
            .upload(&input.cover_path, COVER_FOLDER, ResourceKind::Image)
            .await?;
        info!(asset_id = %cover.asset_id, "uploaded book cover");
        self.scratch.discard_file(&input.cover_path).await;

        let document = self
            .store
            .upload(&input.document_path, DOCUMENT_FOLDER, ResourceKind::Raw)
            .await?;
        info!(asset_id = %document.asset_id, "uploaded book document");

        let pages = self.render_and_upload_pages(&input.document_path).await?;

        self.scratch.discard_file(&input.document_path).await;

        let insert = BookInsert {
            title: input.fields.title.clone(),
            description: input.fields.description.clone(),
            category: input.fields.category.clone(),
            cover,
            document,
            pages,
        };

        self.book_repo.create_book(&insert).await
    }

    /// Renders the document into its scratch pages directory and uploads the
    /// pages in page order, removing each local file as it is consumed.
    async fn render_and_upload_pages(
        &self,
        document_path: &Path,
    ) -> Result<Vec<StoredAsset>, AppError> {
        let pages_dir = self.scratch.pages_dir_for(document_path);
        let rendered = self
            .renderer
            .render(document_path, &pages_dir, &self.render_options)
            .await?;

        let stem = document_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("document");
        let folder = format!("{}/{}", PAGES_FOLDER, stem);

        let mut pages = Vec::with_capacity(rendered.len());
        for page_path in &rendered {
            let page = self
                .store
                .upload(page_path, &folder, ResourceKind::Image)
                .await?;
            info!(asset_id = %page.asset_id, page = pages.len() + 1, "uploaded rendered page");
            pages.push(page);
            self.scratch.discard_file(page_path).await;
        }
        self.scratch.discard_dir(&pages_dir).await;

        Ok(pages)
    }

    #[instrument(skip(self, input))]
    pub async fn update_book(&self, id: &Uuid, input: UpdateBookInput) -> Result<Book, AppError> {
        let existing = self.book_repo.get_book_by_id(id).await?;

        let result = self.run_update(id, &existing, &input).await;

        if let Some(cover_path) = &input.cover_path {
            self.scratch.discard_file(cover_path).await;
        }
        if let Some(document_path) = &input.document_path {
            self.scratch.discard_file(document_path).await;
            self.scratch
                .discard_dir(&self.scratch.pages_dir_for(document_path))
                .await;
        }

        result
    }

    async fn run_update(
        &self,
        id: &Uuid,
        existing: &Book,
        input: &UpdateBookInput,
    ) -> Result<Book, AppError> {
        let mut changes = BookUpdate {
            title: input.title.clone(),
            description: input.description.clone(),
            category: input.category.clone(),
            ..BookUpdate::default()
        };
        let mut superseded: Vec<AssetHandle> = Vec::new();

        if let Some(cover_path) = &input.cover_path {
            let cover = self
                .store
                .upload(cover_path, COVER_FOLDER, ResourceKind::Image)
                .await?;
            info!(asset_id = %cover.asset_id, "uploaded replacement cover");
            self.scratch.discard_file(cover_path).await;

            superseded.push(AssetHandle::image(&existing.cover_asset_id));
            changes.cover = Some(cover);
        }

        if let Some(document_path) = &input.document_path {
            let document = self
                .store
                .upload(document_path, DOCUMENT_FOLDER, ResourceKind::Raw)
                .await?;
            info!(asset_id = %document.asset_id, "uploaded replacement document");

            let pages = self.render_and_upload_pages(document_path).await?;
            self.scratch.discard_file(document_path).await;

            if let Some(old_document) = &existing.document_asset_id {
                superseded.push(AssetHandle::raw(old_document));
            }
            superseded.extend(existing.page_handles());
            changes.document = Some(DocumentReplacement { document, pages });
        }

        let updated = self.book_repo.update_book(id, &changes).await?;

        // Replaced assets are released only after the record references the
        // new ones, so a failed upload or update never orphans the record.
        if !superseded.is_empty() {
            release_assets(&self.store, &superseded).await;
        }

        Ok(updated)
    }

    /// Removes the record, then makes one independent best-effort delete call
    /// per referenced remote asset. The response reflects the record
    /// deletion alone; remote cleanup failures are logged, not surfaced.
    #[instrument(skip(self))]
    pub async fn delete_book(&self, id: &Uuid) -> Result<Book, AppError> {
        let deleted = self.book_repo.delete_book(id).await?;
        release_assets(&self.store, &deleted.asset_handles()).await;
        Ok(deleted)
    }

    pub async fn get_book_by_id(&self, id: &Uuid) -> Result<Book, AppError> {
        self.book_repo.get_book_by_id(id).await
    }

    pub async fn list_books(&self) -> Result<Vec<Book>, AppError> {
        self.book_repo.list_books().await
    }

    pub async fn list_books_by_category(&self, category: &str) -> Result<Vec<Book>, AppError> {
        self.book_repo.list_books_by_category(category).await
    }

    pub async fn search_books(&self, query: &str) -> Result<Vec<Book>, AppError> {
        self.book_repo.search_books(query).await
    }
}
