use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use actix_web::{delete, get, post, put, web, Responder};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    entities::book::NewBookFields,
    errors::AppError,
    handlers::envelope,
    use_cases::{
        books::{NewBookInput, UpdateBookInput},
        extractors::AdminClaims,
    },
    AppState,
};

#[derive(Debug, MultipartForm)]
pub struct BookUploadForm {
    pub title: Option<Text<String>>,
    pub description: Option<Text<String>>,
    pub category: Option<Text<String>>,

    #[multipart(limit = "10MB")]
    pub cover: Option<TempFile>,

    #[multipart(limit = "50MB")]
    pub document: Option<TempFile>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[post("")]
pub async fn create_book(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    MultipartForm(form): MultipartForm<BookUploadForm>,
) -> Result<impl Responder, AppError> {
    // Fail fast before any bytes leave the host
    let title = form.title.ok_or_else(|| AppError::missing_field("title"))?.into_inner();
    let description = form
        .description
        .ok_or_else(|| AppError::missing_field("description"))?
        .into_inner();
    let category = form
        .category
        .ok_or_else(|| AppError::missing_field("category"))?
        .into_inner();
    let cover = form.cover.ok_or_else(|| AppError::missing_field("cover"))?;
    let document = form.document.ok_or_else(|| AppError::missing_field("document"))?;

    let cover_path = state.scratch.stash_image(&cover, "cover").await?;
    let document_path = state.scratch.stash_document(&document, "document").await?;

    let input = NewBookInput {
        fields: NewBookFields { title, description, category },
        cover_path,
        document_path,
    };

    let book = state.book_handler.create_book(input).await?;
    Ok(envelope::success("Book uploaded successfully", book))
}

#[get("")]
pub async fn list_books(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let books = state.book_handler.list_books().await?;
    Ok(envelope::success("Fetched successfully", books))
}

#[get("/search")]
pub async fn search_books(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> Result<impl Responder, AppError> {
    let term = query.q.clone().unwrap_or_default();
    let books = state.book_handler.search_books(&term).await?;
    Ok(envelope::success("Fetched successfully", books))
}

#[get("/category/{category}")]
pub async fn list_books_by_category(
    state: web::Data<AppState>,
    category: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let books = state.book_handler.list_books_by_category(&category).await?;
    Ok(envelope::success("Fetched successfully", books))
}

#[get("/{id}")]
pub async fn get_book_by_id(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let book = state.book_handler.get_book_by_id(&id).await?;
    Ok(envelope::success("Fetched successfully", book))
}

#[put("/{id}")]
pub async fn update_book(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    MultipartForm(form): MultipartForm<BookUploadForm>,
) -> Result<impl Responder, AppError> {
    let mut input = UpdateBookInput {
        title: form.title.map(Text::into_inner),
        description: form.description.map(Text::into_inner),
        category: form.category.map(Text::into_inner),
        ..UpdateBookInput::default()
    };

    if let Some(cover) = &form.cover {
        input.cover_path = Some(state.scratch.stash_image(cover, "cover").await?);
    }
    if let Some(document) = &form.document {
        input.document_path = Some(state.scratch.stash_document(document, "document").await?);
    }

    let book = state.book_handler.update_book(&id, input).await?;
    Ok(envelope::success("Book updated successfully", book))
}

#[delete("/{id}")]
pub async fn delete_book(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    state.book_handler.delete_book(&id).await?;
    Ok(envelope::success_message("Book deleted successfully"))
}
