use actix_multipart::form::{tempfile::TempFile, MultipartForm};
use actix_web::{get, post, web, Responder};

use crate::{
    entities::gallery_image::BulkDeleteRequest,
    errors::AppError,
    handlers::envelope,
    use_cases::extractors::AdminClaims,
    AppState,
};

#[derive(Debug, MultipartForm)]
pub struct GalleryUploadForm {
    #[multipart(rename = "images", limit = "10MB")]
    pub images: Vec<TempFile>,
}

#[post("")]
pub async fn add_gallery_images(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    MultipartForm(form): MultipartForm<GalleryUploadForm>,
) -> Result<impl Responder, AppError> {
    if form.images.is_empty() {
        return Err(AppError::missing_field("images"));
    }

    let mut image_paths = Vec::with_capacity(form.images.len());
    for image in &form.images {
        image_paths.push(state.scratch.stash_image(image, "gallery").await?);
    }

    let saved = state.gallery_handler.add_images(image_paths).await?;
    Ok(envelope::success("Images uploaded successfully", saved))
}

#[get("")]
pub async fn list_gallery_images(
    _claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let images = state.gallery_handler.list_images().await?;
    Ok(envelope::success("Fetched successfully", images))
}

#[post("/bulk-delete")]
pub async fn bulk_delete_gallery_images(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    request: web::Json<BulkDeleteRequest>,
) -> Result<impl Responder, AppError> {
    let removed = state.gallery_handler.bulk_delete(&request.ids).await?;
    Ok(envelope::success("Bulk delete successful", serde_json::json!({ "removed": removed })))
}
