use actix_web::{delete, get, post, web, Responder};
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::video::NewVideoRequest,
    errors::AppError,
    handlers::envelope,
    repositories::video::VideoRepository,
    use_cases::extractors::AdminClaims,
    AppState,
};

#[post("")]
pub async fn create_video(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    request: web::Json<NewVideoRequest>,
) -> Result<impl Responder, AppError> {
    request.validate()?;

    let video = state.video_repo.create_video(&request.link).await?;
    Ok(envelope::success("Link saved successfully", video))
}

#[get("")]
pub async fn list_videos(
    _claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let videos = state.video_repo.list_videos().await?;
    Ok(envelope::success("Fetched successfully", videos))
}

#[delete("/{id}")]
pub async fn delete_video(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    state.video_repo.delete_video(&id).await?;
    Ok(envelope::success_message("Video deleted successfully"))
}
