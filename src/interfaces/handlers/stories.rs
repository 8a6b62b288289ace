use actix_web::{delete, get, post, web, Responder};
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::story::NewStoryRequest,
    errors::AppError,
    handlers::envelope,
    repositories::story::StoryRepository,
    use_cases::extractors::AdminClaims,
    AppState,
};

#[post("")]
pub async fn create_story(
    state: web::Data<AppState>,
    request: web::Json<NewStoryRequest>,
) -> Result<impl Responder, AppError> {
    request.validate()?;

    let story = state.story_repo.create_story(&request).await?;
    Ok(envelope::success("Story submitted successfully", story))
}

#[get("")]
pub async fn list_stories(
    _claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let stories = state.story_repo.list_stories().await?;
    Ok(envelope::success("Fetched successfully", stories))
}

#[delete("/{id}")]
pub async fn delete_story(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    state.story_repo.delete_story(&id).await?;
    Ok(envelope::success_message("Story deleted successfully"))
}
