use actix_web::{delete, get, post, web, Responder};
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::comment::{NewCommentRequest, ReplyRequest},
    errors::AppError,
    handlers::envelope,
    repositories::comment::CommentRepository,
    use_cases::extractors::AdminClaims,
    AppState,
};

#[post("/{book_id}")]
pub async fn create_comment(
    state: web::Data<AppState>,
    book_id: web::Path<Uuid>,
    request: web::Json<NewCommentRequest>,
) -> Result<impl Responder, AppError> {
    request.validate()?;

    let comment = state
        .comment_repo
        .create_comment(&book_id, &request.name, &request.email, &request.body)
        .await?;

    Ok(envelope::success("Comment saved successfully", comment))
}

#[get("/book/{book_id}")]
pub async fn list_comments_for_book(
    state: web::Data<AppState>,
    book_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let comments = state.comment_repo.list_comments_for_book(&book_id).await?;
    Ok(envelope::success("Fetched successfully", comments))
}

#[get("")]
pub async fn list_all_comments(
    _claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let comments = state.comment_repo.list_all_comments().await?;
    Ok(envelope::success("Fetched successfully", comments))
}

#[post("/{id}/reply")]
pub async fn reply_to_comment(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    request: web::Json<ReplyRequest>,
) -> Result<impl Responder, AppError> {
    request.validate()?;

    let comment = state.comment_repo.set_reply(&id, &request.reply).await?;
    Ok(envelope::success("Reply saved successfully", comment))
}

#[delete("/{id}")]
pub async fn delete_comment(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    state.comment_repo.delete_comment(&id).await?;
    Ok(envelope::success_message("Comment deleted successfully"))
}
