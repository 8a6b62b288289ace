use actix_web::{delete, get, post, web, Responder};
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::contact::NewContactRequest,
    errors::AppError,
    handlers::envelope,
    repositories::contact::ContactRepository,
    use_cases::extractors::AdminClaims,
    AppState,
};

#[post("")]
pub async fn create_contact_message(
    state: web::Data<AppState>,
    request: web::Json<NewContactRequest>,
) -> Result<impl Responder, AppError> {
    request.validate()?;

    let message = state.contact_repo.create_contact_message(&request).await?;
    Ok(envelope::success("Contact details sent successfully", message))
}

#[get("")]
pub async fn list_contact_messages(
    _claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let messages = state.contact_repo.list_contact_messages().await?;
    Ok(envelope::success("Fetched successfully", messages))
}

#[delete("/{id}")]
pub async fn delete_contact_message(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    state.contact_repo.delete_contact_message(&id).await?;
    Ok(envelope::success_message("Contact message deleted successfully"))
}
