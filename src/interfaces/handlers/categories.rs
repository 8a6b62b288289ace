use actix_web::{get, post, put, web, Responder};
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::category::CategoryRequest,
    errors::AppError,
    handlers::envelope,
    repositories::category::CategoryRepository,
    use_cases::extractors::AdminClaims,
    AppState,
};

#[post("")]
pub async fn create_category(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    request: web::Json<CategoryRequest>,
) -> Result<impl Responder, AppError> {
    request.validate()?;

    let category = state.category_repo.create_category(&request.title).await?;
    Ok(envelope::success("Category saved successfully", category))
}

#[get("")]
pub async fn list_categories(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let categories = state.category_repo.list_categories().await?;
    Ok(envelope::success("Fetched successfully", categories))
}

#[put("/{id}")]
pub async fn update_category(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    request: web::Json<CategoryRequest>,
) -> Result<impl Responder, AppError> {
    request.validate()?;

    let category = state.category_repo.update_category(&id, &request.title).await?;
    Ok(envelope::success("Category updated successfully", category))
}
