use actix_web::{get, web, Responder};

use crate::{
    entities::visitor::VisitorCount,
    errors::AppError,
    handlers::envelope,
    repositories::visitor::VisitorRepository,
    AppState,
};

#[get("")]
pub async fn count_visitor(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let count = state.visitor_repo.increment().await?;
    Ok(envelope::success("Visitor counted", VisitorCount { count }))
}
