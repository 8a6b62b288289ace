use actix_web::{post, web, Responder};

use crate::entities::user::LoginRequest;
use crate::errors::AuthError;
use crate::handlers::envelope;
use crate::AppState;

#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<impl Responder, AuthError> {
    let response = state.auth_handler.login(request.into_inner()).await?;
    Ok(envelope::success("Login complete", response))
}
