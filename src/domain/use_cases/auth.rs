use validator::Validate;

use crate::entities::token::LoginResponse;
use crate::entities::user::LoginRequest;
use crate::errors::AuthError;
use crate::interfaces::repositories::user::UserRepository;
use crate::auth::jwt::JwtService;
use crate::auth::password::verify_password;

pub struct AuthHandler<R>
where
    R: UserRepository,
{
    pub user_repo: R,
    pub token_service: JwtService,
}

impl<R> AuthHandler<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: R, token_service: JwtService) -> Self {
        AuthHandler { user_repo, token_service }
    }

    /// Validates credentials and issues a bearer token carrying the user's
    /// role claim.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AuthError> {
        request.validate()?;

        let user = self.user_repo.get_user_by_email(&request.email)
            .await
            .map_err(|_| AuthError::WrongCredentials)?
            .ok_or(AuthError::WrongCredentials)?;

        let is_password_valid = verify_password(&request.password, &user.password_hash)?;
        if !is_password_valid {
            return Err(AuthError::WrongCredentials);
        }

        let access_token = self.token_service.create_jwt(&user).map_err(|e| {
            tracing::warn!("Failed to create JWT: {}", e);
            AuthError::TokenCreation
        })?;

        tracing::info!(user = %user.email, "user logged in");
        Ok(LoginResponse::new(access_token))
    }
}
