use jsonwebtoken::{encode, Header, decode, Validation, TokenData, Algorithm};
use chrono::{Utc, Duration};

use crate::entities::token::Claims;
use crate::entities::user::User;
use crate::settings::{AppConfig, JwtKeys};
use crate::errors::AuthError;

const JWT_ALGORITHM: Algorithm = Algorithm::HS512;

#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    expiration: Duration,
}

impl JwtService {
    pub fn new(config: &AppConfig) -> Self {
        JwtService {
            keys: JwtKeys::from(config),
            expiration: Duration::hours(config.jwt_expiration_hours),
        }
    }

    pub fn create_jwt(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = (now + self.expiration).timestamp() as usize;

        let claims = Claims {
            sub: user.id.to_string(),
            name: user.name.clone(),
            role: user.role.clone(),
            exp,
            iat: now.timestamp() as usize,
        };

        encode(&Header::new(JWT_ALGORITHM), &claims, &self.keys.encoding).map_err(AuthError::from)
    }

    pub fn decode_jwt(&self, token: &str) -> Result<TokenData<Claims>, AuthError> {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = true;

        decode::<Claims>(token, &self.keys.decoding, &validation).map_err(AuthError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn service(hours: i64) -> JwtService {
        let config = AppConfig {
            jwt_secret: "test_secret_long_enough_for_hs512_signing".to_string(),
            jwt_expiration_hours: hours,
            ..AppConfig::default()
        };
        JwtService::new(&config)
    }

    fn admin_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Admin".to_string(),
            email: "admin@example.com".to_string(),
            password_hash: String::new(),
            role: "admin".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn round_trips_claims() {
        let service = service(24);
        let user = admin_user();

        let token = service.create_jwt(&user).unwrap();
        let decoded = service.decode_jwt(&token).unwrap().claims;

        assert_eq!(decoded.sub, user.id.to_string());
        assert_eq!(decoded.role, "admin");
        assert_eq!(decoded.name, "Admin");
    }

    #[test]
    fn rejects_expired_token() {
        let service = service(-1);
        let token = service.create_jwt(&admin_user()).unwrap();

        assert!(matches!(
            service.decode_jwt(&token),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let token = service(24).create_jwt(&admin_user()).unwrap();

        let other = JwtService::new(&AppConfig {
            jwt_secret: "a_completely_different_secret_of_enough_length".to_string(),
            ..AppConfig::default()
        });

        assert!(matches!(other.decode_jwt(&token), Err(AuthError::InvalidToken)));
    }
}
