use crate::{
    abstract_trait::JwtServiceTrait,
    domain::{AuthenticatedUser, Role},
    errors::ServiceError,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i32,
    pub email: String,
    pub role: Role,
    pub exp: usize,
    pub iat: usize,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    jwt_secret: String,
    ttl: Duration,
}

impl JwtConfig {
    pub fn new(jwt_secret: &str, ttl_hours: i64) -> Self {
        JwtConfig {
            jwt_secret: jwt_secret.to_string(),
            ttl: Duration::hours(ttl_hours),
        }
    }
}

impl JwtServiceTrait for JwtConfig {
    fn generate_token(&self, user: &AuthenticatedUser) -> Result<String, ServiceError> {
        let now = Utc::now();
        let claims = Claims {
            user_id: user.user_id,
            email: user.email.clone(),
            role: user.role,
            iat: now.timestamp() as usize,
            exp: (now + self.ttl).timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )
        .map_err(ServiceError::Jwt)
    }

    fn verify_token(&self, token: &str) -> Result<AuthenticatedUser, ServiceError> {
        let decoding_key = DecodingKey::from_secret(self.jwt_secret.as_ref());
        let token_data =
            decode::<Claims>(token, &decoding_key, &Validation::default()).map_err(|err| {
                match err.kind() {
                    ErrorKind::ExpiredSignature => ServiceError::TokenExpired,
                    _ => ServiceError::Jwt(err),
                }
            })?;

        let Claims {
            user_id,
            email,
            role,
            ..
        } = token_data.claims;

        Ok(AuthenticatedUser {
            user_id,
            email,
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seller() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: 12,
            email: "seller@example.com".into(),
            role: Role::Seller,
        }
    }

    #[test]
    fn issued_token_verifies_to_same_identity() {
        let jwt = JwtConfig::new("test-secret", 24);
        let token = jwt.generate_token(&seller()).expect("token");

        let identity = jwt.verify_token(&token).expect("verified");
        assert_eq!(identity, seller());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let issuer = JwtConfig::new("issuer-secret", 24);
        let verifier = JwtConfig::new("other-secret", 24);
        let token = issuer.generate_token(&seller()).expect("token");

        assert!(matches!(
            verifier.verify_token(&token),
            Err(ServiceError::Jwt(_))
        ));
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let jwt = JwtConfig::new("test-secret", -2);
        let token = jwt.generate_token(&seller()).expect("token");

        assert!(matches!(
            jwt.verify_token(&token),
            Err(ServiceError::TokenExpired)
        ));
    }
}
