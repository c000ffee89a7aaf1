use crate::domain::{
    requests::auth::{LoginRequest, RegisterRequest},
    response::auth::AuthResponse,
};
use async_trait::async_trait;
use shared::{domain::ApiResponse, errors::ServiceError};
use std::sync::Arc;

pub type DynAuthService = Arc<dyn AuthServiceTrait + Send + Sync>;

#[async_trait]
pub trait AuthServiceTrait {
    async fn register_user(
        &self,
        req: &RegisterRequest,
    ) -> Result<ApiResponse<AuthResponse>, ServiceError>;
    async fn login_user(&self, req: &LoginRequest)
    -> Result<ApiResponse<AuthResponse>, ServiceError>;
}
