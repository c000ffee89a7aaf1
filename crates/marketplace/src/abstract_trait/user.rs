use crate::{domain::requests::auth::CreateUserRecord, model::user::User};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynUserRepository = Arc<dyn UserRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait UserRepositoryTrait {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;
    async fn create_user(&self, req: &CreateUserRecord) -> Result<User, RepositoryError>;
}
