use crate::model::user::User;
use serde::{Deserialize, Serialize};
use shared::domain::Role;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl UserResponse {
    pub fn new(user: User, role: Role) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}
