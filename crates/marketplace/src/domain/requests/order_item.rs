use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateOrderItemStatusRequest {
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,
}
