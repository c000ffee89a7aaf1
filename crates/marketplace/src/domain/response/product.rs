use crate::model::product::{Product, ProductWithSeller};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: i32,
    pub seller_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(value: Product) -> Self {
        ProductResponse {
            id: value.id,
            name: value.name,
            description: value.description,
            price: value.price,
            stock: value.stock,
            seller_id: value.seller_id,
            seller_name: None,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<ProductWithSeller> for ProductResponse {
    fn from(value: ProductWithSeller) -> Self {
        ProductResponse {
            seller_name: Some(value.seller_name),
            ..ProductResponse::from(value.product)
        }
    }
}
