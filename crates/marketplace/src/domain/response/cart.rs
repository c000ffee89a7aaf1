use crate::model::{
    cart_item::{CartItem, CartLine},
    product::Product,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CartProductResponse {
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
    pub seller_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CartItemResponse {
    pub id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    /// Absent when the product has been removed from the catalog.
    pub product: Option<CartProductResponse>,
}

impl CartItemResponse {
    pub fn from_parts(item: CartItem, product: &Product) -> Self {
        Self {
            id: item.id,
            user_id: item.user_id,
            product_id: item.product_id,
            quantity: item.quantity,
            created_at: item.created_at,
            product: Some(CartProductResponse {
                name: product.name.clone(),
                price: product.price,
                stock: product.stock,
                seller_id: product.seller_id,
            }),
        }
    }
}

impl From<CartLine> for CartItemResponse {
    fn from(value: CartLine) -> Self {
        let product = match (
            value.product_name,
            value.product_price,
            value.product_stock,
            value.seller_id,
        ) {
            (Some(name), Some(price), Some(stock), Some(seller_id)) => Some(CartProductResponse {
                name,
                price,
                stock,
                seller_id,
            }),
            _ => None,
        };

        CartItemResponse {
            id: value.item.id,
            user_id: value.item.user_id,
            product_id: value.item.product_id,
            quantity: value.item.quantity,
            created_at: value.item.created_at,
            product,
        }
    }
}
