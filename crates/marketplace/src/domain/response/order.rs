use crate::model::{
    order::{Order, OrderWithBuyer},
    order_item::{OrderItem, OrderItemDetail},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductSummary {
    pub id: i32,
    pub name: String,
    pub seller_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItemResponse {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub price: Decimal,
    pub status: String,
    pub product: ProductSummary,
}

impl OrderItemResponse {
    pub fn from_parts(item: OrderItem, product: ProductSummary) -> Self {
        Self {
            id: item.id,
            order_id: item.order_id,
            product_id: item.product_id,
            quantity: item.quantity,
            price: item.price,
            status: item.status,
            product,
        }
    }
}

impl From<OrderItemDetail> for OrderItemResponse {
    fn from(value: OrderItemDetail) -> Self {
        let product = ProductSummary {
            id: value.item.product_id,
            name: value.product_name,
            seller_id: value.seller_id,
        };
        OrderItemResponse::from_parts(value.item, product)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub id: i32,
    pub user_id: i32,
    pub total: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItemResponse>,
}

impl OrderResponse {
    pub fn from_parts(order: Order, items: Vec<OrderItemResponse>) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            total: order.total,
            status: order.status,
            created_at: order.created_at,
            items,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SellerOrderResponse {
    pub id: i32,
    pub user_id: i32,
    pub buyer_name: String,
    pub buyer_email: String,
    pub total: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
    /// Only the lines for the requesting seller's products.
    pub items: Vec<OrderItemResponse>,
}

impl SellerOrderResponse {
    pub fn from_parts(value: OrderWithBuyer, items: Vec<OrderItemResponse>) -> Self {
        Self {
            id: value.order.id,
            user_id: value.order.user_id,
            buyer_name: value.buyer_name,
            buyer_email: value.buyer_email,
            total: value.order.total,
            status: value.order.status,
            created_at: value.order.created_at,
            items,
        }
    }
}
