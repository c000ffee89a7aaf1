use crate::domain::{
    response::order::ProductSummary,
    status::{FulfillmentStatus, OrderStatus},
};
use rust_decimal::Decimal;

/// A cart line whose product was still live when the cart was locked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSnapshotLine {
    pub cart_item_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub product_name: String,
    pub price: Decimal,
    pub stock: i32,
    pub seller_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanLine {
    pub product: ProductSummary,
    pub quantity: i32,
    pub price: Decimal,
}

/// Lines are sorted by ascending product id, one per product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderPlan {
    pub lines: Vec<PlanLine>,
    pub cart_item_ids: Vec<i32>,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItemDraft {
    pub product: ProductSummary,
    pub quantity: i32,
    pub price: Decimal,
    pub status: FulfillmentStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    pub user_id: i32,
    pub status: OrderStatus,
    pub total: Decimal,
    pub items: Vec<OrderItemDraft>,
}
