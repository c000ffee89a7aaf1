use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CartItem {
    pub id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

/// A cart line joined with its product; product columns are null once the product is gone.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CartLine {
    #[sqlx(flatten)]
    pub item: CartItem,
    pub product_name: Option<String>,
    pub product_price: Option<Decimal>,
    pub product_stock: Option<i32>,
    pub seller_id: Option<i32>,
}

/// Cart line as read under lock at checkout.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct CartSnapshotRow {
    pub cart_item_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub product_name: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<i32>,
    pub seller_id: Option<i32>,
}
