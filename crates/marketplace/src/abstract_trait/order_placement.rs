use crate::{
    domain::placement::{OrderDraft, OrderItemDraft},
    model::{cart_item::CartSnapshotRow, order::Order, order_item::OrderItem},
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynOrderPlacementStore = Arc<dyn OrderPlacementStoreTrait + Send + Sync>;

/// Opens storage sessions for order placement.
#[async_trait]
pub trait OrderPlacementStoreTrait {
    async fn begin(&self) -> Result<Box<dyn OrderPlacementSession>, RepositoryError>;
}

/// One transaction scope. Nothing written through a session is visible to others
/// until `commit` succeeds; dropping a session without committing rolls it back.
#[async_trait]
pub trait OrderPlacementSession: Send {
    /// The buyer's cart lines in ascending product id, locked for the rest of the session.
    /// Product columns are `None` when the product no longer exists.
    async fn cart_snapshot(
        &mut self,
        user_id: i32,
    ) -> Result<Vec<CartSnapshotRow>, RepositoryError>;

    async fn insert_order(&mut self, draft: &OrderDraft) -> Result<Order, RepositoryError>;

    async fn insert_order_item(
        &mut self,
        order_id: i32,
        item: &OrderItemDraft,
    ) -> Result<OrderItem, RepositoryError>;

    /// Subtracts `quantity` only while stock covers it. Returns whether a row matched.
    async fn decrement_stock(
        &mut self,
        product_id: i32,
        quantity: i32,
    ) -> Result<bool, RepositoryError>;

    /// Deletes the given cart lines of the buyer and reports how many were removed.
    async fn clear_cart(
        &mut self,
        user_id: i32,
        cart_item_ids: &[i32],
    ) -> Result<u64, RepositoryError>;

    async fn commit(self: Box<Self>) -> Result<(), RepositoryError>;

    async fn rollback(self: Box<Self>) -> Result<(), RepositoryError>;
}
