//! Seller order views and fulfilment over an in-process ledger.

use super::{SellerOrderService, SellerOrderServiceDeps};
use crate::{
    abstract_trait::seller::{SellerOrderServiceTrait, SellerRepositoryTrait},
    domain::status::FulfillmentStatus,
    model::{
        dashboard::DashboardStats,
        order::{Order, OrderWithBuyer},
        order_item::{OrderItem, OrderItemDetail},
    },
};
use async_trait::async_trait;
use chrono::Utc;
use prometheus_client::registry::Registry;
use rust_decimal_macros::dec;
use shared::{
    domain::{AuthenticatedUser, Role},
    errors::{RepositoryError, ServiceError},
};
use std::sync::{Arc, Mutex};

const SELLER: i32 = 7;
const RIVAL: i32 = 8;
const BUYER: i32 = 3;

struct Ledger {
    orders: Vec<Order>,
    items: Mutex<Vec<OrderItemDetail>>,
}

impl Ledger {
    fn status_of(&self, item_id: i32) -> Option<String> {
        let items = self.items.lock().unwrap();
        items
            .iter()
            .find(|detail| detail.item.id == item_id)
            .map(|detail| detail.item.status.clone())
    }
}

#[async_trait]
impl SellerRepositoryTrait for Ledger {
    async fn find_orders(
        &self,
        seller_id: i32,
        pending_only: bool,
    ) -> Result<Vec<OrderWithBuyer>, RepositoryError> {
        let items = self.items.lock().unwrap();
        Ok(self
            .orders
            .iter()
            .filter(|order| {
                items.iter().any(|detail| {
                    detail.item.order_id == order.id
                        && detail.seller_id == seller_id
                        && (!pending_only || detail.item.status == "pending")
                })
            })
            .map(|order| OrderWithBuyer {
                order: order.clone(),
                buyer_name: "Ada".into(),
                buyer_email: "ada@example.com".into(),
            })
            .collect())
    }

    async fn find_items(
        &self,
        seller_id: i32,
        order_ids: &[i32],
    ) -> Result<Vec<OrderItemDetail>, RepositoryError> {
        let items = self.items.lock().unwrap();
        Ok(items
            .iter()
            .filter(|detail| {
                detail.seller_id == seller_id && order_ids.contains(&detail.item.order_id)
            })
            .cloned()
            .collect())
    }

    async fn update_item_status(
        &self,
        seller_id: i32,
        item_id: i32,
        status: FulfillmentStatus,
    ) -> Result<Option<OrderItemDetail>, RepositoryError> {
        let mut items = self.items.lock().unwrap();
        Ok(items
            .iter_mut()
            .find(|detail| detail.item.id == item_id && detail.seller_id == seller_id)
            .map(|detail| {
                detail.item.status = status.as_str().to_string();
                detail.clone()
            }))
    }

    async fn dashboard_stats(&self, seller_id: i32) -> Result<DashboardStats, RepositoryError> {
        let items = self.items.lock().unwrap();
        let mine: Vec<_> = items.iter().filter(|d| d.seller_id == seller_id).collect();
        let count = |status: &str| mine.iter().filter(|d| d.item.status == status).count() as i64;
        Ok(DashboardStats {
            total_products: 2,
            total_order_items: mine.len() as i64,
            pending_order_items: count("pending"),
            completed_order_items: count("completed"),
            total_revenue: mine
                .iter()
                .map(|d| d.item.price * rust_decimal::Decimal::from(d.item.quantity))
                .sum(),
            low_stock_products: 1,
        })
    }
}

fn line(id: i32, order_id: i32, seller_id: i32, quantity: i32) -> OrderItemDetail {
    OrderItemDetail {
        item: OrderItem {
            id,
            order_id,
            product_id: 100 + seller_id,
            quantity,
            price: dec!(10.00),
            status: "pending".into(),
        },
        product_name: format!("Product of seller {seller_id}"),
        seller_id,
    }
}

fn order(id: i32) -> Order {
    Order {
        id,
        user_id: BUYER,
        total: dec!(30.00),
        status: "pending".into(),
        created_at: Utc::now(),
    }
}

fn user(user_id: i32, role: Role) -> AuthenticatedUser {
    AuthenticatedUser {
        user_id,
        email: format!("user{user_id}@example.com"),
        role,
    }
}

fn seller(user_id: i32) -> AuthenticatedUser {
    user(user_id, Role::Seller)
}

/// Order 1 mixes both sellers; order 2 belongs to the seller alone.
async fn service() -> (SellerOrderService, Arc<Ledger>) {
    let ledger = Arc::new(Ledger {
        orders: vec![order(1), order(2)],
        items: Mutex::new(vec![
            line(1, 1, SELLER, 2),
            line(2, 1, RIVAL, 1),
            line(3, 2, SELLER, 1),
        ]),
    });
    let service = SellerOrderService::new(SellerOrderServiceDeps {
        repository: ledger.clone(),
        registry: Arc::new(tokio::sync::Mutex::new(Registry::default())),
    })
    .await;
    (service, ledger)
}

#[tokio::test]
async fn orders_carry_only_the_sellers_own_lines() {
    let (service, _) = service().await;

    let orders = service.find_orders(&seller(SELLER)).await.unwrap().data;
    assert_eq!(orders.len(), 2);

    let mixed = orders.iter().find(|o| o.id == 1).unwrap();
    assert_eq!(mixed.buyer_name, "Ada");
    assert_eq!(mixed.items.len(), 1);
    assert!(mixed.items.iter().all(|i| i.product.seller_id == SELLER));

    let rival = service.find_orders(&seller(RIVAL)).await.unwrap().data;
    assert_eq!(rival.len(), 1);
    assert_eq!(rival[0].items[0].id, 2);
}

#[tokio::test]
async fn completing_a_line_moves_it_out_of_pending() {
    let (service, ledger) = service().await;

    let updated = service
        .update_item_status(&seller(SELLER), 3, "completed")
        .await
        .unwrap();
    assert_eq!(updated.data.status, "completed");
    assert_eq!(ledger.status_of(3).as_deref(), Some("completed"));

    let pending = service
        .find_pending_orders(&seller(SELLER))
        .await
        .unwrap()
        .data;
    assert_eq!(pending.iter().map(|o| o.id).collect::<Vec<_>>(), vec![1]);
}

#[tokio::test]
async fn status_outside_the_known_set_is_a_validation_error() {
    let (service, ledger) = service().await;

    let err = service
        .update_item_status(&seller(SELLER), 1, "shipped")
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Validation(_)));
    assert_eq!(ledger.status_of(1).as_deref(), Some("pending"));
}

#[tokio::test]
async fn another_sellers_line_is_not_found() {
    let (service, ledger) = service().await;

    let err = service
        .update_item_status(&seller(SELLER), 2, "completed")
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::NotFound(_)));
    assert_eq!(ledger.status_of(2).as_deref(), Some("pending"));
}

#[tokio::test]
async fn buyers_cannot_read_seller_views() {
    let (service, ledger) = service().await;
    let buyer = user(SELLER, Role::Buyer);

    assert!(matches!(
        service.find_orders(&buyer).await.unwrap_err(),
        ServiceError::Forbidden(_)
    ));
    assert!(matches!(
        service.dashboard_stats(&buyer).await.unwrap_err(),
        ServiceError::Forbidden(_)
    ));
    assert!(matches!(
        service
            .update_item_status(&buyer, 1, "completed")
            .await
            .unwrap_err(),
        ServiceError::Forbidden(_)
    ));
    assert_eq!(ledger.status_of(1).as_deref(), Some("pending"));
}

#[tokio::test]
async fn dashboard_reports_the_sellers_figures() {
    let (service, _) = service().await;
    service
        .update_item_status(&seller(SELLER), 1, "completed")
        .await
        .unwrap();

    let stats = service.dashboard_stats(&seller(SELLER)).await.unwrap().data;

    assert_eq!(stats.total_products, 2);
    assert_eq!(stats.total_order_items, 2);
    assert_eq!(stats.pending_order_items, 1);
    assert_eq!(stats.completed_order_items, 1);
    assert_eq!(stats.total_revenue, dec!(30.00));
    assert_eq!(stats.low_stock_products, 1);
}
