//! Cart rules over in-process repositories.

use super::{CartService, CartServiceDeps};
use crate::{
    abstract_trait::{
        cart::{CartRepositoryTrait, CartServiceTrait},
        product::ProductQueryRepositoryTrait,
    },
    domain::requests::cart::AddToCartRequest,
    model::{
        cart_item::{CartItem, CartLine},
        product::{Product, ProductWithSeller},
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

const BUYER: i32 = 3;
const LAMP: i32 = 40;

struct OneProduct(Product);

#[async_trait]
impl ProductQueryRepositoryTrait for OneProduct {
    async fn find_live(&self) -> Result<Vec<ProductWithSeller>, RepositoryError> {
        Ok(vec![])
    }

    async fn find_live_by_id(&self, id: i32) -> Result<Option<ProductWithSeller>, RepositoryError> {
        Ok((id == self.0.id).then(|| ProductWithSeller {
            product: self.0.clone(),
            seller_name: "Lamp shop".into(),
        }))
    }

    async fn find_by_seller(&self, _seller_id: i32) -> Result<Vec<Product>, RepositoryError> {
        Ok(vec![])
    }
}

#[derive(Default)]
struct Lines(Mutex<Vec<CartItem>>);

#[async_trait]
impl CartRepositoryTrait for Lines {
    async fn find_lines(&self, user_id: i32) -> Result<Vec<CartLine>, RepositoryError> {
        let lines = self.0.lock().unwrap();
        Ok(lines
            .iter()
            .filter(|item| item.user_id == user_id)
            .map(|item| CartLine {
                item: item.clone(),
                product_name: None,
                product_price: None,
                product_stock: None,
                seller_id: None,
            })
            .collect())
    }

    async fn find_by_product(
        &self,
        user_id: i32,
        product_id: i32,
    ) -> Result<Option<CartItem>, RepositoryError> {
        let lines = self.0.lock().unwrap();
        Ok(lines
            .iter()
            .find(|item| item.user_id == user_id && item.product_id == product_id)
            .cloned())
    }

    async fn insert_item(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<CartItem, RepositoryError> {
        let mut lines = self.0.lock().unwrap();
        let item = CartItem {
            id: lines.len() as i32 + 1,
            user_id,
            product_id,
            quantity,
            created_at: Utc::now(),
        };
        lines.push(item.clone());
        Ok(item)
    }

    async fn set_quantity(&self, id: i32, quantity: i32) -> Result<CartItem, RepositoryError> {
        let mut lines = self.0.lock().unwrap();
        let item = lines
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(RepositoryError::NotFound)?;
        item.quantity = quantity;
        Ok(item.clone())
    }

    async fn delete_item(&self, user_id: i32, id: i32) -> Result<bool, RepositoryError> {
        let mut lines = self.0.lock().unwrap();
        let before = lines.len();
        lines.retain(|item| !(item.id == id && item.user_id == user_id));
        Ok(lines.len() < before)
    }
}

fn lamp(stock: i32) -> Product {
    let now = Utc::now();
    Product {
        id: LAMP,
        name: "Desk lamp".into(),
        description: String::new(),
        price: dec!(24.50),
        stock,
        seller_id: 9,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }
}

fn buyer(user_id: i32) -> AuthenticatedUser {
    AuthenticatedUser {
        user_id,
        email: "cart@example.com".into(),
        role: Role::Buyer,
    }
}

async fn service(stock: i32) -> (CartService, Arc<Lines>) {
    let lines = Arc::new(Lines::default());
    let service = CartService::new(CartServiceDeps {
        cart: lines.clone(),
        products: Arc::new(OneProduct(lamp(stock))),
        registry: Arc::new(tokio::sync::Mutex::new(Registry::default())),
    })
    .await;
    (service, lines)
}

fn add(product_id: i32, quantity: i32) -> AddToCartRequest {
    AddToCartRequest {
        product_id,
        quantity,
    }
}

#[tokio::test]
async fn second_add_merges_into_the_existing_line() {
    let (service, lines) = service(5).await;

    let first = service.add_to_cart(&buyer(BUYER), BUYER, &add(LAMP, 2)).await.unwrap();
    let second = service.add_to_cart(&buyer(BUYER), BUYER, &add(LAMP, 3)).await.unwrap();

    assert!(first.created);
    assert!(!second.created);
    assert_eq!(second.response.data.quantity, 5);
    assert_eq!(lines.0.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn merged_quantity_may_not_exceed_stock() {
    let (service, lines) = service(4).await;
    service.add_to_cart(&buyer(BUYER), BUYER, &add(LAMP, 3)).await.unwrap();

    let err = service
        .add_to_cart(&buyer(BUYER), BUYER, &add(LAMP, 2))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::InsufficientStock(_)));
    assert_eq!(lines.0.lock().unwrap()[0].quantity, 3);
}

#[tokio::test]
async fn oversized_merge_is_rejected_without_overflowing() {
    let (service, lines) = service(5).await;
    service.add_to_cart(&buyer(BUYER), BUYER, &add(LAMP, 1)).await.unwrap();

    let err = service
        .add_to_cart(&buyer(BUYER), BUYER, &add(LAMP, i32::MAX))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::InsufficientStock(_)));
    assert_eq!(lines.0.lock().unwrap()[0].quantity, 1);
}

#[tokio::test]
async fn unknown_product_is_not_found() {
    let (service, _) = service(4).await;

    let err = service
        .add_to_cart(&buyer(BUYER), BUYER, &add(LAMP + 1, 1))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn other_users_cart_is_off_limits() {
    let (service, _) = service(4).await;

    let err = service.get_cart(&buyer(BUYER + 1), BUYER).await.unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));
}

#[tokio::test]
async fn removing_someone_elses_line_is_not_found() {
    let (service, lines) = service(4).await;
    service.add_to_cart(&buyer(BUYER), BUYER, &add(LAMP, 1)).await.unwrap();

    let other = BUYER + 1;
    let err = service
        .remove_from_cart(&buyer(other), other, 1)
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::NotFound(_)));
    assert_eq!(lines.0.lock().unwrap().len(), 1);

    service.remove_from_cart(&buyer(BUYER), BUYER, 1).await.unwrap();
    assert!(lines.0.lock().unwrap().is_empty());
}
