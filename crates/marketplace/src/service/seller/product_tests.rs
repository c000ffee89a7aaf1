//! Seller product rules over an in-process shelf.

use super::{SellerProductService, SellerProductServiceDeps};
use crate::{
    abstract_trait::product::{
        ProductCommandRepositoryTrait, ProductQueryRepositoryTrait, SellerProductServiceTrait,
    },
    domain::requests::product::{CreateProductRequest, UpdateProductRequest},
    model::product::{Product, ProductWithSeller},
};
use async_trait::async_trait;
use chrono::Utc;
use prometheus_client::registry::Registry;
use rstest::rstest;
use rust_decimal_macros::dec;
use shared::{
    domain::{AuthenticatedUser, Role},
    errors::{RepositoryError, ServiceError},
};
use std::sync::{Arc, Mutex};

const OWNER: i32 = 7;
const RIVAL: i32 = 8;
const KETTLE: i32 = 11;

#[derive(Default)]
struct Shelf(Mutex<Vec<Product>>);

impl Shelf {
    fn stock_of(&self, id: i32) -> Option<i32> {
        let products = self.0.lock().unwrap();
        products.iter().find(|p| p.id == id).map(|p| p.stock)
    }

    fn owned_mut<R>(
        &self,
        seller_id: i32,
        id: i32,
        apply: impl FnOnce(&mut Product) -> R,
    ) -> Option<R> {
        let mut products = self.0.lock().unwrap();
        products
            .iter_mut()
            .find(|p| p.id == id && p.seller_id == seller_id && p.deleted_at.is_none())
            .map(apply)
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for Shelf {
    async fn find_live(&self) -> Result<Vec<ProductWithSeller>, RepositoryError> {
        Ok(vec![])
    }

    async fn find_live_by_id(
        &self,
        _id: i32,
    ) -> Result<Option<ProductWithSeller>, RepositoryError> {
        Ok(None)
    }

    async fn find_by_seller(&self, seller_id: i32) -> Result<Vec<Product>, RepositoryError> {
        let products = self.0.lock().unwrap();
        Ok(products
            .iter()
            .filter(|p| p.seller_id == seller_id && p.deleted_at.is_none())
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for Shelf {
    async fn create_product(
        &self,
        seller_id: i32,
        req: &CreateProductRequest,
    ) -> Result<Product, RepositoryError> {
        let mut products = self.0.lock().unwrap();
        let now = Utc::now();
        let product = Product {
            id: products.len() as i32 + 100,
            name: req.name.clone(),
            description: req.description.clone().unwrap_or_default(),
            price: req.price,
            stock: req.stock,
            seller_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        products.push(product.clone());
        Ok(product)
    }

    async fn update_product(
        &self,
        seller_id: i32,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<Option<Product>, RepositoryError> {
        Ok(self.owned_mut(seller_id, id, |product| {
            if let Some(name) = &req.name {
                product.name = name.clone();
            }
            if let Some(price) = req.price {
                product.price = price;
            }
            if let Some(stock) = req.stock {
                product.stock = stock;
            }
            product.clone()
        }))
    }

    async fn assign_stock(
        &self,
        seller_id: i32,
        id: i32,
        stock: i32,
    ) -> Result<Option<Product>, RepositoryError> {
        Ok(self.owned_mut(seller_id, id, |product| {
            product.stock = stock;
            product.clone()
        }))
    }

    async fn soft_delete(&self, seller_id: i32, id: i32) -> Result<bool, RepositoryError> {
        Ok(self
            .owned_mut(seller_id, id, |product| product.deleted_at = Some(Utc::now()))
            .is_some())
    }
}

fn kettle() -> Product {
    let now = Utc::now();
    Product {
        id: KETTLE,
        name: "Kettle".into(),
        description: "1.7 l".into(),
        price: dec!(39.90),
        stock: 6,
        seller_id: OWNER,
        created_at: now,
        updated_at: now,
        deleted_at: None,
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

async fn service() -> (SellerProductService, Arc<Shelf>) {
    let shelf = Arc::new(Shelf(Mutex::new(vec![kettle()])));
    let service = SellerProductService::new(SellerProductServiceDeps {
        query: shelf.clone(),
        command: shelf.clone(),
        registry: Arc::new(tokio::sync::Mutex::new(Registry::default())),
    })
    .await;
    (service, shelf)
}

#[tokio::test]
async fn created_product_belongs_to_the_caller() {
    let (service, _) = service().await;
    let req = CreateProductRequest {
        name: "Teapot".into(),
        description: None,
        price: dec!(12.00),
        stock: 3,
    };

    let created = service.create_product(&seller(RIVAL), &req).await.unwrap();
    assert_eq!(created.data.seller_id, RIVAL);
    assert_eq!(created.data.description, "");

    let mine = service.find_mine(&seller(RIVAL)).await.unwrap();
    assert_eq!(mine.data.len(), 1);
    assert_eq!(mine.data[0].name, "Teapot");
}

#[tokio::test]
async fn owner_can_update_and_restock() {
    let (service, shelf) = service().await;
    let req = UpdateProductRequest {
        price: Some(dec!(35.00)),
        ..Default::default()
    };

    let updated = service
        .update_product(&seller(OWNER), KETTLE, &req)
        .await
        .unwrap();
    assert_eq!(updated.data.price, dec!(35.00));
    assert_eq!(updated.data.name, "Kettle");

    let restocked = service.update_stock(&seller(OWNER), KETTLE, 0).await.unwrap();
    assert_eq!(restocked.data.stock, 0);
    assert_eq!(shelf.stock_of(KETTLE), Some(0));
}

#[tokio::test]
async fn another_sellers_product_is_not_found() {
    let (service, shelf) = service().await;
    let rival = seller(RIVAL);

    let update = service
        .update_product(&rival, KETTLE, &UpdateProductRequest::default())
        .await
        .unwrap_err();
    let stock = service.update_stock(&rival, KETTLE, 99).await.unwrap_err();
    let delete = service.delete_product(&rival, KETTLE).await.unwrap_err();

    for err in [update, stock, delete] {
        assert!(matches!(err, ServiceError::NotFound(_)), "got {err:?}");
    }
    assert_eq!(shelf.stock_of(KETTLE), Some(6));
    assert_eq!(service.find_mine(&seller(OWNER)).await.unwrap().data.len(), 1);
}

#[tokio::test]
async fn deleted_product_drops_out_and_cannot_be_deleted_twice() {
    let (service, _) = service().await;

    service.delete_product(&seller(OWNER), KETTLE).await.unwrap();
    assert!(service.find_mine(&seller(OWNER)).await.unwrap().data.is_empty());

    let again = service
        .delete_product(&seller(OWNER), KETTLE)
        .await
        .unwrap_err();
    assert!(matches!(again, ServiceError::NotFound(_)));
}

#[rstest]
#[case::listing("find_mine")]
#[case::restock("update_stock")]
#[case::delete("delete_product")]
#[tokio::test]
async fn buyers_are_turned_away(#[case] operation: &str) {
    let (service, shelf) = service().await;
    let buyer = user(OWNER, Role::Buyer);

    let err = match operation {
        "find_mine" => service.find_mine(&buyer).await.map(|_| ()),
        "update_stock" => service.update_stock(&buyer, KETTLE, 1).await.map(|_| ()),
        _ => service.delete_product(&buyer, KETTLE).await,
    }
    .unwrap_err();

    assert!(matches!(err, ServiceError::Forbidden(_)));
    assert_eq!(shelf.stock_of(KETTLE), Some(6));
}
