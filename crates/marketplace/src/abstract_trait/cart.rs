use crate::{
    domain::{requests::cart::AddToCartRequest, response::cart::CartItemResponse},
    model::cart_item::{CartItem, CartLine},
};
use async_trait::async_trait;
use shared::{
    domain::{ApiResponse, AuthenticatedUser},
    errors::{RepositoryError, ServiceError},
};
use std::sync::Arc;

pub type DynCartRepository = Arc<dyn CartRepositoryTrait + Send + Sync>;
pub type DynCartService = Arc<dyn CartServiceTrait + Send + Sync>;

#[async_trait]
pub trait CartRepositoryTrait {
    async fn find_lines(&self, user_id: i32) -> Result<Vec<CartLine>, RepositoryError>;
    async fn find_by_product(
        &self,
        user_id: i32,
        product_id: i32,
    ) -> Result<Option<CartItem>, RepositoryError>;
    async fn insert_item(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<CartItem, RepositoryError>;
    async fn set_quantity(&self, id: i32, quantity: i32) -> Result<CartItem, RepositoryError>;
    async fn delete_item(&self, user_id: i32, id: i32) -> Result<bool, RepositoryError>;
}

/// Outcome of adding to the cart: whether a new line was created.
#[derive(Debug, Clone)]
pub struct CartMutation {
    pub created: bool,
    pub response: ApiResponse<CartItemResponse>,
}

#[async_trait]
pub trait CartServiceTrait {
    async fn get_cart(
        &self,
        identity: &AuthenticatedUser,
        user_id: i32,
    ) -> Result<ApiResponse<Vec<CartItemResponse>>, ServiceError>;
    async fn add_to_cart(
        &self,
        identity: &AuthenticatedUser,
        user_id: i32,
        req: &AddToCartRequest,
    ) -> Result<CartMutation, ServiceError>;
    async fn remove_from_cart(
        &self,
        identity: &AuthenticatedUser,
        user_id: i32,
        item_id: i32,
    ) -> Result<(), ServiceError>;
}
