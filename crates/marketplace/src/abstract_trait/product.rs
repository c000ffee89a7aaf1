use crate::{
    domain::{
        requests::product::{CreateProductRequest, UpdateProductRequest},
        response::product::ProductResponse,
    },
    model::product::{Product, ProductWithSeller},
};
use async_trait::async_trait;
use shared::{
    domain::{ApiResponse, AuthenticatedUser},
    errors::{RepositoryError, ServiceError},
};
use std::sync::Arc;

pub type DynProductQueryRepository = Arc<dyn ProductQueryRepositoryTrait + Send + Sync>;
pub type DynProductCommandRepository = Arc<dyn ProductCommandRepositoryTrait + Send + Sync>;
pub type DynCatalogService = Arc<dyn CatalogServiceTrait + Send + Sync>;
pub type DynSellerProductService = Arc<dyn SellerProductServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryRepositoryTrait {
    async fn find_live(&self) -> Result<Vec<ProductWithSeller>, RepositoryError>;
    async fn find_live_by_id(&self, id: i32) -> Result<Option<ProductWithSeller>, RepositoryError>;
    async fn find_by_seller(&self, seller_id: i32) -> Result<Vec<Product>, RepositoryError>;
}

/// Every write is scoped to the owning seller; `None`/`false` means not owned or gone.
#[async_trait]
pub trait ProductCommandRepositoryTrait {
    async fn create_product(
        &self,
        seller_id: i32,
        req: &CreateProductRequest,
    ) -> Result<Product, RepositoryError>;
    async fn update_product(
        &self,
        seller_id: i32,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<Option<Product>, RepositoryError>;
    async fn assign_stock(
        &self,
        seller_id: i32,
        id: i32,
        stock: i32,
    ) -> Result<Option<Product>, RepositoryError>;
    async fn soft_delete(&self, seller_id: i32, id: i32) -> Result<bool, RepositoryError>;
}

#[async_trait]
pub trait CatalogServiceTrait {
    async fn find_all(&self) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<ProductResponse>, ServiceError>;
}

#[async_trait]
pub trait SellerProductServiceTrait {
    async fn find_mine(
        &self,
        seller: &AuthenticatedUser,
    ) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError>;
    async fn create_product(
        &self,
        seller: &AuthenticatedUser,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn update_product(
        &self,
        seller: &AuthenticatedUser,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn update_stock(
        &self,
        seller: &AuthenticatedUser,
        id: i32,
        stock: i32,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn delete_product(
        &self,
        seller: &AuthenticatedUser,
        id: i32,
    ) -> Result<(), ServiceError>;
}
