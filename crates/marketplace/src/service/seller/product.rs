use crate::{
    abstract_trait::product::{
        DynProductCommandRepository, DynProductQueryRepository, SellerProductServiceTrait,
    },
    domain::{
        requests::product::{CreateProductRequest, UpdateProductRequest},
        response::product::ProductResponse,
    },
    model::product::Product,
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    domain::{ApiResponse, AuthenticatedUser, Role},
    errors::ServiceError,
    utils::{Method, Metrics, TracingContext},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

#[derive(Clone)]
pub struct SellerProductService {
    query: DynProductQueryRepository,
    command: DynProductCommandRepository,
    metrics: Metrics,
}

pub struct SellerProductServiceDeps {
    pub query: DynProductQueryRepository,
    pub command: DynProductCommandRepository,
    pub registry: Arc<Mutex<Registry>>,
}

fn not_owned(id: i32) -> ServiceError {
    ServiceError::NotFound(format!("Product {id} not found or not owned by seller"))
}

impl SellerProductService {
    pub async fn new(deps: SellerProductServiceDeps) -> Self {
        let metrics = Metrics::new();
        metrics.register("seller_product_service", &mut *deps.registry.lock().await);

        Self {
            query: deps.query,
            command: deps.command,
            metrics,
        }
    }

    fn finish<T>(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        result: Result<T, ServiceError>,
        done: &str,
    ) -> Result<T, ServiceError> {
        match &result {
            Ok(_) => self.metrics.complete(tracing_ctx, method, true, done),
            Err(err) => {
                error!("❌ {done} failed: {err}");
                self.metrics
                    .complete(tracing_ctx, method, false, &err.to_string());
            }
        }
        result
    }

    fn updated(product: Option<Product>, id: i32) -> Result<ProductResponse, ServiceError> {
        product.map(ProductResponse::from).ok_or_else(|| not_owned(id))
    }
}

#[async_trait]
impl SellerProductServiceTrait for SellerProductService {
    async fn find_mine(
        &self,
        seller: &AuthenticatedUser,
    ) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError> {
        seller.ensure_role(Role::Seller)?;

        let tracing_ctx = TracingContext::start(
            "seller-product-service",
            "find_seller_products",
            vec![KeyValue::new("seller_id", seller.user_id as i64)],
        );

        let result = self
            .query
            .find_by_seller(seller.user_id)
            .await
            .map(|products| products.into_iter().map(ProductResponse::from).collect())
            .map_err(ServiceError::from);

        let products = self.finish(&tracing_ctx, Method::Get, result, "Fetch seller products")?;
        Ok(ApiResponse::success("Products retrieved successfully", products))
    }

    async fn create_product(
        &self,
        seller: &AuthenticatedUser,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        seller.ensure_role(Role::Seller)?;

        let tracing_ctx = TracingContext::start(
            "seller-product-service",
            "create_product",
            vec![
                KeyValue::new("seller_id", seller.user_id as i64),
                KeyValue::new("name", req.name.clone()),
            ],
        );

        let result = self
            .command
            .create_product(seller.user_id, req)
            .await
            .map(ProductResponse::from)
            .map_err(ServiceError::from);

        let product = self.finish(&tracing_ctx, Method::Post, result, "Create product")?;
        info!("✅ Seller {} listed product {}", seller.user_id, product.id);
        Ok(ApiResponse::success("Product created successfully", product))
    }

    async fn update_product(
        &self,
        seller: &AuthenticatedUser,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        seller.ensure_role(Role::Seller)?;

        let tracing_ctx = TracingContext::start(
            "seller-product-service",
            "update_product",
            vec![KeyValue::new("product_id", id as i64)],
        );

        let result = match self.command.update_product(seller.user_id, id, req).await {
            Ok(product) => Self::updated(product, id),
            Err(err) => Err(err.into()),
        };

        let product = self.finish(&tracing_ctx, Method::Put, result, "Update product")?;
        info!("✏️ Seller {} updated product {}", seller.user_id, id);
        Ok(ApiResponse::success("Product updated successfully", product))
    }

    async fn update_stock(
        &self,
        seller: &AuthenticatedUser,
        id: i32,
        stock: i32,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        seller.ensure_role(Role::Seller)?;

        let tracing_ctx = TracingContext::start(
            "seller-product-service",
            "update_stock",
            vec![
                KeyValue::new("product_id", id as i64),
                KeyValue::new("stock", stock as i64),
            ],
        );

        let result = match self.command.assign_stock(seller.user_id, id, stock).await {
            Ok(product) => Self::updated(product, id),
            Err(err) => Err(err.into()),
        };

        let product = self.finish(&tracing_ctx, Method::Patch, result, "Update stock")?;
        info!("📦 Product {} stock set to {}", id, stock);
        Ok(ApiResponse::success("Stock updated successfully", product))
    }

    async fn delete_product(
        &self,
        seller: &AuthenticatedUser,
        id: i32,
    ) -> Result<(), ServiceError> {
        seller.ensure_role(Role::Seller)?;

        let tracing_ctx = TracingContext::start(
            "seller-product-service",
            "delete_product",
            vec![KeyValue::new("product_id", id as i64)],
        );

        let result = match self.command.soft_delete(seller.user_id, id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(not_owned(id)),
            Err(err) => Err(err.into()),
        };

        self.finish(&tracing_ctx, Method::Delete, result, "Delete product")?;
        info!("🗑️ Seller {} removed product {}", seller.user_id, id);
        Ok(())
    }
}

#[cfg(test)]
#[path = "product_tests.rs"]
mod product_tests;
