use crate::{
    abstract_trait::product::{CatalogServiceTrait, DynProductQueryRepository},
    domain::response::product::ProductResponse,
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    domain::ApiResponse,
    errors::ServiceError,
    utils::{Method, Metrics, TracingContext},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Clone)]
pub struct CatalogService {
    query: DynProductQueryRepository,
    metrics: Metrics,
}

impl CatalogService {
    pub async fn new(query: DynProductQueryRepository, registry: Arc<Mutex<Registry>>) -> Self {
        let metrics = Metrics::new();
        metrics.register("catalog_service", &mut *registry.lock().await);

        Self { query, metrics }
    }
}

#[async_trait]
impl CatalogServiceTrait for CatalogService {
    async fn find_all(&self) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError> {
        let tracing_ctx = TracingContext::start("catalog-service", "find_all_products", vec![]);

        match self.query.find_live().await {
            Ok(products) => {
                info!("📦 Catalog lists {} products", products.len());
                self.metrics
                    .complete(&tracing_ctx, Method::Get, true, "Products fetched");
                let data = products.into_iter().map(ProductResponse::from).collect();
                Ok(ApiResponse::success("Products retrieved successfully", data))
            }
            Err(err) => {
                self.metrics
                    .complete(&tracing_ctx, Method::Get, false, &err.to_string());
                Err(err.into())
            }
        }
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let tracing_ctx = TracingContext::start(
            "catalog-service",
            "find_product_by_id",
            vec![KeyValue::new("product_id", id as i64)],
        );

        let result = match self.query.find_live_by_id(id).await {
            Ok(Some(product)) => Ok(product),
            Ok(None) => Err(ServiceError::NotFound(format!("Product {id} not found"))),
            Err(err) => Err(err.into()),
        };

        match result {
            Ok(product) => {
                self.metrics
                    .complete(&tracing_ctx, Method::Get, true, "Product fetched");
                Ok(ApiResponse::success(
                    "Product retrieved successfully",
                    ProductResponse::from(product),
                ))
            }
            Err(err) => {
                self.metrics
                    .complete(&tracing_ctx, Method::Get, false, &err.to_string());
                Err(err)
            }
        }
    }
}
