use crate::{
    abstract_trait::{product::DynSellerProductService, seller::DynSellerOrderService},
    domain::{
        requests::{
            order_item::UpdateOrderItemStatusRequest,
            product::{CreateProductRequest, UpdateProductRequest, UpdateStockRequest},
        },
        response::{
            dashboard::DashboardStatsResponse,
            order::{OrderItemResponse, SellerOrderResponse},
            product::ProductResponse,
        },
    },
    middleware::{jwt::auth_middleware, role::require_seller, validate::SimpleValidatedJson},
    state::AppState,
};
use axum::{
    Extension, Json,
    extract::Path,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, patch, put},
};
use shared::{
    domain::{ApiResponse, AuthenticatedUser},
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/seller/products",
    tag = "Seller",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own products, newest first", body = ApiResponse<Vec<ProductResponse>>),
        (status = 403, description = "Seller access required")
    )
)]
pub async fn get_seller_products(
    Extension(service): Extension<DynSellerProductService>,
    Extension(seller): Extension<AuthenticatedUser>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_mine(&seller).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/seller/products",
    tag = "Seller",
    security(("bearer_auth" = [])),
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Seller access required")
    )
)]
pub async fn create_product(
    Extension(service): Extension<DynSellerProductService>,
    Extension(seller): Extension<AuthenticatedUser>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_product(&seller, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/seller/products/{id}",
    tag = "Seller",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Product not found or not owned")
    )
)]
pub async fn update_product(
    Extension(service): Extension<DynSellerProductService>,
    Extension(seller): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_product(&seller, id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    patch,
    path = "/api/seller/products/{id}/stock",
    tag = "Seller",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Product ID")),
    request_body = UpdateStockRequest,
    responses(
        (status = 200, description = "Stock assigned", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Product not found or not owned")
    )
)]
pub async fn update_stock(
    Extension(service): Extension<DynSellerProductService>,
    Extension(seller): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateStockRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_stock(&seller, id, body.stock).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/seller/products/{id}",
    tag = "Seller",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product removed from the catalog"),
        (status = 404, description = "Product not found or not owned")
    )
)]
pub async fn delete_product(
    Extension(service): Extension<DynSellerProductService>,
    Extension(seller): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    service.delete_product(&seller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/seller/orders",
    tag = "Seller",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Orders holding the seller's products", body = ApiResponse<Vec<SellerOrderResponse>>),
        (status = 403, description = "Seller access required")
    )
)]
pub async fn get_seller_orders(
    Extension(service): Extension<DynSellerOrderService>,
    Extension(seller): Extension<AuthenticatedUser>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_orders(&seller).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/seller/orders/pending",
    tag = "Seller",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Pending orders, oldest first", body = ApiResponse<Vec<SellerOrderResponse>>),
        (status = 403, description = "Seller access required")
    )
)]
pub async fn get_pending_orders(
    Extension(service): Extension<DynSellerOrderService>,
    Extension(seller): Extension<AuthenticatedUser>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_pending_orders(&seller).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    patch,
    path = "/api/seller/order-items/{item_id}/status",
    tag = "Seller",
    security(("bearer_auth" = [])),
    params(("item_id" = i32, Path, description = "Order item ID")),
    request_body = UpdateOrderItemStatusRequest,
    responses(
        (status = 200, description = "Order item updated", body = ApiResponse<OrderItemResponse>),
        (status = 400, description = "Unknown status"),
        (status = 404, description = "Order item not found or not the seller's")
    )
)]
pub async fn update_order_item_status(
    Extension(service): Extension<DynSellerOrderService>,
    Extension(seller): Extension<AuthenticatedUser>,
    Path(item_id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateOrderItemStatusRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service
        .update_item_status(&seller, item_id, &body.status)
        .await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/seller/dashboard/stats",
    tag = "Seller",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Sales figures", body = ApiResponse<DashboardStatsResponse>),
        (status = 403, description = "Seller access required")
    )
)]
pub async fn get_dashboard_stats(
    Extension(service): Extension<DynSellerOrderService>,
    Extension(seller): Extension<AuthenticatedUser>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.dashboard_stats(&seller).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn seller_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route(
            "/api/seller/products",
            get(get_seller_products).post(create_product),
        )
        .route(
            "/api/seller/products/{id}",
            put(update_product).delete(delete_product),
        )
        .route("/api/seller/products/{id}/stock", patch(update_stock))
        .route("/api/seller/orders", get(get_seller_orders))
        .route("/api/seller/orders/pending", get(get_pending_orders))
        .route(
            "/api/seller/order-items/{item_id}/status",
            patch(update_order_item_status),
        )
        .route("/api/seller/dashboard/stats", get(get_dashboard_stats))
        .route_layer(middleware::from_fn(require_seller))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.seller_product_service.clone()))
        .layer(Extension(app_state.di_container.seller_order_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
