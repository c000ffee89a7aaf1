use crate::{
    abstract_trait::order::{DynOrderPlacementService, DynOrderQueryService},
    domain::response::order::OrderResponse,
    middleware::jwt::auth_middleware,
    state::AppState,
};
use axum::{
    Extension, Json,
    extract::Path,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::post,
};
use shared::{
    abstract_trait::DynJwtService,
    domain::{ApiResponse, AuthenticatedUser},
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/users/{user_id}/orders",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(("user_id" = i32, Path, description = "Buyer ID")),
    responses(
        (status = 201, description = "Order placed from the whole cart", body = ApiResponse<OrderResponse>),
        (status = 400, description = "Empty cart, insufficient stock or concurrent stock change"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the cart owner"),
        (status = 404, description = "A cart product no longer exists"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn place_order(
    Extension(service): Extension<DynOrderPlacementService>,
    Extension(identity): Extension<AuthenticatedUser>,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.place_order(&identity, user_id).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}/orders",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(("user_id" = i32, Path, description = "Buyer ID")),
    responses(
        (status = 200, description = "Orders newest first, with their items", body = ApiResponse<Vec<OrderResponse>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the order owner")
    )
)]
pub async fn get_orders(
    Extension(service): Extension<DynOrderQueryService>,
    Extension(identity): Extension<AuthenticatedUser>,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_user(&identity, user_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub(crate) fn order_router(
    placement: DynOrderPlacementService,
    query: DynOrderQueryService,
    jwt: DynJwtService,
) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/users/{user_id}/orders", post(place_order).get(get_orders))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(placement))
        .layer(Extension(query))
        .layer(Extension(jwt))
}

pub fn order_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    order_router(
        app_state.di_container.order_placement_service.clone(),
        app_state.di_container.order_query_service.clone(),
        app_state.jwt_config.clone(),
    )
}

#[cfg(test)]
#[path = "order_tests.rs"]
mod order_tests;
