use crate::{
    abstract_trait::cart::DynCartService,
    domain::{requests::cart::AddToCartRequest, response::cart::CartItemResponse},
    middleware::{jwt::auth_middleware, validate::SimpleValidatedJson},
    state::AppState,
};
use axum::{
    Extension, Json,
    extract::Path,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get},
};
use shared::{
    domain::{ApiResponse, AuthenticatedUser},
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/users/{user_id}/cart",
    tag = "Cart",
    security(("bearer_auth" = [])),
    params(("user_id" = i32, Path, description = "Buyer ID")),
    responses(
        (status = 200, description = "Cart lines", body = ApiResponse<Vec<CartItemResponse>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the cart owner")
    )
)]
pub async fn get_cart(
    Extension(service): Extension<DynCartService>,
    Extension(identity): Extension<AuthenticatedUser>,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.get_cart(&identity, user_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/users/{user_id}/cart",
    tag = "Cart",
    security(("bearer_auth" = [])),
    params(("user_id" = i32, Path, description = "Buyer ID")),
    request_body = AddToCartRequest,
    responses(
        (status = 201, description = "New cart line", body = ApiResponse<CartItemResponse>),
        (status = 200, description = "Existing line merged", body = ApiResponse<CartItemResponse>),
        (status = 400, description = "Validation error or insufficient stock"),
        (status = 403, description = "Not the cart owner"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn add_to_cart(
    Extension(service): Extension<DynCartService>,
    Extension(identity): Extension<AuthenticatedUser>,
    Path(user_id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<AddToCartRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let mutation = service.add_to_cart(&identity, user_id, &body).await?;
    let status = if mutation.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(mutation.response)))
}

#[utoipa::path(
    delete,
    path = "/api/users/{user_id}/cart/{item_id}",
    tag = "Cart",
    security(("bearer_auth" = [])),
    params(
        ("user_id" = i32, Path, description = "Buyer ID"),
        ("item_id" = i32, Path, description = "Cart item ID")
    ),
    responses(
        (status = 204, description = "Cart line removed"),
        (status = 403, description = "Not the cart owner"),
        (status = 404, description = "Cart item not found")
    )
)]
pub async fn remove_from_cart(
    Extension(service): Extension<DynCartService>,
    Extension(identity): Extension<AuthenticatedUser>,
    Path((user_id, item_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, HttpError> {
    service.remove_from_cart(&identity, user_id, item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn cart_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/users/{user_id}/cart", get(get_cart).post(add_to_cart))
        .route("/api/users/{user_id}/cart/{item_id}", delete(remove_from_cart))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.cart_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
