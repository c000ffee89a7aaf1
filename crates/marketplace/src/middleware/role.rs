use axum::{
    Json,
    body::Body,
    http::{Request, StatusCode},
    middleware::Next,
    response::IntoResponse,
};
use shared::{
    domain::{AuthenticatedUser, Role},
    errors::ErrorResponse,
};
use tracing::warn;

/// Must run after `auth_middleware`.
pub async fn require_seller(
    req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let Some(identity) = req.extensions().get::<AuthenticatedUser>() else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::fail("Missing authenticated user")),
        ));
    };

    if identity.role != Role::Seller {
        warn!(
            "⛔ User {} with role {} tried a seller route",
            identity.user_id, identity.role
        );
        return Err((
            StatusCode::FORBIDDEN,
            Json(ErrorResponse::fail("Seller access required")),
        ));
    }

    Ok(next.run(req).await)
}
