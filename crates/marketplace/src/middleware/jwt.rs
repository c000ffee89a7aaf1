use axum::{
    Extension, Json,
    body::Body,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use shared::{abstract_trait::DynJwtService, errors::ErrorResponse};
use tracing::debug;

fn bearer_token(req: &Request<Body>) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_owned())
        .filter(|token| !token.is_empty())
}

/// Resolves the caller into an `AuthenticatedUser` request extension.
pub async fn auth_middleware(
    cookie_jar: CookieJar,
    Extension(jwt): Extension<DynJwtService>,
    mut req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let token = bearer_token(&req).or_else(|| {
        cookie_jar
            .get("token")
            .map(|cookie| cookie.value().to_string())
    });

    let Some(token) = token else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::fail(
                "You are not logged in, please provide token",
            )),
        ));
    };

    let identity = jwt.verify_token(&token).map_err(|err| {
        debug!("🔒 Rejected token: {err}");
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::fail("Invalid or expired token")),
        )
    })?;

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
