use crate::{
    abstract_trait::{auth::AuthServiceTrait, user::DynUserRepository},
    domain::{
        requests::auth::{CreateUserRecord, LoginRequest, RegisterRequest},
        response::auth::{AuthResponse, UserResponse},
    },
    model::user::User,
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::{DynHashing, DynJwtService, HashingTrait, JwtServiceTrait},
    domain::{ApiResponse, AuthenticatedUser, Role},
    errors::ServiceError,
    utils::{Method, Metrics, TracingContext},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AuthService {
    users: DynUserRepository,
    hashing: DynHashing,
    jwt: DynJwtService,
    metrics: Metrics,
}

pub struct AuthServiceDeps {
    pub users: DynUserRepository,
    pub hashing: DynHashing,
    pub jwt: DynJwtService,
    pub registry: Arc<Mutex<Registry>>,
}

impl AuthService {
    pub async fn new(deps: AuthServiceDeps) -> Self {
        let AuthServiceDeps {
            users,
            hashing,
            jwt,
            registry,
        } = deps;

        let metrics = Metrics::new();
        metrics.register("auth_service", &mut *registry.lock().await);

        Self {
            users,
            hashing,
            jwt,
            metrics,
        }
    }

    fn issue(&self, user: User) -> Result<AuthResponse, ServiceError> {
        let role = user.role.parse::<Role>()?;
        let identity = AuthenticatedUser {
            user_id: user.id,
            email: user.email.clone(),
            role,
        };
        let token = self.jwt.generate_token(&identity)?;

        Ok(AuthResponse {
            token,
            user: UserResponse::new(user, role),
        })
    }

    async fn register(&self, req: &RegisterRequest) -> Result<AuthResponse, ServiceError> {
        if self.users.find_by_email(&req.email).await?.is_some() {
            return Err(ServiceError::AlreadyExists(
                "Email already registered".to_string(),
            ));
        }

        let role = Role::from_registration(req.role.as_deref());
        let password_hash = self.hashing.hash_password(&req.password).await?;

        let user = self
            .users
            .create_user(&CreateUserRecord {
                email: req.email.clone(),
                name: req.name.clone(),
                password_hash,
                role: role.as_str().to_string(),
            })
            .await?;

        self.issue(user)
    }

    async fn login(&self, req: &LoginRequest) -> Result<AuthResponse, ServiceError> {
        let user = self
            .users
            .find_by_email(&req.email)
            .await?
            .ok_or(ServiceError::InvalidCredentials)?;

        self.hashing
            .compare_password(&user.password, &req.password)
            .await?;

        self.issue(user)
    }
}

#[async_trait]
impl AuthServiceTrait for AuthService {
    async fn register_user(
        &self,
        req: &RegisterRequest,
    ) -> Result<ApiResponse<AuthResponse>, ServiceError> {
        let tracing_ctx = TracingContext::start(
            "auth-service",
            "register_user",
            vec![KeyValue::new("email", req.email.clone())],
        );

        match self.register(req).await {
            Ok(response) => {
                info!(
                    "✅ Registered user ID {} as {}",
                    response.user.id, response.user.role
                );
                self.metrics
                    .complete(&tracing_ctx, Method::Post, true, "User registered");
                Ok(ApiResponse::success("User registered successfully", response))
            }
            Err(err) => {
                warn!("❌ Registration failed for {}: {}", req.email, err);
                self.metrics
                    .complete(&tracing_ctx, Method::Post, false, &err.to_string());
                Err(err)
            }
        }
    }

    async fn login_user(
        &self,
        req: &LoginRequest,
    ) -> Result<ApiResponse<AuthResponse>, ServiceError> {
        let tracing_ctx = TracingContext::start(
            "auth-service",
            "login_user",
            vec![KeyValue::new("email", req.email.clone())],
        );

        match self.login(req).await {
            Ok(response) => {
                info!("🔑 User ID {} logged in", response.user.id);
                self.metrics
                    .complete(&tracing_ctx, Method::Post, true, "User logged in");
                Ok(ApiResponse::success("Login successful", response))
            }
            Err(err) => {
                warn!("❌ Login failed for {}: {}", req.email, err);
                self.metrics
                    .complete(&tracing_ctx, Method::Post, false, &err.to_string());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod auth_tests;
