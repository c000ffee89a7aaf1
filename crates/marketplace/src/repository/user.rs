use crate::{
    abstract_trait::user::UserRepositoryTrait, domain::requests::auth::CreateUserRecord,
    model::user::User,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

pub struct UserRepository {
    db: ConnectionPool,
}

impl UserRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, name, password, role, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to look up user by email: {:?}", err);
            RepositoryError::from(err)
        })?;

        Ok(user)
    }

    async fn create_user(&self, req: &CreateUserRecord) -> Result<User, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, name, password, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, name, password, role, created_at
            "#,
        )
        .bind(&req.email)
        .bind(&req.name)
        .bind(&req.password_hash)
        .bind(&req.role)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to create user {}: {:?}", req.email, err);
            RepositoryError::from_constraint(err)
        })?;

        info!("✅ Created user ID {} ({})", user.id, user.role);
        Ok(user)
    }
}
