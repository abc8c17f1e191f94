//! User repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use chrono::Utc;
use crate::database::store::UserStore;
use crate::models::user::{User, CreateUserRequest};
use crate::utils::errors::EventOrganizerError;

#[derive(Clone)]
#[derive(Debug)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, EventOrganizerError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, is_staff, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, is_staff, created_at
            "#
        )
        .bind(request.username)
        .bind(request.email)
        .bind(request.is_staff)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, EventOrganizerError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, is_staff, created_at FROM users WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by username
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, EventOrganizerError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, is_staff, created_at FROM users WHERE username = $1"
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, EventOrganizerError> {
        self.create(request).await
    }

    async fn find_user(&self, id: i64) -> Result<Option<User>, EventOrganizerError> {
        self.find_by_id(id).await
    }
}
