//! User repository implementation

use sqlx::PgPool;
use tracing::debug;

use crate::models::{CreateUserRequest, UpdateUserRequest, User};
use crate::utils::errors::Result;

/// Repository for user-related database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user
    pub async fn create(&self, request: CreateUserRequest) -> Result<User> {
        debug!("Creating user with username: {}", request.username);

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, full_name, email, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, full_name, email, role, created_at, updated_at
            "#,
        )
        .bind(request.username)
        .bind(request.full_name)
        .bind(request.email)
        .bind(request.role.unwrap_or_else(|| "committee".to_string()))
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, full_name, email, role, created_at, updated_at
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by username
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, full_name, email, role, created_at, updated_at
             FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Update user information
    pub async fn update(&self, id: i64, request: UpdateUserRequest) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                full_name = COALESCE($2, full_name),
                email = COALESCE($3, email),
                role = COALESCE($4, role),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, username, full_name, email, role, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(request.full_name)
        .bind(request.email)
        .bind(request.role)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// List users ordered by creation time
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, username, full_name, email, role, created_at, updated_at
             FROM users ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Count all users
    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connection::{create_lazy_pool, DatabaseConfig};

    #[tokio::test]
    async fn test_repository_is_cloneable() {
        let pool = create_lazy_pool(&DatabaseConfig::default()).unwrap();
        let repo = UserRepository::new(pool);
        let _clone = repo.clone();
    }
}
