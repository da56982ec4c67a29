//! User service implementation
//!
//! Users are the acting identities referenced by the audit trail.

use tracing::{debug, info};

use crate::database::repositories::UserRepository;
use crate::models::{CreateUserRequest, UpdateUserRequest, User};
use crate::utils::errors::{ExamGuardError, Result};
use crate::utils::helpers;

/// User service for managing user operations
#[derive(Clone)]
pub struct UserService {
    user_repository: UserRepository,
}

impl UserService {
    /// Create a new UserService instance
    pub fn new(user_repository: UserRepository) -> Self {
        Self { user_repository }
    }

    /// Create a new user
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<User> {
        debug!(username = %request.username, "Creating user");

        validate_user_request(&request)?;

        if let Some(existing) = self
            .user_repository
            .find_by_username(&request.username)
            .await?
        {
            return Err(ExamGuardError::InvalidInput(format!(
                "Username '{}' is already taken (user {})",
                existing.username, existing.id
            )));
        }

        let user = self.user_repository.create(request).await?;
        info!(user_id = user.id, username = %user.username, "User created");

        Ok(user)
    }

    /// Get user by ID
    pub async fn get_user(&self, user_id: i64) -> Result<User> {
        debug!(user_id = user_id, "Getting user by ID");

        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(ExamGuardError::UserNotFound { user_id })
    }

    /// Update user profile
    pub async fn update_user(&self, user_id: i64, request: UpdateUserRequest) -> Result<User> {
        debug!(user_id = user_id, "Updating user");

        if let Some(email) = &request.email {
            if !helpers::is_valid_email(email) {
                return Err(ExamGuardError::InvalidInput(format!(
                    "Invalid email address: {}",
                    email
                )));
            }
        }

        let user = self
            .user_repository
            .update(user_id, request)
            .await?
            .ok_or(ExamGuardError::UserNotFound { user_id })?;

        info!(user_id = user.id, "User updated");
        Ok(user)
    }

    /// List users with pagination
    pub async fn list_users(&self, limit: i64, offset: i64) -> Result<Vec<User>> {
        debug!(limit = limit, offset = offset, "Listing users");

        super::validate_pagination(limit, offset)?;

        self.user_repository.list(limit, offset).await
    }
}

/// Validate a user creation request
fn validate_user_request(request: &CreateUserRequest) -> Result<()> {
    if request.username.trim().is_empty() {
        return Err(ExamGuardError::InvalidInput(
            "Username cannot be empty".to_string(),
        ));
    }

    if request.full_name.trim().is_empty() {
        return Err(ExamGuardError::InvalidInput(
            "Full name cannot be empty".to_string(),
        ));
    }

    if let Some(email) = &request.email {
        if !helpers::is_valid_email(email) {
            return Err(ExamGuardError::InvalidInput(format!(
                "Invalid email address: {}",
                email
            )));
        }
    }

    Ok(())
}
