use anyhow::Context;
use tracing::{info, warn};

use crate::error::{AppError, Result};
use crate::users::{
    dto::CreateUserRequest,
    password::{hash_password, validate_password},
    repo::UserRepository,
    repo_types::{NewUser, User},
};

/// Validates a create request and inserts the user.
///
/// Checks run in order: required fields, password policy, email uniqueness.
/// Nothing is written unless all of them pass. The uniqueness check and the
/// insert are not atomic; the `users_email_key` constraint catches the race
/// and surfaces as [`AppError::DuplicateEmail`] too.
pub async fn create_user(repo: &dyn UserRepository, payload: CreateUserRequest) -> Result<User> {
    let fields = payload.into_fields().inspect_err(|e| warn!(error = %e, "create rejected"))?;

    if let Some(msg) = validate_password(&fields.password) {
        warn!(reason = msg, "password rejected by policy");
        return Err(AppError::InvalidPassword(msg));
    }

    if repo.find_by_email(&fields.email).await?.is_some() {
        warn!(email = %fields.email, "email already registered");
        return Err(AppError::DuplicateEmail);
    }

    let plain = fields.password;
    let password = tokio::task::spawn_blocking(move || hash_password(&plain))
        .await
        .context("password hashing task")??;

    let user = repo
        .insert(NewUser {
            first_name: fields.first_name,
            last_name: fields.last_name,
            email: fields.email,
            password,
        })
        .await?;

    info!(user_id = %user.id, "user created");
    Ok(user)
}
