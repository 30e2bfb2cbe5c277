use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

use crate::{error::AppError, state::AppState, users::repo_types::User};

/// Loads the user named by the `:user_id` path segment, or rejects with
/// [`AppError::NotFound`]. Shared by every `/:user_id` route.
pub struct ExistingUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for ExistingUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // A segment that is not a UUID cannot name a stored user
        let Ok(Path(user_id)) = Path::<Uuid>::from_request_parts(parts, state).await else {
            return Err(AppError::NotFound);
        };

        match state.users.find_by_id(user_id).await? {
            Some(user) => Ok(ExistingUser(user)),
            None => {
                tracing::debug!(%user_id, "user lookup missed");
                Err(AppError::NotFound)
            }
        }
    }
}
