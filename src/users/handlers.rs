use axum::{
    extract::{rejection::JsonRejection, OriginalUri, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    error::{AppError, Result},
    state::AppState,
    users::{
        dto::{CreateUserRequest, UserResponse},
        extractors::ExistingUser,
        services,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/", get(list_users).post(create_user))
        .route("/users/:user_id", get(get_user).delete(delete_user))
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>> {
    let users = state.users.list().await?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    payload: std::result::Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, HeaderMap, Json<UserResponse>)> {
    let Json(payload) = payload?;
    let user = services::create_user(state.users.as_ref(), payload).await?;

    let location = format!("{}/{}", uri.path().trim_end_matches('/'), user.id);
    let mut headers = HeaderMap::new();
    headers.insert(
        header::LOCATION,
        HeaderValue::from_str(&location).map_err(|e| AppError::Internal(e.into()))?,
    );

    Ok((StatusCode::CREATED, headers, Json(UserResponse::from(&user))))
}

pub async fn get_user(ExistingUser(user): ExistingUser) -> Json<UserResponse> {
    Json(UserResponse::from(&user))
}

#[instrument(skip_all)]
pub async fn delete_user(
    State(state): State<AppState>,
    ExistingUser(user): ExistingUser,
) -> Result<StatusCode> {
    let removed = state.users.delete(user.id).await?;
    info!(user_id = %user.id, removed, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}
