use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::AppError;
use crate::users::{repo_types::User, sanitize::sanitize};

/// Request body for user creation. Fields are kept as raw JSON so that
/// absent, `null`, `false`, `0` and `""` all surface from
/// [`CreateUserRequest::into_fields`] as a missing field instead of a parser error.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub first_name: Option<Value>,
    pub last_name: Option<Value>,
    pub email: Option<Value>,
    pub password: Option<Value>,
}

/// A create request with every required field present.
#[derive(Debug)]
pub struct CreateUserFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn required(name: &'static str, value: Option<Value>) -> Result<String, AppError> {
    match value {
        None => Err(AppError::MissingField(name)),
        Some(v) if is_falsy(&v) => Err(AppError::MissingField(name)),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(AppError::InvalidField(name)),
    }
}

impl CreateUserRequest {
    /// Checks fields in order and fails on the first one that is missing or
    /// holds something other than a string.
    pub fn into_fields(self) -> Result<CreateUserFields, AppError> {
        Ok(CreateUserFields {
            first_name: required("first_name", self.first_name)?,
            last_name: required("last_name", self.last_name)?,
            email: required("email", self.email)?,
            password: required("password", self.password)?,
        })
    }
}

/// Outward representation of a user. The password hash is never part of it.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct UserResponse {
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date_created: OffsetDateTime,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            first_name: sanitize(&user.first_name),
            last_name: sanitize(&user.last_name),
            email: sanitize(&user.email),
            date_created: user.date_created,
        }
    }
}
