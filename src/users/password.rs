use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

const MIN_LEN: usize = 8;
const MAX_LEN: usize = 72;
const SPECIAL_CHARS: &str = "!@#$%^&";

/// Checks the password policy and returns the first rule it breaks.
pub fn validate_password(password: &str) -> Option<&'static str> {
    let len = password.chars().count();
    if len < MIN_LEN {
        return Some("Password must be longer than 8 characters");
    }
    if len > MAX_LEN {
        return Some("Password must be less than 72 characters");
    }
    if password.starts_with(' ') || password.ends_with(' ') {
        return Some("Password must not start or end with empty spaces");
    }

    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| SPECIAL_CHARS.contains(c));
    if !(has_lower && has_upper && has_digit && has_special) {
        return Some("Password must contain 1 upper case, lower case, number and special character");
    }
    None
}

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}
