use validator::ValidateEmail;

use crate::app_error::{AppError, AppResult};

pub const TENANT_NAME_MIN_LEN: usize = 2;
pub const TENANT_NAME_MAX_LEN: usize = 64;

/// Validates that the input looks like a valid email address
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    !email.is_empty() && email.validate_email()
}

/// Trims a tenant display name and checks its length (in characters).
/// Returns the trimmed name.
pub fn validate_tenant_name(name: Option<&str>) -> AppResult<String> {
    let Some(name) = name else {
        return Err(AppError::InvalidInput("Tenant name is required".into()));
    };
    let trimmed = name.trim();
    let len = trimmed.chars().count();

    if len < TENANT_NAME_MIN_LEN {
        return Err(AppError::InvalidInput(
            "Tenant name must be at least 2 characters".into(),
        ));
    }
    if len > TENANT_NAME_MAX_LEN {
        return Err(AppError::InvalidInput(
            "Tenant name must not exceed 64 characters".into(),
        ));
    }
    Ok(trimmed.to_string())
}
