use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::app_error::AppError;

/// Lifecycle state of a tenant. Only the admin status update changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenantStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

impl TenantStatus {
    pub const ALL: [TenantStatus; 3] = [
        TenantStatus::Active,
        TenantStatus::Inactive,
        TenantStatus::Suspended,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TenantStatus::Active => "active",
            TenantStatus::Inactive => "inactive",
            TenantStatus::Suspended => "suspended",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, TenantStatus::Active)
    }
}

impl FromStr for TenantStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TenantStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                AppError::InvalidInput(
                    "Invalid status. Must be active, inactive, or suspended".into(),
                )
            })
    }
}

impl fmt::Display for TenantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
