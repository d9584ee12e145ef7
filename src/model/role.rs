use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[derive(EnumString, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    Admin,
    Hr,
    Employee,
}

impl Role {
    /// Profiles with a missing or unknown role are treated as employees.
    pub fn from_profile(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(Role::Employee)
    }

    pub fn can_review_leave(&self) -> bool {
        matches!(self, Role::Admin | Role::Hr)
    }
}
