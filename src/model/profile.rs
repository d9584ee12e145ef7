use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::role::Role;

pub const UNKNOWN_EMPLOYEE: &str = "Unknown Employee";

/// User profile owned by the identity backend. Only the pieces this service
/// joins against are modelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Profile {
    #[schema(example = "b7d1a0e4-8c1b-4a7e-9f7e-3c2d1e0f9a88")]
    pub user_id: String,
    #[schema(example = "Jane Doe", nullable = true)]
    pub full_name: Option<String>,
    #[schema(example = "employee", value_type = String)]
    pub role: Role,
}

impl Profile {
    /// Name to show for this profile, falling back when it was left blank.
    pub fn display_name(&self) -> &str {
        match self.full_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => UNKNOWN_EMPLOYEE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: Option<&str>) -> Profile {
        Profile {
            user_id: "u-1".into(),
            full_name: name.map(str::to_string),
            role: Role::Employee,
        }
    }

    #[test]
    fn blank_names_fall_back() {
        assert_eq!(profile(Some("Jane Doe")).display_name(), "Jane Doe");
        assert_eq!(profile(Some("   ")).display_name(), UNKNOWN_EMPLOYEE);
        assert_eq!(profile(None).display_name(), UNKNOWN_EMPLOYEE);
    }
}
