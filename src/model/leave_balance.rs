use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Remaining leave days per bucket for one employee.
///
/// Read-only here: nothing in this service decrements a balance when a
/// request is approved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct LeaveBalance {
    #[schema(example = "b7d1a0e4-8c1b-4a7e-9f7e-3c2d1e0f9a88")]
    pub employee_id: String,
    #[schema(example = 18)]
    pub annual_leave: i32,
    #[schema(example = 10)]
    pub sick_leave: i32,
    #[schema(example = 5)]
    pub personal_leave: i32,
}

impl LeaveBalance {
    /// Balance shown to an employee who has no row yet.
    pub fn empty(employee_id: &str) -> Self {
        Self {
            employee_id: employee_id.to_string(),
            annual_leave: 0,
            sick_leave: 0,
            personal_leave: 0,
        }
    }
}
