//! Access to the leave record store.
//!
//! Leave rows, balances and profiles live in an external database. The
//! calendar and statistics code only ever sees what comes back through
//! [`LeaveStore`], which keeps it testable without a database.

use crate::error::LeaveError;
use crate::model::leave_balance::LeaveBalance;
use crate::model::leave_request::{LeaveRequest, LeaveStatus, NewLeave};
use crate::model::profile::Profile;

#[cfg(test)]
pub mod memory;
pub mod mysql;

pub trait LeaveStore {
    /// Every leave request, newest first.
    async fn list_leave_requests(&self) -> Result<Vec<LeaveRequest>, LeaveError>;

    /// Requests submitted by one employee, newest first.
    async fn list_leave_requests_for_employee(
        &self,
        employee_id: &str,
    ) -> Result<Vec<LeaveRequest>, LeaveError>;

    async fn get_leave_request(&self, id: &str) -> Result<Option<LeaveRequest>, LeaveError>;

    async fn get_leave_balance(&self, employee_id: &str)
    -> Result<Option<LeaveBalance>, LeaveError>;

    /// Moves a pending request to `status`.
    ///
    /// Returns `false` when no pending request with that id exists, in which
    /// case nothing was written.
    async fn update_status(&self, id: &str, status: LeaveStatus) -> Result<bool, LeaveError>;

    async fn insert_leave_request(
        &self,
        employee_id: &str,
        leave: NewLeave,
    ) -> Result<LeaveRequest, LeaveError>;

    async fn list_profiles(&self) -> Result<Vec<Profile>, LeaveError>;

    async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, LeaveError>;
}
