use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, MySqlPool};
use uuid::Uuid;

use super::LeaveStore;
use crate::error::LeaveError;
use crate::model::leave_balance::LeaveBalance;
use crate::model::leave_request::{LeaveRequest, LeaveStatus, LeaveType, NewLeave};
use crate::model::profile::Profile;
use crate::model::role::Role;

const LEAVE_COLUMNS: &str = r#"
    id, employee_id, leave_type, start_date, end_date,
    reason, status, days_requested, created_at
"#;

#[derive(FromRow)]
struct LeaveRow {
    id: String,
    employee_id: String,
    leave_type: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    reason: Option<String>,
    status: String,
    days_requested: Option<i32>,
    created_at: DateTime<Utc>,
}

impl TryFrom<LeaveRow> for LeaveRequest {
    type Error = LeaveError;

    fn try_from(row: LeaveRow) -> Result<Self, Self::Error> {
        let status = row.status.parse::<LeaveStatus>().map_err(|_| {
            LeaveError::StoreUnavailable(format!(
                "leave request {} has unreadable status {:?}",
                row.id, row.status
            ))
        })?;
        let days_requested = u32::try_from(row.days_requested.unwrap_or(0)).map_err(|_| {
            LeaveError::StoreUnavailable(format!(
                "leave request {} has negative days_requested {:?}",
                row.id, row.days_requested
            ))
        })?;

        Ok(LeaveRequest {
            id: row.id,
            employee_id: row.employee_id,
            leave_type: LeaveType::from(row.leave_type),
            start_date: row.start_date,
            end_date: row.end_date,
            reason: row.reason.filter(|r| !r.is_empty()),
            status,
            days_requested,
            created_at: row.created_at,
        })
    }
}

#[derive(FromRow)]
pub(crate) struct ProfileRow {
    pub user_id: String,
    pub full_name: Option<String>,
    pub role: Option<String>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            user_id: row.user_id,
            full_name: row.full_name,
            role: Role::from_profile(row.role.as_deref()),
        }
    }
}

/// [`LeaveStore`] backed by the `leave_requests`, `leave_balances` and
/// `profiles` tables.
#[derive(Clone)]
pub struct MySqlLeaveStore {
    pool: MySqlPool,
}

impl MySqlLeaveStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

fn into_requests(rows: Vec<LeaveRow>) -> Result<Vec<LeaveRequest>, LeaveError> {
    rows.into_iter().map(LeaveRequest::try_from).collect()
}

impl LeaveStore for MySqlLeaveStore {
    async fn list_leave_requests(&self) -> Result<Vec<LeaveRequest>, LeaveError> {
        let sql = format!(
            "SELECT {} FROM leave_requests ORDER BY created_at DESC",
            LEAVE_COLUMNS
        );

        let rows = sqlx::query_as::<_, LeaveRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to fetch leave requests");
                LeaveError::from(e)
            })?;

        into_requests(rows)
    }

    async fn list_leave_requests_for_employee(
        &self,
        employee_id: &str,
    ) -> Result<Vec<LeaveRequest>, LeaveError> {
        let sql = format!(
            "SELECT {} FROM leave_requests WHERE employee_id = ? ORDER BY created_at DESC",
            LEAVE_COLUMNS
        );

        let rows = sqlx::query_as::<_, LeaveRow>(&sql)
            .bind(employee_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, employee_id, "Failed to fetch employee leave requests");
                LeaveError::from(e)
            })?;

        into_requests(rows)
    }

    async fn get_leave_request(&self, id: &str) -> Result<Option<LeaveRequest>, LeaveError> {
        let sql = format!("SELECT {} FROM leave_requests WHERE id = ?", LEAVE_COLUMNS);

        let row = sqlx::query_as::<_, LeaveRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, leave_id = id, "Failed to fetch leave request");
                LeaveError::from(e)
            })?;

        row.map(LeaveRequest::try_from).transpose()
    }

    async fn get_leave_balance(
        &self,
        employee_id: &str,
    ) -> Result<Option<LeaveBalance>, LeaveError> {
        sqlx::query_as::<_, LeaveBalance>(
            r#"
            SELECT employee_id, annual_leave, sick_leave, personal_leave
            FROM leave_balances
            WHERE employee_id = ?
            LIMIT 1
            "#,
        )
        .bind(employee_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, employee_id, "Failed to fetch leave balance");
            LeaveError::from(e)
        })
    }

    async fn update_status(&self, id: &str, status: LeaveStatus) -> Result<bool, LeaveError> {
        let result = sqlx::query(
            r#"
            UPDATE leave_requests
            SET status = ?
            WHERE id = ?
            AND status = 'pending'
            "#,
        )
        .bind(status.as_ref())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, leave_id = id, %status, "Leave status update failed");
            LeaveError::from(e)
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_leave_request(
        &self,
        employee_id: &str,
        leave: NewLeave,
    ) -> Result<LeaveRequest, LeaveError> {
        let request = LeaveRequest {
            id: Uuid::new_v4().to_string(),
            employee_id: employee_id.to_string(),
            leave_type: leave.leave_type,
            start_date: leave.start_date,
            end_date: leave.end_date,
            reason: leave.reason,
            status: LeaveStatus::Pending,
            days_requested: leave.days_requested,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO leave_requests
                (id, employee_id, leave_type, start_date, end_date,
                 reason, status, days_requested, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&request.id)
        .bind(&request.employee_id)
        .bind(request.leave_type.as_str())
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(request.reason.as_deref())
        .bind(request.status.as_ref())
        .bind(request.days_requested)
        .bind(request.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, employee_id, "Failed to create leave request");
            LeaveError::from(e)
        })?;

        Ok(request)
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, LeaveError> {
        let rows = sqlx::query_as::<_, ProfileRow>(
            "SELECT user_id, full_name, role FROM profiles",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to fetch profiles");
            LeaveError::from(e)
        })?;

        Ok(rows.into_iter().map(Profile::from).collect())
    }

    async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, LeaveError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            "SELECT user_id, full_name, role FROM profiles WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id, "Failed to fetch profile");
            LeaveError::from(e)
        })?;

        Ok(row.map(Profile::from))
    }
}
