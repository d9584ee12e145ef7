use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use chrono::{Duration, TimeZone, Utc};

use super::LeaveStore;
use crate::error::LeaveError;
use crate::model::leave_balance::LeaveBalance;
use crate::model::leave_request::{LeaveRequest, LeaveStatus, NewLeave};
use crate::model::profile::Profile;

/// In-process store for tests. `set_offline(true)` makes every call fail the
/// way an unreachable database would.
#[derive(Default)]
pub struct MemoryLeaveStore {
    requests: Mutex<Vec<LeaveRequest>>,
    balances: Mutex<Vec<LeaveBalance>>,
    profiles: Mutex<Vec<Profile>>,
    offline: AtomicBool,
    status_updates: AtomicUsize,
    profile_lookups: AtomicUsize,
}

impl MemoryLeaveStore {
    pub fn new(requests: Vec<LeaveRequest>, profiles: Vec<Profile>) -> Self {
        Self {
            requests: Mutex::new(requests),
            profiles: Mutex::new(profiles),
            ..Default::default()
        }
    }

    pub fn with_balance(self, balance: LeaveBalance) -> Self {
        self.balances.lock().unwrap().push(balance);
        self
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of `update_status` calls that reached the store.
    pub fn status_updates(&self) -> usize {
        self.status_updates.load(Ordering::SeqCst)
    }

    pub fn profile_lookups(&self) -> usize {
        self.profile_lookups.load(Ordering::SeqCst)
    }

    pub fn stored_status(&self, id: &str) -> Option<LeaveStatus> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.status)
    }

    fn check_online(&self) -> Result<(), LeaveError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(LeaveError::StoreUnavailable("connection refused".into()))
        } else {
            Ok(())
        }
    }
}

fn newest_first(mut requests: Vec<LeaveRequest>) -> Vec<LeaveRequest> {
    requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    requests
}

impl LeaveStore for MemoryLeaveStore {
    async fn list_leave_requests(&self) -> Result<Vec<LeaveRequest>, LeaveError> {
        self.check_online()?;
        Ok(newest_first(self.requests.lock().unwrap().clone()))
    }

    async fn list_leave_requests_for_employee(
        &self,
        employee_id: &str,
    ) -> Result<Vec<LeaveRequest>, LeaveError> {
        self.check_online()?;
        let requests = self
            .requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.employee_id == employee_id)
            .cloned()
            .collect();
        Ok(newest_first(requests))
    }

    async fn get_leave_request(&self, id: &str) -> Result<Option<LeaveRequest>, LeaveError> {
        self.check_online()?;
        Ok(self.requests.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn get_leave_balance(
        &self,
        employee_id: &str,
    ) -> Result<Option<LeaveBalance>, LeaveError> {
        self.check_online()?;
        Ok(self
            .balances
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.employee_id == employee_id)
            .cloned())
    }

    async fn update_status(&self, id: &str, status: LeaveStatus) -> Result<bool, LeaveError> {
        self.check_online()?;
        self.status_updates.fetch_add(1, Ordering::SeqCst);

        let mut requests = self.requests.lock().unwrap();
        match requests
            .iter_mut()
            .find(|r| r.id == id && r.status == LeaveStatus::Pending)
        {
            Some(request) => {
                request.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn insert_leave_request(
        &self,
        employee_id: &str,
        leave: NewLeave,
    ) -> Result<LeaveRequest, LeaveError> {
        self.check_online()?;
        let mut requests = self.requests.lock().unwrap();
        // Strictly increasing timestamps keep newest-first ordering stable.
        let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
            + Duration::minutes(requests.len() as i64 + 1);

        let request = LeaveRequest {
            id: format!("req-{}", requests.len() + 1),
            employee_id: employee_id.to_string(),
            leave_type: leave.leave_type,
            start_date: leave.start_date,
            end_date: leave.end_date,
            reason: leave.reason,
            status: LeaveStatus::Pending,
            days_requested: leave.days_requested,
            created_at,
        };
        requests.push(request.clone());
        Ok(request)
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, LeaveError> {
        self.check_online()?;
        Ok(self.profiles.lock().unwrap().clone())
    }

    async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, LeaveError> {
        self.check_online()?;
        self.profile_lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.user_id == user_id)
            .cloned())
    }
}
