//! Attaches employee display names to stored leave requests.
//!
//! Names are not part of the stored row. They come from a second query
//! against the profiles and are joined here.

use std::collections::HashMap;

use crate::error::LeaveError;
use crate::model::leave_request::{LeaveRecord, LeaveRequest};
use crate::model::profile::{Profile, UNKNOWN_EMPLOYEE};
use crate::store::LeaveStore;
use crate::utils::name_cache::NameCache;

pub fn join_names(requests: Vec<LeaveRequest>, profiles: &[Profile]) -> Vec<LeaveRecord> {
    let names: HashMap<&str, &str> = profiles
        .iter()
        .map(|p| (p.user_id.as_str(), p.display_name()))
        .collect();

    requests
        .into_iter()
        .map(|request| {
            let employee_name = names
                .get(request.employee_id.as_str())
                .copied()
                .unwrap_or(UNKNOWN_EMPLOYEE)
                .to_string();
            LeaveRecord {
                request,
                employee_name,
            }
        })
        .collect()
}

/// Display name for one employee, `"Unknown Employee"` when no profile
/// matches. Only names backed by a profile are cached.
pub async fn resolve_employee_name<S: LeaveStore>(
    store: &S,
    cache: &NameCache,
    employee_id: &str,
) -> Result<String, LeaveError> {
    if let Some(name) = cache.get(employee_id).await {
        return Ok(name);
    }

    match store.get_profile(employee_id).await? {
        Some(profile) => {
            let name = profile.display_name().to_string();
            cache.insert(employee_id, &name).await;
            Ok(name)
        }
        None => Ok(UNKNOWN_EMPLOYEE.to_string()),
    }
}

/// All leave records, newest first, with names attached.
pub async fn load_records<S: LeaveStore>(
    store: &S,
    cache: &NameCache,
) -> Result<Vec<LeaveRecord>, LeaveError> {
    let requests = store.list_leave_requests().await?;
    let profiles = store.list_profiles().await?;
    cache.remember(&profiles).await;

    Ok(join_names(requests, &profiles))
}

/// One employee's own records; a single name lookup covers all of them.
pub async fn load_employee_records<S: LeaveStore>(
    store: &S,
    cache: &NameCache,
    employee_id: &str,
) -> Result<Vec<LeaveRecord>, LeaveError> {
    let requests = store.list_leave_requests_for_employee(employee_id).await?;
    let employee_name = resolve_employee_name(store, cache, employee_id).await?;

    Ok(requests
        .into_iter()
        .map(|request| LeaveRecord {
            request,
            employee_name: employee_name.clone(),
        })
        .collect())
}

pub async fn load_record<S: LeaveStore>(
    store: &S,
    cache: &NameCache,
    id: &str,
) -> Result<LeaveRecord, LeaveError> {
    let request = store
        .get_leave_request(id)
        .await?
        .ok_or_else(|| LeaveError::NotFound(format!("leave request {id}")))?;
    let employee_name = resolve_employee_name(store, cache, &request.employee_id).await?;

    Ok(LeaveRecord {
        request,
        employee_name,
    })
}
