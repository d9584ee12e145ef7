use serde::Serialize;

use crate::error::LeaveError;
use crate::leave::stats::{DashboardStats, compute_stats};
use crate::model::leave_request::{Decision, LeaveRecord, LeaveStatus};
use crate::store::LeaveStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TransitionOutcome {
    /// Persisted and reflected in the returned records.
    Applied { status: LeaveStatus },
    /// No record with that id in the current set.
    NotFound,
    /// The record had already left `pending`.
    InvalidTransition { current: LeaveStatus },
    /// The store found no pending row to update, usually because another
    /// reviewer got there first.
    AlreadyProcessed,
}

impl TransitionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, TransitionOutcome::Applied { .. })
    }
}

#[derive(Debug, Clone)]
pub struct TransitionResult {
    pub records: Vec<LeaveRecord>,
    pub stats: DashboardStats,
    pub outcome: TransitionOutcome,
}

impl TransitionResult {
    fn unchanged(current: &[LeaveRecord], outcome: TransitionOutcome) -> Self {
        TransitionResult {
            records: current.to_vec(),
            stats: compute_stats(current),
            outcome,
        }
    }
}

/// Approves or rejects one pending request.
///
/// The store is written first; `current` is only copied with the new status
/// once the store confirms the write. Unknown ids and non-pending records are
/// no-ops and never reach the store. A store failure is returned as an error
/// and `current` stays authoritative.
pub async fn apply_status_transition<S: LeaveStore>(
    store: &S,
    request_id: &str,
    decision: Decision,
    current: &[LeaveRecord],
) -> Result<TransitionResult, LeaveError> {
    let Some(record) = current.iter().find(|r| r.request.id == request_id) else {
        tracing::warn!(leave_id = request_id, "Transition target not in current records");
        return Ok(TransitionResult::unchanged(current, TransitionOutcome::NotFound));
    };

    if record.status() != LeaveStatus::Pending {
        tracing::warn!(
            leave_id = request_id,
            current = %record.status(),
            ?decision,
            "Ignoring transition of a request that is no longer pending"
        );
        return Ok(TransitionResult::unchanged(
            current,
            TransitionOutcome::InvalidTransition {
                current: record.status(),
            },
        ));
    }

    let status = decision.target_status();
    if !store.update_status(request_id, status).await? {
        tracing::warn!(leave_id = request_id, %status, "Store had no pending row to update");
        return Ok(TransitionResult::unchanged(
            current,
            TransitionOutcome::AlreadyProcessed,
        ));
    }

    let records: Vec<LeaveRecord> = current
        .iter()
        .map(|r| {
            let mut r = r.clone();
            if r.request.id == request_id {
                r.request.status = status;
            }
            r
        })
        .collect();
    let stats = compute_stats(&records);

    tracing::info!(leave_id = request_id, %status, "Leave request {}", status);

    Ok(TransitionResult {
        records,
        stats,
        outcome: TransitionOutcome::Applied { status },
    })
}
