use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::leave_request::{LeaveRecord, LeaveStatus};

/// Request counts shown on the administrator dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DashboardStats {
    #[schema(example = 12)]
    pub total: usize,
    #[schema(example = 4)]
    pub pending: usize,
    #[schema(example = 6)]
    pub approved: usize,
    #[schema(example = 2)]
    pub rejected: usize,
}

/// Counts records by status. Always a full pass over `records`.
pub fn compute_stats(records: &[LeaveRecord]) -> DashboardStats {
    records
        .iter()
        .fold(DashboardStats::default(), |mut stats, record| {
            stats.total += 1;
            match record.status() {
                LeaveStatus::Pending => stats.pending += 1,
                LeaveStatus::Approved => stats.approved += 1,
                LeaveStatus::Rejected => stats.rejected += 1,
            }
            stats
        })
}

/// Status filter for request lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Approved,
    Rejected,
}

impl StatusFilter {
    pub fn matches(self, status: LeaveStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => status == LeaveStatus::Pending,
            StatusFilter::Approved => status == LeaveStatus::Approved,
            StatusFilter::Rejected => status == LeaveStatus::Rejected,
        }
    }

    pub fn apply<'a>(self, records: &'a [LeaveRecord]) -> impl Iterator<Item = &'a LeaveRecord> {
        records.iter().filter(move |r| self.matches(r.status()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leave::fixtures::{record, ymd};

    #[test]
    fn empty_input_is_all_zero() {
        assert_eq!(compute_stats(&[]), DashboardStats::default());
    }

    #[test]
    fn counts_sum_to_total() {
        let records = vec![
            record("1", "e1", "Alice", LeaveStatus::Approved, ymd(2024, 3, 1), ymd(2024, 3, 3), 3),
            record("2", "e2", "Bob", LeaveStatus::Pending, ymd(2024, 3, 5), ymd(2024, 3, 5), 1),
            record("3", "e2", "Bob", LeaveStatus::Rejected, ymd(2024, 4, 1), ymd(2024, 4, 2), 2),
            record("4", "e3", "Cara", LeaveStatus::Pending, ymd(2024, 4, 9), ymd(2024, 4, 9), 1),
        ];

        let stats = compute_stats(&records);
        assert_eq!(stats.total, records.len());
        assert_eq!(stats.pending + stats.approved + stats.rejected, stats.total);
        assert_eq!(
            stats,
            DashboardStats { total: 4, pending: 2, approved: 1, rejected: 1 }
        );
    }

    #[test]
    fn alice_and_bob_scenario() {
        let records = vec![
            record("1", "e1", "Alice", LeaveStatus::Approved, ymd(2024, 3, 1), ymd(2024, 3, 3), 3),
            record("2", "e2", "Bob", LeaveStatus::Pending, ymd(2024, 3, 5), ymd(2024, 3, 5), 1),
        ];

        assert_eq!(
            compute_stats(&records),
            DashboardStats { total: 2, pending: 1, approved: 1, rejected: 0 }
        );
    }

    #[test]
    fn filter_keeps_matching_status_only() {
        let records = vec![
            record("1", "e1", "Alice", LeaveStatus::Approved, ymd(2024, 3, 1), ymd(2024, 3, 3), 3),
            record("2", "e2", "Bob", LeaveStatus::Pending, ymd(2024, 3, 5), ymd(2024, 3, 5), 1),
        ];

        let pending: Vec<_> = StatusFilter::Pending.apply(&records).map(|r| r.request.id.as_str()).collect();
        assert_eq!(pending, vec!["2"]);
        assert_eq!(StatusFilter::All.apply(&records).count(), 2);
        assert_eq!(StatusFilter::Rejected.apply(&records).count(), 0);
    }
}
