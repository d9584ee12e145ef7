use crate::error::LeaveError;
use crate::leave::calendar::{CalendarGrid, CalendarMonth, CalendarSummary, compute_calendar_grid, summarize};
use crate::leave::join::load_records;
use crate::leave::stats::{DashboardStats, StatusFilter, compute_stats};
use crate::leave::transition::{TransitionOutcome, apply_status_transition};
use crate::model::leave_request::{Decision, LeaveRecord};
use crate::store::LeaveStore;
use crate::utils::name_cache::NameCache;

/// Last successfully fetched records together with their stats.
///
/// Both fields are only ever replaced together, after the store call that
/// produced them has completed. A failed refresh or transition leaves the
/// board exactly as it was.
#[derive(Debug, Clone, Default)]
pub struct LeaveBoard {
    records: Vec<LeaveRecord>,
    stats: DashboardStats,
}

impl LeaveBoard {
    pub fn new(records: Vec<LeaveRecord>) -> Self {
        let stats = compute_stats(&records);
        Self { records, stats }
    }

    pub async fn load<S: LeaveStore>(store: &S, names: &NameCache) -> Result<Self, LeaveError> {
        let mut board = Self::default();
        board.refresh(store, names).await?;
        Ok(board)
    }

    /// Replaces the records with a fresh fetch. On error the board is untouched.
    pub async fn refresh<S: LeaveStore>(
        &mut self,
        store: &S,
        names: &NameCache,
    ) -> Result<(), LeaveError> {
        *self = Self::new(load_records(store, names).await?);
        Ok(())
    }

    pub async fn apply_transition<S: LeaveStore>(
        &mut self,
        store: &S,
        request_id: &str,
        decision: Decision,
    ) -> Result<TransitionOutcome, LeaveError> {
        let result = apply_status_transition(store, request_id, decision, &self.records).await?;
        if result.outcome.is_applied() {
            self.records = result.records;
            self.stats = result.stats;
        }
        Ok(result.outcome)
    }

    #[cfg(test)]
    pub fn records(&self) -> &[LeaveRecord] {
        &self.records
    }

    pub fn stats(&self) -> DashboardStats {
        self.stats
    }

    pub fn filtered(&self, filter: StatusFilter) -> Vec<&LeaveRecord> {
        filter.apply(&self.records).collect()
    }

    /// Approved-leave grid for `month`.
    pub fn calendar(&self, month: CalendarMonth) -> CalendarGrid {
        compute_calendar_grid(month, &self.records)
    }

    pub fn calendar_summary(&self) -> CalendarSummary {
        summarize(&self.records)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::leave::fixtures::{profile, request, ymd};
    use crate::model::leave_request::LeaveStatus;
    use crate::model::role::Role;
    use crate::store::memory::MemoryLeaveStore;

    fn names() -> NameCache {
        NameCache::new(100, Duration::from_secs(60))
    }

    fn seeded_store() -> MemoryLeaveStore {
        MemoryLeaveStore::new(
            vec![
                request("1", "e1", LeaveStatus::Approved, ymd(2024, 3, 1), ymd(2024, 3, 3), 3),
                request("2", "e2", LeaveStatus::Pending, ymd(2024, 3, 5), ymd(2024, 3, 5), 1),
            ],
            vec![
                profile("e1", "Alice", Role::Employee),
                profile("e2", "Bob", Role::Employee),
            ],
        )
    }

    #[actix_web::test]
    async fn failed_refresh_keeps_previous_state() {
        let store = seeded_store();
        let names = names();
        let mut board = LeaveBoard::load(&store, &names).await.unwrap();
        let march = CalendarMonth::new(2024, 3).unwrap();

        let stats_before = board.stats();
        let grid_before = board.calendar(march);

        store.set_offline(true);
        let err = board.refresh(&store, &names).await.unwrap_err();

        assert!(matches!(err, LeaveError::StoreUnavailable(_)));
        assert_eq!(board.stats(), stats_before);
        assert_eq!(board.calendar(march), grid_before);
        assert_eq!(board.records().len(), 2);
    }

    #[actix_web::test]
    async fn transition_updates_stats_and_calendar() {
        let store = seeded_store();
        let names = names();
        let mut board = LeaveBoard::load(&store, &names).await.unwrap();
        let march = CalendarMonth::new(2024, 3).unwrap();

        assert!(board.calendar(march).day(5).unwrap().entries.is_empty());

        let outcome = board
            .apply_transition(&store, "2", Decision::Approve)
            .await
            .unwrap();

        assert!(outcome.is_applied());
        assert_eq!(board.stats(), DashboardStats { total: 2, pending: 0, approved: 2, rejected: 0 });
        let grid = board.calendar(march);
        let day5 = &grid.day(5).unwrap().entries;
        assert_eq!(day5.len(), 1);
        assert_eq!(day5[0].employee_name, "Bob");
        assert_eq!(board.calendar_summary().employees_on_leave, 2);
    }

    #[actix_web::test]
    async fn failed_transition_keeps_previous_state() {
        let store = seeded_store();
        let names = names();
        let mut board = LeaveBoard::load(&store, &names).await.unwrap();
        let before = board.stats();

        store.set_offline(true);
        assert!(board.apply_transition(&store, "2", Decision::Reject).await.is_err());
        assert_eq!(board.stats(), before);
        assert_eq!(board.filtered(StatusFilter::Pending).len(), 1);
    }

    #[actix_web::test]
    async fn repeated_decision_is_ignored() {
        let store = seeded_store();
        let names = names();
        let mut board = LeaveBoard::load(&store, &names).await.unwrap();

        board.apply_transition(&store, "2", Decision::Reject).await.unwrap();
        let stats = board.stats();

        let outcome = board
            .apply_transition(&store, "2", Decision::Approve)
            .await
            .unwrap();
        assert_eq!(outcome, TransitionOutcome::InvalidTransition { current: LeaveStatus::Rejected });
        assert_eq!(board.stats(), stats);
        assert_eq!(store.stored_status("2"), Some(LeaveStatus::Rejected));
    }
}
