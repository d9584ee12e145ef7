//! Leave dashboard logic: status counts, the approved-leave calendar and
//! the approve/reject flow, all computed from records fetched through
//! [`crate::store::LeaveStore`].

pub mod board;
pub mod calendar;
pub mod join;
pub mod stats;
pub mod transition;
