//! Month grid of approved leave.
//!
//! For each day of a month the grid lists every approved record whose
//! inclusive `start_date..=end_date` range contains that day. Comparison is
//! by calendar date only.

use std::collections::HashSet;

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::leave_request::{LeaveRecord, LeaveStatus, LeaveType, PaletteBucket};

/// A calendar month, always pointing at a representable first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "MonthView")]
pub struct CalendarMonth {
    first: NaiveDate,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MonthView {
    #[schema(example = 2024)]
    pub year: i32,
    #[schema(example = 3)]
    pub month: u32,
    #[schema(example = "March 2024")]
    pub label: String,
}

impl From<CalendarMonth> for MonthView {
    fn from(month: CalendarMonth) -> Self {
        MonthView {
            year: month.year(),
            month: month.month(),
            label: month.label(),
        }
    }
}

impl CalendarMonth {
    /// `None` unless `month` is 1..=12 and the year is within chrono's range.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date - chrono::Days::new(u64::from(date.day0())),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.first + chrono::Days::new(u64::from(self.days_in_month() - 1))
    }

    pub fn days_in_month(&self) -> u32 {
        match self.first.checked_add_months(Months::new(1)) {
            Some(next) => (next - self.first).num_days() as u32,
            // only December of chrono's last year has no successor
            None => 31,
        }
    }

    /// Number of empty cells before day 1 in a Sunday-first week row.
    pub fn leading_blank_days(&self) -> u32 {
        self.first.weekday().num_days_from_sunday()
    }

    /// The following month; December rolls over into January of the next
    /// year. Stays put at the end of the representable range.
    pub fn next(self) -> Self {
        self.first
            .checked_add_months(Months::new(1))
            .map(|first| Self { first })
            .unwrap_or(self)
    }

    /// The preceding month; January rolls back into December of the
    /// previous year.
    pub fn prev(self) -> Self {
        self.first
            .checked_sub_months(Months::new(1))
            .map(|first| Self { first })
            .unwrap_or(self)
    }

    pub fn label(&self) -> String {
        self.first.format("%B %Y").to_string()
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.first.iter_days().take(self.days_in_month() as usize)
    }
}

/// What the grid shows for one record on one day.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CalendarEntry {
    pub id: String,
    pub employee_id: String,
    #[schema(example = "Jane Doe")]
    pub employee_name: String,
    #[schema(example = "annual", value_type = String)]
    pub leave_type: LeaveType,
    pub palette: PaletteBucket,
}

impl From<&LeaveRecord> for CalendarEntry {
    fn from(record: &LeaveRecord) -> Self {
        CalendarEntry {
            id: record.request.id.clone(),
            employee_id: record.request.employee_id.clone(),
            employee_name: record.employee_name.clone(),
            leave_type: record.request.leave_type.clone(),
            palette: record.request.leave_type.palette(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CalendarDay {
    #[schema(example = 1)]
    pub day: u32,
    #[schema(example = "2024-03-01", format = "date", value_type = String)]
    pub date: NaiveDate,
    pub entries: Vec<CalendarEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CalendarGrid {
    #[schema(value_type = MonthView)]
    pub month: CalendarMonth,
    #[schema(example = 5)]
    pub leading_blank_days: u32,
    pub days: Vec<CalendarDay>,
}

#[cfg(test)]
impl CalendarGrid {
    pub fn day(&self, day: u32) -> Option<&CalendarDay> {
        self.days.get(day.checked_sub(1)? as usize)
    }
}

/// Figures shown under the calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct CalendarSummary {
    /// Number of approved records.
    #[schema(example = 4)]
    pub approved_leaves: usize,
    /// Sum of `days_requested`; not the number of calendar days covered.
    #[schema(example = 9)]
    pub total_days: u64,
    /// Distinct employee display names. Two people sharing a name count once.
    #[schema(example = 3)]
    pub employees_on_leave: usize,
}

fn approved(records: &[LeaveRecord]) -> impl Iterator<Item = &LeaveRecord> {
    records
        .iter()
        .filter(|r| r.status() == LeaveStatus::Approved)
}

/// Builds the per-day membership lists for `month`.
///
/// Only approved records take part. Each record is clamped to the month and
/// dropped into the days it covers, so the cost is proportional to the
/// records plus the covered days rather than days × records. Within a day,
/// entries keep the input order.
pub fn compute_calendar_grid(month: CalendarMonth, records: &[LeaveRecord]) -> CalendarGrid {
    let mut days: Vec<CalendarDay> = month
        .days()
        .map(|date| CalendarDay {
            day: date.day(),
            date,
            entries: Vec::new(),
        })
        .collect();

    let (first, last) = (month.first_day(), month.last_day());
    for record in approved(records) {
        let start = record.request.start_date.max(first);
        let end = record.request.end_date.min(last);
        if start > end {
            continue;
        }

        let entry = CalendarEntry::from(record);
        for date in start
            .iter_days()
            .take_while(|d| *d <= last && record.request.covers(*d))
        {
            days[date.day0() as usize].entries.push(entry.clone());
        }
    }

    CalendarGrid {
        month,
        leading_blank_days: month.leading_blank_days(),
        days,
    }
}

pub fn summarize(records: &[LeaveRecord]) -> CalendarSummary {
    let mut names = HashSet::new();
    let mut summary = CalendarSummary::default();

    for record in approved(records) {
        summary.approved_leaves += 1;
        summary.total_days += u64::from(record.request.days_requested);
        names.insert(record.employee_name.as_str());
    }

    summary.employees_on_leave = names.len();
    summary
}
