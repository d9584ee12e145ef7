use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[derive(EnumString, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

/// Administrator decision on a pending request.
///
/// There is no way back to `Pending`, so a transition can only ever
/// target one of the two final states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    pub fn target_status(self) -> LeaveStatus {
        match self {
            Decision::Approve => LeaveStatus::Approved,
            Decision::Reject => LeaveStatus::Rejected,
        }
    }
}

/// Kind of leave being requested.
///
/// Parsing never fails: values outside the known set are kept verbatim in
/// `Unrecognized` so newer leave types survive a round trip through this
/// service. The older `*_leave` spellings map to the same variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum LeaveType {
    #[strum(serialize = "annual", serialize = "annual_leave")]
    Annual,
    #[strum(serialize = "sick", serialize = "sick_leave")]
    Sick,
    #[strum(serialize = "personal", serialize = "personal_leave")]
    Personal,
    #[strum(serialize = "maternity", serialize = "maternity_leave")]
    Maternity,
    #[strum(serialize = "paternity", serialize = "paternity_leave")]
    Paternity,
    #[strum(serialize = "other", serialize = "other_leave")]
    Other,
    #[strum(default)]
    Unrecognized(String),
}

impl LeaveType {
    pub const KNOWN: [LeaveType; 6] = [
        LeaveType::Annual,
        LeaveType::Sick,
        LeaveType::Personal,
        LeaveType::Maternity,
        LeaveType::Paternity,
        LeaveType::Other,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            LeaveType::Annual => "annual",
            LeaveType::Sick => "sick",
            LeaveType::Personal => "personal",
            LeaveType::Maternity => "maternity",
            LeaveType::Paternity => "paternity",
            LeaveType::Other => "other",
            LeaveType::Unrecognized(raw) => raw,
        }
    }

    /// Colour bucket used by the calendar and request lists.
    pub fn palette(&self) -> PaletteBucket {
        match self {
            LeaveType::Annual => PaletteBucket::Primary,
            LeaveType::Sick => PaletteBucket::Destructive,
            LeaveType::Personal => PaletteBucket::Warning,
            LeaveType::Maternity => PaletteBucket::Accent,
            LeaveType::Paternity => PaletteBucket::Secondary,
            _ => PaletteBucket::Muted,
        }
    }
}

impl From<String> for LeaveType {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        match trimmed.parse::<LeaveType>() {
            Ok(LeaveType::Unrecognized(_)) | Err(_) => LeaveType::Unrecognized(value),
            Ok(known) => known,
        }
    }
}

impl From<LeaveType> for String {
    fn from(value: LeaveType) -> Self {
        match value {
            LeaveType::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl Serialize for LeaveType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LeaveType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(LeaveType::from)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaletteBucket {
    Primary,
    Destructive,
    Warning,
    Accent,
    Secondary,
    /// Fallback for `other` and any type this build does not know about.
    Muted,
}

/// Leave request as persisted by the record store. Carries no display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LeaveRequest {
    #[schema(example = "6f1c2b1e-2f52-4f9a-9a53-2d9a4e8f7c10")]
    pub id: String,
    #[schema(example = "b7d1a0e4-8c1b-4a7e-9f7e-3c2d1e0f9a88")]
    pub employee_id: String,
    #[schema(example = "annual", value_type = String)]
    pub leave_type: LeaveType,
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2026-01-03", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = "Family trip", nullable = true)]
    pub reason: Option<String>,
    pub status: LeaveStatus,
    #[schema(example = 3)]
    pub days_requested: u32,
    #[schema(example = "2026-01-01T00:00:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}

impl LeaveRequest {
    /// Inclusive date-range membership, by calendar date only.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Leave request joined with the submitting employee's display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LeaveRecord {
    #[serde(flatten)]
    pub request: LeaveRequest,
    #[schema(example = "Jane Doe")]
    pub employee_name: String,
}

impl LeaveRecord {
    pub fn status(&self) -> LeaveStatus {
        self.request.status
    }
}

/// Payload submitted by an employee applying for leave.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewLeave {
    #[schema(example = "annual", value_type = String)]
    pub leave_type: LeaveType,
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2026-01-03", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = "Family trip", nullable = true)]
    pub reason: Option<String>,
    #[schema(example = 3)]
    pub days_requested: u32,
}
