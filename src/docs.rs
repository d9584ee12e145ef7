use crate::api::leave_request::{
    CalendarResponse, DecisionResponse, LeaveFilter, LeaveListResponse, LegendEntry,
    MyLeaveResponse,
};
use crate::leave::calendar::{CalendarDay, CalendarEntry, CalendarGrid, CalendarSummary, MonthView};
use crate::leave::stats::{DashboardStats, StatusFilter};
use crate::model::leave_balance::LeaveBalance;
use crate::model::leave_request::{
    LeaveRecord, LeaveRequest, LeaveStatus, NewLeave, PaletteBucket,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Leave Desk API",
        version = "1.0.0",
        description = r#"
## Leave Desk

Leave request management for HR teams and employees.

### Features
- **Dashboard**
  - Pending, approved and rejected counts over every request
- **Review**
  - Approve or reject pending requests (Admin / HR)
- **Calendar**
  - Month grid of approved leave with per-type colours
- **Self service**
  - Submit leave and view your own requests and balance

### Security
Every endpoint requires a **JWT Bearer** token.
"#,
    ),
    paths(
        crate::api::leave_request::leave_list,
        crate::api::leave_request::leave_stats,
        crate::api::leave_request::leave_calendar,
        crate::api::leave_request::my_leave,
        crate::api::leave_request::get_leave,
        crate::api::leave_request::create_leave,
        crate::api::leave_request::approve_leave,
        crate::api::leave_request::reject_leave,
    ),
    components(
        schemas(
            LeaveFilter,
            LeaveListResponse,
            DecisionResponse,
            CalendarResponse,
            MyLeaveResponse,
            LegendEntry,
            LeaveRecord,
            LeaveRequest,
            LeaveStatus,
            NewLeave,
            PaletteBucket,
            LeaveBalance,
            DashboardStats,
            StatusFilter,
            MonthView,
            CalendarGrid,
            CalendarDay,
            CalendarEntry,
            CalendarSummary
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Leave", description = "Leave management APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
