use crate::auth::auth::AuthUser;
use crate::error::LeaveError;
use crate::leave::board::LeaveBoard;
use crate::leave::calendar::{CalendarGrid, CalendarMonth, CalendarSummary};
use crate::leave::join::{load_employee_records, load_record, resolve_employee_name};
use crate::leave::stats::{DashboardStats, StatusFilter};
use crate::leave::transition::TransitionOutcome;
use crate::model::leave_balance::LeaveBalance;
use crate::model::leave_request::{
    Decision, LeaveRecord, LeaveStatus, LeaveType, NewLeave, PaletteBucket,
};
use crate::store::LeaveStore;
use crate::utils::name_cache::NameCache;
use actix_web::{HttpResponse, Responder, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct LeaveFilter {
    /// Filter by leave status (all, pending, approved, rejected)
    pub status: Option<StatusFilter>,
    #[schema(example = 1)]
    /// Pagination page number (start with 1)
    pub page: Option<u64>, // 1-based
    #[schema(example = 10)]
    /// Pagination per page number
    pub per_page: Option<u64>, // items per page
}

#[derive(Serialize, ToSchema)]
pub struct LeaveListResponse {
    pub data: Vec<LeaveRecord>,
    /// Counts over every request, regardless of the status filter
    pub stats: DashboardStats,
    #[schema(example = 1)]
    pub page: u64,
    #[schema(example = 10)]
    pub per_page: u64,
    /// Number of requests matching the filter
    #[schema(example = 1)]
    pub total: usize,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CalendarQuery {
    /// Calendar year, defaults to the current year
    pub year: Option<i32>,
    /// Month 1-12, defaults to the current month
    pub month: Option<u32>,
}

#[derive(Serialize, ToSchema)]
pub struct LegendEntry {
    #[schema(example = "annual")]
    pub leave_type: String,
    pub palette: PaletteBucket,
}

#[derive(Serialize, ToSchema)]
pub struct CalendarResponse {
    #[schema(value_type = MonthView)]
    pub month: CalendarMonth,
    #[schema(value_type = MonthView)]
    pub previous: CalendarMonth,
    #[schema(value_type = MonthView)]
    pub next: CalendarMonth,
    pub grid: CalendarGrid,
    pub summary: CalendarSummary,
    pub legend: Vec<LegendEntry>,
}

#[derive(Serialize, ToSchema)]
pub struct MyLeaveResponse {
    pub data: Vec<LeaveRecord>,
    /// All zero when no balance has been set up for the employee
    pub balance: LeaveBalance,
}

#[derive(Serialize, ToSchema)]
pub struct DecisionResponse {
    #[schema(example = "Leave approved")]
    pub message: String,
    pub status: LeaveStatus,
    /// Counts after the decision was recorded
    pub stats: DashboardStats,
}

fn validate_new_leave(payload: &NewLeave) -> Result<(), LeaveError> {
    if payload.start_date > payload.end_date {
        return Err(LeaveError::Validation(
            "start_date cannot be after end_date".into(),
        ));
    }

    if let LeaveType::Unrecognized(raw) = &payload.leave_type {
        return Err(LeaveError::Validation(format!(
            "Invalid leave type {raw:?}. Allowed: annual, sick, personal, maternity, paternity, other"
        )));
    }

    Ok(())
}

/* =========================
Create leave request
========================= */
/// Swagger doc for create_leave endpoint
#[utoipa::path(
    post,
    path = "/api/leave",
    request_body(
        content = NewLeave,
        description = "Leave request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "Leave request submitted", body = LeaveRecord),
        (status = 400, description = "Bad request"),
        (status = 401, description = "Unauthorized"),
        (status = 503, description = "Leave store unavailable")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
#[instrument(name = "create_leave", skip_all, fields(employee_id = %auth.user_id))]
pub async fn create_leave<S: LeaveStore + 'static>(
    auth: AuthUser,
    store: web::Data<S>,
    names: web::Data<NameCache>,
    payload: web::Json<NewLeave>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    validate_new_leave(&payload)?;

    let request = store
        .insert_leave_request(&auth.user_id, payload)
        .await?;
    let employee_name =
        resolve_employee_name(store.get_ref(), names.get_ref(), &auth.user_id).await?;

    tracing::info!(leave_id = %request.id, "Leave request submitted");

    Ok(HttpResponse::Created().json(LeaveRecord {
        request,
        employee_name,
    }))
}

async fn decide<S: LeaveStore>(
    auth: AuthUser,
    store: &S,
    names: &NameCache,
    leave_id: &str,
    decision: Decision,
) -> actix_web::Result<HttpResponse> {
    auth.require_hr_or_admin()?;

    let mut board = LeaveBoard::load(store, names).await?;
    let outcome = board.apply_transition(store, leave_id, decision).await?;

    match outcome {
        TransitionOutcome::Applied { status } => {
            let message = match decision {
                Decision::Approve => "Leave approved",
                Decision::Reject => "Leave rejected",
            };
            Ok(HttpResponse::Ok().json(DecisionResponse {
                message: message.to_string(),
                status,
                stats: board.stats(),
            }))
        }
        TransitionOutcome::NotFound => {
            Err(LeaveError::NotFound(format!("leave request {leave_id}")).into())
        }
        TransitionOutcome::InvalidTransition { current } => {
            Err(LeaveError::InvalidTransition { from: current }.into())
        }
        TransitionOutcome::AlreadyProcessed => {
            Err(LeaveError::AlreadyProcessed(format!("leave request {leave_id}")).into())
        }
    }
}

/* =========================
Approve leave (HR/Admin)
========================= */
/// Swagger doc for approve_leave endpoint
#[utoipa::path(
    put,
    path = "/api/leave/{leave_id}/approve",
    params(
        ("leave_id" = String, Path, description = "ID of the leave request to approve")
    ),
    responses(
        (status = 200, description = "Leave approved successfully", body = DecisionResponse),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Leave request already processed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 503, description = "Leave store unavailable")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
#[instrument(name = "approve_leave", skip_all, fields(reviewer = %auth.user_id))]
pub async fn approve_leave<S: LeaveStore + 'static>(
    auth: AuthUser,
    store: web::Data<S>,
    names: web::Data<NameCache>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let leave_id = path.into_inner();
    decide(auth, store.get_ref(), names.get_ref(), &leave_id, Decision::Approve).await
}

/* =========================
Reject leave (HR/Admin)
========================= */
/// Swagger doc for reject_leave endpoint
#[utoipa::path(
    put,
    path = "/api/leave/{leave_id}/reject",
    params(
        ("leave_id" = String, Path, description = "ID of the leave request to reject")
    ),
    responses(
        (status = 200, description = "Leave rejected successfully", body = DecisionResponse),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Leave request already processed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 503, description = "Leave store unavailable")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
#[instrument(name = "reject_leave", skip_all, fields(reviewer = %auth.user_id))]
pub async fn reject_leave<S: LeaveStore + 'static>(
    auth: AuthUser,
    store: web::Data<S>,
    names: web::Data<NameCache>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let leave_id = path.into_inner();
    decide(auth, store.get_ref(), names.get_ref(), &leave_id, Decision::Reject).await
}

/// for getting a leave application details endpoint
#[utoipa::path(
    get,
    path = "/api/leave/{leave_id}",
    params(
        ("leave_id" = String, Path, description = "ID of the leave request to fetch")
    ),
    responses(
        (status = 200, description = "Leave request found", body = LeaveRecord),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn get_leave<S: LeaveStore + 'static>(
    auth: AuthUser,
    store: web::Data<S>,
    names: web::Data<NameCache>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let leave_id = path.into_inner();
    let record = load_record(store.get_ref(), names.get_ref(), &leave_id).await?;

    Ok(HttpResponse::Ok().json(record))
}

/// for getting leave applications endpoint
#[utoipa::path(
    get,
    path = "/api/leave",
    params(LeaveFilter),
    responses(
        (status = 200, description = "Paginated leave list with dashboard stats", body = LeaveListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 503, description = "Leave store unavailable")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn leave_list<S: LeaveStore + 'static>(
    auth: AuthUser,
    store: web::Data<S>,
    names: web::Data<NameCache>,
    query: web::Query<LeaveFilter>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    // -------------------------
    // Pagination
    // -------------------------
    let per_page = query.per_page.unwrap_or(10).clamp(1, 100);
    let page = query.page.unwrap_or(1).max(1);
    // Pages past the end come back empty rather than wrapping.
    let offset = usize::try_from((page - 1).saturating_mul(per_page)).unwrap_or(usize::MAX);

    let board = LeaveBoard::load(store.get_ref(), names.get_ref()).await?;
    let matching = board.filtered(query.status.unwrap_or_default());

    let response = LeaveListResponse {
        total: matching.len(),
        data: matching
            .into_iter()
            .skip(offset)
            .take(per_page as usize)
            .cloned()
            .collect(),
        stats: board.stats(),
        page,
        per_page,
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Request counts by status
#[utoipa::path(
    get,
    path = "/api/leave/stats",
    responses(
        (status = 200, description = "Dashboard stats", body = DashboardStats),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 503, description = "Leave store unavailable")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn leave_stats<S: LeaveStore + 'static>(
    auth: AuthUser,
    store: web::Data<S>,
    names: web::Data<NameCache>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let board = LeaveBoard::load(store.get_ref(), names.get_ref()).await?;
    Ok(HttpResponse::Ok().json(board.stats()))
}

/// Approved leave laid out on a month grid
#[utoipa::path(
    get,
    path = "/api/leave/calendar",
    params(CalendarQuery),
    responses(
        (status = 200, description = "Month grid of approved leave", body = CalendarResponse),
        (status = 400, description = "Invalid year or month"),
        (status = 401, description = "Unauthorized"),
        (status = 503, description = "Leave store unavailable")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn leave_calendar<S: LeaveStore + 'static>(
    _auth: AuthUser,
    store: web::Data<S>,
    names: web::Data<NameCache>,
    query: web::Query<CalendarQuery>,
) -> actix_web::Result<impl Responder> {
    let current = CalendarMonth::containing(Utc::now().date_naive());
    let year = query.year.unwrap_or(current.year());
    let month = query.month.unwrap_or(current.month());
    let month = CalendarMonth::new(year, month)
        .ok_or_else(|| LeaveError::Validation(format!("invalid month {year}-{month}")))?;

    let board = LeaveBoard::load(store.get_ref(), names.get_ref()).await?;

    let response = CalendarResponse {
        month,
        previous: month.prev(),
        next: month.next(),
        grid: board.calendar(month),
        summary: board.calendar_summary(),
        legend: LeaveType::KNOWN
            .iter()
            .map(|t| LegendEntry {
                leave_type: t.as_str().to_string(),
                palette: t.palette(),
            })
            .collect(),
    };

    Ok(HttpResponse::Ok().json(response))
}

/// The caller's own leave requests and remaining balance
#[utoipa::path(
    get,
    path = "/api/leave/me",
    responses(
        (status = 200, description = "Own leave requests and balance", body = MyLeaveResponse),
        (status = 401, description = "Unauthorized"),
        (status = 503, description = "Leave store unavailable")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn my_leave<S: LeaveStore + 'static>(
    auth: AuthUser,
    store: web::Data<S>,
    names: web::Data<NameCache>,
) -> actix_web::Result<impl Responder> {
    let data = load_employee_records(store.get_ref(), names.get_ref(), &auth.user_id).await?;
    let balance = store
        .get_leave_balance(&auth.user_id)
        .await?
        .unwrap_or_else(|| LeaveBalance::empty(&auth.user_id));

    Ok(HttpResponse::Ok().json(MyLeaveResponse { data, balance }))
}
