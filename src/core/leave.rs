//! Leave request lifecycle: submit, list, approve/reject, balance.
//!
//! PENDING -> APPROVED and PENDING -> REJECTED are the only transitions.
//! Deciding an already-terminal request is allowed and overwrites the
//! previous decision (last write wins); there is no optimistic-concurrency
//! token, so two racing deciders also resolve last-write-wins.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::auth::AuthUser;
use crate::error::AppError;
use crate::model::employee::Employee;
use crate::model::leave_request::{LeaveRequest, LeaveStatus};
use crate::storage::{EmployeeStore, LeaveRequestStore};

/// Fixed annual allotment, in days
pub const ANNUAL_LEAVE_DAYS: i64 = 30;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LeaveDecision {
    Approve,
    Reject,
}

impl LeaveDecision {
    fn status(&self) -> LeaveStatus {
        match self {
            LeaveDecision::Approve => LeaveStatus::Approved,
            LeaveDecision::Reject => LeaveStatus::Rejected,
        }
    }
}

/// Leave request enriched with the owner's current employee attributes.
/// Display data is looked up at list time, not snapshotted at submission.
#[derive(Debug, Serialize, ToSchema)]
pub struct LeaveView {
    pub request_id: String,
    pub employee_id: String,
    #[schema(example = "John Doe")]
    pub employee_name: String,
    #[schema(example = "Engineering")]
    pub department: String,
    #[schema(example = "Backend Developer")]
    pub position: String,
    #[schema(example = "2026-01-05", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2026-01-09", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = 5)]
    pub days_requested: i64,
    pub reason: String,
    #[schema(example = "PENDING", value_type = String)]
    pub status: LeaveStatus,
    #[schema(example = "2026-01-01T00:00:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
    pub decided_by: Option<String>,
    #[schema(format = "date-time", value_type = Option<String>)]
    pub decided_at: Option<DateTime<Utc>>,
}

/// Remaining balance: the annual allotment minus the day spans of APPROVED
/// requests. PENDING and REJECTED requests never count. Recomputed from
/// stored state on every call and may go negative; no floor is applied.
pub async fn balance(
    leaves: &dyn LeaveRequestStore,
    employee_id: &str,
) -> Result<i64, AppError> {
    let taken: i64 = leaves
        .scan()
        .await?
        .iter()
        .filter(|r| r.employee_id == employee_id && r.status == LeaveStatus::Approved)
        .map(|r| r.duration_days())
        .sum();

    Ok(ANNUAL_LEAVE_DAYS - taken)
}

/// Submit a new leave request for the calling employee.
///
/// The balance check and the insert are separate storage calls; two
/// concurrent submits can both pass the check. Accepted race: the balance
/// is recomputed from approved requests, so the books settle once decided.
pub async fn submit(
    leaves: &dyn LeaveRequestStore,
    ctx: &AuthUser,
    start_date: NaiveDate,
    end_date: NaiveDate,
    reason: String,
) -> Result<LeaveRequest, AppError> {
    if end_date < start_date {
        return Err(AppError::Validation(
            "end_date cannot be before start_date".into(),
        ));
    }

    let days_requested = (end_date - start_date).num_days() + 1;
    let remaining = balance(leaves, &ctx.employee_id).await?;

    if days_requested > remaining {
        return Err(AppError::InsufficientBalance { remaining });
    }

    let request = LeaveRequest {
        request_id: Uuid::new_v4().to_string(),
        employee_id: ctx.employee_id.clone(),
        start_date,
        end_date,
        reason,
        status: LeaveStatus::Pending,
        created_at: Utc::now(),
        decided_by: None,
        decided_at: None,
    };

    leaves.put(&request).await?;

    info!(
        request_id = %request.request_id,
        employee_id = %ctx.employee_id,
        days_requested,
        "Leave request submitted"
    );

    Ok(request)
}

/// List leave requests visible to the caller: employees see their own,
/// admins see everything. PENDING first, then newest first.
pub async fn list(
    leaves: &dyn LeaveRequestStore,
    employees: &dyn EmployeeStore,
    ctx: &AuthUser,
) -> Result<Vec<LeaveView>, AppError> {
    let mut requests = leaves.scan().await?;

    if !ctx.is_admin() {
        requests.retain(|r| r.employee_id == ctx.employee_id);
    }

    let roster: HashMap<String, Employee> = employees
        .scan()
        .await?
        .into_iter()
        .map(|e| (e.employee_id.clone(), e))
        .collect();

    let mut views: Vec<LeaveView> = requests
        .into_iter()
        .map(|r| {
            // orphaned requests (owner deleted) keep placeholder display data
            let (name, department, position) = match roster.get(&r.employee_id) {
                Some(e) => (e.name.clone(), e.department.clone(), e.position.clone()),
                None => ("Unknown".to_string(), String::new(), String::new()),
            };
            LeaveView {
                request_id: r.request_id,
                employee_id: r.employee_id,
                employee_name: name,
                department,
                position,
                start_date: r.start_date,
                end_date: r.end_date,
                days_requested: (r.end_date - r.start_date).num_days() + 1,
                reason: r.reason,
                status: r.status,
                created_at: r.created_at,
                decided_by: r.decided_by,
                decided_at: r.decided_at,
            }
        })
        .collect();

    views.sort_by(|a, b| {
        let rank = |s: LeaveStatus| u8::from(s != LeaveStatus::Pending);
        rank(a.status)
            .cmp(&rank(b.status))
            .then(b.created_at.cmp(&a.created_at))
    });

    Ok(views)
}

/// Approve or reject a request, stamping decider identity and time.
///
/// A request owned by an admin may only be decided by a super admin.
pub async fn decide(
    leaves: &dyn LeaveRequestStore,
    employees: &dyn EmployeeStore,
    ctx: &AuthUser,
    request_id: &str,
    decision: LeaveDecision,
) -> Result<LeaveRequest, AppError> {
    ctx.require_admin()?;

    let mut request = leaves
        .get(request_id)
        .await?
        .ok_or(AppError::NotFound("Leave request"))?;

    let owner = employees
        .scan()
        .await?
        .into_iter()
        .find(|e| e.employee_id == request.employee_id);

    if owner.is_some_and(|e| e.role.is_admin()) {
        ctx.require_super_admin().map_err(|_| {
            AppError::Forbidden("Only a super admin can decide an admin's leave request")
        })?;
    }

    request.status = decision.status();
    request.decided_by = Some(ctx.email.clone());
    request.decided_at = Some(Utc::now());

    leaves.put(&request).await?;

    info!(
        request_id = %request.request_id,
        status = request.status.as_str(),
        decided_by = %ctx.email,
        "Leave request decided"
    );

    Ok(request)
}
