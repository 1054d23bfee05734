use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::auth::auth::AuthUser;
use crate::core::leave::{self, LeaveDecision};
use crate::error::AppError;
use crate::state::Stores;

#[derive(Deserialize, ToSchema)]
pub struct CreateLeave {
    #[schema(example = "2026-01-05", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2026-01-09", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = "Family trip")]
    pub reason: String,
}

/* =========================
Submit leave request
========================= */
#[utoipa::path(
    post,
    path = "/api/leave",
    request_body(
        content = CreateLeave,
        description = "Leave request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Leave request submitted successfully",
         body = Object,
         example = json!({
            "message": "Leave request submitted",
            "request_id": "7b0c7d6e-2f4a-4b1e-9c3d-1a2b3c4d5e6f",
            "status": "PENDING"
         })
        ),
        (status = 400, description = "Bad request"),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Insufficient leave balance")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn create_leave(
    auth: AuthUser,
    stores: web::Data<Stores>,
    payload: web::Json<CreateLeave>,
) -> Result<HttpResponse, AppError> {
    let payload = payload.into_inner();
    let request = leave::submit(
        stores.leaves.as_ref(),
        &auth,
        payload.start_date,
        payload.end_date,
        payload.reason,
    )
    .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Leave request submitted",
        "request_id": request.request_id,
        "status": request.status,
    })))
}

/* =========================
List leave requests
========================= */
#[utoipa::path(
    get,
    path = "/api/leave",
    responses(
        (status = 200, description = "Leave requests visible to the caller, pending first", body = [crate::core::leave::LeaveView]),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn leave_list(
    auth: AuthUser,
    stores: web::Data<Stores>,
) -> Result<HttpResponse, AppError> {
    let views = leave::list(stores.leaves.as_ref(), stores.employees.as_ref(), &auth).await?;
    Ok(HttpResponse::Ok().json(views))
}

/* =========================
Leave balance
========================= */
#[utoipa::path(
    get,
    path = "/api/leave/balance",
    responses(
        (status = 200, description = "Remaining leave balance (may be negative)", body = Object, example = json!({
            "balance": 15
        })),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn leave_balance(
    auth: AuthUser,
    stores: web::Data<Stores>,
) -> Result<HttpResponse, AppError> {
    let balance = leave::balance(stores.leaves.as_ref(), &auth.employee_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "balance": balance })))
}

/* =========================
Approve leave (admin)
========================= */
#[utoipa::path(
    put,
    path = "/api/leave/{request_id}/approve",
    params(
        ("request_id" = String, Path, description = "ID of the leave request to approve")
    ),
    responses(
        (status = 200, description = "Leave approved successfully", body = Object, example = json!({
            "message": "Leave request approved"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn approve_leave(
    auth: AuthUser,
    stores: web::Data<Stores>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let request_id = path.into_inner();
    leave::decide(
        stores.leaves.as_ref(),
        stores.employees.as_ref(),
        &auth,
        &request_id,
        LeaveDecision::Approve,
    )
    .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Leave request approved"
    })))
}

/* =========================
Reject leave (admin)
========================= */
#[utoipa::path(
    put,
    path = "/api/leave/{request_id}/reject",
    params(
        ("request_id" = String, Path, description = "ID of the leave request to reject")
    ),
    responses(
        (status = 200, description = "Leave rejected successfully", body = Object, example = json!({
            "message": "Leave request rejected"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn reject_leave(
    auth: AuthUser,
    stores: web::Data<Stores>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let request_id = path.into_inner();
    leave::decide(
        stores.leaves.as_ref(),
        stores.employees.as_ref(),
        &auth,
        &request_id,
        LeaveDecision::Reject,
    )
    .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Leave request rejected"
    })))
}
