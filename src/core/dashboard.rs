//! Dashboard summary: counts, current balance, and a merged activity feed
//! of recent leave requests and document uploads.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::auth::AuthUser;
use crate::core::leave;
use crate::error::AppError;
use crate::model::leave_request::LeaveStatus;
use crate::storage::{DocumentStore, EmployeeStore, LeaveRequestStore};

const RECENT_ACTIVITY_LIMIT: usize = 5;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    LeaveRequest,
    Document,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ActivityEntry {
    pub kind: ActivityKind,
    #[schema(example = "PENDING", value_type = Option<String>)]
    pub status: Option<LeaveStatus>,
    #[schema(format = "date-time", value_type = String)]
    pub date: DateTime<Utc>,
    #[schema(example = "Leave request from 2026-01-05 to 2026-01-09")]
    pub description: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStats {
    pub documents_count: usize,
    /// Present for admins only
    pub employees_count: Option<usize>,
    pub leave_balance: i64,
    pub recent_activity: Vec<ActivityEntry>,
}

pub async fn summary(
    employees: &dyn EmployeeStore,
    leaves: &dyn LeaveRequestStore,
    documents: &dyn DocumentStore,
    ctx: &AuthUser,
) -> Result<DashboardStats, AppError> {
    let mut docs = documents.scan().await?;
    if !ctx.is_admin() {
        docs.retain(|d| d.employee_id == ctx.employee_id);
    }
    let documents_count = docs.len();

    let employees_count = if ctx.is_admin() {
        Some(employees.scan().await?.len())
    } else {
        None
    };

    let leave_balance = leave::balance(leaves, &ctx.employee_id).await?;

    // activity feed always covers the caller's own records
    let mut activity: Vec<ActivityEntry> = leaves
        .scan()
        .await?
        .into_iter()
        .filter(|r| r.employee_id == ctx.employee_id)
        .map(|r| ActivityEntry {
            kind: ActivityKind::LeaveRequest,
            status: Some(r.status),
            date: r.created_at,
            description: format!("Leave request from {} to {}", r.start_date, r.end_date),
        })
        .collect();

    activity.extend(
        docs.into_iter()
            .filter(|d| d.employee_id == ctx.employee_id)
            .map(|d| ActivityEntry {
                kind: ActivityKind::Document,
                status: None,
                date: d.created_at,
                description: format!("Uploaded document: {}", d.filename),
            }),
    );

    activity.sort_by(|a, b| b.date.cmp(&a.date));
    activity.truncate(RECENT_ACTIVITY_LIMIT);

    Ok(DashboardStats {
        documents_count,
        employees_count,
        leave_balance,
        recent_activity: activity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::document::Document;
    use crate::model::leave_request::LeaveRequest;
    use crate::model::role::Role;
    use crate::storage::memory::{MemDocumentStore, MemEmployeeStore, MemLeaveRequestStore};
    use chrono::{Duration, NaiveDate};

    fn ctx(employee_id: &str, role: Role) -> AuthUser {
        AuthUser {
            email: format!("{employee_id}@co.com"),
            employee_id: employee_id.to_string(),
            name: employee_id.to_uppercase(),
            department: "Engineering".into(),
            role,
        }
    }

    async fn seed(
        leaves: &MemLeaveRequestStore,
        documents: &MemDocumentStore,
        employee_id: &str,
        entries: usize,
    ) {
        let start = NaiveDate::parse_from_str("2026-02-02", "%Y-%m-%d").unwrap();
        for i in 0..entries {
            leaves
                .put(&LeaveRequest {
                    request_id: format!("{employee_id}-r{i}"),
                    employee_id: employee_id.into(),
                    start_date: start,
                    end_date: start + Duration::days(1),
                    reason: "pto".into(),
                    status: LeaveStatus::Approved,
                    created_at: Utc::now() - Duration::minutes(i as i64),
                    decided_by: None,
                    decided_at: None,
                })
                .await
                .unwrap();
            documents
                .put(&Document {
                    document_id: format!("{employee_id}-d{i}"),
                    employee_id: employee_id.into(),
                    filename: format!("file-{i}.pdf"),
                    description: String::new(),
                    blob_key: format!("{employee_id}/d{i}/file-{i}.pdf"),
                    content_type: "application/pdf".into(),
                    created_at: Utc::now() - Duration::minutes(i as i64) - Duration::seconds(30),
                    is_public: false,
                })
                .await
                .unwrap();
        }
    }

    #[actix_web::test]
    async fn feed_is_merged_newest_first_and_capped_at_five() {
        let employees = MemEmployeeStore::default();
        let leaves = MemLeaveRequestStore::default();
        let documents = MemDocumentStore::default();
        seed(&leaves, &documents, "emp-1", 4).await;

        let stats = summary(&employees, &leaves, &documents, &ctx("emp-1", Role::Employee))
            .await
            .unwrap();

        assert_eq!(stats.recent_activity.len(), 5);
        assert!(
            stats
                .recent_activity
                .windows(2)
                .all(|w| w[0].date >= w[1].date)
        );
        assert!(stats.employees_count.is_none());
        // 4 approved 2-day requests
        assert_eq!(stats.leave_balance, 30 - 8);
    }

    #[actix_web::test]
    async fn admin_counts_cover_everything_but_feed_stays_personal() {
        let employees = MemEmployeeStore::default();
        let leaves = MemLeaveRequestStore::default();
        let documents = MemDocumentStore::default();
        seed(&leaves, &documents, "emp-1", 2).await;
        seed(&leaves, &documents, "adm-1", 1).await;

        let stats = summary(&employees, &leaves, &documents, &ctx("adm-1", Role::Admin))
            .await
            .unwrap();

        assert_eq!(stats.documents_count, 3); // admin sees all documents
        assert_eq!(stats.employees_count, Some(0));
        assert_eq!(stats.recent_activity.len(), 2); // own entries only
    }
}
