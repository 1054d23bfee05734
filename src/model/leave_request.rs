use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "PENDING",
            LeaveStatus::Approved => "APPROVED",
            LeaveStatus::Rejected => "REJECTED",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "PENDING" => Some(LeaveStatus::Pending),
            "APPROVED" => Some(LeaveStatus::Approved),
            "REJECTED" => Some(LeaveStatus::Rejected),
            _ => None,
        }
    }
}

/// Leave request record, keyed by request_id in the leave requests table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub request_id: String,
    pub employee_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub status: LeaveStatus,
    pub created_at: DateTime<Utc>,
    /// Email of the admin who approved/rejected, once decided
    pub decided_by: Option<String>,
    pub decided_at: Option<DateTime<Utc>>,
}

impl LeaveRequest {
    /// Inclusive day span; start == end counts as 1 day
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}
