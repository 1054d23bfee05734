use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::role::Role;

/// Employee record, keyed by email in the employees table.
/// Last write wins; the record is never versioned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub email: String,
    pub employee_id: String,
    pub name: String,
    pub department: String,
    pub position: String,
    /// Argon2 PHC string, never sent to clients
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    /// Email of the admin who created this record
    pub created_by: String,
}

/// Employee as exposed by the API — password hash stripped.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "email": "john.doe@company.com",
        "employee_id": "7b0c7d6e-2f4a-4b1e-9c3d-1a2b3c4d5e6f",
        "name": "John Doe",
        "department": "Engineering",
        "position": "Backend Developer",
        "role": "employee",
        "created_at": "2026-01-01T00:00:00Z"
    })
)]
pub struct EmployeeView {
    #[schema(example = "john.doe@company.com")]
    pub email: String,
    pub employee_id: String,
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "Engineering")]
    pub department: String,
    #[schema(example = "Backend Developer")]
    pub position: String,
    #[schema(example = "employee", value_type = String)]
    pub role: Role,
    #[schema(example = "2026-01-01T00:00:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}

impl From<Employee> for EmployeeView {
    fn from(e: Employee) -> Self {
        EmployeeView {
            email: e.email,
            employee_id: e.employee_id,
            name: e.name,
            department: e.department,
            position: e.position,
            role: e.role,
            created_at: e.created_at,
        }
    }
}
