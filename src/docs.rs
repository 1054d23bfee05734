use crate::api::employee::{CreateEmployee, UpdateEmployee};
use crate::api::leave::CreateLeave;
use crate::core::dashboard::{ActivityEntry, ActivityKind, DashboardStats};
use crate::core::document::DocumentView;
use crate::core::leave::LeaveView;
use crate::model::employee::EmployeeView;
use crate::model::leave_request::LeaveStatus;
use crate::models::LoginReqDto;
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS API",
        version = "1.0.0",
        description = r#"
## Human Resource Management System

This API powers a small HR management system backed by DynamoDB tables and
an S3 document bucket.

### 🔹 Key Features
- **Employee Management**
  - Create, update, list, and view employee records (admin only)
- **Leave Management**
  - Submit requests, check the remaining balance, approve/reject (admin),
    with admin requests decidable by super admins only
- **Document Management**
  - Upload files, share them publicly, download and delete with
    ownership-based access control

### 🔐 Security
All endpoints except login/refresh are protected with **JWT Bearer
authentication**.

---
Built with **Rust**, **Actix Web**, and the **AWS SDK**.
"#,
    ),
    paths(
        crate::auth::handlers::login,
        crate::auth::handlers::refresh_token,

        crate::api::dashboard::dashboard,

        crate::api::leave::create_leave,
        crate::api::leave::leave_list,
        crate::api::leave::leave_balance,
        crate::api::leave::approve_leave,
        crate::api::leave::reject_leave,

        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,

        crate::api::document::upload_document,
        crate::api::document::list_documents,
        crate::api::document::download_document,
        crate::api::document::delete_document,
    ),
    components(
        schemas(
            LoginReqDto,
            CreateLeave,
            LeaveView,
            LeaveStatus,
            CreateEmployee,
            UpdateEmployee,
            EmployeeView,
            DocumentView,
            DashboardStats,
            ActivityEntry,
            ActivityKind,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Authentication APIs"),
        (name = "Dashboard", description = "Dashboard summary APIs"),
        (name = "Leave", description = "Leave management APIs"),
        (name = "Employee", description = "Employee management APIs"),
        (name = "Documents", description = "Document management APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
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
}
