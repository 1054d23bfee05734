use actix_web::{HttpResponse, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::auth::auth::AuthUser;
use crate::core::employee::{self, EmployeeUpdate, NewEmployee};
use crate::error::AppError;
use crate::model::role::Role;
use crate::state::Stores;

#[derive(Deserialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "john.doe@company.com", format = "email")]
    pub email: String,
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "Engineering")]
    pub department: String,
    #[schema(example = "Backend Developer")]
    pub position: String,
    #[schema(example = "secret")]
    pub password: String,
    #[schema(example = "employee", value_type = String)]
    pub role: Role,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateEmployee {
    pub name: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    #[schema(example = "admin", value_type = Option<String>)]
    pub role: Option<Role>,
    pub password: Option<String>,
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 200, description = "Employee created successfully", body = Object, example = json!({
            "message": "Employee created",
            "employee_id": "7b0c7d6e-2f4a-4b1e-9c3d-1a2b3c4d5e6f"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Email already exists")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    auth: AuthUser,
    stores: web::Data<Stores>,
    payload: web::Json<CreateEmployee>,
) -> Result<HttpResponse, AppError> {
    let payload = payload.into_inner();
    let employee = employee::create(
        stores.employees.as_ref(),
        &auth,
        NewEmployee {
            email: payload.email,
            name: payload.name,
            department: payload.department,
            position: payload.position,
            password: payload.password,
            role: payload.role,
        },
    )
    .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Employee created",
        "employee_id": employee.employee_id,
    })))
}

/// List Employees
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees, password hashes stripped",
         body = [crate::model::employee::EmployeeView]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    auth: AuthUser,
    stores: web::Data<Stores>,
) -> Result<HttpResponse, AppError> {
    let views = employee::list(stores.employees.as_ref(), &auth).await?;
    Ok(HttpResponse::Ok().json(views))
}

/// Get Employee by email
#[utoipa::path(
    get,
    path = "/api/employees/{email}",
    params(
        ("email" = String, Path, description = "Employee email")
    ),
    responses(
        (status = 200, description = "Employee found", body = crate::model::employee::EmployeeView),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Employee not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    auth: AuthUser,
    stores: web::Data<Stores>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let email = path.into_inner();
    let view = employee::get(stores.employees.as_ref(), &auth, &email).await?;
    Ok(HttpResponse::Ok().json(view))
}

/// Update Employee
#[utoipa::path(
    put,
    path = "/api/employees/{email}",
    params(
        ("email" = String, Path, description = "Employee email")
    ),
    request_body = UpdateEmployee,
    responses(
        (status = 200, description = "Employee updated successfully", body = crate::model::employee::EmployeeView),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Employee not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Employee"
)]
pub async fn update_employee(
    auth: AuthUser,
    stores: web::Data<Stores>,
    path: web::Path<String>,
    payload: web::Json<UpdateEmployee>,
) -> Result<HttpResponse, AppError> {
    let email = path.into_inner();
    let payload = payload.into_inner();
    let view = employee::update(
        stores.employees.as_ref(),
        &auth,
        &email,
        EmployeeUpdate {
            name: payload.name,
            department: payload.department,
            position: payload.position,
            role: payload.role,
            password: payload.password,
        },
    )
    .await?;

    Ok(HttpResponse::Ok().json(view))
}

/// Delete Employee
#[utoipa::path(
    delete,
    path = "/api/employees/{email}",
    params(
        ("email" = String, Path, description = "Employee email")
    ),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "message": "Successfully deleted"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Employee not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    auth: AuthUser,
    stores: web::Data<Stores>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let email = path.into_inner();
    employee::delete(stores.employees.as_ref(), &auth, &email).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Successfully deleted"
    })))
}
