//! Employee administration: admin-only CRUD over the employees table.
//!
//! Records are keyed by email and never versioned; updates are a
//! read-modify-write with last-write-wins semantics.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::auth::auth::AuthUser;
use crate::auth::password::hash_password;
use crate::error::AppError;
use crate::model::employee::{Employee, EmployeeView};
use crate::model::role::Role;
use crate::storage::EmployeeStore;

pub struct NewEmployee {
    pub email: String,
    pub name: String,
    pub department: String,
    pub position: String,
    pub password: String,
    pub role: Role,
}

/// Canonical spelling of the table key. Records are stored lowercased, so
/// every lookup must normalize the same way or mixed-case input misses.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[derive(Default)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub role: Option<Role>,
    pub password: Option<String>,
}

pub async fn create(
    employees: &dyn EmployeeStore,
    ctx: &AuthUser,
    new: NewEmployee,
) -> Result<Employee, AppError> {
    ctx.require_admin()?;

    let email = normalize_email(&new.email);
    if email.is_empty() || new.password.is_empty() {
        return Err(AppError::Validation(
            "Email and password must not be empty".into(),
        ));
    }

    if employees.get(&email).await?.is_some() {
        return Err(AppError::Conflict("Email already exists".into()));
    }

    let employee = Employee {
        email,
        employee_id: Uuid::new_v4().to_string(),
        name: new.name,
        department: new.department,
        position: new.position,
        password_hash: hash_password(&new.password),
        role: new.role,
        created_at: Utc::now(),
        created_by: ctx.email.clone(),
    };

    employees.put(&employee).await?;

    info!(
        email = %employee.email,
        employee_id = %employee.employee_id,
        created_by = %ctx.email,
        "Employee created"
    );

    Ok(employee)
}

pub async fn list(
    employees: &dyn EmployeeStore,
    ctx: &AuthUser,
) -> Result<Vec<EmployeeView>, AppError> {
    ctx.require_admin()?;

    let mut views: Vec<EmployeeView> = employees
        .scan()
        .await?
        .into_iter()
        .map(EmployeeView::from)
        .collect();

    views.sort_by(|a, b| a.email.cmp(&b.email));
    Ok(views)
}

pub async fn get(
    employees: &dyn EmployeeStore,
    ctx: &AuthUser,
    email: &str,
) -> Result<EmployeeView, AppError> {
    ctx.require_admin()?;

    employees
        .get(&normalize_email(email))
        .await?
        .map(EmployeeView::from)
        .ok_or(AppError::NotFound("Employee"))
}

pub async fn update(
    employees: &dyn EmployeeStore,
    ctx: &AuthUser,
    email: &str,
    update: EmployeeUpdate,
) -> Result<EmployeeView, AppError> {
    ctx.require_admin()?;

    let mut employee = employees
        .get(&normalize_email(email))
        .await?
        .ok_or(AppError::NotFound("Employee"))?;

    if let Some(name) = update.name {
        employee.name = name;
    }
    if let Some(department) = update.department {
        employee.department = department;
    }
    if let Some(position) = update.position {
        employee.position = position;
    }
    if let Some(role) = update.role {
        employee.role = role;
    }
    if let Some(password) = update.password {
        employee.password_hash = hash_password(&password);
    }

    employees.put(&employee).await?;

    info!(email = %employee.email, updated_by = %ctx.email, "Employee updated");

    Ok(EmployeeView::from(employee))
}

/// Deleting an employee does not touch their leave requests or documents;
/// orphaned records are possible and not reconciled anywhere.
pub async fn delete(
    employees: &dyn EmployeeStore,
    ctx: &AuthUser,
    email: &str,
) -> Result<(), AppError> {
    ctx.require_admin()?;

    let email = normalize_email(email);
    if employees.get(&email).await?.is_none() {
        return Err(AppError::NotFound("Employee"));
    }

    employees.delete(&email).await?;

    info!(email = %email, deleted_by = %ctx.email, "Employee deleted");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemEmployeeStore;

    fn admin() -> AuthUser {
        AuthUser {
            email: "admin@co.com".into(),
            employee_id: "adm-1".into(),
            name: "Admin".into(),
            department: "HR".into(),
            role: Role::Admin,
        }
    }

    fn new_employee(email: &str) -> NewEmployee {
        NewEmployee {
            email: email.into(),
            name: "John Doe".into(),
            department: "Engineering".into(),
            position: "Developer".into(),
            password: "secret".into(),
            role: Role::Employee,
        }
    }

    #[actix_web::test]
    async fn create_rejects_duplicate_email() {
        let store = MemEmployeeStore::default();
        let ctx = admin();

        create(&store, &ctx, new_employee("john@co.com")).await.unwrap();
        let err = create(&store, &ctx, new_employee("john@co.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[actix_web::test]
    async fn listing_strips_password_hashes_and_requires_admin() {
        let store = MemEmployeeStore::default();
        let ctx = admin();
        create(&store, &ctx, new_employee("john@co.com")).await.unwrap();

        let views = list(&store, &ctx).await.unwrap();
        assert_eq!(views.len(), 1);
        let body = serde_json::to_string(&views).unwrap();
        assert!(!body.contains("password"));

        let employee_ctx = AuthUser {
            role: Role::Employee,
            ..admin()
        };
        assert!(matches!(
            list(&store, &employee_ctx).await.unwrap_err(),
            AppError::Forbidden(_)
        ));
    }

    #[actix_web::test]
    async fn update_is_read_modify_write() {
        let store = MemEmployeeStore::default();
        let ctx = admin();
        let created = create(&store, &ctx, new_employee("john@co.com")).await.unwrap();

        let view = update(
            &store,
            &ctx,
            "john@co.com",
            EmployeeUpdate {
                department: Some("Sales".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(view.department, "Sales");
        assert_eq!(view.name, "John Doe"); // untouched fields survive
        assert_eq!(view.employee_id, created.employee_id);
    }

    #[actix_web::test]
    async fn mixed_case_email_resolves_after_creation() {
        let store = MemEmployeeStore::default();
        let ctx = admin();
        create(&store, &ctx, new_employee("John@Co.com")).await.unwrap();

        // stored under the canonical spelling
        assert!(store.get("john@co.com").await.unwrap().is_some());

        // lookups normalize the caller's spelling the same way
        let view = get(&store, &ctx, "John@Co.com").await.unwrap();
        assert_eq!(view.email, "john@co.com");
        assert_eq!(normalize_email("  John@Co.com "), "john@co.com");

        let updated = update(
            &store,
            &ctx,
            "JOHN@CO.COM",
            EmployeeUpdate {
                name: Some("Johnny".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.name, "Johnny");

        delete(&store, &ctx, "John@Co.com").await.unwrap();
        assert!(store.get("john@co.com").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn delete_of_missing_employee_is_not_found() {
        let store = MemEmployeeStore::default();
        assert!(matches!(
            delete(&store, &admin(), "ghost@co.com").await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }
}
