use actix_web::{HttpResponse, web};

use crate::auth::auth::AuthUser;
use crate::core::dashboard;
use crate::error::AppError;
use crate::state::Stores;

/// Dashboard summary
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Counts, leave balance, and recent activity",
         body = crate::core::dashboard::DashboardStats),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
pub async fn dashboard(
    auth: AuthUser,
    stores: web::Data<Stores>,
) -> Result<HttpResponse, AppError> {
    let stats = dashboard::summary(
        stores.employees.as_ref(),
        stores.leaves.as_ref(),
        stores.documents.as_ref(),
        &auth,
    )
    .await?;

    Ok(HttpResponse::Ok().json(stats))
}
