use actix_web::{HttpRequest, HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error, info, instrument};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, verify_token};
use crate::auth::password::verify_password;
use crate::config::Config;
use crate::core::employee::normalize_email;
use crate::models::{LoginReqDto, TokenType};
use crate::state::Stores;

#[derive(Serialize, Deserialize)]
struct LoginResponse {
    access_token: String,
    refresh_token: String,
}

/// Login: verify the submitted password against the stored argon2 hash and
/// issue an access/refresh token pair carrying the session context.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginReqDto,
    responses(
        (status = 200, description = "Login successful", body = Object, example = json!({
            "access_token": "eyJ...",
            "refresh_token": "eyJ..."
        })),
        (status = 400, description = "Missing email or password"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
#[instrument(
    name = "auth_login",
    skip(stores, config, user),
    fields(email = %user.email)
)]
pub async fn login(
    user: web::Json<LoginReqDto>,
    stores: web::Data<Stores>,
    config: web::Data<Config>,
) -> impl Responder {
    info!("Login request received");

    if user.email.trim().is_empty() || user.password.is_empty() {
        info!("Validation failed: empty email or password");
        return HttpResponse::BadRequest().body("Email or password required");
    }

    debug!("Fetching employee record");

    // records are keyed by the normalized spelling; match it here or
    // mixed-case logins miss
    let employee = match stores.employees.get(&normalize_email(&user.email)).await {
        Ok(Some(employee)) => employee,
        Ok(None) => {
            info!("Invalid credentials: employee not found");
            return HttpResponse::Unauthorized().body("Invalid email or password");
        }
        Err(e) => {
            error!(error = %e, "Storage error while fetching employee");
            return HttpResponse::InternalServerError().finish();
        }
    };

    debug!("Verifying password");

    if let Err(e) = verify_password(&user.password, &employee.password_hash) {
        info!(error = %e, "Invalid credentials: password mismatch");
        return HttpResponse::Unauthorized().body("Invalid email or password");
    }

    debug!("Generating token pair");

    let access_token = generate_access_token(&employee, &config.jwt_secret, config.access_token_ttl);
    let refresh_token =
        generate_refresh_token(&employee, &config.jwt_secret, config.refresh_token_ttl);

    info!("Login successful");

    HttpResponse::Ok().json(LoginResponse {
        access_token,
        refresh_token,
    })
}

/// Exchange a refresh token for a fresh pair. The employee record is
/// re-read so the new tokens carry current name/department data.
#[utoipa::path(
    post,
    path = "/auth/refresh",
    responses(
        (status = 200, description = "New token pair", body = Object, example = json!({
            "access_token": "eyJ...",
            "refresh_token": "eyJ..."
        })),
        (status = 401, description = "Invalid or expired refresh token")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Auth"
)]
pub async fn refresh_token(
    req: HttpRequest,
    stores: web::Data<Stores>,
    config: web::Data<Config>,
) -> impl Responder {
    let header = match req.headers().get("Authorization") {
        Some(h) => h.to_str().unwrap_or(""),
        None => return HttpResponse::Unauthorized().body("No token"),
    };

    let token = match header.strip_prefix("Bearer ") {
        Some(t) => t,
        None => return HttpResponse::Unauthorized().body("Invalid token"),
    };

    let claims = match verify_token(token, &config.jwt_secret) {
        Ok(c) => c,
        Err(_) => return HttpResponse::Unauthorized().finish(),
    };

    if claims.token_type != TokenType::Refresh {
        return HttpResponse::Unauthorized().finish();
    }

    let employee = match stores.employees.get(&claims.sub).await {
        Ok(Some(employee)) => employee,
        Ok(None) => {
            // account removed since the token was issued
            return HttpResponse::Unauthorized().finish();
        }
        Err(e) => {
            error!(error = %e, "Storage error while refreshing token");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let access_token = generate_access_token(&employee, &config.jwt_secret, config.access_token_ttl);
    let new_refresh_token =
        generate_refresh_token(&employee, &config.jwt_secret, config.refresh_token_ttl);

    HttpResponse::Ok().json(json!({
        "access_token": access_token,
        "refresh_token": new_refresh_token
    }))
}
