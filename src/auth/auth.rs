use actix_web::{FromRequest, HttpRequest, dev::Payload, error::ErrorUnauthorized, web::Data};
use futures::future::{Ready, ready};
use jsonwebtoken::{DecodingKey, Validation, decode};

use crate::config::Config;
use crate::error::AppError;
use crate::model::role::Role;
use crate::models::Claims;

/// Per-request session context: the authenticated identity, its role, and
/// the display attributes carried in the token. Passed explicitly into
/// every core operation.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub email: String,
    pub employee_id: String,
    pub name: String,
    pub department: String,
    pub role: Role,
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let token = match req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
        {
            Some(t) => t,
            None => return ready(Err(ErrorUnauthorized("Missing token"))),
        };

        let config = match req.app_data::<Data<Config>>() {
            Some(c) => c,
            None => {
                return ready(Err(actix_web::error::ErrorInternalServerError(
                    "Config missing",
                )));
            }
        };

        let data = match decode::<Claims>(
            token,
            &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            &Validation::default(),
        ) {
            Ok(d) => d,
            Err(_) => return ready(Err(ErrorUnauthorized("Invalid token"))),
        };

        let role = match Role::from_id(data.claims.role) {
            Some(r) => r,
            None => return ready(Err(ErrorUnauthorized("Invalid role"))),
        };

        ready(Ok(AuthUser {
            email: data.claims.sub,
            employee_id: data.claims.employee_id,
            name: data.claims.name,
            department: data.claims.department,
            role,
        }))
    }
}

impl AuthUser {
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.role.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden("Admin access required"))
        }
    }

    pub fn require_super_admin(&self) -> Result<(), AppError> {
        if self.role == Role::SuperAdmin {
            Ok(())
        } else {
            Err(AppError::Forbidden("Super admin access required"))
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> AuthUser {
        AuthUser {
            email: "a@co.com".into(),
            employee_id: "emp-1".into(),
            name: "A".into(),
            department: "Eng".into(),
            role,
        }
    }

    #[test]
    fn admin_guard() {
        assert!(user(Role::Employee).require_admin().is_err());
        assert!(user(Role::Admin).require_admin().is_ok());
        assert!(user(Role::SuperAdmin).require_admin().is_ok());
    }

    #[test]
    fn super_admin_guard() {
        assert!(user(Role::Admin).require_super_admin().is_err());
        assert!(user(Role::SuperAdmin).require_super_admin().is_ok());
    }
}
