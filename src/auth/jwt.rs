use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::model::employee::Employee;
use crate::models::{Claims, TokenType};

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize
}

fn build_claims(employee: &Employee, token_type: TokenType, ttl: usize) -> Claims {
    Claims {
        sub: employee.email.clone(),
        employee_id: employee.employee_id.clone(),
        name: employee.name.clone(),
        department: employee.department.clone(),
        role: employee.role.as_id(),
        exp: now() + ttl,
        jti: Uuid::new_v4().to_string(),
        token_type,
    }
}

pub fn generate_access_token(employee: &Employee, secret: &str, ttl: usize) -> String {
    let claims = build_claims(employee, TokenType::Access, ttl);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub fn generate_refresh_token(employee: &Employee, secret: &str, ttl: usize) -> String {
    let claims = build_claims(employee, TokenType::Refresh, ttl);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::role::Role;
    use chrono::Utc;

    fn employee() -> Employee {
        Employee {
            email: "a@co.com".into(),
            employee_id: "emp-1".into(),
            name: "A".into(),
            department: "Eng".into(),
            position: "Dev".into(),
            password_hash: String::new(),
            role: Role::Employee,
            created_at: Utc::now(),
            created_by: "admin@co.com".into(),
        }
    }

    #[test]
    fn access_token_round_trip() {
        let token = generate_access_token(&employee(), "secret", 900);
        let claims = verify_token(&token, "secret").unwrap();
        assert_eq!(claims.sub, "a@co.com");
        assert_eq!(claims.token_type, TokenType::Access);
        assert_eq!(claims.role, Role::Employee.as_id());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = generate_access_token(&employee(), "secret", 900);
        assert!(verify_token(&token, "other").is_err());
    }
}
