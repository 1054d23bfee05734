use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,
    pub jwt_secret: String,
    pub access_token_ttl: usize,
    pub refresh_token_ttl: usize,

    // Rate limiting
    pub rate_login_per_min: u32,
    pub rate_refresh_per_min: u32,
    pub rate_protected_per_min: u32,

    pub api_prefix: String,

    // Storage collaborators
    pub employees_table: String,
    pub leave_requests_table: String,
    pub documents_table: String,
    pub documents_bucket: String,
    /// Lifetime of presigned download URLs, in seconds
    pub download_url_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            access_token_ttl: env::var("ACCESS_TOKEN_TTL")
                .unwrap_or_else(|_| "900".to_string()) // default 15 min
                .parse()
                .unwrap(),
            refresh_token_ttl: env::var("REFRESH_TOKEN_TTL")
                .unwrap_or_else(|_| "604800".to_string()) // default 7 days
                .parse()
                .unwrap(),

            rate_login_per_min: env::var("RATE_LOGIN_PER_MIN")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap(),
            rate_refresh_per_min: env::var("RATE_REFRESH_PER_MIN")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap(),
            rate_protected_per_min: env::var("RATE_PROTECTED_PER_MIN")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .unwrap(),

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),

            employees_table: env::var("EMPLOYEES_TABLE")
                .unwrap_or_else(|_| "Employees".to_string()),
            leave_requests_table: env::var("LEAVE_REQUESTS_TABLE")
                .unwrap_or_else(|_| "LeaveRequests".to_string()),
            documents_table: env::var("DOCUMENTS_TABLE")
                .unwrap_or_else(|_| "Documents".to_string()),
            documents_bucket: env::var("S3_BUCKET_NAME").expect("S3_BUCKET_NAME must be set"),
            download_url_ttl_secs: env::var("DOWNLOAD_URL_TTL")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()
                .unwrap(),
        }
    }
}
