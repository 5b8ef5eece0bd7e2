use serde::{Deserialize, Serialize};

/// Server-confirmed identity returned by `GET /me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub phone: &'a str,
}

#[derive(Serialize)]
pub struct VerifyCodeRequest<'a> {
    pub phone: &'a str,
    pub code: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub message: String,
}

/// Carries the bearer token; intentionally not `Debug`.
#[derive(Deserialize)]
pub struct VerifyCodeResponse {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct MeResponse {
    pub data: User,
}

#[derive(Serialize)]
pub struct LogoutRequest {}
