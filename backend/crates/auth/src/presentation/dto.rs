//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

// ============================================================================
// Sign Up / Sign In
// ============================================================================

/// Sign up request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub email: String,
    pub display_name: String,
    pub password: String,
}

/// Sign in request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Token pair response, returned by signup/signin/refresh/Google sign-in.
/// The same tokens are mirrored into HttpOnly cookies.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPairResponse {
    pub jwt_access_token: String,
    pub jwt_refresh_token: String,
}

// ============================================================================
// Current User
// ============================================================================

/// Authenticated user info, echoed from the access token claims
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub sub: String,
    pub email: String,
    pub display_name: String,
    pub iat: i64,
    pub exp: i64,
}

// ============================================================================
// Password Reset
// ============================================================================

/// Forgot password request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Forgot password response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordResponse {
    pub message: String,
}

/// Reset link verification response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetVerifyResponse {
    pub user_id: String,
    pub email: String,
}

/// Reset password request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub new_password: String,
    pub password_confirmation: String,
}

/// Reset password response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordResponse {
    pub message: String,
}
