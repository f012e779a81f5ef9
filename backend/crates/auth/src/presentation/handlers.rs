//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::config::{AuthConfig, REFRESH_TOKEN_COOKIE};
use crate::application::tokens::{AccessClaims, TokenPair, TokenService};
use crate::application::{
    ForgotPasswordInput, ForgotPasswordUseCase, RefreshUseCase, ResetPasswordInput,
    ResetPasswordUseCase, SignInInput, SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase,
};
use crate::domain::mailer::ResetMailer;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    ForgotPasswordRequest, ForgotPasswordResponse, ResetPasswordRequest, ResetPasswordResponse,
    ResetVerifyResponse, SignInRequest, SignUpRequest, TokenPairResponse, UserResponse,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R, M>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: ResetMailer + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub mailer: Arc<M>,
    pub tokens: Arc<TokenService>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/auth/email/signup
pub async fn sign_up<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<SignUpRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: ResetMailer + Clone + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.repo.clone(), state.tokens.clone());

    let pair = use_case
        .execute(SignUpInput {
            email: req.email,
            display_name: req.display_name,
            password: req.password,
        })
        .await?;

    Ok(token_pair_response(&state.config, pair, StatusCode::CREATED))
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /api/auth/email/signin
pub async fn sign_in<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<SignInRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: ResetMailer + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.tokens.clone());

    let pair = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(token_pair_response(&state.config, pair, StatusCode::OK))
}

// ============================================================================
// Sign Out
// ============================================================================

/// POST /api/auth/email/logout (guarded)
pub async fn sign_out<R, M>(
    State(state): State<AuthAppState<R, M>>,
    axum::Extension(claims): axum::Extension<AccessClaims>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: ResetMailer + Clone + Send + Sync + 'static,
{
    let user_id = parse_user_id(&claims.sub)?;

    let use_case = SignOutUseCase::new(state.repo.clone());
    let updated = use_case.execute(&user_id).await?;

    // Both token cookies expire immediately
    let mut headers = HeaderMap::new();
    state.config.access_cookie().append_delete_cookie(&mut headers);
    state.config.refresh_cookie().append_delete_cookie(&mut headers);

    Ok((StatusCode::OK, headers, Json(updated)))
}

// ============================================================================
// Current User
// ============================================================================

/// GET /api/auth/email/user (guarded)
pub async fn current_user<R, M>(
    State(_state): State<AuthAppState<R, M>>,
    axum::Extension(claims): axum::Extension<AccessClaims>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: ResetMailer + Clone + Send + Sync + 'static,
{
    Ok(Json(UserResponse {
        sub: claims.sub,
        email: claims.email,
        display_name: claims.display_name,
        iat: claims.iat,
        exp: claims.exp,
    }))
}

// ============================================================================
// Password Reset
// ============================================================================

/// POST /api/auth/email/forgot-password
pub async fn forgot_password<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<ForgotPasswordRequest>,
) -> AuthResult<Json<ForgotPasswordResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: ResetMailer + Clone + Send + Sync + 'static,
{
    let use_case = ForgotPasswordUseCase::new(
        state.repo.clone(),
        state.mailer.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    use_case
        .execute(ForgotPasswordInput { email: req.email })
        .await?;

    Ok(Json(ForgotPasswordResponse {
        message: "Password reset link sent".to_string(),
    }))
}

/// GET /api/auth/email/reset-password/{id}/{token}
pub async fn reset_password_verify<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Path((id, token)): Path<(String, String)>,
) -> AuthResult<Json<ResetVerifyResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: ResetMailer + Clone + Send + Sync + 'static,
{
    let use_case = ResetPasswordUseCase::new(state.repo.clone(), state.tokens.clone());

    let claims = use_case.verify(&id, &token).await?;

    Ok(Json(ResetVerifyResponse {
        user_id: claims.sub,
        email: claims.email,
    }))
}

/// POST /api/auth/email/reset-password/{id}/{token}
pub async fn reset_password<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Path((id, token)): Path<(String, String)>,
    Json(req): Json<ResetPasswordRequest>,
) -> AuthResult<Json<ResetPasswordResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: ResetMailer + Clone + Send + Sync + 'static,
{
    let use_case = ResetPasswordUseCase::new(state.repo.clone(), state.tokens.clone());

    use_case
        .execute(
            &id,
            &token,
            ResetPasswordInput {
                new_password: req.new_password,
                password_confirmation: req.password_confirmation,
            },
        )
        .await?;

    Ok(Json(ResetPasswordResponse {
        message: "Password updated".to_string(),
    }))
}

// ============================================================================
// Refresh
// ============================================================================

/// POST /api/auth/refresh
pub async fn refresh<R, M>(
    State(state): State<AuthAppState<R, M>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: ResetMailer + Clone + Send + Sync + 'static,
{
    let refresh_token = platform::cookie::extract_cookie(&headers, REFRESH_TOKEN_COOKIE)
        .or_else(|| platform::cookie::extract_bearer(&headers))
        .ok_or(AuthError::AccessDenied)?;

    let use_case = RefreshUseCase::new(state.repo.clone(), state.tokens.clone());
    let pair = use_case.execute(&refresh_token).await?;

    Ok(token_pair_response(&state.config, pair, StatusCode::OK))
}

// ============================================================================
// Helper Functions
// ============================================================================

pub(crate) fn parse_user_id(sub: &str) -> AuthResult<UserId> {
    Uuid::parse_str(sub)
        .map(UserId::from_uuid)
        .map_err(|_| AuthError::TokenInvalid)
}

/// Build the standard token pair response: JSON body plus both cookies
pub(crate) fn token_pair_response(
    config: &AuthConfig,
    pair: TokenPair,
    status: StatusCode,
) -> axum::response::Response {
    let mut headers = HeaderMap::new();
    config
        .access_cookie()
        .append_set_cookie(&mut headers, &pair.access_token);
    config
        .refresh_cookie()
        .append_set_cookie(&mut headers, &pair.refresh_token);

    (
        status,
        headers,
        Json(TokenPairResponse {
            jwt_access_token: pair.access_token,
            jwt_refresh_token: pair.refresh_token,
        }),
    )
        .into_response()
}
