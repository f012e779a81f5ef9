//! Unit tests for the auth crate use cases
//!
//! Uses in-memory mock implementations of the repository and mailer
//! ports so the full flows run without Postgres or SMTP.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use platform::password::HashedSecret;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::application::tokens::TokenService;
use crate::application::{
    ForgotPasswordInput, ForgotPasswordUseCase, RefreshUseCase, ResetPasswordInput,
    ResetPasswordUseCase, SignInInput, SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase,
};
use crate::domain::entity::user::User;
use crate::domain::mailer::ResetMailer;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email, user_id::UserId, user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

// ============================================================================
// Mocks
// ============================================================================

#[derive(Clone, Default)]
struct MockUserRepository {
    users: Arc<Mutex<HashMap<Uuid, User>>>,
}

impl UserRepository for MockUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        self.users
            .lock()
            .unwrap()
            .insert(*user.user_id.as_uuid(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(user_id.as_uuid()).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == *email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .any(|u| u.email == *email))
    }

    async fn update_password(&self, user_id: &UserId, password: &UserPassword) -> AuthResult<()> {
        if let Some(user) = self.users.lock().unwrap().get_mut(user_id.as_uuid()) {
            user.set_password(password.clone());
        }
        Ok(())
    }

    async fn update_refresh_token_hash(
        &self,
        user_id: &UserId,
        hash: Option<&HashedSecret>,
    ) -> AuthResult<u64> {
        let mut users = self.users.lock().unwrap();
        match users.get_mut(user_id.as_uuid()) {
            Some(user) => {
                match hash {
                    Some(h) => user.set_refresh_token_hash(h.clone()),
                    None => user.clear_refresh_token_hash(),
                }
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[derive(Clone, Default)]
struct MockMailer {
    sent: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl MockMailer {
    fn failing() -> Self {
        Self {
            sent: Arc::default(),
            fail: true,
        }
    }

    fn last_reset_url(&self) -> Option<String> {
        self.sent.lock().unwrap().last().cloned()
    }
}

impl ResetMailer for MockMailer {
    async fn send_reset_link(
        &self,
        _to: &Email,
        _display_name: &str,
        reset_url: &str,
    ) -> AuthResult<()> {
        if self.fail {
            return Err(AuthError::MailDelivery);
        }
        self.sent.lock().unwrap().push(reset_url.to_string());
        Ok(())
    }
}

// ============================================================================
// Fixture
// ============================================================================

struct Fixture {
    repo: Arc<MockUserRepository>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl Fixture {
    fn new() -> Self {
        let config = Arc::new(AuthConfig::development());
        Self {
            repo: Arc::new(MockUserRepository::default()),
            tokens: Arc::new(TokenService::new(config.clone())),
            config,
        }
    }

    async fn sign_up(&self, email: &str, password: &str) -> crate::application::TokenPair {
        SignUpUseCase::new(self.repo.clone(), self.tokens.clone())
            .execute(SignUpInput {
                email: email.to_string(),
                display_name: "Test User".to_string(),
                password: password.to_string(),
            })
            .await
            .unwrap()
    }

    fn stored_user(&self, email: &str) -> User {
        let email = Email::new(email).unwrap();
        self.repo
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned()
            .unwrap()
    }
}

// ============================================================================
// Sign up / Sign in
// ============================================================================

mod sign_up_tests {
    use super::*;

    #[tokio::test]
    async fn test_signup_issues_pair_and_persists_refresh_hash() {
        let fx = Fixture::new();

        let pair = fx.sign_up("alice@example.com", "CorrectHorse9!").await;

        let claims = fx.tokens.verify_access(&pair.access_token).unwrap();
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.display_name, "Test User");

        // The stored hash matches exactly the issued refresh token
        let user = fx.stored_user("alice@example.com");
        let stored = user.refresh_token_hash.unwrap();
        assert!(stored.verify(pair.refresh_token.as_bytes()));
    }

    #[tokio::test]
    async fn test_signup_duplicate_email_is_conflict() {
        let fx = Fixture::new();
        fx.sign_up("alice@example.com", "CorrectHorse9!").await;

        let result = SignUpUseCase::new(fx.repo.clone(), fx.tokens.clone())
            .execute(SignUpInput {
                email: "alice@example.com".to_string(),
                display_name: "Other".to_string(),
                password: "OtherPassword9!".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AuthError::EmailTaken)));
    }

    #[tokio::test]
    async fn test_signup_rejects_weak_password() {
        let fx = Fixture::new();

        let result = SignUpUseCase::new(fx.repo.clone(), fx.tokens.clone())
            .execute(SignUpInput {
                email: "alice@example.com".to_string(),
                display_name: "Test User".to_string(),
                password: "short".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AuthError::PasswordValidation(_))));
    }
}

mod sign_in_tests {
    use super::*;

    #[tokio::test]
    async fn test_signin_with_correct_password() {
        let fx = Fixture::new();
        fx.sign_up("alice@example.com", "CorrectHorse9!").await;

        let pair = SignInUseCase::new(fx.repo.clone(), fx.tokens.clone())
            .execute(SignInInput {
                email: "alice@example.com".to_string(),
                password: "CorrectHorse9!".to_string(),
            })
            .await
            .unwrap();

        assert!(fx.tokens.verify_refresh(&pair.refresh_token).is_ok());
    }

    #[tokio::test]
    async fn test_signin_wrong_password() {
        let fx = Fixture::new();
        fx.sign_up("alice@example.com", "CorrectHorse9!").await;

        let result = SignInUseCase::new(fx.repo.clone(), fx.tokens.clone())
            .execute(SignInInput {
                email: "alice@example.com".to_string(),
                password: "WrongPassword9!".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_signin_unknown_user() {
        let fx = Fixture::new();

        let result = SignInUseCase::new(fx.repo.clone(), fx.tokens.clone())
            .execute(SignInInput {
                email: "nobody@example.com".to_string(),
                password: "CorrectHorse9!".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AuthError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_signin_replaces_previous_refresh_session() {
        let fx = Fixture::new();
        let first = fx.sign_up("alice@example.com", "CorrectHorse9!").await;

        SignInUseCase::new(fx.repo.clone(), fx.tokens.clone())
            .execute(SignInInput {
                email: "alice@example.com".to_string(),
                password: "CorrectHorse9!".to_string(),
            })
            .await
            .unwrap();

        // The signup-era refresh token no longer matches the stored hash
        let result = RefreshUseCase::new(fx.repo.clone(), fx.tokens.clone())
            .execute(&first.refresh_token)
            .await;

        assert!(matches!(result, Err(AuthError::AccessDenied)));
    }
}

// ============================================================================
// Refresh rotation / logout
// ============================================================================

mod refresh_tests {
    use super::*;

    #[tokio::test]
    async fn test_refresh_rotates_and_rejects_old_token() {
        let fx = Fixture::new();
        let pair = fx.sign_up("alice@example.com", "CorrectHorse9!").await;

        let use_case = RefreshUseCase::new(fx.repo.clone(), fx.tokens.clone());

        let rotated = use_case.execute(&pair.refresh_token).await.unwrap();
        assert!(fx.tokens.verify_refresh(&rotated.refresh_token).is_ok());

        // Reusing the pre-rotation token is denied
        let result = use_case.execute(&pair.refresh_token).await;
        assert!(matches!(result, Err(AuthError::AccessDenied)));

        // The rotated token still works
        assert!(use_case.execute(&rotated.refresh_token).await.is_ok());
    }

    #[tokio::test]
    async fn test_refresh_rejects_garbage_token() {
        let fx = Fixture::new();
        fx.sign_up("alice@example.com", "CorrectHorse9!").await;

        let result = RefreshUseCase::new(fx.repo.clone(), fx.tokens.clone())
            .execute("not.a.jwt")
            .await;

        assert!(matches!(result, Err(AuthError::TokenInvalid)));
    }

    #[tokio::test]
    async fn test_refresh_rejects_access_token() {
        let fx = Fixture::new();
        let pair = fx.sign_up("alice@example.com", "CorrectHorse9!").await;

        let result = RefreshUseCase::new(fx.repo.clone(), fx.tokens.clone())
            .execute(&pair.access_token)
            .await;

        assert!(matches!(result, Err(AuthError::TokenInvalid)));
    }

    #[tokio::test]
    async fn test_logout_revokes_refresh_session() {
        let fx = Fixture::new();
        let pair = fx.sign_up("alice@example.com", "CorrectHorse9!").await;

        let user = fx.stored_user("alice@example.com");

        let updated = SignOutUseCase::new(fx.repo.clone())
            .execute(&user.user_id)
            .await
            .unwrap();
        assert!(updated);

        // The still-unexpired refresh token is now useless
        let result = RefreshUseCase::new(fx.repo.clone(), fx.tokens.clone())
            .execute(&pair.refresh_token)
            .await;
        assert!(matches!(result, Err(AuthError::AccessDenied)));
    }

    #[tokio::test]
    async fn test_logout_unknown_user_updates_nothing() {
        let fx = Fixture::new();

        let updated = SignOutUseCase::new(fx.repo.clone())
            .execute(&UserId::new())
            .await
            .unwrap();

        assert!(!updated);
    }
}

// ============================================================================
// Password reset
// ============================================================================

mod reset_tests {
    use super::*;

    fn token_from_url(url: &str) -> (String, String) {
        // {app_url}/reset-password/{id}/{token}
        let mut parts = url.rsplit('/');
        let token = parts.next().unwrap().to_string();
        let id = parts.next().unwrap().to_string();
        (id, token)
    }

    async fn request_reset(fx: &Fixture, mailer: &Arc<MockMailer>, email: &str) -> (String, String) {
        ForgotPasswordUseCase::new(
            fx.repo.clone(),
            mailer.clone(),
            fx.tokens.clone(),
            fx.config.clone(),
        )
        .execute(ForgotPasswordInput {
            email: email.to_string(),
        })
        .await
        .unwrap();

        token_from_url(&mailer.last_reset_url().unwrap())
    }

    #[tokio::test]
    async fn test_forgot_password_unknown_email() {
        let fx = Fixture::new();
        let mailer = Arc::new(MockMailer::default());

        let result = ForgotPasswordUseCase::new(
            fx.repo.clone(),
            mailer.clone(),
            fx.tokens.clone(),
            fx.config.clone(),
        )
        .execute(ForgotPasswordInput {
            email: "nobody@example.com".to_string(),
        })
        .await;

        assert!(matches!(result, Err(AuthError::UserNotFound)));
        assert!(mailer.last_reset_url().is_none());
    }

    #[tokio::test]
    async fn test_forgot_password_mail_failure() {
        let fx = Fixture::new();
        fx.sign_up("alice@example.com", "CorrectHorse9!").await;
        let mailer = Arc::new(MockMailer::failing());

        let result = ForgotPasswordUseCase::new(
            fx.repo.clone(),
            mailer,
            fx.tokens.clone(),
            fx.config.clone(),
        )
        .execute(ForgotPasswordInput {
            email: "alice@example.com".to_string(),
        })
        .await;

        assert!(matches!(result, Err(AuthError::MailDelivery)));
    }

    #[tokio::test]
    async fn test_reset_link_verifies_then_resets() {
        let fx = Fixture::new();
        fx.sign_up("alice@example.com", "CorrectHorse9!").await;
        let mailer = Arc::new(MockMailer::default());

        let (id, token) = request_reset(&fx, &mailer, "alice@example.com").await;

        let use_case = ResetPasswordUseCase::new(fx.repo.clone(), fx.tokens.clone());

        // GET verification returns the claims
        let claims = use_case.verify(&id, &token).await.unwrap();
        assert_eq!(claims.email, "alice@example.com");

        use_case
            .execute(
                &id,
                &token,
                ResetPasswordInput {
                    new_password: "BrandNewSecret7!".to_string(),
                    password_confirmation: "BrandNewSecret7!".to_string(),
                },
            )
            .await
            .unwrap();

        // New password works, old one does not
        let sign_in = SignInUseCase::new(fx.repo.clone(), fx.tokens.clone());
        assert!(sign_in
            .execute(SignInInput {
                email: "alice@example.com".to_string(),
                password: "BrandNewSecret7!".to_string(),
            })
            .await
            .is_ok());
        assert!(matches!(
            sign_in
                .execute(SignInInput {
                    email: "alice@example.com".to_string(),
                    password: "CorrectHorse9!".to_string(),
                })
                .await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_reset_token_single_use() {
        let fx = Fixture::new();
        fx.sign_up("alice@example.com", "CorrectHorse9!").await;
        let mailer = Arc::new(MockMailer::default());

        let (id, token) = request_reset(&fx, &mailer, "alice@example.com").await;

        let use_case = ResetPasswordUseCase::new(fx.repo.clone(), fx.tokens.clone());
        use_case
            .execute(
                &id,
                &token,
                ResetPasswordInput {
                    new_password: "BrandNewSecret7!".to_string(),
                    password_confirmation: "BrandNewSecret7!".to_string(),
                },
            )
            .await
            .unwrap();

        // The token was salted with the old hash; it no longer verifies
        let result = use_case.verify(&id, &token).await;
        assert!(matches!(result, Err(AuthError::TokenInvalid)));
    }

    #[tokio::test]
    async fn test_reset_confirmation_mismatch() {
        let fx = Fixture::new();
        fx.sign_up("alice@example.com", "CorrectHorse9!").await;
        let mailer = Arc::new(MockMailer::default());

        let (id, token) = request_reset(&fx, &mailer, "alice@example.com").await;

        let result = ResetPasswordUseCase::new(fx.repo.clone(), fx.tokens.clone())
            .execute(
                &id,
                &token,
                ResetPasswordInput {
                    new_password: "BrandNewSecret7!".to_string(),
                    password_confirmation: "DifferentSecret7!".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AuthError::PasswordMismatch)));
    }

    #[tokio::test]
    async fn test_reset_clears_refresh_session() {
        let fx = Fixture::new();
        let pair = fx.sign_up("alice@example.com", "CorrectHorse9!").await;
        let mailer = Arc::new(MockMailer::default());

        let (id, token) = request_reset(&fx, &mailer, "alice@example.com").await;

        ResetPasswordUseCase::new(fx.repo.clone(), fx.tokens.clone())
            .execute(
                &id,
                &token,
                ResetPasswordInput {
                    new_password: "BrandNewSecret7!".to_string(),
                    password_confirmation: "BrandNewSecret7!".to_string(),
                },
            )
            .await
            .unwrap();

        let result = RefreshUseCase::new(fx.repo.clone(), fx.tokens.clone())
            .execute(&pair.refresh_token)
            .await;
        assert!(matches!(result, Err(AuthError::AccessDenied)));
    }
}

// ============================================================================
// Current user
// ============================================================================

mod current_user_tests {
    use super::*;
    use axum::{Extension, Json, extract::State};

    use crate::presentation::handlers::{self, AuthAppState};

    #[tokio::test]
    async fn test_current_user_echoes_access_claims() {
        let fx = Fixture::new();
        let pair = fx.sign_up("alice@example.com", "CorrectHorse9!").await;
        let claims = fx.tokens.verify_access(&pair.access_token).unwrap();

        let state = AuthAppState {
            repo: fx.repo.clone(),
            mailer: Arc::new(MockMailer::default()),
            tokens: fx.tokens.clone(),
            config: fx.config.clone(),
        };

        let Json(resp) = handlers::current_user(State(state), Extension(claims.clone()))
            .await
            .unwrap();

        assert_eq!(resp.sub, claims.sub);
        assert_eq!(resp.email, "alice@example.com");
        assert_eq!(resp.display_name, "Test User");
        assert_eq!(resp.iat, claims.iat);
        assert_eq!(resp.exp, claims.exp);
    }
}

// ============================================================================
// Error mapping
// ============================================================================

mod error_tests {
    use super::*;
    use axum::http::StatusCode;
    use kernel::error::kind::ErrorKind;

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::UserNotFound.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AuthError::EmailTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(AuthError::AccessDenied.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::MailDelivery.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            AuthError::TokenInvalid.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::PasswordMismatch.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::Internal("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(AuthError::EmailTaken.kind(), ErrorKind::Conflict);
        assert_eq!(AuthError::AccessDenied.kind(), ErrorKind::Forbidden);
        assert_eq!(AuthError::TokenInvalid.kind(), ErrorKind::Unauthorized);
        assert_eq!(
            AuthError::Internal("boom".to_string()).kind(),
            ErrorKind::InternalServerError
        );
    }

    #[test]
    fn test_database_errors_keep_classified_status() {
        // Wrapping in the Database variant must not flatten everything
        // to 500; the sqlx classification decides the status
        assert_eq!(
            AuthError::Database(sqlx::Error::RowNotFound).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AuthError::Database(sqlx::Error::RowNotFound).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            AuthError::Database(sqlx::Error::PoolTimedOut).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_database_error_response_hides_sqlx_message() {
        let app_err = AuthError::Database(sqlx::Error::RowNotFound).to_app_error();
        assert_eq!(app_err.kind(), ErrorKind::NotFound);
        assert_eq!(app_err.message(), "Record not found");
    }
}

// ============================================================================
// DTO serde
// ============================================================================

mod dto_tests {
    use crate::presentation::dto::*;

    #[test]
    fn test_signup_request_camel_case() {
        let json = r#"{"email":"a@example.com","displayName":"A","password":"Password123!"}"#;
        let req: SignUpRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.display_name, "A");
    }

    #[test]
    fn test_token_pair_response_camel_case() {
        let resp = TokenPairResponse {
            jwt_access_token: "a".to_string(),
            jwt_refresh_token: "r".to_string(),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("jwtAccessToken").is_some());
        assert!(json.get("jwtRefreshToken").is_some());
    }

    #[test]
    fn test_reset_request_camel_case() {
        let json = r#"{"newPassword":"Password123!","passwordConfirmation":"Password123!"}"#;
        let req: ResetPasswordRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.new_password, req.password_confirmation);
    }
}
