//! PostgreSQL Repository Implementation

use auth::models::UserId;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::external_auth::ExternalAuth;
use crate::domain::repository::ExternalAuthRepository;
use crate::error::ConnectionResult;

/// PostgreSQL-backed external auth repository
#[derive(Clone)]
pub struct PgExternalAuthRepository {
    pool: PgPool,
}

impl PgExternalAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ExternalAuthRepository for PgExternalAuthRepository {
    async fn create(&self, link: &ExternalAuth) -> ConnectionResult<()> {
        sqlx::query(
            r#"
            INSERT INTO external_auths (
                provider,
                provider_id,
                user_id,
                created_at
            ) VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&link.provider)
        .bind(&link.provider_id)
        .bind(link.user_id.as_uuid())
        .bind(link.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_provider_id(
        &self,
        provider: &str,
        provider_id: &str,
    ) -> ConnectionResult<Option<ExternalAuth>> {
        let row = sqlx::query_as::<_, ExternalAuthRow>(
            r#"
            SELECT
                provider,
                provider_id,
                user_id,
                created_at
            FROM external_auths
            WHERE provider = $1 AND provider_id = $2
            "#,
        )
        .bind(provider)
        .bind(provider_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_link()))
    }

    async fn exists_by_provider_id(
        &self,
        provider: &str,
        provider_id: &str,
    ) -> ConnectionResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM external_auths WHERE provider = $1 AND provider_id = $2)",
        )
        .bind(provider)
        .bind(provider_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct ExternalAuthRow {
    provider: String,
    provider_id: String,
    user_id: Uuid,
    created_at: DateTime<Utc>,
}

impl ExternalAuthRow {
    fn into_link(self) -> ExternalAuth {
        ExternalAuth {
            provider: self.provider,
            provider_id: self.provider_id,
            user_id: UserId::from_uuid(self.user_id),
            created_at: self.created_at,
        }
    }
}
