//! # Profile Repository
//!
//! User profiles. Rows are created by the auth provider's sign-up hook
//! (and by the seed binary); the storefront only reads them.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use dailydose_core::{Profile, Role};

#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    id: String,
    username: String,
    email: String,
    role: Role,
    created_at: DateTime<Utc>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            id: row.id,
            username: row.username,
            email: row.email,
            role: row.role,
            created_at: row.created_at,
        }
    }
}

/// Repository for profile database operations.
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    pool: SqlitePool,
}

impl ProfileRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ProfileRepository { pool }
    }

    /// Lists every profile, newest first (admin users screen).
    pub async fn list(&self) -> DbResult<Vec<Profile>> {
        let rows: Vec<ProfileRow> = sqlx::query_as(
            r#"
            SELECT id, username, email, role, created_at
            FROM profiles
            ORDER BY created_at DESC, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Profile::from).collect())
    }

    /// Gets a profile by auth user id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Profile>> {
        let row: Option<ProfileRow> = sqlx::query_as(
            r#"
            SELECT id, username, email, role, created_at
            FROM profiles
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Profile::from))
    }

    /// Inserts or replaces a profile, keyed by id.
    pub async fn upsert(&self, profile: &Profile) -> DbResult<()> {
        debug!(id = %profile.id, role = ?profile.role, "Upserting profile");

        sqlx::query(
            r#"
            INSERT INTO profiles (id, username, email, role, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT (id) DO UPDATE SET
                username = excluded.username,
                email = excluded.email,
                role = excluded.role
            "#,
        )
        .bind(&profile.id)
        .bind(&profile.username)
        .bind(&profile.email)
        .bind(profile.role)
        .bind(profile.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    fn profile(id: &str, email: &str, role: Role) -> Profile {
        Profile {
            id: id.to_string(),
            username: id.to_string(),
            email: email.to_string(),
            role,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_upsert_and_get() {
        let repo = Database::new(DbConfig::in_memory()).await.unwrap().profiles();

        repo.upsert(&profile("u1", "ana@example.com", Role::Customer))
            .await
            .unwrap();
        repo.upsert(&profile("u1", "ana@example.com", Role::Admin))
            .await
            .unwrap();

        let fetched = repo.get_by_id("u1").await.unwrap().unwrap();
        assert!(fetched.is_admin());
        assert!(repo.get_by_id("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list() {
        let repo = Database::new(DbConfig::in_memory()).await.unwrap().profiles();
        repo.upsert(&profile("u1", "a@example.com", Role::Admin))
            .await
            .unwrap();
        repo.upsert(&profile("u2", "b@example.com", Role::Customer))
            .await
            .unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 2);
    }
}
