/// Session model and database operations
///
/// Login sessions are server-side rows keyed by the SHA-256 hash of an
/// opaque token. The plaintext token is returned exactly once, at login,
/// and presented by the client on subsequent requests. Logout deletes the
/// row, which invalidates the token immediately; there is nothing to
/// "expire" client-side.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE sessions (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     token_hash VARCHAR(64) NOT NULL UNIQUE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     expires_at TIMESTAMPTZ NOT NULL
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::models::session::Session;
/// use taskdeck_shared::db::pool::{create_pool, DatabaseConfig};
/// use uuid::Uuid;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
/// let user_id = Uuid::new_v4();
///
/// let (session, token) = Session::create(&pool, user_id, 720).await?;
/// // Hand `token` to the client now; it is never recoverable later.
///
/// let found = Session::find_by_token(&pool, &token).await?;
/// assert!(found.is_some());
///
/// Session::delete(&pool, session.id).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use uuid::Uuid;

/// Session model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Session {
    /// Unique session ID
    pub id: Uuid,

    /// User this session belongs to
    pub user_id: Uuid,

    /// SHA-256 hash of the session token (never store plaintext)
    pub token_hash: String,

    /// When the session was created
    pub created_at: DateTime<Utc>,

    /// When the session expires
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Generates a secure random session token
    ///
    /// Format: `sess_{40_random_chars}`
    ///
    /// # Example
    ///
    /// ```
    /// use taskdeck_shared::models::session::Session;
    ///
    /// let token = Session::generate_token();
    /// assert!(token.starts_with("sess_"));
    /// assert_eq!(token.len(), 45); // "sess_" (5) + 40 chars
    /// ```
    pub fn generate_token() -> String {
        use rand::Rng;
        const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
        let mut rng = rand::thread_rng();

        let random: String = (0..40)
            .map(|_| {
                let idx = rng.gen_range(0..CHARSET.len());
                CHARSET[idx] as char
            })
            .collect();

        format!("sess_{}", random)
    }

    /// Hashes a session token with SHA-256
    ///
    /// # Example
    ///
    /// ```
    /// use taskdeck_shared::models::session::Session;
    ///
    /// let hash = Session::hash_token("sess_abc123");
    /// assert_eq!(hash.len(), 64); // SHA-256 hex is 64 chars
    /// ```
    pub fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Checks if the session is expired
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }

    /// Creates a new session for a user
    ///
    /// Returns both the database record and the plaintext token. The
    /// plaintext token is only returned once and never stored.
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        ttl_hours: i64,
    ) -> Result<(Self, String), sqlx::Error> {
        let token = Self::generate_token();
        let token_hash = Self::hash_token(&token);
        let expires_at = Utc::now() + Duration::hours(ttl_hours);

        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (user_id, token_hash, expires_at)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, token_hash, created_at, expires_at
            "#,
        )
        .bind(user_id)
        .bind(token_hash)
        .bind(expires_at)
        .fetch_one(pool)
        .await?;

        Ok((session, token))
    }

    /// Finds a live session by its plaintext token
    ///
    /// Returns None for unknown tokens and for expired sessions.
    pub async fn find_by_token(pool: &PgPool, token: &str) -> Result<Option<Self>, sqlx::Error> {
        let token_hash = Self::hash_token(token);

        let session = sqlx::query_as::<_, Session>(
            r#"
            SELECT id, user_id, token_hash, created_at, expires_at
            FROM sessions
            WHERE token_hash = $1 AND expires_at > NOW()
            "#,
        )
        .bind(token_hash)
        .fetch_optional(pool)
        .await?;

        Ok(session)
    }

    /// Deletes a session (logout)
    ///
    /// Returns true if a row was removed.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes all of a user's sessions except the given one
    ///
    /// Called on password change so other devices are logged out while the
    /// session performing the change stays live.
    pub async fn delete_for_user_except(
        pool: &PgPool,
        user_id: Uuid,
        keep: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = $1 AND id <> $2")
            .bind(user_id)
            .bind(keep)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Removes expired sessions
    ///
    /// Expired rows are already invisible to [`Session::find_by_token`];
    /// this reclaims the storage.
    pub async fn purge_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= NOW()")
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_token_format() {
        let token = Session::generate_token();
        assert!(token.starts_with("sess_"));
        assert_eq!(token.len(), 45);
        assert!(token[5..].chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_token_unique() {
        let a = Session::generate_token();
        let b = Session::generate_token();
        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_token_deterministic() {
        let token = "sess_fixed";
        assert_eq!(Session::hash_token(token), Session::hash_token(token));
        assert_ne!(Session::hash_token(token), Session::hash_token("sess_other"));
    }

    #[test]
    fn test_hash_token_hex_length() {
        assert_eq!(Session::hash_token("anything").len(), 64);
    }

    #[test]
    fn test_is_expired() {
        let mut session = Session {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            token_hash: Session::hash_token("sess_x"),
            created_at: Utc::now(),
            expires_at: Utc::now() + Duration::hours(1),
        };
        assert!(!session.is_expired());

        session.expires_at = Utc::now() - Duration::hours(1);
        assert!(session.is_expired());
    }
}
