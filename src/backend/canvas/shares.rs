/**
 * Share Registry
 *
 * This module owns share links: revocable capability tokens that grant
 * access to one canvas at "view" or "edit" level without requiring a
 * user identity. Knowing the token IS the authorization; tokens are
 * 160 bits of randomness, hex-encoded.
 *
 * Revocation is scoped by (canvas_id, share_id) so a caller can only
 * revoke shares of a canvas they own, even if they guess another
 * share's id.
 */

use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Access level granted by a share link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareMode {
    /// Read-only access; any mutation through the share is forbidden
    #[default]
    View,
    /// Permits the same node-replace operation the owner could perform
    Edit,
}

impl ShareMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ShareMode::View => "view",
            ShareMode::Edit => "edit",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "view" => Some(ShareMode::View),
            "edit" => Some(ShareMode::Edit),
            _ => None,
        }
    }
}

/// Share row as stored
#[derive(Debug, Clone, sqlx::FromRow)]
struct ShareRow {
    id: String,
    canvas_id: String,
    token: String,
    mode: String,
    created_at: DateTime<Utc>,
}

/// A share link
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Share {
    pub id: String,
    pub canvas_id: String,
    /// Opaque unguessable token embedded in the share URL
    pub token: String,
    pub mode: ShareMode,
    pub created_at: DateTime<Utc>,
}

impl From<ShareRow> for Share {
    fn from(row: ShareRow) -> Self {
        Share {
            id: row.id,
            canvas_id: row.canvas_id,
            mode: ShareMode::parse(&row.mode).unwrap_or_default(),
            token: row.token,
            created_at: row.created_at,
        }
    }
}

/// Generate a high-entropy share token (40 hex chars)
fn generate_token() -> String {
    let mut bytes = [0u8; 20];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Create a share link for a canvas
pub async fn create_share(
    pool: &SqlitePool,
    canvas_id: &str,
    mode: ShareMode,
) -> Result<Share, sqlx::Error> {
    let id = uuid::Uuid::new_v4().to_string();
    let token = generate_token();
    let now = Utc::now();

    let row = sqlx::query_as::<_, ShareRow>(
        r#"
        INSERT INTO canvas_shares (id, canvas_id, token, mode, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, canvas_id, token, mode, created_at
        "#,
    )
    .bind(&id)
    .bind(canvas_id)
    .bind(&token)
    .bind(mode.as_str())
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(row.into())
}

/// List the share links of a canvas
pub async fn list_shares(pool: &SqlitePool, canvas_id: &str) -> Result<Vec<Share>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ShareRow>(
        r#"
        SELECT id, canvas_id, token, mode, created_at
        FROM canvas_shares
        WHERE canvas_id = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(canvas_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Share::from).collect())
}

/// Revoke a share link (hard delete), scoped to its canvas
///
/// Returns whether a row was removed; a share id belonging to a
/// different canvas removes nothing.
pub async fn revoke_share(
    pool: &SqlitePool,
    canvas_id: &str,
    share_id: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM canvas_shares WHERE id = $1 AND canvas_id = $2")
        .bind(share_id)
        .bind(canvas_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Resolve a share by its token (public path, no auth)
pub async fn find_by_token(pool: &SqlitePool, token: &str) -> Result<Option<Share>, sqlx::Error> {
    let row = sqlx::query_as::<_, ShareRow>(
        r#"
        SELECT id, canvas_id, token, mode, created_at
        FROM canvas_shares
        WHERE token = $1
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Share::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::users::create_user;
    use crate::backend::canvas::store::create_canvas;
    use crate::backend::server::config::connect_pool;

    async fn pool_with_canvas() -> (SqlitePool, String, String) {
        let pool = connect_pool("sqlite::memory:").await.unwrap();
        let user = create_user(&pool, None, "Ada", "ada@example.com", None)
            .await
            .unwrap();
        let canvas = create_canvas(&pool, &user.id, None).await.unwrap();
        (pool, user.id, canvas.id)
    }

    #[test]
    fn test_token_shape() {
        let token = generate_token();
        assert_eq!(token.len(), 40);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(generate_token(), generate_token());
    }

    #[tokio::test]
    async fn test_create_and_resolve() {
        let (pool, _, canvas_id) = pool_with_canvas().await;

        let share = create_share(&pool, &canvas_id, ShareMode::Edit)
            .await
            .unwrap();
        assert_eq!(share.mode, ShareMode::Edit);

        let resolved = find_by_token(&pool, &share.token).await.unwrap().unwrap();
        assert_eq!(resolved.id, share.id);
        assert_eq!(resolved.canvas_id, canvas_id);
    }

    #[tokio::test]
    async fn test_revoke_scoped_to_canvas() {
        let (pool, user_id, canvas_id) = pool_with_canvas().await;
        let other_canvas = create_canvas(&pool, &user_id, None).await.unwrap();

        let share = create_share(&pool, &canvas_id, ShareMode::View)
            .await
            .unwrap();

        // Wrong canvas id removes nothing, even with the right share id.
        assert!(!revoke_share(&pool, &other_canvas.id, &share.id)
            .await
            .unwrap());
        assert!(find_by_token(&pool, &share.token).await.unwrap().is_some());

        assert!(revoke_share(&pool, &canvas_id, &share.id).await.unwrap());
        assert!(find_by_token(&pool, &share.token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_canvas_delete_cascades_shares() {
        let (pool, user_id, canvas_id) = pool_with_canvas().await;

        let share = create_share(&pool, &canvas_id, ShareMode::View)
            .await
            .unwrap();

        crate::backend::canvas::store::delete_canvas(&pool, &canvas_id, &user_id)
            .await
            .unwrap();

        assert!(find_by_token(&pool, &share.token).await.unwrap().is_none());
    }
}
