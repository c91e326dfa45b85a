//! Repository for the `trackers` table.

use sqlx::PgPool;
use tracareer_core::tracker::{CreateTracker, Tracker};
use tracareer_core::types::{DbId, UserId};

use crate::models::tracker::TrackerRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, title, description, created_at, updated_at";

/// Provides create/list/lookup for trackers, always scoped to an owner.
pub struct TrackerRepo;

impl TrackerRepo {
    /// Insert a new tracker for `owner`, returning the created row.
    ///
    /// The input is expected to be validated already (trimmed title, blank
    /// description dropped).
    pub async fn create(
        pool: &PgPool,
        owner: UserId,
        input: &CreateTracker,
    ) -> Result<Tracker, sqlx::Error> {
        let query = format!(
            "INSERT INTO trackers (owner_id, title, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, TrackerRow>(&query)
            .bind(owner)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_one(pool)
            .await?;
        Ok(row.into())
    }

    /// List every tracker owned by `owner`, most recently created first.
    pub async fn list_for_owner(pool: &PgPool, owner: UserId) -> Result<Vec<Tracker>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM trackers WHERE owner_id = $1 ORDER BY created_at DESC, id DESC"
        );
        let rows = sqlx::query_as::<_, TrackerRow>(&query)
            .bind(owner)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Tracker::from).collect())
    }

    /// Find a tracker by id, only if `owner` owns it.
    pub async fn find_for_owner(
        pool: &PgPool,
        id: DbId,
        owner: UserId,
    ) -> Result<Option<Tracker>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM trackers WHERE id = $1 AND owner_id = $2");
        let row = sqlx::query_as::<_, TrackerRow>(&query)
            .bind(id)
            .bind(owner)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Tracker::from))
    }
}
