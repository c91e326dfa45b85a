//! Repository for the `applications` table.

use chrono::{NaiveDate, NaiveDateTime};
use sqlx::PgPool;
use tracareer_core::application::{Application, ApplicationPage, CreateApplication};
use tracareer_core::field::{ApplicationField, FieldKind, FieldValue};
use tracareer_core::types::DbId;

use crate::models::application::{into_applications, ApplicationRow};
use crate::pagination::page_offset;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, company, position, remote, location, status, applied_at, \
    interview_at, expected_salary, resume_version, hiring_manager, contact, link, tracker_id";

/// Provides paging, insert and single-column update for applications.
pub struct ApplicationRepo;

impl ApplicationRepo {
    /// Fetch page `page` (0-based) of a tracker's applications, newest first,
    /// together with the tracker's exact row count.
    pub async fn page(
        pool: &PgPool,
        tracker_id: DbId,
        page: i64,
        limit: i64,
    ) -> Result<ApplicationPage, sqlx::Error> {
        let total_rows: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM applications WHERE tracker_id = $1")
                .bind(tracker_id)
                .fetch_one(pool)
                .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM applications
             WHERE tracker_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, ApplicationRow>(&query)
            .bind(tracker_id)
            .bind(limit)
            .bind(page_offset(page, limit))
            .fetch_all(pool)
            .await?;

        Ok(ApplicationPage {
            data: into_applications(rows)?,
            total_rows,
        })
    }

    /// Insert a new application into a tracker, returning the created row.
    pub async fn create(
        pool: &PgPool,
        tracker_id: DbId,
        input: &CreateApplication,
    ) -> Result<Application, sqlx::Error> {
        let query = format!(
            "INSERT INTO applications (tracker_id, company, position, status)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ApplicationRow>(&query)
            .bind(tracker_id)
            .bind(&input.company)
            .bind(&input.position)
            .bind(input.status.key())
            .fetch_one(pool)
            .await?;
        into_applications(vec![row])?
            .pop()
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Find one application scoped to its tracker.
    pub async fn find_by_id(
        pool: &PgPool,
        tracker_id: DbId,
        id: DbId,
    ) -> Result<Option<Application>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM applications WHERE id = $1 AND tracker_id = $2");
        let row = sqlx::query_as::<_, ApplicationRow>(&query)
            .bind(id)
            .bind(tracker_id)
            .fetch_optional(pool)
            .await?;
        match row {
            Some(row) => Ok(into_applications(vec![row])?.pop()),
            None => Ok(None),
        }
    }

    /// Set a single column of one application scoped by `(id, tracker_id)`.
    ///
    /// The column name comes from the closed [`ApplicationField`] set, never
    /// from caller text. Returns `true` if a row was updated.
    pub async fn update_field(
        pool: &PgPool,
        tracker_id: DbId,
        id: DbId,
        field: ApplicationField,
        value: &FieldValue,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE applications SET {} = $1, updated_at = NOW()
             WHERE id = $2 AND tracker_id = $3",
            field.column()
        );
        let q = sqlx::query(&query);
        let q = match value {
            FieldValue::Text(s) => q.bind(s.clone()),
            FieldValue::Integer(n) => q.bind(*n),
            FieldValue::Date(d) => q.bind(*d),
            FieldValue::DateTime(dt) => q.bind(*dt),
            FieldValue::Status(s) => q.bind(s.key()),
            FieldValue::Remote(r) => q.bind(r.label()),
            // NULL still needs the column's type for the bind.
            FieldValue::Null => match field.kind() {
                FieldKind::OptionalInteger => q.bind(None::<i64>),
                FieldKind::OptionalDate => q.bind(None::<NaiveDate>),
                FieldKind::OptionalDateTime => q.bind(None::<NaiveDateTime>),
                _ => q.bind(None::<String>),
            },
        };
        let result = q.bind(id).bind(tracker_id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
