//! Integration tests for the tracker and application repositories.
//!
//! Exercises the repository layer against a real database:
//! - Owner scoping of trackers
//! - Paging with exact totals, newest first
//! - Single-column updates, including NULL clears
//! - Constraint enforcement on stored enums

use chrono::NaiveDate;
use sqlx::PgPool;
use tracareer_core::application::CreateApplication;
use tracareer_core::field::{ApplicationField, FieldValue};
use tracareer_core::status::{ApplicationStatus, Remote};
use tracareer_core::tracker::CreateTracker;
use tracareer_core::types::{DbId, UserId};
use tracareer_db::repositories::{ApplicationRepo, TrackerRepo};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_tracker(title: &str) -> CreateTracker {
    CreateTracker {
        title: title.to_string(),
        description: None,
    }
}

fn new_application(company: &str) -> CreateApplication {
    CreateApplication {
        company: company.to_string(),
        position: "Software Engineer".to_string(),
        status: ApplicationStatus::InProgress,
    }
}

async fn seed_tracker(pool: &PgPool, owner: UserId) -> DbId {
    TrackerRepo::create(pool, owner, &new_tracker("2025 Search"))
        .await
        .unwrap()
        .id
}

// ---------------------------------------------------------------------------
// Trackers
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_check(pool: PgPool) {
    tracareer_db::health_check(&pool).await.unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_list_trackers_scoped_to_owner(pool: PgPool) {
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    let created = TrackerRepo::create(
        &pool,
        alice,
        &CreateTracker {
            title: "Grad roles".to_string(),
            description: Some("Sydney only".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(created.title, "Grad roles");
    assert_eq!(created.description.as_deref(), Some("Sydney only"));

    TrackerRepo::create(&pool, bob, &new_tracker("Bob's")).await.unwrap();

    let mine = TrackerRepo::list_for_owner(&pool, alice).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, created.id);

    assert!(TrackerRepo::find_for_owner(&pool, created.id, alice)
        .await
        .unwrap()
        .is_some());
    assert!(TrackerRepo::find_for_owner(&pool, created.id, bob)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_trackers_empty(pool: PgPool) {
    let trackers = TrackerRepo::list_for_owner(&pool, Uuid::new_v4()).await.unwrap();
    assert!(trackers.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blank_title_rejected_by_schema(pool: PgPool) {
    let result = TrackerRepo::create(&pool, Uuid::new_v4(), &new_tracker("   ")).await;
    assert!(result.is_err());
}

// ---------------------------------------------------------------------------
// Applications
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_page_returns_total_and_newest_first(pool: PgPool) {
    let tracker_id = seed_tracker(&pool, Uuid::new_v4()).await;
    for i in 0..12 {
        ApplicationRepo::create(&pool, tracker_id, &new_application(&format!("Company {i}")))
            .await
            .unwrap();
    }

    let first = ApplicationRepo::page(&pool, tracker_id, 0, 5).await.unwrap();
    assert_eq!(first.total_rows, 12);
    assert_eq!(first.data.len(), 5);
    assert_eq!(first.data[0].company, "Company 11");

    let last = ApplicationRepo::page(&pool, tracker_id, 2, 5).await.unwrap();
    assert_eq!(last.total_rows, 12);
    assert_eq!(last.data.len(), 2);
    assert_eq!(last.data[1].company, "Company 0");

    let past_end = ApplicationRepo::page(&pool, tracker_id, 3, 5).await.unwrap();
    assert_eq!(past_end.total_rows, 12);
    assert!(past_end.data.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_page_is_scoped_to_tracker(pool: PgPool) {
    let owner = Uuid::new_v4();
    let a = seed_tracker(&pool, owner).await;
    let b = seed_tracker(&pool, owner).await;
    ApplicationRepo::create(&pool, a, &new_application("Canva")).await.unwrap();

    let page = ApplicationRepo::page(&pool, b, 0, 5).await.unwrap();
    assert_eq!(page.total_rows, 0);
    assert!(page.data.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_application_defaults(pool: PgPool) {
    let tracker_id = seed_tracker(&pool, Uuid::new_v4()).await;
    let app = ApplicationRepo::create(&pool, tracker_id, &new_application("Atlassian"))
        .await
        .unwrap();

    assert_eq!(app.tracker_id, tracker_id);
    assert_eq!(app.status, ApplicationStatus::InProgress);
    assert_eq!(app.remote, None);
    assert_eq!(app.applied_at, None);
    assert_eq!(app.expected_salary, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_field_changes_only_that_column(pool: PgPool) {
    let tracker_id = seed_tracker(&pool, Uuid::new_v4()).await;
    let app = ApplicationRepo::create(&pool, tracker_id, &new_application("Atlassian"))
        .await
        .unwrap();

    let updated = ApplicationRepo::update_field(
        &pool,
        tracker_id,
        app.id,
        ApplicationField::ExpectedSalary,
        &FieldValue::Integer(150_000),
    )
    .await
    .unwrap();
    assert!(updated);

    let reloaded = ApplicationRepo::find_by_id(&pool, tracker_id, app.id)
        .await
        .unwrap()
        .unwrap();
    let mut expected = app.clone();
    expected.expected_salary = Some(150_000);
    assert_eq!(reloaded, expected);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_field_typed_values_and_null(pool: PgPool) {
    let tracker_id = seed_tracker(&pool, Uuid::new_v4()).await;
    let app = ApplicationRepo::create(&pool, tracker_id, &new_application("Canva"))
        .await
        .unwrap();
    let date = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
    let interview = date.and_hms_opt(15, 5, 0).unwrap();

    let updates = [
        (ApplicationField::Remote, FieldValue::Remote(Remote::OnSite)),
        (ApplicationField::Status, FieldValue::Status(ApplicationStatus::Offered)),
        (ApplicationField::AppliedAt, FieldValue::Date(date)),
        (ApplicationField::InterviewAt, FieldValue::DateTime(interview)),
        (ApplicationField::Location, FieldValue::Text("Sydney".into())),
    ];
    for (field, value) in &updates {
        assert!(ApplicationRepo::update_field(&pool, tracker_id, app.id, *field, value)
            .await
            .unwrap());
    }

    let reloaded = ApplicationRepo::find_by_id(&pool, tracker_id, app.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.remote, Some(Remote::OnSite));
    assert_eq!(reloaded.status, ApplicationStatus::Offered);
    assert_eq!(reloaded.applied_at, Some(date));
    assert_eq!(reloaded.interview_at, Some(interview));
    assert_eq!(reloaded.location.as_deref(), Some("Sydney"));

    for field in [
        ApplicationField::Remote,
        ApplicationField::AppliedAt,
        ApplicationField::InterviewAt,
        ApplicationField::Location,
    ] {
        ApplicationRepo::update_field(&pool, tracker_id, app.id, field, &FieldValue::Null)
            .await
            .unwrap();
    }

    let cleared = ApplicationRepo::find_by_id(&pool, tracker_id, app.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cleared.remote, None);
    assert_eq!(cleared.applied_at, None);
    assert_eq!(cleared.interview_at, None);
    assert_eq!(cleared.location, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_field_wrong_tracker_touches_nothing(pool: PgPool) {
    let owner = Uuid::new_v4();
    let a = seed_tracker(&pool, owner).await;
    let b = seed_tracker(&pool, owner).await;
    let app = ApplicationRepo::create(&pool, a, &new_application("Canva")).await.unwrap();

    let updated = ApplicationRepo::update_field(
        &pool,
        b,
        app.id,
        ApplicationField::Company,
        &FieldValue::Text("Hijacked".into()),
    )
    .await
    .unwrap();
    assert!(!updated);

    let reloaded = ApplicationRepo::find_by_id(&pool, a, app.id).await.unwrap().unwrap();
    assert_eq!(reloaded.company, "Canva");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_negative_salary_rejected_by_schema(pool: PgPool) {
    let tracker_id = seed_tracker(&pool, Uuid::new_v4()).await;
    let app = ApplicationRepo::create(&pool, tracker_id, &new_application("Canva"))
        .await
        .unwrap();

    let result = ApplicationRepo::update_field(
        &pool,
        tracker_id,
        app.id,
        ApplicationField::ExpectedSalary,
        &FieldValue::Integer(-1),
    )
    .await;
    assert!(result.is_err());
}
