//! Exception resolution against the SQLite exception store.

mod helpers;

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use cadence::adapters::sqlite::SqliteExceptionStore;
use cadence::{ExceptionOutcome, ExceptionResolver, ExceptionStore, LeaveDate, SkipDate};

use helpers::database::{setup_test_db, teardown_test_db};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 4).unwrap()
}

#[tokio::test]
async fn no_exception_proceeds_with_original_assignee() {
    let pool = setup_test_db().await;
    let resolver = ExceptionResolver::new(Arc::new(SqliteExceptionStore::new(pool.clone())));

    let definition_id = Uuid::new_v4();
    let assignee = Uuid::new_v4();

    assert!(!resolver.day_skipped(definition_id, day()).await.unwrap());
    let outcome = resolver.resolve_assignee(definition_id, day(), assignee).await.unwrap();
    assert_eq!(outcome, ExceptionOutcome::Proceed(assignee));
    assert_eq!(outcome.final_assignee(), Some(assignee));

    teardown_test_db(pool).await;
}

#[tokio::test]
async fn skip_date_is_scoped_to_its_definition_and_date() {
    let pool = setup_test_db().await;
    let store = SqliteExceptionStore::new(pool.clone());
    let resolver = ExceptionResolver::new(Arc::new(store.clone()));

    let definition_id = Uuid::new_v4();
    store.add_skip(&SkipDate::new(definition_id, day())).await.unwrap();

    assert!(resolver.day_skipped(definition_id, day()).await.unwrap());
    // Other dates and other definitions are unaffected.
    assert!(!resolver.day_skipped(definition_id, day().succ_opt().unwrap()).await.unwrap());
    assert!(!resolver.day_skipped(Uuid::new_v4(), day()).await.unwrap());

    teardown_test_db(pool).await;
}

#[tokio::test]
async fn leave_with_delegate_redirects() {
    let pool = setup_test_db().await;
    let store = SqliteExceptionStore::new(pool.clone());
    let resolver = ExceptionResolver::new(Arc::new(store.clone()));

    let definition_id = Uuid::new_v4();
    let assignee = Uuid::new_v4();
    let delegate = Uuid::new_v4();

    store
        .add_leave(&LeaveDate::new(definition_id, assignee, day()).with_delegate(delegate))
        .await
        .unwrap();

    let outcome = resolver.resolve_assignee(definition_id, day(), assignee).await.unwrap();
    assert_eq!(outcome, ExceptionOutcome::Redirect(delegate));
    assert_eq!(outcome.final_assignee(), Some(delegate));

    teardown_test_db(pool).await;
}

#[tokio::test]
async fn leave_without_delegate_suppresses() {
    let pool = setup_test_db().await;
    let store = SqliteExceptionStore::new(pool.clone());
    let resolver = ExceptionResolver::new(Arc::new(store.clone()));

    let definition_id = Uuid::new_v4();
    let assignee = Uuid::new_v4();

    store.add_leave(&LeaveDate::new(definition_id, assignee, day())).await.unwrap();

    let outcome = resolver.resolve_assignee(definition_id, day(), assignee).await.unwrap();
    assert_eq!(outcome, ExceptionOutcome::Suppress);
    assert_eq!(outcome.final_assignee(), None);

    teardown_test_db(pool).await;
}

#[tokio::test]
async fn delegation_is_single_level() {
    let pool = setup_test_db().await;
    let store = SqliteExceptionStore::new(pool.clone());
    let resolver = ExceptionResolver::new(Arc::new(store.clone()));

    let definition_id = Uuid::new_v4();
    let assignee = Uuid::new_v4();
    let delegate = Uuid::new_v4();

    // The delegate is themselves on leave the same day; the redirect still
    // lands on them without a second hop.
    store
        .add_leave(&LeaveDate::new(definition_id, assignee, day()).with_delegate(delegate))
        .await
        .unwrap();
    store.add_leave(&LeaveDate::new(definition_id, delegate, day())).await.unwrap();

    let outcome = resolver.resolve_assignee(definition_id, day(), assignee).await.unwrap();
    assert_eq!(outcome, ExceptionOutcome::Redirect(delegate));

    teardown_test_db(pool).await;
}

#[tokio::test]
async fn leave_is_scoped_to_the_named_assignee() {
    let pool = setup_test_db().await;
    let store = SqliteExceptionStore::new(pool.clone());
    let resolver = ExceptionResolver::new(Arc::new(store.clone()));

    let definition_id = Uuid::new_v4();
    let on_leave = Uuid::new_v4();
    let colleague = Uuid::new_v4();

    store.add_leave(&LeaveDate::new(definition_id, on_leave, day())).await.unwrap();

    let outcome = resolver.resolve_assignee(definition_id, day(), colleague).await.unwrap();
    assert_eq!(outcome, ExceptionOutcome::Proceed(colleague));

    teardown_test_db(pool).await;
}
