//! Database initialization and migration tests.

use tempfile::TempDir;

use cadence::adapters::sqlite::{
    create_migrated_test_pool, initialize_database, verify_connection, Migrator,
};

#[tokio::test]
async fn initialize_database_creates_file_and_applies_migrations() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let db_path = dir.path().join("cadence.db");
    let database_url = format!("sqlite:{}", db_path.display());

    let pool = initialize_database(&database_url).await.expect("init failed");

    assert!(db_path.exists());
    verify_connection(&pool).await.expect("connection check failed");

    let migrator = Migrator::new(pool.clone());
    assert_eq!(migrator.get_current_version().await.unwrap(), 1);

    pool.close().await;
}

#[tokio::test]
async fn initialize_database_is_rerunnable() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let database_url = format!("sqlite:{}", dir.path().join("cadence.db").display());

    let first = initialize_database(&database_url).await.expect("first init failed");
    first.close().await;

    // Re-running against an existing database applies nothing new.
    let second = initialize_database(&database_url).await.expect("second init failed");
    let migrator = Migrator::new(second.clone());
    assert_eq!(migrator.get_current_version().await.unwrap(), 1);
    second.close().await;
}

#[tokio::test]
async fn migrated_test_pool_has_all_tables() {
    let pool = create_migrated_test_pool().await.expect("test pool failed");

    for table in ["personnel", "task_definitions", "skip_dates", "leave_dates", "task_instances", "notifications"] {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?"
        )
        .bind(table)
        .fetch_optional(&pool)
        .await
        .expect("schema query failed");
        assert!(row.is_some(), "missing table {}", table);
    }

    pool.close().await;
}
