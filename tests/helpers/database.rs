use sqlx::SqlitePool;

use cadence::adapters::sqlite::create_migrated_test_pool;

/// Create an in-memory SQLite database for testing
///
/// Creates a fresh in-memory database with migrations applied.
pub async fn setup_test_db() -> SqlitePool {
    create_migrated_test_pool()
        .await
        .expect("failed to create migrated test pool")
}

/// Close the test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
    pool.close().await;
}
