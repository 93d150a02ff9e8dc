use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    // Health check
    plinth_db::health_check(&pool).await.unwrap();

    // Verify all core tables exist and start empty
    let tables = [
        "users",
        "user_sessions",
        "artists",
        "registrations",
        "entries",
        "images",
        "payments",
        "events",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// The updated_at trigger must fire on every update.
#[sqlx::test(migrations = "./migrations")]
async fn test_updated_at_trigger_fires(pool: PgPool) {
    let before: (i64, chrono::DateTime<chrono::Utc>) = sqlx::query_as(
        "INSERT INTO users (email, password_hash) VALUES ('t@example.com', 'x')
         RETURNING id, updated_at",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    // NOW() is fixed per transaction; separate statements get distinct values.
    let after: (chrono::DateTime<chrono::Utc>,) = sqlx::query_as(
        "UPDATE users SET email = 't2@example.com' WHERE id = $1 RETURNING updated_at",
    )
    .bind(before.0)
    .fetch_one(&pool)
    .await
    .unwrap();

    assert!(after.0 >= before.1, "updated_at should move forward");
}
