use sqlx::PgPool;

/// Primary keys are `BIGINT` identities; handlers and tokens carry them as `i64`.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_pks_are_bigint(pool: PgPool) {
    let offenders: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, data_type
         FROM information_schema.columns
         WHERE column_name = 'id'
           AND table_schema = 'public'
           AND table_name != '_sqlx_migrations'
           AND data_type != 'bigint'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(offenders.is_empty(), "Non-bigint primary keys: {offenders:?}");
}

/// `created_at` and `updated_at` exist on every table as `timestamptz`.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_tables_have_timestamps(pool: PgPool) {
    let missing: Vec<(String, String)> = sqlx::query_as(
        "SELECT t.table_name, c.name
         FROM information_schema.tables t
         CROSS JOIN (VALUES ('created_at'), ('updated_at')) AS c(name)
         WHERE t.table_schema = 'public'
           AND t.table_type = 'BASE TABLE'
           AND t.table_name != '_sqlx_migrations'
           AND NOT EXISTS (
               SELECT 1 FROM information_schema.columns col
               WHERE col.table_schema = 'public'
                 AND col.table_name = t.table_name
                 AND col.column_name = c.name
                 AND col.data_type = 'timestamp with time zone'
           )
         ORDER BY t.table_name, c.name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(missing.is_empty(), "Missing or mistyped timestamps: {missing:?}");
}

/// Every amount column holds money as `NUMERIC(12,2)`.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_amount_columns_are_numeric_cents(pool: PgPool) {
    let rows: Vec<(String, String, String, Option<i32>, Option<i32>)> = sqlx::query_as(
        "SELECT table_name, column_name, data_type,
                numeric_precision::int4, numeric_scale::int4
         FROM information_schema.columns
         WHERE table_schema = 'public'
           AND column_name LIKE '%amount'
         ORDER BY table_name, column_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!rows.is_empty());
    for (table, column, data_type, precision, scale) in &rows {
        assert_eq!(data_type, "numeric", "{table}.{column} should be numeric");
        assert_eq!(
            (*precision, *scale),
            (Some(12), Some(2)),
            "{table}.{column} should be NUMERIC(12,2)"
        );
    }
}

/// Every table carries the `set_updated_at` trigger.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_tables_have_updated_at_trigger(pool: PgPool) {
    let missing: Vec<(String,)> = sqlx::query_as(
        "SELECT t.table_name
         FROM information_schema.tables t
         WHERE t.table_schema = 'public'
           AND t.table_type = 'BASE TABLE'
           AND t.table_name != '_sqlx_migrations'
           AND NOT EXISTS (
               SELECT 1 FROM information_schema.triggers tr
               WHERE tr.event_object_table = t.table_name
                 AND tr.trigger_name = 'set_updated_at'
           )
         ORDER BY t.table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(missing.is_empty(), "Tables without set_updated_at: {missing:?}");
}

/// Money columns are exact numerics, never floating point.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_no_float_columns(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, column_name
         FROM information_schema.columns
         WHERE table_schema = 'public'
           AND data_type IN ('real', 'double precision')
         ORDER BY table_name, column_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(rows.is_empty(), "Found floating point columns: {rows:?}");
}
