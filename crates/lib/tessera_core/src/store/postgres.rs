//! PostgreSQL-backed record store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, info};

use super::{RecordStore, StoreError, validate_table_name};
use crate::models::item::{Item, ItemSummary};

/// Items table in PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgRecordStore {
    pool: PgPool,
    table: String,
}

impl PgRecordStore {
    /// Store over `table`. The name is validated, then always quoted.
    pub fn new(pool: PgPool, table: impl Into<String>) -> Result<Self, StoreError> {
        let table = table.into();
        validate_table_name(&table)?;
        Ok(Self { pool, table })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Create the items table if it does not exist yet.
    pub async fn ensure_table(&self) -> Result<(), StoreError> {
        let ddl = format!(
            r#"CREATE TABLE IF NOT EXISTS "{}" (
                item_id     TEXT PRIMARY KEY,
                item_name   TEXT NOT NULL,
                description TEXT,
                created_at  TIMESTAMPTZ NOT NULL,
                user_id     TEXT NOT NULL
            )"#,
            self.table
        );
        sqlx::query(&ddl).execute(&self.pool).await?;
        info!(table = %self.table, "items table ready");
        Ok(())
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn list_all(&self) -> Result<Vec<ItemSummary>, StoreError> {
        let sql = format!(
            r#"SELECT item_id, item_name, description, created_at FROM "{}" ORDER BY created_at, item_id"#,
            self.table
        );
        let rows = sqlx::query_as::<_, (String, String, Option<String>, DateTime<Utc>)>(&sql)
            .fetch_all(&self.pool)
            .await?;
        debug!(table = %self.table, count = rows.len(), "listed items");
        Ok(rows
            .into_iter()
            .map(|(item_id, item_name, description, created_at)| ItemSummary {
                item_id,
                item_name,
                description,
                created_at,
            })
            .collect())
    }

    async fn put(&self, item: &Item) -> Result<(), StoreError> {
        let sql = format!(
            r#"INSERT INTO "{}" (item_id, item_name, description, created_at, user_id)
               VALUES ($1, $2, $3, $4, $5)"#,
            self.table
        );
        let result = sqlx::query(&sql)
            .bind(&item.item_id)
            .bind(&item.item_name)
            .bind(item.description.as_deref())
            .bind(item.created_at)
            .bind(&item.user_id)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(StoreError::Duplicate(item.item_id.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use sqlx::postgres::PgPoolOptions;

    use super::*;
    use crate::models::item::created_at_now;

    #[tokio::test]
    async fn rejects_unsafe_table_name_before_touching_the_pool() {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost:5432/tessera")
            .unwrap();
        let err = PgRecordStore::new(pool, "items; DROP TABLE users").unwrap_err();
        assert!(matches!(err, StoreError::InvalidTable(_)));
    }

    /// Needs a reachable PostgreSQL in `TEST_DATABASE_URL`.
    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn put_then_list_round_trips_through_postgres() {
        let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL");
        let pool = PgPool::connect(&url).await.expect("connect");
        let table = format!("items_test_{}", std::process::id());
        let store = PgRecordStore::new(pool.clone(), &table).unwrap();
        store.ensure_table().await.unwrap();

        assert!(store.list_all().await.unwrap().is_empty());

        let item = Item {
            item_id: "1760519553481".into(),
            item_name: "Widget".into(),
            description: None,
            created_at: created_at_now(),
            user_id: "user-1".into(),
        };
        store.put(&item).await.unwrap();
        assert!(matches!(
            store.put(&item).await,
            Err(StoreError::Duplicate(_))
        ));

        let listed = store.list_all().await.unwrap();
        assert_eq!(listed, vec![ItemSummary::from(item)]);

        sqlx::query(&format!(r#"DROP TABLE "{table}""#))
            .execute(&pool)
            .await
            .unwrap();
    }
}
