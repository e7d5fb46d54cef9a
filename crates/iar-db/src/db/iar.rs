use async_trait::async_trait;
use iar_core::{AppError, NormalizedRecord, DESTINATION_COLUMNS};
use sqlx::{PgConnection, Postgres, QueryBuilder};
use std::sync::Arc;

use super::pool::SharedPool;

/// PostgreSQL accepts at most 65535 bind parameters per statement; each row binds one per
/// destination column.
pub const MAX_ROWS_PER_STATEMENT: usize = 65_535 / DESTINATION_COLUMNS.len();

/// Destination operations used by the HTTP handlers.
#[async_trait]
pub trait IarRepository: Send + Sync {
    /// Minimal round trip proving the destination is reachable and accepts our credentials.
    async fn ping(&self) -> Result<(), AppError>;

    /// Insert every record or none of them. Returns the number of rows written.
    async fn bulk_insert(&self, records: &[NormalizedRecord]) -> Result<u64, AppError>;
}

/// Repository for the IAR monitoring table
#[derive(Clone)]
pub struct PgIarRepository {
    pool: Arc<SharedPool>,
    table: String,
}

impl PgIarRepository {
    pub fn new(pool: Arc<SharedPool>, table: impl Into<String>) -> Self {
        Self {
            pool,
            table: table.into(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    async fn insert_chunks(
        &self,
        conn: &mut PgConnection,
        records: &[NormalizedRecord],
    ) -> Result<u64, AppError> {
        let mut inserted = 0;
        for chunk in records.chunks(MAX_ROWS_PER_STATEMENT) {
            let result = insert_statement(&self.table, chunk)
                .build()
                .execute(&mut *conn)
                .await?;
            inserted += result.rows_affected();
        }
        Ok(inserted)
    }
}

#[async_trait]
impl IarRepository for PgIarRepository {
    #[tracing::instrument(skip(self), fields(db.operation = "select"))]
    async fn ping(&self) -> Result<(), AppError> {
        let pool = self.pool.get().await?;
        sqlx::query("SELECT 1 AS ok").execute(pool).await?;
        Ok(())
    }

    #[tracing::instrument(
        skip(self, records),
        fields(db.table = %self.table, db.operation = "insert", rows = records.len())
    )]
    async fn bulk_insert(&self, records: &[NormalizedRecord]) -> Result<u64, AppError> {
        if records.is_empty() {
            return Ok(0);
        }

        let pool = self.pool.get().await?;
        let mut tx = pool.begin().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to begin transaction");
            AppError::Database(e)
        })?;

        match self.insert_chunks(&mut tx, records).await {
            Ok(inserted) => {
                tx.commit().await.map_err(|e| {
                    tracing::error!(error = %e, "Failed to commit transaction");
                    AppError::Database(e)
                })?;
                tracing::info!(inserted, "Bulk insert committed");
                Ok(inserted)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!(
                        error = %rollback_err,
                        original_error = %e,
                        "Failed to rollback transaction"
                    );
                }
                Err(e)
            }
        }
    }
}

/// Multi-row INSERT for one chunk. Date columns are bound as text and cast by the server.
fn insert_statement<'a>(table: &str, records: &'a [NormalizedRecord]) -> QueryBuilder<'a, Postgres> {
    let mut builder = QueryBuilder::new(format!(
        "INSERT INTO {} ({}) ",
        table,
        DESTINATION_COLUMNS.join(", ")
    ));

    builder.push_values(records, |mut row, record| {
        row.push_bind(record.purchase_order_no.as_deref())
            .push_bind(record.date_of_delivery.as_deref())
            .push_unseparated("::date")
            .push_bind(record.date_of_preparation_of_iar.as_deref())
            .push_unseparated("::date")
            .push_bind(record.prepared_by.as_deref())
            .push_bind(record.iar_no.as_deref())
            .push_bind(record.particulars.as_deref())
            .push_bind(record.iar_amount)
            .push_bind(record.timeline_10wd.as_deref())
            .push_bind(record.supplier_name.as_deref())
            .push_bind(record.delivery_status.as_deref());
    });

    builder
}
