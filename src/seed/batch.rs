//! Chunked, sequential inserts and post-insert refetch.

use crate::model::Record;
use crate::seed::context::SeedContext;
use crate::seed::error::SeedError;
use crate::seed::plan::SeedStep;
use crate::seed::progress::{SeedEvent, StepStatus};
use crate::store::{Backend, BackendExt};
use std::collections::HashMap;

/// Insert `records` into their table `ctx.batch_size()` rows at a time.
///
/// The first failing batch aborts the call; batches before it stay
/// persisted. Returns the number of rows inserted.
pub async fn insert_in_batches<B, T>(
    ctx: &SeedContext<'_, B>,
    step: SeedStep,
    records: &[T],
) -> Result<usize, SeedError>
where
    B: Backend + ?Sized,
    T: Record,
{
    let table = T::TABLE;
    if records.is_empty() {
        ctx.progress(step, format!("No {} records to insert", table));
        return Ok(0);
    }

    let batch_size = ctx.batch_size();
    let total_batches = records.len().div_ceil(batch_size);
    let mut inserted = 0;

    for (index, chunk) in records.chunks(batch_size).enumerate() {
        let offset = index * batch_size;
        let rows = chunk
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| SeedError::Serialize { table, source })?;

        if let Err(source) = ctx.backend().insert(table, rows).await {
            ctx.emit(
                SeedEvent::new(
                    step,
                    StepStatus::Failed,
                    format!(
                        "Failed to insert batch starting at offset {} into {}",
                        offset, table
                    ),
                )
                .with_error(&source),
            );
            return Err(SeedError::BatchInsert {
                table,
                offset,
                source,
            });
        }

        inserted += chunk.len();
        ctx.progress(
            step,
            format!(
                "Inserted batch {}/{} into {} ({} rows)",
                index + 1,
                total_batches,
                table,
                chunk.len()
            ),
        );
    }

    Ok(inserted)
}

/// Re-read inserted rows by id, returned in the order of `records`.
pub async fn refetch<B, T>(ctx: &SeedContext<'_, B>, records: &[T]) -> Result<Vec<T>, SeedError>
where
    B: Backend + ?Sized,
    T: Record,
{
    let ids: Vec<String> = records.iter().map(|record| record.id().clone()).collect();
    refetch_by(ctx, "id", ids, |record: &T| record.id().clone()).await
}

/// Re-read rows whose `column` is one of `keys`, ordered like `keys`.
pub async fn refetch_by<B, T, K>(
    ctx: &SeedContext<'_, B>,
    column: &str,
    keys: Vec<String>,
    key_of: K,
) -> Result<Vec<T>, SeedError>
where
    B: Backend + ?Sized,
    T: Record,
    K: Fn(&T) -> String,
{
    if keys.is_empty() {
        return Ok(Vec::new());
    }
    let fetched = ctx
        .backend()
        .fetch_where_in::<T>(column, &keys)
        .await
        .map_err(SeedError::fetch(T::TABLE))?;

    let mut by_key: HashMap<String, T> = fetched
        .into_iter()
        .map(|record| (key_of(&record), record))
        .collect();
    Ok(keys.iter().filter_map(|key| by_key.remove(key)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Supplier, Table};
    use crate::seed::progress::ProgressRecorder;
    use crate::store::MemoryBackend;
    use chrono::Utc;

    fn suppliers(n: usize) -> Vec<Supplier> {
        (0..n)
            .map(|i| Supplier {
                id: format!("s-{}", i),
                name: format!("Supplier {}", i),
                contact_email: format!("s{}@example.com", i),
                phone: None,
                rating: 3,
                created_at: Utc::now(),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_chunks_and_reports_each_batch() {
        let backend = MemoryBackend::new();
        let recorder = ProgressRecorder::new();
        let ctx = SeedContext::new(&backend, &recorder).with_batch_size(50);

        let inserted = insert_in_batches(&ctx, SeedStep::Inventory, &suppliers(120))
            .await
            .unwrap();

        assert_eq!(inserted, 120);
        assert_eq!(backend.insert_calls(Table::Suppliers), 3);
        assert_eq!(
            recorder.messages(),
            vec![
                "Inserted batch 1/3 into suppliers (50 rows)",
                "Inserted batch 2/3 into suppliers (50 rows)",
                "Inserted batch 3/3 into suppliers (20 rows)",
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_input_is_a_reported_no_op() {
        let backend = MemoryBackend::new();
        let recorder = ProgressRecorder::new();
        let ctx = SeedContext::new(&backend, &recorder);

        let inserted = insert_in_batches::<_, Supplier>(&ctx, SeedStep::Inventory, &[])
            .await
            .unwrap();

        assert_eq!(inserted, 0);
        assert_eq!(backend.insert_calls(Table::Suppliers), 0);
        assert_eq!(recorder.messages(), vec!["No suppliers records to insert"]);
    }

    #[tokio::test]
    async fn test_failed_batch_keeps_earlier_batches() {
        let backend = MemoryBackend::new();
        backend.fail_inserts_after(Table::Suppliers, 2);
        let recorder = ProgressRecorder::new();
        let ctx = SeedContext::new(&backend, &recorder).with_batch_size(50);

        let err = insert_in_batches(&ctx, SeedStep::Inventory, &suppliers(160))
            .await
            .unwrap_err();

        match err {
            SeedError::BatchInsert { table, offset, .. } => {
                assert_eq!(table, Table::Suppliers);
                assert_eq!(offset, 100);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(backend.row_count(Table::Suppliers), 100);
        assert_eq!(backend.insert_calls(Table::Suppliers), 3);

        let failed = recorder.with_status(StepStatus::Failed);
        assert_eq!(failed.len(), 1);
        assert!(failed[0].message.contains("offset 100 into suppliers"));
    }

    #[tokio::test]
    async fn test_refetch_preserves_generation_order() {
        let backend = MemoryBackend::new();
        let recorder = ProgressRecorder::new();
        let ctx = SeedContext::new(&backend, &recorder);
        let mut records = suppliers(5);
        insert_in_batches(&ctx, SeedStep::Inventory, &records).await.unwrap();

        records.reverse();
        let fetched = refetch(&ctx, &records).await.unwrap();
        let ids: Vec<&str> = fetched.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["s-4", "s-3", "s-2", "s-1", "s-0"]);
    }
}
