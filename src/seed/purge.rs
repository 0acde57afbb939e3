//! Removes everything the seed pipeline writes. Administrative only: a seed
//! run itself never deletes.

use crate::model::Table;
use crate::seed::error::SeedError;
use crate::seed::plan::{SeedPlan, SeedStep};
use crate::seed::progress::{ProgressSink, SeedEvent, StepStatus};
use crate::store::Backend;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct PurgeReport {
    /// Deleted row counts, in deletion order.
    pub deleted: Vec<(Table, u64)>,
}

impl PurgeReport {
    pub fn total(&self) -> u64 {
        self.deleted.iter().map(|(_, count)| count).sum()
    }
}

/// Tables in an order that never deletes a parent before its children.
pub fn purge_order() -> Result<Vec<(SeedStep, Table)>, SeedError> {
    let plan = SeedPlan::full()?;
    Ok(plan
        .steps()
        .iter()
        .rev()
        .flat_map(|planned| {
            planned
                .step
                .tables()
                .iter()
                .rev()
                .map(move |table| (planned.step, *table))
        })
        .collect())
}

pub async fn purge_seed_data<B: Backend + ?Sized>(
    backend: &B,
    progress: &dyn ProgressSink,
) -> Result<PurgeReport, SeedError> {
    let mut report = PurgeReport::default();
    for (step, table) in purge_order()? {
        let deleted = match backend.delete(table, None).await {
            Ok(deleted) => deleted,
            Err(source) => {
                progress.emit(
                    &SeedEvent::new(step, StepStatus::Failed, format!("Failed to delete {}", table))
                        .with_error(&source),
                );
                return Err(SeedError::Delete { table, source });
            }
        };
        progress.emit(
            &SeedEvent::new(
                step,
                StepStatus::Progress,
                format!("Deleted {} rows from {}", deleted, table),
            )
            .with_count(deleted as usize),
        );
        report.deleted.push((table, deleted));
    }
    log::info!("Purged {} seeded rows", report.total());
    Ok(report)
}
