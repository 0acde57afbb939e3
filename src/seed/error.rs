use crate::model::Table;
use crate::seed::plan::SeedStep;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("seed steps form a dependency cycle: {0:?}")]
    Cycle(Vec<SeedStep>),
    #[error("no seed steps selected")]
    Empty,
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("{step} produced no records; aborting seed run")]
    EmptyCriticalStep { step: SeedStep },

    #[error("insert into {table} failed at batch starting at offset {offset}: {source:#}")]
    BatchInsert {
        table: Table,
        offset: usize,
        #[source]
        source: anyhow::Error,
    },

    #[error("fetching {table} failed: {source:#}")]
    Fetch {
        table: Table,
        #[source]
        source: anyhow::Error,
    },

    #[error("deleting from {table} failed: {source:#}")]
    Delete {
        table: Table,
        #[source]
        source: anyhow::Error,
    },

    #[error("could not encode {table} record: {source}")]
    Serialize {
        table: Table,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Plan(#[from] PlanError),
}

impl SeedError {
    pub fn fetch(table: Table) -> impl FnOnce(anyhow::Error) -> SeedError {
        move |source| SeedError::Fetch { table, source }
    }
}
