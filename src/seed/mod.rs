//! Synthetic data generation: per-domain seeders, the batch insert utility
//! and the orchestrator that runs them in dependency order.

pub mod batch;
pub mod chat;
pub mod context;
pub mod crm;
pub mod data;
pub mod error;
pub mod financials;
pub mod generate;
pub mod hr;
pub mod inventory;
pub mod kanban;
pub mod knowledge;
pub mod maintenance;
pub mod orchestrator;
pub mod org;
pub mod plan;
pub mod progress;
pub mod projects;
pub mod purge;

pub use batch::insert_in_batches;
pub use context::{SeedContext, DEFAULT_BATCH_SIZE};
pub use error::{PlanError, SeedError};
pub use orchestrator::{run_plan, seed_all, seed_chat, seed_only, SeedData, SeedReport};
pub use plan::{PlannedStep, SeedPlan, SeedStep, StepMode};
pub use progress::{LogProgress, ProgressRecorder, ProgressSink, SeedEvent, StepStatus};
pub use purge::{purge_seed_data, PurgeReport};
