//! Runs a [`SeedPlan`] step by step, threading each step's output to the
//! steps that depend on it.

use crate::config::SeedConfig;
use crate::model::{
    ChatMessage, Company, FocusCenter, Milestone, Personnel, Project, ProjectTask, Record,
    Region, UserProfile,
};
use crate::seed::chat::{seed_chat_groups, seed_chat_messages, SeededChatGroups};
use crate::seed::context::SeedContext;
use crate::seed::crm::{seed_crm, CrmRecords, CrmVolumes};
use crate::seed::error::SeedError;
use crate::seed::financials::{seed_financials, FinancialRecords};
use crate::seed::hr::{seed_hr, HrRecords, HrVolumes};
use crate::seed::inventory::{seed_inventory, InventoryRecords, InventoryVolumes};
use crate::seed::kanban::{seed_kanban, KanbanBoards};
use crate::seed::knowledge::{seed_knowledge_base, KnowledgeBase};
use crate::seed::maintenance::{seed_maintenance, MaintenanceRecords};
use crate::seed::org::{
    load_users, seed_companies, seed_focus_centers, seed_personnel, seed_regions,
};
use crate::seed::plan::{SeedPlan, SeedStep, StepMode};
use crate::seed::progress::{ProgressSink, SeedEvent, StepStatus};
use crate::seed::projects::{seed_milestones, seed_project_tasks, seed_projects};
use crate::store::{Backend, BackendExt, Query};
use itertools::Itertools;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Everything produced or loaded during one run.
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub regions: Vec<Region>,
    pub focus_centers: Vec<FocusCenter>,
    pub companies: Vec<Company>,
    pub personnel: Vec<Personnel>,
    pub users: Vec<UserProfile>,
    pub projects: Vec<Project>,
    pub milestones: Vec<Milestone>,
    pub project_tasks: Vec<ProjectTask>,
    pub financials: FinancialRecords,
    pub chat_groups: SeededChatGroups,
    pub chat_messages: Vec<ChatMessage>,
    pub kanban: KanbanBoards,
    pub knowledge_base: KnowledgeBase,
    pub hr: HrRecords,
    pub inventory: InventoryRecords,
    pub maintenance: MaintenanceRecords,
    pub crm: CrmRecords,
}

impl SeedData {
    /// Rows held for `step`. Multi-table steps count every table.
    pub fn count(&self, step: SeedStep) -> usize {
        match step {
            SeedStep::Regions => self.regions.len(),
            SeedStep::FocusCenters => self.focus_centers.len(),
            SeedStep::Companies => self.companies.len(),
            SeedStep::Personnel => self.personnel.len(),
            SeedStep::Users => self.users.len(),
            SeedStep::Projects => self.projects.len(),
            SeedStep::Milestones => self.milestones.len(),
            SeedStep::ProjectTasks => self.project_tasks.len(),
            SeedStep::Financials => self.financials.len(),
            SeedStep::ChatGroups => self.chat_groups.groups.len(),
            SeedStep::ChatMessages => self.chat_messages.len(),
            SeedStep::Kanban => self.kanban.len(),
            SeedStep::KnowledgeBase => self.knowledge_base.len(),
            SeedStep::Hr => self.hr.len(),
            SeedStep::Inventory => self.inventory.len(),
            SeedStep::Maintenance => self.maintenance.len(),
            SeedStep::Crm => self.crm.len(),
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct SeedReport {
    /// Human-readable status line, e.g. "Seeding complete: 5 regions, ...".
    pub summary: String,
    /// Rows generated per seeded step.
    pub counts: BTreeMap<SeedStep, usize>,
    /// Rows read per loaded step.
    pub loaded: BTreeMap<SeedStep, usize>,
    #[serde(skip)]
    pub data: SeedData,
}

impl SeedReport {
    fn new(
        counts: BTreeMap<SeedStep, usize>,
        loaded: BTreeMap<SeedStep, usize>,
        data: SeedData,
    ) -> Self {
        let mut summary = format!(
            "Seeding complete: {}",
            counts
                .iter()
                .map(|(step, count)| format!("{} {}", count, noun(*step)))
                .join(", ")
        );
        if !loaded.is_empty() {
            summary.push_str(&format!(
                " (loaded {})",
                loaded
                    .iter()
                    .map(|(step, count)| format!("{} {}", count, noun(*step)))
                    .join(", ")
            ));
        }
        Self {
            summary,
            counts,
            loaded,
            data,
        }
    }
}

impl fmt::Display for SeedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary)
    }
}

fn noun(step: SeedStep) -> String {
    match step {
        SeedStep::Financials => "financial records".to_string(),
        SeedStep::Kanban => "kanban records".to_string(),
        SeedStep::KnowledgeBase => "knowledge base records".to_string(),
        SeedStep::Hr => "HR records".to_string(),
        SeedStep::Inventory => "inventory records".to_string(),
        SeedStep::Maintenance => "maintenance records".to_string(),
        SeedStep::Crm => "CRM records".to_string(),
        other => other.label().to_lowercase(),
    }
}

/// A context configured from `config`: batch size and, when set, a fixed RNG seed.
pub fn context_for<'a, B: Backend + ?Sized>(
    backend: &'a B,
    config: &SeedConfig,
    progress: &'a dyn ProgressSink,
) -> SeedContext<'a, B> {
    let ctx = SeedContext::new(backend, progress).with_batch_size(config.batch_size);
    match config.rng_seed {
        Some(seed) => ctx.with_rng_seed(seed),
        None => ctx,
    }
}

/// Seed the complete dataset.
pub async fn seed_all<B: Backend + ?Sized>(
    backend: &B,
    config: &SeedConfig,
    progress: &dyn ProgressSink,
) -> Result<SeedReport, SeedError> {
    let plan = SeedPlan::full()?;
    run_plan(&mut context_for(backend, config, progress), config, &plan).await
}

/// Seed chat groups and messages for the projects and users already stored.
pub async fn seed_chat<B: Backend + ?Sized>(
    backend: &B,
    config: &SeedConfig,
    progress: &dyn ProgressSink,
) -> Result<SeedReport, SeedError> {
    let plan = SeedPlan::chat()?;
    run_plan(&mut context_for(backend, config, progress), config, &plan).await
}

/// Seed only `targets`, loading whatever they depend on.
pub async fn seed_only<B: Backend + ?Sized>(
    backend: &B,
    config: &SeedConfig,
    progress: &dyn ProgressSink,
    targets: &[SeedStep],
) -> Result<SeedReport, SeedError> {
    let plan = SeedPlan::for_targets(targets)?;
    run_plan(&mut context_for(backend, config, progress), config, &plan).await
}

pub async fn run_plan<B: Backend + ?Sized>(
    ctx: &mut SeedContext<'_, B>,
    config: &SeedConfig,
    plan: &SeedPlan,
) -> Result<SeedReport, SeedError> {
    let mut data = SeedData::default();
    let mut counts = BTreeMap::new();
    let mut loaded = BTreeMap::new();

    for planned in plan.steps() {
        let step = planned.step;
        let verb = match planned.mode {
            StepMode::Seed => "Seeding",
            StepMode::Load => "Loading",
        };
        ctx.emit(SeedEvent::new(step, StepStatus::Started, format!("{} {}", verb, step)));

        let outcome = match planned.mode {
            StepMode::Seed => seed_step(ctx, config, step, &mut data).await,
            StepMode::Load => load_step(ctx, config, step, &mut data).await,
        };
        if let Err(err) = outcome {
            ctx.emit(
                SeedEvent::new(step, StepStatus::Failed, format!("{} {} failed", verb, step))
                    .with_error(&err),
            );
            return Err(err);
        }

        let count = data.count(step);
        if count == 0 && step.is_critical() {
            let err = SeedError::EmptyCriticalStep { step };
            ctx.emit(
                SeedEvent::new(
                    step,
                    StepStatus::Failed,
                    format!("No {} available; cannot continue", noun(step)),
                )
                .with_error(&err),
            );
            return Err(err);
        }
        if count == 0 && step.is_soft() {
            ctx.warn(
                step,
                format!(
                    "No {} available; continuing with reduced functionality",
                    noun(step)
                ),
            );
        }

        let done = match planned.mode {
            StepMode::Seed => {
                counts.insert(step, count);
                "Seeded"
            }
            StepMode::Load => {
                loaded.insert(step, count);
                "Loaded"
            }
        };
        ctx.emit(
            SeedEvent::new(
                step,
                StepStatus::Completed,
                format!("{} {} {}", done, count, noun(step)),
            )
            .with_count(count),
        );
    }

    let report = SeedReport::new(counts, loaded, data);
    log::info!("{}", report.summary);
    Ok(report)
}

async fn seed_step<B: Backend + ?Sized>(
    ctx: &mut SeedContext<'_, B>,
    config: &SeedConfig,
    step: SeedStep,
    data: &mut SeedData,
) -> Result<(), SeedError> {
    match step {
        SeedStep::Regions => {
            data.regions = seed_regions(ctx, config.regions).await?;
        }
        SeedStep::FocusCenters => {
            data.focus_centers =
                seed_focus_centers(ctx, config.max_focus_centers_per_region, &data.regions).await?;
        }
        SeedStep::Companies => {
            data.companies = seed_companies(ctx, config.companies).await?;
        }
        SeedStep::Personnel => {
            data.personnel = seed_personnel(ctx, config.personnel).await?;
        }
        SeedStep::Users => {
            data.users = load_users(ctx, config.max_users).await?;
        }
        SeedStep::Projects => {
            data.projects = seed_projects(
                ctx,
                config.projects,
                &data.companies,
                &data.regions,
                &data.focus_centers,
                &data.personnel,
            )
            .await?;
        }
        SeedStep::Milestones => {
            data.milestones =
                seed_milestones(ctx, config.max_milestones_per_project, &data.projects).await?;
        }
        SeedStep::ProjectTasks => {
            data.project_tasks = seed_project_tasks(
                ctx,
                config.max_tasks_per_milestone,
                &data.milestones,
                &data.personnel,
            )
            .await?;
        }
        SeedStep::Financials => {
            data.financials = seed_financials(
                ctx,
                config.forecast_periods_per_project,
                config.max_expenses_per_project,
                &data.projects,
                &data.personnel,
            )
            .await?;
        }
        SeedStep::ChatGroups => {
            data.chat_groups =
                seed_chat_groups(ctx, config.chat_groups, &data.projects, &data.users).await?;
        }
        SeedStep::ChatMessages => {
            data.chat_messages =
                seed_chat_messages(ctx, config.max_messages_per_group, &data.chat_groups).await?;
        }
        SeedStep::Kanban => {
            data.kanban = seed_kanban(
                ctx,
                config.max_kanban_tasks_per_column,
                &data.projects,
                &data.personnel,
            )
            .await?;
        }
        SeedStep::KnowledgeBase => {
            data.knowledge_base = seed_knowledge_base(
                ctx,
                config.kb_categories,
                config.max_articles_per_category,
                &data.personnel,
            )
            .await?;
        }
        SeedStep::Hr => {
            let volumes = HrVolumes {
                max_leave_requests: config.max_leave_requests,
                payroll_months: config.payroll_months,
                max_benefits: config.max_benefits,
                max_documents: config.max_hr_documents,
            };
            data.hr = seed_hr(ctx, volumes, &data.personnel).await?;
        }
        SeedStep::Inventory => {
            let volumes = InventoryVolumes {
                suppliers: config.suppliers,
                items: config.inventory_items,
                max_orders_per_item: config.max_orders_per_item,
            };
            data.inventory = seed_inventory(ctx, volumes, &data.personnel).await?;
        }
        SeedStep::Maintenance => {
            data.maintenance = seed_maintenance(
                ctx,
                config.equipment,
                config.max_work_orders,
                &data.regions,
                &data.personnel,
            )
            .await?;
        }
        SeedStep::Crm => {
            let volumes = CrmVolumes {
                companies: config.crm_companies,
                max_contacts_per_company: config.max_contacts_per_company,
                max_deals_per_company: config.max_deals_per_company,
                max_logs_per_contact: config.max_logs_per_contact,
            };
            data.crm = seed_crm(ctx, volumes, &data.personnel).await?;
        }
    }
    Ok(())
}

async fn load<B: Backend + ?Sized, T: Record>(
    ctx: &SeedContext<'_, B>,
    limit: usize,
) -> Result<Vec<T>, SeedError> {
    ctx.backend()
        .fetch::<T>(Query::all().order_by("id").limit(limit))
        .await
        .map_err(SeedError::fetch(T::TABLE))
}

/// Read existing rows for `step` so seeded dependents have parents.
async fn load_step<B: Backend + ?Sized>(
    ctx: &mut SeedContext<'_, B>,
    config: &SeedConfig,
    step: SeedStep,
    data: &mut SeedData,
) -> Result<(), SeedError> {
    let limit = config.load_limit;
    match step {
        SeedStep::Regions => data.regions = load(ctx, limit).await?,
        SeedStep::FocusCenters => data.focus_centers = load(ctx, limit).await?,
        SeedStep::Companies => data.companies = load(ctx, limit).await?,
        SeedStep::Personnel => data.personnel = load(ctx, limit).await?,
        SeedStep::Users => data.users = load_users(ctx, config.max_users).await?,
        SeedStep::Projects => data.projects = load(ctx, limit).await?,
        SeedStep::Milestones => data.milestones = load(ctx, limit).await?,
        SeedStep::ProjectTasks => data.project_tasks = load(ctx, limit).await?,
        SeedStep::Financials => {
            data.financials = FinancialRecords {
                forecasts: load(ctx, limit).await?,
                expenses: load(ctx, limit).await?,
            }
        }
        SeedStep::ChatGroups => {
            data.chat_groups = SeededChatGroups {
                groups: load(ctx, limit).await?,
                members: load(ctx, limit).await?,
            }
        }
        SeedStep::ChatMessages => data.chat_messages = load(ctx, limit).await?,
        SeedStep::Kanban => {
            data.kanban = KanbanBoards {
                columns: load(ctx, limit).await?,
                tasks: load(ctx, limit).await?,
            }
        }
        SeedStep::KnowledgeBase => {
            data.knowledge_base = KnowledgeBase {
                categories: load(ctx, limit).await?,
                articles: load(ctx, limit).await?,
            }
        }
        SeedStep::Hr => {
            data.hr = HrRecords {
                leave_requests: load(ctx, limit).await?,
                payroll: load(ctx, limit).await?,
                benefits: load(ctx, limit).await?,
                reviews: load(ctx, limit).await?,
                documents: load(ctx, limit).await?,
            }
        }
        SeedStep::Inventory => {
            data.inventory = InventoryRecords {
                suppliers: load(ctx, limit).await?,
                items: load(ctx, limit).await?,
                purchase_orders: load(ctx, limit).await?,
            }
        }
        SeedStep::Maintenance => {
            data.maintenance = MaintenanceRecords {
                equipment: load(ctx, limit).await?,
                work_orders: load(ctx, limit).await?,
            }
        }
        SeedStep::Crm => {
            data.crm = CrmRecords {
                companies: load(ctx, limit).await?,
                contacts: load(ctx, limit).await?,
                deals: load(ctx, limit).await?,
                communication_logs: load(ctx, limit).await?,
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Table;
    use crate::seed::progress::ProgressRecorder;
    use crate::store::MemoryBackend;

    fn small_config() -> SeedConfig {
        SeedConfig {
            rng_seed: Some(42),
            regions: 3,
            companies: 4,
            personnel: 6,
            projects: 5,
            chat_groups: 3,
            ..SeedConfig::default()
        }
    }

    #[tokio::test]
    async fn test_full_run_reports_every_seeded_step() {
        let backend = MemoryBackend::new();
        let recorder = ProgressRecorder::new();

        let report = seed_all(&backend, &small_config(), &recorder).await.unwrap();

        assert_eq!(report.counts.len(), SeedStep::ALL.len() - 1);
        assert_eq!(report.loaded.get(&SeedStep::Users), Some(&0));
        assert_eq!(report.counts[&SeedStep::Regions], 3);
        assert!(report.summary.starts_with("Seeding complete: 3 regions"));
        assert_eq!(backend.row_count(Table::Regions), 3);
        assert_eq!(
            recorder.with_status(StepStatus::Started).len(),
            SeedStep::ALL.len()
        );
    }

    #[tokio::test]
    async fn test_empty_companies_abort_the_run() {
        let backend = MemoryBackend::new();
        let recorder = ProgressRecorder::new();
        let config = SeedConfig {
            companies: 0,
            ..small_config()
        };

        let err = seed_all(&backend, &config, &recorder).await.unwrap_err();

        assert!(matches!(
            err,
            SeedError::EmptyCriticalStep {
                step: SeedStep::Companies
            }
        ));
        // Regions ran before the failure and stay persisted.
        assert_eq!(backend.row_count(Table::Regions), 3);
        assert_eq!(backend.row_count(Table::Projects), 0);
        assert_eq!(recorder.with_status(StepStatus::Failed).len(), 1);
    }

    #[tokio::test]
    async fn test_missing_users_only_warn() {
        let backend = MemoryBackend::new();
        let recorder = ProgressRecorder::new();

        seed_all(&backend, &small_config(), &recorder).await.unwrap();

        let warnings = recorder.for_step(SeedStep::Users);
        assert!(warnings
            .iter()
            .any(|event| event.message.contains("continuing with reduced functionality")));
    }
}
