//! Seed step dependency graph.
//!
//! Every step declares the steps whose output it consumes. Plans are the
//! topological order of that graph; a cycle is rejected when the plan is
//! built, before anything touches the store.

use crate::model::Table;
use crate::seed::error::PlanError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum SeedStep {
    Regions,
    FocusCenters,
    Companies,
    Personnel,
    Users,
    Projects,
    Milestones,
    ProjectTasks,
    Financials,
    ChatGroups,
    ChatMessages,
    Kanban,
    KnowledgeBase,
    Hr,
    Inventory,
    Maintenance,
    Crm,
}

impl SeedStep {
    /// Declaration order; also the tie-break order of every plan.
    pub const ALL: [SeedStep; 17] = [
        SeedStep::Regions,
        SeedStep::FocusCenters,
        SeedStep::Companies,
        SeedStep::Personnel,
        SeedStep::Users,
        SeedStep::Projects,
        SeedStep::Milestones,
        SeedStep::ProjectTasks,
        SeedStep::Financials,
        SeedStep::ChatGroups,
        SeedStep::ChatMessages,
        SeedStep::Kanban,
        SeedStep::KnowledgeBase,
        SeedStep::Hr,
        SeedStep::Inventory,
        SeedStep::Maintenance,
        SeedStep::Crm,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SeedStep::Regions => "Regions",
            SeedStep::FocusCenters => "Focus Centers",
            SeedStep::Companies => "Companies",
            SeedStep::Personnel => "Personnel",
            SeedStep::Users => "Users",
            SeedStep::Projects => "Projects",
            SeedStep::Milestones => "Milestones",
            SeedStep::ProjectTasks => "Project Tasks",
            SeedStep::Financials => "Financials",
            SeedStep::ChatGroups => "Chat Groups",
            SeedStep::ChatMessages => "Chat Messages",
            SeedStep::Kanban => "Kanban",
            SeedStep::KnowledgeBase => "Knowledge Base",
            SeedStep::Hr => "HR",
            SeedStep::Inventory => "Inventory",
            SeedStep::Maintenance => "Maintenance",
            SeedStep::Crm => "CRM",
        }
    }

    pub fn dependencies(&self) -> &'static [SeedStep] {
        use SeedStep::*;
        match self {
            Regions | Companies | Personnel | Users => &[],
            FocusCenters => &[Regions],
            Projects => &[Companies, Regions, FocusCenters, Personnel],
            Milestones => &[Projects],
            ProjectTasks => &[Milestones, Personnel],
            Financials => &[Projects, Personnel],
            ChatGroups => &[Projects, Users],
            ChatMessages => &[ChatGroups],
            Kanban => &[Projects, Personnel],
            KnowledgeBase | Hr | Inventory | Crm => &[Personnel],
            Maintenance => &[Regions, Personnel],
        }
    }

    /// An empty result from a critical step aborts the run.
    pub fn is_critical(&self) -> bool {
        matches!(self, SeedStep::Regions | SeedStep::Companies)
    }

    /// An empty result from a soft step only degrades later steps.
    pub fn is_soft(&self) -> bool {
        matches!(self, SeedStep::Personnel | SeedStep::Users)
    }

    /// Steps that only read existing rows, even in a full run.
    pub fn is_load_only(&self) -> bool {
        matches!(self, SeedStep::Users)
    }

    /// Tables written by this step, parents before children.
    pub fn tables(&self) -> &'static [Table] {
        match self {
            SeedStep::Regions => &[Table::Regions],
            SeedStep::FocusCenters => &[Table::FocusCenters],
            SeedStep::Companies => &[Table::Companies],
            SeedStep::Personnel => &[Table::Personnel],
            SeedStep::Users => &[],
            SeedStep::Projects => &[Table::Projects],
            SeedStep::Milestones => &[Table::Milestones],
            SeedStep::ProjectTasks => &[Table::ProjectTasks],
            SeedStep::Financials => &[Table::ProjectForecasts, Table::ProjectExpenses],
            SeedStep::ChatGroups => &[Table::ChatGroups, Table::ChatGroupMembers],
            SeedStep::ChatMessages => &[Table::ChatMessages],
            SeedStep::Kanban => &[Table::KanbanColumns, Table::KanbanTasks],
            SeedStep::KnowledgeBase => &[Table::KbCategories, Table::KbArticles],
            SeedStep::Hr => &[
                Table::HrLeaveRequests,
                Table::HrPayroll,
                Table::HrBenefits,
                Table::HrPerformanceReviews,
                Table::HrDocuments,
            ],
            SeedStep::Inventory => &[
                Table::Suppliers,
                Table::InventoryItems,
                Table::PurchaseOrders,
            ],
            SeedStep::Maintenance => &[Table::Equipment, Table::WorkOrders],
            SeedStep::Crm => &[
                Table::CrmCompanies,
                Table::CrmContacts,
                Table::CrmDeals,
                Table::CrmCommunicationLogs,
            ],
        }
    }
}

impl fmt::Display for SeedStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepMode {
    /// Generate and insert new rows.
    Seed,
    /// Read existing rows so dependents have parents to reference.
    Load,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlannedStep {
    pub step: SeedStep,
    pub mode: StepMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedPlan {
    steps: Vec<PlannedStep>,
}

impl SeedPlan {
    /// Every step, seeded in dependency order.
    pub fn full() -> Result<Self, PlanError> {
        Self::for_targets(&SeedStep::ALL)
    }

    /// Chat groups and messages on top of existing projects and users.
    pub fn chat() -> Result<Self, PlanError> {
        Self::for_targets(&[SeedStep::ChatGroups, SeedStep::ChatMessages])
    }

    /// Seed `targets`; their direct dependencies outside the target set are
    /// loaded from the store instead.
    pub fn for_targets(targets: &[SeedStep]) -> Result<Self, PlanError> {
        if targets.is_empty() {
            return Err(PlanError::Empty);
        }
        let targets: HashSet<SeedStep> = targets.iter().copied().collect();
        let mut selected: HashSet<SeedStep> = targets.clone();
        for step in &targets {
            selected.extend(step.dependencies().iter().copied());
        }

        let nodes: Vec<SeedStep> = SeedStep::ALL
            .iter()
            .copied()
            .filter(|step| selected.contains(step))
            .collect();
        let ordered = topological_order(&nodes, |step| step.dependencies().to_vec())
            .map_err(PlanError::Cycle)?;

        let steps = ordered
            .into_iter()
            .map(|step| PlannedStep {
                step,
                mode: if targets.contains(&step) && !step.is_load_only() {
                    StepMode::Seed
                } else {
                    StepMode::Load
                },
            })
            .collect();
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[PlannedStep] {
        &self.steps
    }

    pub fn seeded_steps(&self) -> impl Iterator<Item = SeedStep> + '_ {
        self.steps
            .iter()
            .filter(|planned| planned.mode == StepMode::Seed)
            .map(|planned| planned.step)
    }
}

/// Kahn's algorithm over `nodes`; dependencies outside `nodes` are ignored.
/// Ready nodes are emitted in their input order so plans are deterministic.
/// On a cycle, returns the nodes that could not be ordered.
pub fn topological_order<T, F>(nodes: &[T], dependencies: F) -> Result<Vec<T>, Vec<T>>
where
    T: Copy + Eq + Hash,
    F: Fn(T) -> Vec<T>,
{
    let members: HashSet<T> = nodes.iter().copied().collect();
    let deps: Vec<Vec<T>> = nodes
        .iter()
        .map(|node| {
            dependencies(*node)
                .into_iter()
                .filter(|dep| members.contains(dep) && dep != node)
                .collect()
        })
        .collect();

    let mut emitted: HashSet<T> = HashSet::new();
    let mut order = Vec::with_capacity(nodes.len());

    while order.len() < nodes.len() {
        let ready = nodes.iter().enumerate().find(|(index, node)| {
            !emitted.contains(*node) && deps[*index].iter().all(|dep| emitted.contains(dep))
        });
        match ready {
            Some((_, node)) => {
                emitted.insert(*node);
                order.push(*node);
            }
            None => {
                let stuck = nodes
                    .iter()
                    .copied()
                    .filter(|node| !emitted.contains(node))
                    .collect();
                return Err(stuck);
            }
        }
    }
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(plan: &SeedPlan, step: SeedStep) -> usize {
        plan.steps()
            .iter()
            .position(|planned| planned.step == step)
            .unwrap()
    }

    #[test]
    fn test_full_plan_respects_every_dependency() {
        let plan = SeedPlan::full().unwrap();
        assert_eq!(plan.steps().len(), SeedStep::ALL.len());

        for planned in plan.steps() {
            for dep in planned.step.dependencies() {
                assert!(
                    position(&plan, *dep) < position(&plan, planned.step),
                    "{} must run before {}",
                    dep,
                    planned.step
                );
            }
        }
        assert_eq!(plan.steps()[0].step, SeedStep::Regions);
    }

    #[test]
    fn test_users_are_always_loaded() {
        let plan = SeedPlan::full().unwrap();
        let users = plan.steps()[position(&plan, SeedStep::Users)];
        assert_eq!(users.mode, StepMode::Load);
        assert!(!plan.seeded_steps().any(|step| step == SeedStep::Users));
    }

    #[test]
    fn test_chat_plan_loads_direct_parents_only() {
        let plan = SeedPlan::chat().unwrap();
        let steps: Vec<(SeedStep, StepMode)> = plan
            .steps()
            .iter()
            .map(|planned| (planned.step, planned.mode))
            .collect();

        assert_eq!(
            steps,
            vec![
                (SeedStep::Users, StepMode::Load),
                (SeedStep::Projects, StepMode::Load),
                (SeedStep::ChatGroups, StepMode::Seed),
                (SeedStep::ChatMessages, StepMode::Seed),
            ]
        );
    }

    #[test]
    fn test_empty_target_list_is_rejected() {
        assert!(matches!(SeedPlan::for_targets(&[]), Err(PlanError::Empty)));
    }

    #[test]
    fn test_topological_order_detects_cycle() {
        // a -> b -> c -> a, d independent
        let deps = |node: char| match node {
            'a' => vec!['c'],
            'b' => vec!['a'],
            'c' => vec!['b'],
            _ => vec![],
        };
        let err = topological_order(&['a', 'b', 'c', 'd'], deps).unwrap_err();
        assert_eq!(err, vec!['a', 'b', 'c']);
    }

    #[test]
    fn test_topological_order_keeps_input_order_for_ties() {
        let deps = |node: u8| if node == 1 { vec![3] } else { vec![] };
        let order = topological_order(&[1, 2, 3, 4], deps).unwrap();
        assert_eq!(order, vec![2, 3, 1, 4]);
    }
}
