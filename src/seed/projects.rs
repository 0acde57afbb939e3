//! Projects and their milestone/task hierarchy.

use crate::model::{
    generate_id, Company, FocusCenter, Milestone, MilestoneStatus, Personnel, Priority, Project,
    ProjectStatus, ProjectTask, Region, TaskStatus,
};
use crate::seed::batch::{insert_in_batches, refetch};
use crate::seed::context::SeedContext;
use crate::seed::data::{
    MILESTONE_PHASES, PROJECT_ADJECTIVES, PROJECT_NOUNS, TASK_OBJECTS, TASK_VERBS,
};
use crate::seed::error::SeedError;
use crate::seed::generate::{count_up_to, money, parent_window, pick, word, DateWindow};
use crate::seed::plan::SeedStep;
use crate::store::Backend;
use chrono::{Duration, NaiveDate};
use rand::Rng;

const PRIORITIES: [Priority; 4] = [
    Priority::Low,
    Priority::Medium,
    Priority::High,
    Priority::Critical,
];

fn project_status(window: DateWindow, today: NaiveDate, on_hold: bool) -> ProjectStatus {
    if window.end < today {
        ProjectStatus::Completed
    } else if window.start > today {
        ProjectStatus::Planning
    } else if on_hold {
        ProjectStatus::OnHold
    } else {
        ProjectStatus::Active
    }
}

fn milestone_status(window: DateWindow, today: NaiveDate) -> MilestoneStatus {
    if window.end < today {
        MilestoneStatus::Completed
    } else if window.start <= today {
        MilestoneStatus::InProgress
    } else {
        MilestoneStatus::Pending
    }
}

/// Projects spread over companies and regions, each in a focus center of its
/// own region when that region has one.
pub async fn seed_projects<B: Backend + ?Sized>(
    ctx: &mut SeedContext<'_, B>,
    count: usize,
    companies: &[Company],
    regions: &[Region],
    focus_centers: &[FocusCenter],
    personnel: &[Personnel],
) -> Result<Vec<Project>, SeedError> {
    let step = SeedStep::Projects;
    if companies.is_empty() {
        ctx.skip(step, "companies");
        return Ok(Vec::new());
    }
    if regions.is_empty() {
        ctx.skip(step, "regions");
        return Ok(Vec::new());
    }
    if focus_centers.is_empty() {
        ctx.skip(step, "focus centers");
        return Ok(Vec::new());
    }
    if personnel.is_empty() {
        ctx.warn(step, "No personnel available; projects will have no manager");
    }

    let (now, today) = (ctx.now(), ctx.today());
    let mut projects = Vec::with_capacity(count);
    for _ in 0..count {
        let rng = ctx.rng();
        let (Some(company), Some(region)) = (pick(rng, companies), pick(rng, regions)) else {
            break;
        };
        let in_region: Vec<&FocusCenter> = focus_centers
            .iter()
            .filter(|center| center.region_id == region.id)
            .collect();
        let focus_center = match pick(rng, &in_region) {
            Some(center) => *center,
            None => &focus_centers[rng.gen_range(0..focus_centers.len())],
        };

        let start = today + Duration::days(rng.gen_range(-240..=60));
        let end = start + Duration::days(rng.gen_range(90..=540));
        let window = DateWindow { start, end };
        let name = format!(
            "{} {}",
            word(rng, PROJECT_ADJECTIVES),
            word(rng, PROJECT_NOUNS)
        );

        projects.push(Project {
            id: generate_id(),
            description: Some(format!("{} for {} in {}", name, company.name, region.name)),
            name,
            company_id: company.id.clone(),
            region_id: region.id.clone(),
            focus_center_id: focus_center.id.clone(),
            manager_id: pick(rng, personnel).map(|person| person.id.clone()),
            status: project_status(window, today, rng.gen_bool(0.1)),
            startdate: start,
            enddate: end,
            budget: money(rng, 50_000.0, 2_500_000.0),
            created_at: now,
        });
    }

    insert_in_batches(ctx, step, &projects).await?;
    refetch(ctx, &projects).await
}

/// Up to `per_project` milestones per project, each inside its project's dates.
pub async fn seed_milestones<B: Backend + ?Sized>(
    ctx: &mut SeedContext<'_, B>,
    per_project: usize,
    projects: &[Project],
) -> Result<Vec<Milestone>, SeedError> {
    let step = SeedStep::Milestones;
    if projects.is_empty() {
        ctx.skip(step, "projects");
        return Ok(Vec::new());
    }

    let (now, today) = (ctx.now(), ctx.today());
    let mut milestones = Vec::new();
    for project in projects {
        let window = parent_window(
            ctx,
            step,
            "Project",
            &project.id,
            project.startdate,
            project.enddate,
        );
        let rng = ctx.rng();
        let n = count_up_to(rng, per_project);

        let mut spans: Vec<DateWindow> = (0..n).map(|_| window.sample_window(rng)).collect();
        spans.sort_by_key(|span| (span.end, span.start));

        for (index, span) in spans.into_iter().enumerate() {
            let phase = MILESTONE_PHASES[index % MILESTONE_PHASES.len()];
            milestones.push(Milestone {
                id: generate_id(),
                project_id: project.id.clone(),
                name: format!("Phase {}: {}", index + 1, phase),
                description: Some(format!("{} phase of {}", phase, project.name)),
                startdate: span.start,
                duedate: span.end,
                status: milestone_status(span, today),
                created_at: now,
            });
        }
    }

    insert_in_batches(ctx, step, &milestones).await?;
    refetch(ctx, &milestones).await
}

/// Up to `per_milestone` tasks per milestone. Tasks marked done always
/// carry an actual end date; open tasks never do.
pub async fn seed_project_tasks<B: Backend + ?Sized>(
    ctx: &mut SeedContext<'_, B>,
    per_milestone: usize,
    milestones: &[Milestone],
    personnel: &[Personnel],
) -> Result<Vec<ProjectTask>, SeedError> {
    let step = SeedStep::ProjectTasks;
    if milestones.is_empty() {
        ctx.skip(step, "milestones");
        return Ok(Vec::new());
    }
    if personnel.is_empty() {
        ctx.warn(step, "No personnel available; tasks will be unassigned");
    }

    let now = ctx.now();
    let mut tasks = Vec::new();
    for milestone in milestones {
        let window = parent_window(
            ctx,
            step,
            "Milestone",
            &milestone.id,
            milestone.startdate,
            milestone.duedate,
        );
        let rng = ctx.rng();
        for _ in 0..count_up_to(rng, per_milestone) {
            let span = window.sample_window(rng);
            let status = match rng.gen_range(0..4) {
                0 => TaskStatus::ToDo,
                1 => TaskStatus::InProgress,
                2 => TaskStatus::Review,
                _ => TaskStatus::Done,
            };
            let actual_end_date = (status == TaskStatus::Done).then(|| span.sample(rng));

            tasks.push(ProjectTask {
                id: generate_id(),
                project_id: milestone.project_id.clone(),
                milestone_id: milestone.id.clone(),
                name: format!("{} {}", word(rng, TASK_VERBS), word(rng, TASK_OBJECTS)),
                description: Some(format!("Part of {}", milestone.name)),
                assignee_id: pick(rng, personnel).map(|person| person.id.clone()),
                status,
                priority: PRIORITIES[rng.gen_range(0..PRIORITIES.len())],
                startdate: span.start,
                duedate: span.end,
                actual_end_date,
                estimated_hours: f64::from(rng.gen_range(2u32..=80)),
                created_at: now,
            });
        }
    }

    insert_in_batches(ctx, step, &tasks).await?;
    Ok(tasks)
}
