use crate::model::{generate_id, KanbanColumn, KanbanTask, Personnel, Priority, Project};
use crate::seed::batch::insert_in_batches;
use crate::seed::context::SeedContext;
use crate::seed::data::{KANBAN_COLUMNS, TASK_OBJECTS, TASK_VERBS};
use crate::seed::error::SeedError;
use crate::seed::generate::{count_at_most, pick, word};
use crate::seed::plan::SeedStep;
use crate::store::Backend;
use chrono::Duration;
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct KanbanBoards {
    pub columns: Vec<KanbanColumn>,
    pub tasks: Vec<KanbanTask>,
}

impl KanbanBoards {
    pub fn len(&self) -> usize {
        self.columns.len() + self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One board per project with the standard columns and up to
/// `max_tasks_per_column` cards in each.
pub async fn seed_kanban<B: Backend + ?Sized>(
    ctx: &mut SeedContext<'_, B>,
    max_tasks_per_column: usize,
    projects: &[Project],
    personnel: &[Personnel],
) -> Result<KanbanBoards, SeedError> {
    let step = SeedStep::Kanban;
    if projects.is_empty() {
        ctx.skip(step, "projects");
        return Ok(KanbanBoards::default());
    }

    let (now, today) = (ctx.now(), ctx.today());
    let mut boards = KanbanBoards::default();
    for project in projects {
        let rng = ctx.rng();
        for (position, name) in KANBAN_COLUMNS.iter().enumerate() {
            let column = KanbanColumn {
                id: generate_id(),
                project_id: project.id.clone(),
                name: name.to_string(),
                position: position as i32,
                created_at: now,
            };
            for card in 0..count_at_most(rng, max_tasks_per_column) {
                boards.tasks.push(KanbanTask {
                    id: generate_id(),
                    column_id: column.id.clone(),
                    title: format!("{} {}", word(rng, TASK_VERBS), word(rng, TASK_OBJECTS)),
                    description: None,
                    assignee_id: pick(rng, personnel).map(|person| person.id.clone()),
                    priority: match rng.gen_range(0..3) {
                        0 => Priority::Low,
                        1 => Priority::Medium,
                        _ => Priority::High,
                    },
                    position: card as i32,
                    due_date: rng
                        .gen_bool(0.6)
                        .then(|| today + Duration::days(rng.gen_range(-10..=45))),
                    created_at: now,
                });
            }
            boards.columns.push(column);
        }
    }

    insert_in_batches(ctx, step, &boards.columns).await?;
    insert_in_batches(ctx, step, &boards.tasks).await?;
    Ok(boards)
}
