use crate::model::{generate_id, Personnel, Project, ProjectExpense, ProjectForecast};
use crate::seed::batch::insert_in_batches;
use crate::seed::context::SeedContext;
use crate::seed::data::EXPENSE_CATEGORIES;
use crate::seed::error::SeedError;
use crate::seed::generate::{count_at_most, money, parent_window, pick, word, DateWindow};
use crate::seed::plan::SeedStep;
use crate::store::Backend;
use chrono::Duration;
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct FinancialRecords {
    pub forecasts: Vec<ProjectForecast>,
    pub expenses: Vec<ProjectExpense>,
}

impl FinancialRecords {
    pub fn len(&self) -> usize {
        self.forecasts.len() + self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split `window` into at most `periods` consecutive, non-overlapping spans.
fn forecast_periods(window: DateWindow, periods: usize) -> Vec<DateWindow> {
    if periods == 0 {
        return Vec::new();
    }
    let total_days = window.days() + 1;
    let periods = (periods as i64).min(total_days);
    let span = total_days / periods;

    (0..periods)
        .map(|index| {
            let start = window.start + Duration::days(index * span);
            let end = if index == periods - 1 {
                window.end
            } else {
                start + Duration::days(span - 1)
            };
            DateWindow { start, end }
        })
        .collect()
}

/// Budget forecasts over each project's lifetime plus a spread of expenses.
/// Forecasts for periods already closed carry an actual amount.
pub async fn seed_financials<B: Backend + ?Sized>(
    ctx: &mut SeedContext<'_, B>,
    forecast_periods_per_project: usize,
    expenses_per_project: usize,
    projects: &[Project],
    personnel: &[Personnel],
) -> Result<FinancialRecords, SeedError> {
    let step = SeedStep::Financials;
    if projects.is_empty() {
        ctx.skip(step, "projects");
        return Ok(FinancialRecords::default());
    }

    let (now, today) = (ctx.now(), ctx.today());
    let mut records = FinancialRecords::default();
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
        let periods = forecast_periods(window, forecast_periods_per_project);
        let per_period = project.budget / periods.len().max(1) as f64;

        for period in periods {
            let forecast_amount = (per_period * rng.gen_range(0.8..1.2) * 100.0).round() / 100.0;
            let actual_amount = (period.end < today)
                .then(|| (forecast_amount * rng.gen_range(0.7..1.3) * 100.0).round() / 100.0);
            records.forecasts.push(ProjectForecast {
                id: generate_id(),
                project_id: project.id.clone(),
                period_start: period.start,
                period_end: period.end,
                forecast_amount,
                actual_amount,
                created_at: now,
            });
        }

        for _ in 0..count_at_most(rng, expenses_per_project) {
            let category = word(rng, EXPENSE_CATEGORIES);
            records.expenses.push(ProjectExpense {
                id: generate_id(),
                project_id: project.id.clone(),
                category: category.to_string(),
                description: format!("{} for {}", category, project.name),
                amount: money(rng, 250.0, 40_000.0),
                expense_date: window.sample(rng),
                approved_by: pick(rng, personnel).map(|person| person.id.clone()),
                created_at: now,
            });
        }
    }

    insert_in_batches(ctx, step, &records.forecasts).await?;
    insert_in_batches(ctx, step, &records.expenses).await?;
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_periods_tile_the_window() {
        let window = DateWindow {
            start: date(2024, 1, 1),
            end: date(2024, 12, 31),
        };
        let periods = forecast_periods(window, 4);
        assert_eq!(periods.len(), 4);
        assert_eq!(periods[0].start, window.start);
        assert_eq!(periods[3].end, window.end);
        for pair in periods.windows(2) {
            assert_eq!(pair[0].end + Duration::days(1), pair[1].start);
        }
    }

    #[test]
    fn test_short_window_caps_period_count() {
        let window = DateWindow {
            start: date(2024, 1, 1),
            end: date(2024, 1, 2),
        };
        let periods = forecast_periods(window, 6);
        assert_eq!(periods.len(), 2);
        assert!(periods.iter().all(|p| p.start == p.end));
        assert!(forecast_periods(window, 0).is_empty());
    }
}
