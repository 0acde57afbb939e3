use crate::model::{
    generate_id, ApprovalStatus, Benefit, HrDocument, LeaveRequest, PayrollRecord,
    PerformanceReview, Personnel,
};
use crate::seed::batch::insert_in_batches;
use crate::seed::context::SeedContext;
use crate::seed::data::{BENEFIT_TYPES, DOCUMENT_TYPES, LEAVE_TYPES};
use crate::seed::error::SeedError;
use crate::seed::generate::{count_at_most, count_up_to, money, word};
use crate::seed::plan::SeedStep;
use crate::store::Backend;
use chrono::{Datelike, Duration, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Copy)]
pub struct HrVolumes {
    pub max_leave_requests: usize,
    pub payroll_months: usize,
    pub max_benefits: usize,
    pub max_documents: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct HrRecords {
    pub leave_requests: Vec<LeaveRequest>,
    pub payroll: Vec<PayrollRecord>,
    pub benefits: Vec<Benefit>,
    pub reviews: Vec<PerformanceReview>,
    pub documents: Vec<HrDocument>,
}

impl HrRecords {
    pub fn len(&self) -> usize {
        self.leave_requests.len()
            + self.payroll.len()
            + self.benefits.len()
            + self.reviews.len()
            + self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First and last day of the `months_back`-th full month before `today`.
fn pay_period(today: NaiveDate, months_back: usize) -> (NaiveDate, NaiveDate) {
    let mut end = first_of_month(today) - Duration::days(1);
    for _ in 0..months_back {
        end = first_of_month(end) - Duration::days(1);
    }
    (first_of_month(end), end)
}

pub async fn seed_hr<B: Backend + ?Sized>(
    ctx: &mut SeedContext<'_, B>,
    volumes: HrVolumes,
    personnel: &[Personnel],
) -> Result<HrRecords, SeedError> {
    let step = SeedStep::Hr;
    if personnel.is_empty() {
        ctx.skip(step, "personnel");
        return Ok(HrRecords::default());
    }

    let (now, today) = (ctx.now(), ctx.today());
    let rng = ctx.rng();
    let mut hr = HrRecords::default();
    for person in personnel {
        for _ in 0..count_at_most(rng, volumes.max_leave_requests) {
            let start_date = today + Duration::days(rng.gen_range(-180..=120));
            hr.leave_requests.push(LeaveRequest {
                id: generate_id(),
                personnel_id: person.id.clone(),
                leave_type: word(rng, LEAVE_TYPES).to_string(),
                start_date,
                end_date: start_date + Duration::days(rng.gen_range(0..=14)),
                reason: None,
                status: match rng.gen_range(0..3) {
                    0 => ApprovalStatus::Pending,
                    1 => ApprovalStatus::Approved,
                    _ => ApprovalStatus::Rejected,
                },
                created_at: now,
            });
        }

        let monthly_gross = money(rng, 3_000.0, 12_000.0);
        for months_back in 0..volumes.payroll_months {
            let (period_start, period_end) = pay_period(today, months_back);
            if period_end < person.hire_date {
                break;
            }
            let deductions = (monthly_gross * rng.gen_range(0.18..0.35) * 100.0).round() / 100.0;
            hr.payroll.push(PayrollRecord {
                id: generate_id(),
                personnel_id: person.id.clone(),
                period_start,
                period_end,
                gross_pay: monthly_gross,
                deductions,
                net_pay: ((monthly_gross - deductions) * 100.0).round() / 100.0,
                paid_on: period_end,
                created_at: now,
            });
        }

        let benefit_count = count_up_to(rng, volumes.max_benefits);
        for (benefit_type, provider) in BENEFIT_TYPES.choose_multiple(rng, benefit_count) {
            hr.benefits.push(Benefit {
                id: generate_id(),
                personnel_id: person.id.clone(),
                benefit_type: benefit_type.to_string(),
                provider: provider.to_string(),
                monthly_cost: money(rng, 15.0, 450.0),
                start_date: person.hire_date,
                created_at: now,
            });
        }

        if rng.gen_bool(0.7) {
            let reviewer = personnel
                .iter()
                .filter(|other| other.id != person.id)
                .collect::<Vec<_>>()
                .choose(rng)
                .map(|other| other.id.clone());
            hr.reviews.push(PerformanceReview {
                id: generate_id(),
                personnel_id: person.id.clone(),
                reviewer_id: reviewer,
                review_date: today - Duration::days(rng.gen_range(0..=365)),
                rating: rng.gen_range(1..=5),
                comments: Some("Annual performance review".to_string()),
                created_at: now,
            });
        }

        for _ in 0..count_up_to(rng, volumes.max_documents) {
            let document_type = word(rng, DOCUMENT_TYPES);
            let id = generate_id();
            hr.documents.push(HrDocument {
                file_url: format!("hr-documents/{}/{}.pdf", person.id, id),
                id,
                personnel_id: person.id.clone(),
                document_type: document_type.to_string(),
                title: format!("{} - {}", document_type, person.full_name()),
                uploaded_at: now,
            });
        }
    }

    insert_in_batches(ctx, step, &hr.leave_requests).await?;
    insert_in_batches(ctx, step, &hr.payroll).await?;
    insert_in_batches(ctx, step, &hr.benefits).await?;
    insert_in_batches(ctx, step, &hr.reviews).await?;
    insert_in_batches(ctx, step, &hr.documents).await?;
    Ok(hr)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_pay_periods_are_full_previous_months() {
        let today = date(2024, 3, 15);
        assert_eq!(pay_period(today, 0), (date(2024, 2, 1), date(2024, 2, 29)));
        assert_eq!(pay_period(today, 1), (date(2024, 1, 1), date(2024, 1, 31)));
        assert_eq!(pay_period(today, 2), (date(2023, 12, 1), date(2023, 12, 31)));
    }
}
