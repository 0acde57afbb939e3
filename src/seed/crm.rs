use crate::model::{
    generate_id, CrmCommunicationLog, CrmCompany, CrmContact, CrmDeal, DealStage, Personnel,
};
use crate::seed::batch::insert_in_batches;
use crate::seed::context::SeedContext;
use crate::seed::data::{
    COMMUNICATION_CHANNELS, COMMUNICATION_SUMMARIES, COMPANY_PREFIXES, CRM_POSITIONS,
    DEAL_TITLES, FIRST_NAMES, INDUSTRIES, LAST_NAMES,
};
use crate::seed::error::SeedError;
use crate::seed::generate::{count_at_most, count_up_to, minutes_before, money, phone, pick, slug, word};
use crate::seed::plan::SeedStep;
use crate::store::Backend;
use chrono::Duration;
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Copy)]
pub struct CrmVolumes {
    pub companies: usize,
    pub max_contacts_per_company: usize,
    pub max_deals_per_company: usize,
    pub max_logs_per_contact: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CrmRecords {
    pub companies: Vec<CrmCompany>,
    pub contacts: Vec<CrmContact>,
    pub deals: Vec<CrmDeal>,
    pub communication_logs: Vec<CrmCommunicationLog>,
}

impl CrmRecords {
    pub fn len(&self) -> usize {
        self.companies.len()
            + self.contacts.len()
            + self.deals.len()
            + self.communication_logs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

const DEAL_STAGES: [DealStage; 6] = [
    DealStage::Lead,
    DealStage::Qualified,
    DealStage::Proposal,
    DealStage::Negotiation,
    DealStage::ClosedWon,
    DealStage::ClosedLost,
];

/// Customer accounts with contacts, deals and a communication history.
///
/// Deals always point at a contact of the same company; a log entry may
/// reference one of that contact's company deals.
pub async fn seed_crm<B: Backend + ?Sized>(
    ctx: &mut SeedContext<'_, B>,
    volumes: CrmVolumes,
    personnel: &[Personnel],
) -> Result<CrmRecords, SeedError> {
    let step = SeedStep::Crm;
    if personnel.is_empty() {
        ctx.warn(step, "No personnel available; deals will have no owner");
    }

    let (now, today) = (ctx.now(), ctx.today());
    let rng = ctx.rng();
    let mut crm = CrmRecords::default();
    for index in 0..volumes.companies {
        let name = format!("{} Client {}", word(rng, COMPANY_PREFIXES), index + 1);
        let domain = format!("{}.example", slug(&name));
        let company = CrmCompany {
            id: generate_id(),
            industry: word(rng, INDUSTRIES).to_string(),
            website: Some(format!("https://{}", domain)),
            annual_revenue: rng
                .gen_bool(0.8)
                .then(|| money(rng, 250_000.0, 50_000_000.0)),
            name,
            created_at: now,
        };

        let first_contact = crm.contacts.len();
        for _ in 0..count_up_to(rng, volumes.max_contacts_per_company) {
            let first_name = word(rng, FIRST_NAMES).to_string();
            let last_name = word(rng, LAST_NAMES).to_string();
            let id = generate_id();
            crm.contacts.push(CrmContact {
                email: format!("{}.{}.{}@{}", slug(&first_name), slug(&last_name), &id[..4], domain),
                id,
                company_id: company.id.clone(),
                first_name,
                last_name,
                phone: Some(phone(rng)),
                position: Some(word(rng, CRM_POSITIONS).to_string()),
                created_at: now,
            });
        }
        let contacts = &crm.contacts[first_contact..];

        let first_deal = crm.deals.len();
        for _ in 0..count_at_most(rng, volumes.max_deals_per_company) {
            let Some(contact) = pick(rng, contacts) else {
                break;
            };
            crm.deals.push(CrmDeal {
                id: generate_id(),
                company_id: company.id.clone(),
                contact_id: contact.id.clone(),
                title: format!("{} - {}", word(rng, DEAL_TITLES), company.name),
                value: money(rng, 5_000.0, 750_000.0),
                stage: DEAL_STAGES[rng.gen_range(0..DEAL_STAGES.len())],
                owner_id: pick(rng, personnel).map(|person| person.id.clone()),
                expected_close_date: today + Duration::days(rng.gen_range(-60..=180)),
                created_at: now,
            });
        }
        let deals = &crm.deals[first_deal..];

        for contact in contacts {
            for _ in 0..count_at_most(rng, volumes.max_logs_per_contact) {
                let deal = if rng.gen_bool(0.5) { pick(rng, deals) } else { None };
                crm.communication_logs.push(CrmCommunicationLog {
                    id: generate_id(),
                    contact_id: contact.id.clone(),
                    deal_id: deal.map(|deal| deal.id.clone()),
                    channel: word(rng, COMMUNICATION_CHANNELS).to_string(),
                    summary: word(rng, COMMUNICATION_SUMMARIES).to_string(),
                    logged_by: pick(rng, personnel).map(|person| person.id.clone()),
                    occurred_at: minutes_before(rng, now, 60 * 24 * 90),
                });
            }
        }
        crm.companies.push(company);
    }

    insert_in_batches(ctx, step, &crm.companies).await?;
    insert_in_batches(ctx, step, &crm.contacts).await?;
    insert_in_batches(ctx, step, &crm.deals).await?;
    insert_in_batches(ctx, step, &crm.communication_logs).await?;
    Ok(crm)
}
