//! Root entities: regions, focus centers, companies, personnel, users.

use crate::model::{generate_id, Company, FocusCenter, Personnel, Region, Table, UserProfile};
use crate::seed::batch::{insert_in_batches, refetch, refetch_by};
use crate::seed::context::SeedContext;
use crate::seed::data::{
    COMPANY_PREFIXES, COMPANY_SUFFIXES, DEPARTMENTS, FIRST_NAMES, FOCUS_AREAS, INDUSTRIES,
    LAST_NAMES, REGION_NAMES, ROLES,
};
use crate::seed::error::SeedError;
use crate::seed::generate::{count_up_to, days_before, phone, slug, word};
use crate::seed::plan::SeedStep;
use crate::store::{Backend, BackendExt, Query};
use itertools::Itertools;
use rand::seq::SliceRandom;
use serde_json::json;
use std::collections::HashSet;

/// RPC returning authenticated users as a JSON array of profiles.
pub const LIST_USERS_RPC: &str = "list_auth_users";

/// Take up to `count` names from `candidates`, skipping names already persisted.
/// Only in-run draws spend the `2 × count` attempt budget.
fn unique_names<I>(count: usize, existing: &HashSet<String>, candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut candidates = candidates
        .into_iter()
        .filter(|name| !existing.contains(name));
    let mut generated = HashSet::with_capacity(count);
    let mut names = Vec::with_capacity(count);
    let mut attempts = 0;
    while names.len() < count && attempts < count * 2 {
        let Some(name) = candidates.next() else {
            break;
        };
        attempts += 1;
        if generated.insert(name.clone()) {
            names.push(name);
        }
    }
    names
}

/// Region names in list order, then numbered variants once the list is used up.
fn region_candidate(attempt: usize) -> String {
    let base = REGION_NAMES[attempt % REGION_NAMES.len()];
    match attempt / REGION_NAMES.len() {
        0 => base.to_string(),
        round => format!("{} {}", base, round + 1),
    }
}

/// Every prefix and suffix pairing, in word list order.
fn company_names() -> Vec<String> {
    COMPANY_PREFIXES
        .iter()
        .cartesian_product(COMPANY_SUFFIXES)
        .map(|(prefix, suffix)| format!("{} {}", prefix, suffix))
        .collect()
}

fn region_code(name: &str) -> String {
    name.split(|c: char| c.is_whitespace() || c == '-')
        .filter_map(|part| part.chars().next())
        .collect::<String>()
        .to_uppercase()
}

async fn existing_names<B: Backend + ?Sized>(
    ctx: &SeedContext<'_, B>,
    table: Table,
) -> Result<HashSet<String>, SeedError> {
    let names = ctx
        .backend()
        .fetch_column(table, "name")
        .await
        .map_err(SeedError::fetch(table))?;
    Ok(names.into_iter().collect())
}

pub async fn seed_regions<B: Backend + ?Sized>(
    ctx: &mut SeedContext<'_, B>,
    count: usize,
) -> Result<Vec<Region>, SeedError> {
    let step = SeedStep::Regions;
    let taken = existing_names(ctx, Table::Regions).await?;
    let names = unique_names(count, &taken, (0..).map(region_candidate));
    if names.len() < count {
        ctx.warn(
            step,
            format!("Only {} of {} region names were available", names.len(), count),
        );
    }

    let now = ctx.now();
    let regions: Vec<Region> = names
        .iter()
        .map(|name| Region {
            id: generate_id(),
            name: name.clone(),
            code: region_code(name),
            description: Some(format!("Operations in {}", name)),
            created_at: now,
        })
        .collect();

    insert_in_batches(ctx, step, &regions).await?;
    refetch_by(ctx, "name", names, |region: &Region| region.name.clone()).await
}

pub async fn seed_focus_centers<B: Backend + ?Sized>(
    ctx: &mut SeedContext<'_, B>,
    per_region: usize,
    regions: &[Region],
) -> Result<Vec<FocusCenter>, SeedError> {
    let step = SeedStep::FocusCenters;
    if regions.is_empty() {
        ctx.skip(step, "regions");
        return Ok(Vec::new());
    }

    let now = ctx.now();
    let mut centers = Vec::new();
    for region in regions {
        let rng = ctx.rng();
        let n = count_up_to(rng, per_region.min(FOCUS_AREAS.len()));
        for area in FOCUS_AREAS.choose_multiple(rng, n) {
            centers.push(FocusCenter {
                id: generate_id(),
                region_id: region.id.clone(),
                name: format!("{} - {}", area, region.name),
                description: Some(format!("{} programs for {}", area, region.name)),
                created_at: now,
            });
        }
    }

    insert_in_batches(ctx, step, &centers).await?;
    refetch(ctx, &centers).await
}

pub async fn seed_companies<B: Backend + ?Sized>(
    ctx: &mut SeedContext<'_, B>,
    count: usize,
) -> Result<Vec<Company>, SeedError> {
    let step = SeedStep::Companies;
    let taken = existing_names(ctx, Table::Companies).await?;

    let mut pool = company_names();
    pool.shuffle(ctx.rng());
    let names = unique_names(count, &taken, pool);
    if names.len() < count {
        ctx.warn(
            step,
            format!(
                "Generated {} of {} companies; name space exhausted",
                names.len(),
                count
            ),
        );
    }

    let now = ctx.now();
    let mut companies = Vec::with_capacity(names.len());
    for name in &names {
        let rng = ctx.rng();
        let domain = format!("{}.com", slug(name));
        companies.push(Company {
            id: generate_id(),
            name: name.clone(),
            industry: word(rng, INDUSTRIES).to_string(),
            website: Some(format!("https://www.{}", domain)),
            email: Some(format!("info@{}", domain)),
            phone: Some(phone(rng)),
            created_at: now,
        });
    }

    insert_in_batches(ctx, step, &companies).await?;
    refetch_by(ctx, "name", names, |company: &Company| company.name.clone()).await
}

pub async fn seed_personnel<B: Backend + ?Sized>(
    ctx: &mut SeedContext<'_, B>,
    count: usize,
) -> Result<Vec<Personnel>, SeedError> {
    let step = SeedStep::Personnel;
    let (now, today) = (ctx.now(), ctx.today());

    let mut people = Vec::with_capacity(count);
    for _ in 0..count {
        let rng = ctx.rng();
        let id = generate_id();
        let first_name = word(rng, FIRST_NAMES).to_string();
        let last_name = word(rng, LAST_NAMES).to_string();
        // The id suffix keeps emails unique when names repeat.
        let email = format!(
            "{}.{}.{}@bizops.example",
            slug(&first_name),
            slug(&last_name),
            &id[..8]
        );
        people.push(Personnel {
            id,
            first_name,
            last_name,
            email,
            phone: Some(phone(rng)),
            role: word(rng, ROLES).to_string(),
            department: word(rng, DEPARTMENTS).to_string(),
            hire_date: days_before(rng, today, 365 * 8),
            created_at: now,
        });
    }

    insert_in_batches(ctx, step, &people).await?;
    Ok(people)
}

/// Authenticated users, via RPC with a `profiles` select as fallback.
pub async fn load_users<B: Backend + ?Sized>(
    ctx: &mut SeedContext<'_, B>,
    limit: usize,
) -> Result<Vec<UserProfile>, SeedError> {
    let step = SeedStep::Users;
    let from_rpc = ctx
        .backend()
        .rpc(LIST_USERS_RPC, json!({ "limit": limit }))
        .await
        .and_then(|value| Ok(serde_json::from_value::<Vec<UserProfile>>(value)?));

    let users = match from_rpc {
        Ok(users) => users,
        Err(err) => {
            ctx.warn(
                step,
                format!("{} unavailable ({:#}); reading profiles instead", LIST_USERS_RPC, err),
            );
            ctx.backend()
                .fetch::<UserProfile>(Query::all().order_by("email").limit(limit))
                .await
                .map_err(SeedError::fetch(Table::Profiles))?
        }
    };

    ctx.progress(step, format!("Found {} users", users.len()));
    Ok(users)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_names_gives_up_after_twice_count() {
        let mut calls = 0;
        let candidates = std::iter::repeat("dup".to_string()).inspect(|_| calls += 1);
        let names = unique_names(3, &HashSet::new(), candidates);
        assert_eq!(names, vec!["dup".to_string()]);
        assert_eq!(calls, 6);
    }

    #[test]
    fn test_existing_names_do_not_spend_attempts() {
        let existing: HashSet<String> =
            REGION_NAMES[..10].iter().map(|name| name.to_string()).collect();
        let names = unique_names(5, &existing, (0..).map(region_candidate));
        assert_eq!(
            names,
            vec![
                REGION_NAMES[10].to_string(),
                REGION_NAMES[11].to_string(),
                format!("{} 2", REGION_NAMES[0]),
                format!("{} 2", REGION_NAMES[1]),
                format!("{} 2", REGION_NAMES[2]),
            ]
        );
    }

    #[test]
    fn test_unique_names_stops_when_candidates_run_out() {
        let existing: HashSet<String> = ["a".to_string()].into_iter().collect();
        let candidates = ["a", "a", "b"].map(String::from);
        assert_eq!(unique_names(4, &existing, candidates), vec!["b".to_string()]);
    }

    #[test]
    fn test_company_names_cover_every_pairing() {
        let names = company_names();
        assert_eq!(names.len(), COMPANY_PREFIXES.len() * COMPANY_SUFFIXES.len());
        assert_eq!(names.iter().unique().count(), names.len());
    }

    #[test]
    fn test_region_candidates_wrap_with_suffix() {
        assert_eq!(region_candidate(0), REGION_NAMES[0]);
        assert_eq!(
            region_candidate(REGION_NAMES.len() + 1),
            format!("{} 2", REGION_NAMES[1])
        );
    }

    #[test]
    fn test_region_code_uses_initials() {
        assert_eq!(region_code("Sub-Saharan Africa"), "SSA");
        assert_eq!(region_code("Oceania"), "O");
    }
}
