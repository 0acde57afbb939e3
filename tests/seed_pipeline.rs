use bizops_seed::config::SeedConfig;
use bizops_seed::model::{
    Company, FocusCenter, Milestone, Project, ProjectStatus, Record, Region, Table,
};
use bizops_seed::seed::data::{COMPANY_PREFIXES, COMPANY_SUFFIXES, REGION_NAMES};
use bizops_seed::seed::org::{seed_regions, LIST_USERS_RPC};
use bizops_seed::seed::projects::seed_projects;
use bizops_seed::seed::{
    run_plan, seed_all, seed_chat, seed_only, ProgressRecorder, SeedContext, SeedError, SeedPlan,
    SeedStep, StepStatus,
};
use bizops_seed::store::MemoryBackend;
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use serde_json::{json, Value};
use std::collections::HashSet;

fn config() -> SeedConfig {
    SeedConfig {
        rng_seed: Some(2024),
        regions: 4,
        companies: 6,
        personnel: 12,
        projects: 8,
        chat_groups: 5,
        max_messages_per_group: 5,
        ..SeedConfig::default()
    }
}

fn backend_with_users(count: usize) -> MemoryBackend {
    let backend = MemoryBackend::new();
    let users: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "id": format!("00000000-0000-4000-8000-{:012}", i),
                "email": format!("user{}@bizops.example", i),
                "full_name": format!("User {}", i),
            })
        })
        .collect();
    backend.register_rpc(LIST_USERS_RPC, move |_| Ok(Value::Array(users.clone())));
    backend
}

fn ids<T: Record>(records: &[T]) -> HashSet<String> {
    records.iter().map(|record| record.id().clone()).collect()
}

fn column(backend: &MemoryBackend, table: Table, name: &str) -> Vec<String> {
    backend
        .rows(table)
        .iter()
        .filter_map(|row| row.get(name).and_then(Value::as_str).map(str::to_string))
        .collect()
}

#[tokio::test]
async fn test_full_run_keeps_referential_integrity() {
    let backend = backend_with_users(6);
    let recorder = ProgressRecorder::new();

    let report = seed_all(&backend, &config(), &recorder).await.unwrap();
    let data = &report.data;

    let regions = ids(&data.regions);
    let companies = ids(&data.companies);
    let centers = ids(&data.focus_centers);
    let people = ids(&data.personnel);
    let users = ids(&data.users);
    let projects = ids(&data.projects);
    let milestones = ids(&data.milestones);

    assert_eq!(users.len(), 6);
    assert!(!data.projects.is_empty());
    for center in &data.focus_centers {
        assert!(regions.contains(&center.region_id));
    }
    for project in &data.projects {
        assert!(companies.contains(&project.company_id));
        assert!(regions.contains(&project.region_id));
        assert!(centers.contains(&project.focus_center_id));
        assert!(project.manager_id.iter().all(|id| people.contains(id)));

        let center = data
            .focus_centers
            .iter()
            .find(|center| center.id == project.focus_center_id)
            .unwrap();
        let region_has_centers = data
            .focus_centers
            .iter()
            .any(|center| center.region_id == project.region_id);
        if region_has_centers {
            assert_eq!(center.region_id, project.region_id);
        }
    }
    for milestone in &data.milestones {
        assert!(projects.contains(&milestone.project_id));
    }
    for task in &data.project_tasks {
        assert!(milestones.contains(&task.milestone_id));
        assert!(projects.contains(&task.project_id));
    }
    for group in &data.chat_groups.groups {
        assert!(users.contains(&group.created_by));
        assert!(group.project_id.iter().all(|id| projects.contains(id)));
    }
    for member in &data.chat_groups.members {
        assert!(users.contains(&member.user_id));
    }
    for order in &data.inventory.purchase_orders {
        let item = data
            .inventory
            .items
            .iter()
            .find(|item| item.id == order.item_id)
            .unwrap();
        assert_eq!(order.supplier_id, item.supplier_id);
        let expected = (f64::from(order.quantity) * item.unit_price * 100.0).round() / 100.0;
        assert_eq!(order.total_amount, expected);
        assert!(order.expected_date >= order.order_date);
    }
    for deal in &data.crm.deals {
        let contact = data
            .crm
            .contacts
            .iter()
            .find(|contact| contact.id == deal.contact_id)
            .unwrap();
        assert_eq!(contact.company_id, deal.company_id);
    }
    for payroll in &data.hr.payroll {
        assert_eq!(
            ((payroll.gross_pay - payroll.deductions) * 100.0).round() / 100.0,
            payroll.net_pay
        );
        assert!(people.contains(&payroll.personnel_id));
    }
    for review in &data.hr.reviews {
        assert_ne!(review.reviewer_id.as_ref(), Some(&review.personnel_id));
    }
    for order in &data.maintenance.work_orders {
        assert_eq!(
            order.completed_date.is_some(),
            order.status == bizops_seed::model::WorkOrderStatus::Completed
        );
    }
    for leave in &data.hr.leave_requests {
        assert!(leave.end_date >= leave.start_date);
    }

    // Every persisted row carries a distinct UUID.
    let project_ids = column(&backend, Table::Projects, "id");
    assert_eq!(project_ids.len(), project_ids.iter().collect::<HashSet<_>>().len());
    assert!(recorder.with_status(StepStatus::Failed).is_empty());
}

#[tokio::test]
async fn test_dates_nest_inside_parents() {
    let backend = MemoryBackend::new();
    let recorder = ProgressRecorder::new();

    let report = seed_all(&backend, &config(), &recorder).await.unwrap();
    let data = &report.data;

    for milestone in &data.milestones {
        let project = data
            .projects
            .iter()
            .find(|project| project.id == milestone.project_id)
            .unwrap();
        assert!(milestone.startdate <= milestone.duedate);
        assert!(project.startdate <= milestone.startdate);
        assert!(milestone.duedate <= project.enddate);
    }
    for task in &data.project_tasks {
        let milestone = data
            .milestones
            .iter()
            .find(|milestone| milestone.id == task.milestone_id)
            .unwrap();
        assert!(task.startdate <= task.duedate);
        assert!(milestone.startdate <= task.startdate);
        assert!(task.duedate <= milestone.duedate);
        assert_eq!(
            task.actual_end_date.is_some(),
            task.status == bizops_seed::model::TaskStatus::Done
        );
    }
    for forecast in &data.financials.forecasts {
        let project = data
            .projects
            .iter()
            .find(|project| project.id == forecast.project_id)
            .unwrap();
        assert!(project.startdate <= forecast.period_start);
        assert!(forecast.period_end <= project.enddate);
    }
}

#[tokio::test]
async fn test_inverted_project_window_is_patched_and_reported() {
    let backend = MemoryBackend::new();
    let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let project = Project {
        id: "11111111-1111-4111-8111-111111111111".to_string(),
        name: "Backwards Rollout".to_string(),
        description: None,
        company_id: "c".to_string(),
        region_id: "r".to_string(),
        focus_center_id: "f".to_string(),
        manager_id: None,
        status: ProjectStatus::Active,
        startdate: start,
        enddate: start - Duration::days(30),
        budget: 1_000.0,
        created_at: Utc::now(),
    };
    backend.put_rows(Table::Projects, vec![serde_json::to_value(&project).unwrap()]);
    let recorder = ProgressRecorder::new();

    let report = seed_only(&backend, &config(), &recorder, &[SeedStep::Milestones])
        .await
        .unwrap();

    assert_eq!(report.loaded[&SeedStep::Projects], 1);
    let milestones: &[Milestone] = &report.data.milestones;
    assert!(!milestones.is_empty());
    let patched_end = start + Duration::days(90);
    for milestone in milestones {
        assert!(start <= milestone.startdate && milestone.duedate <= patched_end);
    }
    let warnings = recorder.with_status(StepStatus::Warning);
    assert!(warnings
        .iter()
        .any(|event| event.message.contains("Project 11111111-1111-4111-8111-111111111111 ends before it starts")));
}

#[tokio::test]
async fn test_repeated_runs_keep_names_unique() {
    let backend = MemoryBackend::new();
    let recorder = ProgressRecorder::new();
    let regions = SeedConfig::default().regions;

    for rng_seed in [2024, 7, 99] {
        let config = SeedConfig {
            rng_seed: Some(rng_seed),
            regions,
            ..config()
        };
        let report = seed_all(&backend, &config, &recorder).await.unwrap();
        assert_eq!(report.data.regions.len(), regions);
    }

    for table in [Table::Regions, Table::Companies] {
        let names = column(&backend, table, "name");
        let distinct: HashSet<&String> = names.iter().collect();
        assert_eq!(names.len(), distinct.len(), "duplicate names in {}", table);
    }
    assert!(3 * regions > REGION_NAMES.len());
    assert_eq!(backend.row_count(Table::Regions), 3 * regions);
    let names = column(&backend, Table::Regions, "name");
    assert!(names.contains(&REGION_NAMES[REGION_NAMES.len() - 1].to_string()));
    assert!(names.contains(&format!("{} 2", REGION_NAMES[0])));
    assert!(recorder
        .for_step(SeedStep::Regions)
        .iter()
        .all(|event| event.status != StepStatus::Warning));
}

#[tokio::test]
async fn test_default_config_seeds_three_times() {
    let backend = backend_with_users(3);
    let recorder = ProgressRecorder::new();

    for rng_seed in [1, 2, 3] {
        let config = SeedConfig {
            rng_seed: Some(rng_seed),
            ..SeedConfig::default()
        };
        seed_all(&backend, &config, &recorder).await.unwrap();
    }

    let expected = 3 * SeedConfig::default().regions;
    assert_eq!(backend.row_count(Table::Regions), expected);
    let names = column(&backend, Table::Regions, "name");
    assert_eq!(names.iter().collect::<HashSet<_>>().len(), expected);
}

#[tokio::test]
async fn test_company_shortfall_warns_without_aborting() {
    let backend = MemoryBackend::new();
    let free_prefixes = &COMPANY_PREFIXES[..3];
    let existing: Vec<Value> = COMPANY_PREFIXES[3..]
        .iter()
        .flat_map(|prefix| COMPANY_SUFFIXES.iter().map(move |suffix| (prefix, suffix)))
        .enumerate()
        .map(|(i, (prefix, suffix))| {
            json!({
                "id": format!("00000000-0000-4000-9000-{:012}", i),
                "name": format!("{} {}", prefix, suffix),
            })
        })
        .collect();
    backend.put_rows(Table::Companies, existing);
    let recorder = ProgressRecorder::new();
    let config = SeedConfig {
        companies: 60,
        ..config()
    };

    let report = seed_only(&backend, &config, &recorder, &[SeedStep::Companies])
        .await
        .unwrap();

    let available = free_prefixes.len() * COMPANY_SUFFIXES.len();
    assert_eq!(report.data.companies.len(), available);
    assert_eq!(
        backend.row_count(Table::Companies),
        COMPANY_PREFIXES.len() * COMPANY_SUFFIXES.len()
    );
    for company in &report.data.companies {
        assert!(free_prefixes
            .iter()
            .any(|prefix| company.name.starts_with(&format!("{} ", prefix))));
    }
    let warnings: Vec<String> = recorder
        .for_step(SeedStep::Companies)
        .into_iter()
        .filter(|event| event.status == StepStatus::Warning)
        .map(|event| event.message)
        .collect();
    assert_eq!(
        warnings,
        vec![format!(
            "Generated {} of 60 companies; name space exhausted",
            available
        )]
    );
    assert!(recorder.with_status(StepStatus::Failed).is_empty());
}

#[tokio::test]
async fn test_run_without_personnel_continues() {
    let backend = backend_with_users(4);
    let recorder = ProgressRecorder::new();
    let config = SeedConfig {
        personnel: 0,
        ..config()
    };

    let report = seed_all(&backend, &config, &recorder).await.unwrap();
    let data = &report.data;

    assert!(data.personnel.is_empty());
    assert!(!data.projects.is_empty());
    assert!(recorder
        .for_step(SeedStep::Personnel)
        .iter()
        .any(|event| event.status == StepStatus::Warning
            && event.message.contains("continuing with reduced functionality")));
    assert!(data.projects.iter().all(|project| project.manager_id.is_none()));
    assert!(data.project_tasks.iter().all(|task| task.assignee_id.is_none()));
    assert!(data
        .financials
        .expenses
        .iter()
        .all(|expense| expense.approved_by.is_none()));

    let hr = recorder.for_step(SeedStep::Hr);
    assert!(hr.iter().any(|event| event.status == StepStatus::Skipped
        && event.message == "Skipping HR: Missing personnel data."));
    assert!(data.hr.payroll.is_empty());
}

#[tokio::test]
async fn test_first_regions_come_from_the_name_list() {
    let backend = MemoryBackend::new();
    let recorder = ProgressRecorder::new();
    let mut ctx = SeedContext::new(&backend, &recorder).with_rng_seed(1);

    let regions: Vec<Region> = seed_regions(&mut ctx, 3).await.unwrap();

    let names: Vec<&str> = regions.iter().map(|region| region.name.as_str()).collect();
    assert_eq!(names, REGION_NAMES[..3].to_vec());
    assert!(recorder
        .messages()
        .contains(&"Inserted batch 1/1 into regions (3 rows)".to_string()));
}

#[tokio::test]
async fn test_projects_skip_without_companies() {
    let backend = MemoryBackend::new();
    let recorder = ProgressRecorder::new();
    let mut ctx = SeedContext::new(&backend, &recorder).with_rng_seed(1);
    let regions = seed_regions(&mut ctx, 2).await.unwrap();
    let companies: Vec<Company> = Vec::new();
    let centers: Vec<FocusCenter> = Vec::new();

    let projects = seed_projects(&mut ctx, 5, &companies, &regions, &centers, &[])
        .await
        .unwrap();

    assert!(projects.is_empty());
    assert_eq!(backend.insert_calls(Table::Projects), 0);
    let skipped = recorder.with_status(StepStatus::Skipped);
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].message, "Skipping Projects: Missing companies data.");
}

#[tokio::test]
async fn test_chat_seeding_on_existing_projects() {
    let backend = backend_with_users(5);
    let recorder = ProgressRecorder::new();
    seed_all(&backend, &config(), &recorder).await.unwrap();
    let groups_before = backend.row_count(Table::ChatGroups);

    let chat_recorder = ProgressRecorder::new();
    let report = seed_chat(&backend, &config(), &chat_recorder).await.unwrap();

    assert_eq!(report.counts.len(), 2);
    assert_eq!(report.loaded[&SeedStep::Users], 5);
    assert_eq!(backend.row_count(Table::ChatGroups), groups_before + 5);
    let data = &report.data;
    for group in &data.chat_groups.groups {
        let creator = data
            .chat_groups
            .members
            .iter()
            .find(|member| member.group_id == group.id && member.user_id == group.created_by)
            .unwrap();
        assert_eq!(creator.role, bizops_seed::model::MemberRole::Admin);

        let messages: Vec<_> = data
            .chat_messages
            .iter()
            .filter(|message| message.group_id == group.id)
            .collect();
        assert!((1..=5).contains(&messages.len()));
        assert!(messages[0].created_at > group.created_at);
        for pair in messages.windows(2) {
            assert!(pair[0].created_at < pair[1].created_at);
        }
        for message in &messages {
            assert!(data.chat_groups.members.iter().any(|member| {
                member.group_id == group.id
                    && member.user_id == message.sender_id
                    && member.joined_at <= message.created_at
            }));
        }
    }
}

#[tokio::test]
async fn test_failed_batch_keeps_earlier_batches() {
    let backend = MemoryBackend::new();
    backend.fail_inserts_after(Table::Personnel, 2);
    let recorder = ProgressRecorder::new();
    let config = SeedConfig {
        personnel: 120,
        batch_size: 50,
        ..config()
    };

    let err = seed_all(&backend, &config, &recorder).await.unwrap_err();

    match err {
        SeedError::BatchInsert { table, offset, .. } => {
            assert_eq!(table, Table::Personnel);
            assert_eq!(offset, 100);
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(backend.row_count(Table::Personnel), 100);
    assert_eq!(backend.row_count(Table::Projects), 0);
    assert!(recorder
        .messages()
        .iter()
        .any(|m| m.starts_with("Failed to insert batch starting at offset 100 into personnel")));
}

#[tokio::test]
async fn test_missing_regions_abort_before_companies() {
    let backend = MemoryBackend::new();
    let recorder = ProgressRecorder::new();
    let config = SeedConfig {
        regions: 0,
        ..config()
    };
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
    let mut ctx = SeedContext::new(&backend, &recorder)
        .with_rng_seed(3)
        .with_clock(now);

    let err = run_plan(&mut ctx, &config, &SeedPlan::full().unwrap())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SeedError::EmptyCriticalStep {
            step: SeedStep::Regions
        }
    ));
    assert_eq!(backend.row_count(Table::Companies), 0);
    assert!(recorder.for_step(SeedStep::Companies).is_empty());
}
