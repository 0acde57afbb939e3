use crate::model::{
    generate_id, Equipment, EquipmentStatus, Personnel, Priority, Region, WorkOrder,
    WorkOrderStatus,
};
use crate::seed::batch::insert_in_batches;
use crate::seed::context::SeedContext;
use crate::seed::data::{EQUIPMENT_TYPES, WORK_ORDER_TITLES};
use crate::seed::error::SeedError;
use crate::seed::generate::{count_at_most, days_before, pick, word};
use crate::seed::plan::SeedStep;
use crate::store::Backend;
use chrono::Duration;
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct MaintenanceRecords {
    pub equipment: Vec<Equipment>,
    pub work_orders: Vec<WorkOrder>,
}

impl MaintenanceRecords {
    pub fn len(&self) -> usize {
        self.equipment.len() + self.work_orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn work_order_status<R: Rng + ?Sized>(rng: &mut R) -> WorkOrderStatus {
    match rng.gen_range(0..3) {
        0 => WorkOrderStatus::Open,
        1 => WorkOrderStatus::InProgress,
        _ => WorkOrderStatus::Completed,
    }
}

/// Equipment spread over regions, each with `0..=max_work_orders` work
/// orders. Only completed orders carry a completion date.
pub async fn seed_maintenance<B: Backend + ?Sized>(
    ctx: &mut SeedContext<'_, B>,
    equipment_count: usize,
    max_work_orders: usize,
    regions: &[Region],
    personnel: &[Personnel],
) -> Result<MaintenanceRecords, SeedError> {
    let step = SeedStep::Maintenance;
    if regions.is_empty() {
        ctx.warn(step, "No regions available; equipment will not be assigned a region");
    }
    if personnel.is_empty() {
        ctx.warn(step, "No personnel available; work orders will be unassigned");
    }

    let (now, today) = (ctx.now(), ctx.today());
    let rng = ctx.rng();
    let mut records = MaintenanceRecords::default();
    for index in 0..equipment_count {
        let equipment_type = word(rng, EQUIPMENT_TYPES);
        let purchase_date = days_before(rng, today, 365 * 10);
        let equipment = Equipment {
            id: generate_id(),
            name: format!("{} #{}", equipment_type, index + 1),
            equipment_type: equipment_type.to_string(),
            serial_number: format!("SN-{:08}", rng.gen_range(0..100_000_000u32)),
            region_id: pick(rng, regions).map(|region| region.id.clone()),
            status: match rng.gen_range(0..10) {
                0 => EquipmentStatus::OutOfService,
                1 | 2 => EquipmentStatus::UnderMaintenance,
                _ => EquipmentStatus::Operational,
            },
            purchase_date,
            created_at: now,
        };

        for _ in 0..count_at_most(rng, max_work_orders) {
            let status = work_order_status(rng);
            let scheduled_date = days_before(rng, today, 90).max(purchase_date);
            let completed_date = (status == WorkOrderStatus::Completed)
                .then(|| scheduled_date + Duration::days(rng.gen_range(0..=14)));
            records.work_orders.push(WorkOrder {
                id: generate_id(),
                equipment_id: equipment.id.clone(),
                title: word(rng, WORK_ORDER_TITLES).to_string(),
                description: Some(format!("{} on {}", word(rng, WORK_ORDER_TITLES), equipment.name)),
                priority: match rng.gen_range(0..4) {
                    0 => Priority::Low,
                    1 => Priority::Medium,
                    2 => Priority::High,
                    _ => Priority::Critical,
                },
                status,
                assigned_to: pick(rng, personnel).map(|person| person.id.clone()),
                scheduled_date,
                completed_date,
                created_at: now,
            });
        }
        records.equipment.push(equipment);
    }

    insert_in_batches(ctx, step, &records.equipment).await?;
    insert_in_batches(ctx, step, &records.work_orders).await?;
    Ok(records)
}
