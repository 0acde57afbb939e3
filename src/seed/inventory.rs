use crate::model::{
    generate_id, InventoryItem, Personnel, PurchaseOrder, PurchaseOrderStatus, Supplier,
};
use crate::seed::batch::insert_in_batches;
use crate::seed::context::SeedContext;
use crate::seed::data::{ITEM_CATALOG, SUPPLIER_NAMES};
use crate::seed::error::SeedError;
use crate::seed::generate::{count_at_most, days_before, money, phone, pick, slug};
use crate::seed::plan::SeedStep;
use crate::store::Backend;
use chrono::Duration;
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Copy)]
pub struct InventoryVolumes {
    pub suppliers: usize,
    pub items: usize,
    pub max_orders_per_item: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct InventoryRecords {
    pub suppliers: Vec<Supplier>,
    pub items: Vec<InventoryItem>,
    pub purchase_orders: Vec<PurchaseOrder>,
}

impl InventoryRecords {
    pub fn len(&self) -> usize {
        self.suppliers.len() + self.items.len() + self.purchase_orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn supplier_name(index: usize) -> String {
    let base = SUPPLIER_NAMES[index % SUPPLIER_NAMES.len()];
    match index / SUPPLIER_NAMES.len() {
        0 => base.to_string(),
        round => format!("{} {}", base, round + 1),
    }
}

/// Stock keeping unit: category initials plus the first block of the item id.
fn sku(category: &str, id: &str) -> String {
    let prefix: String = category.chars().take(3).collect();
    format!("{}-{}", prefix.to_uppercase(), id[..8].to_uppercase())
}

pub async fn seed_inventory<B: Backend + ?Sized>(
    ctx: &mut SeedContext<'_, B>,
    volumes: InventoryVolumes,
    personnel: &[Personnel],
) -> Result<InventoryRecords, SeedError> {
    let step = SeedStep::Inventory;
    if personnel.is_empty() {
        ctx.warn(step, "No personnel available; purchase orders will have no requester");
    }

    let (now, today) = (ctx.now(), ctx.today());
    let rng = ctx.rng();
    let mut inventory = InventoryRecords::default();

    for index in 0..volumes.suppliers {
        let name = supplier_name(index);
        inventory.suppliers.push(Supplier {
            id: generate_id(),
            contact_email: format!("sales@{}.example", slug(&name)),
            name,
            phone: Some(phone(rng)),
            rating: rng.gen_range(1..=5),
            created_at: now,
        });
    }

    if !inventory.suppliers.is_empty() {
        for index in 0..volumes.items {
            let (name, category) = ITEM_CATALOG[index % ITEM_CATALOG.len()];
            let Some(supplier) = pick(rng, &inventory.suppliers) else {
                break;
            };
            let id = generate_id();
            inventory.items.push(InventoryItem {
                sku: sku(category, &id),
                id,
                supplier_id: supplier.id.clone(),
                name: name.to_string(),
                category: category.to_string(),
                quantity: rng.gen_range(0..=500),
                unit_price: money(rng, 2.0, 2_500.0),
                reorder_level: rng.gen_range(5..=50),
                created_at: now,
            });
        }
    }

    for item in &inventory.items {
        for _ in 0..count_at_most(rng, volumes.max_orders_per_item) {
            let quantity = rng.gen_range(1..=100);
            let order_date = days_before(rng, today, 120);
            inventory.purchase_orders.push(PurchaseOrder {
                id: generate_id(),
                supplier_id: item.supplier_id.clone(),
                item_id: item.id.clone(),
                quantity,
                total_amount: (f64::from(quantity) * item.unit_price * 100.0).round() / 100.0,
                status: match rng.gen_range(0..4) {
                    0 => PurchaseOrderStatus::Draft,
                    1 => PurchaseOrderStatus::Ordered,
                    2 => PurchaseOrderStatus::Received,
                    _ => PurchaseOrderStatus::Cancelled,
                },
                ordered_by: pick(rng, personnel).map(|person| person.id.clone()),
                order_date,
                expected_date: order_date + Duration::days(rng.gen_range(3..=45)),
                created_at: now,
            });
        }
    }

    insert_in_batches(ctx, step, &inventory.suppliers).await?;
    insert_in_batches(ctx, step, &inventory.items).await?;
    insert_in_batches(ctx, step, &inventory.purchase_orders).await?;
    Ok(inventory)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supplier_names_wrap_with_suffix() {
        assert_eq!(supplier_name(0), SUPPLIER_NAMES[0]);
        assert_eq!(
            supplier_name(SUPPLIER_NAMES.len()),
            format!("{} 2", SUPPLIER_NAMES[0])
        );
    }

    #[test]
    fn test_sku_uses_category_and_id() {
        assert_eq!(
            sku("Electrical", "3f2a9c1e-0000-4000-8000-000000000000"),
            "ELE-3F2A9C1E"
        );
    }
}
