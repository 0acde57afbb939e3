//! Inventory, maintenance and CRM rows.

use crate::model::common::impl_record;
use crate::model::{Id, Priority, Table};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: Id,
    pub name: String,
    pub contact_email: String,
    pub phone: Option<String>,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: Id,
    pub supplier_id: Id,
    pub sku: String,
    pub name: String,
    pub category: String,
    pub quantity: i32,
    pub unit_price: f64,
    pub reorder_level: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseOrderStatus {
    Draft,
    Ordered,
    Received,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: Id,
    pub supplier_id: Id,
    pub item_id: Id,
    pub quantity: i32,
    pub total_amount: f64,
    pub status: PurchaseOrderStatus,
    pub ordered_by: Option<Id>,
    pub order_date: NaiveDate,
    pub expected_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipmentStatus {
    Operational,
    #[serde(rename = "Under Maintenance")]
    UnderMaintenance,
    #[serde(rename = "Out of Service")]
    OutOfService,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: Id,
    pub name: String,
    pub equipment_type: String,
    pub serial_number: String,
    pub region_id: Option<Id>,
    pub status: EquipmentStatus,
    pub purchase_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkOrderStatus {
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrder {
    pub id: Id,
    pub equipment_id: Id,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub status: WorkOrderStatus,
    pub assigned_to: Option<Id>,
    pub scheduled_date: NaiveDate,
    pub completed_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrmCompany {
    pub id: Id,
    pub name: String,
    pub industry: String,
    pub website: Option<String>,
    pub annual_revenue: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrmContact {
    pub id: Id,
    pub company_id: Id,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealStage {
    Lead,
    Qualified,
    Proposal,
    Negotiation,
    ClosedWon,
    ClosedLost,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrmDeal {
    pub id: Id,
    pub company_id: Id,
    pub contact_id: Id,
    pub title: String,
    pub value: f64,
    pub stage: DealStage,
    pub owner_id: Option<Id>,
    pub expected_close_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrmCommunicationLog {
    pub id: Id,
    pub contact_id: Id,
    pub deal_id: Option<Id>,
    pub channel: String,
    pub summary: String,
    pub logged_by: Option<Id>,
    pub occurred_at: DateTime<Utc>,
}

impl_record!(Supplier, Table::Suppliers);
impl_record!(InventoryItem, Table::InventoryItems);
impl_record!(PurchaseOrder, Table::PurchaseOrders);
impl_record!(Equipment, Table::Equipment);
impl_record!(WorkOrder, Table::WorkOrders);
impl_record!(CrmCompany, Table::CrmCompanies);
impl_record!(CrmContact, Table::CrmContacts);
impl_record!(CrmDeal, Table::CrmDeals);
impl_record!(CrmCommunicationLog, Table::CrmCommunicationLogs);
