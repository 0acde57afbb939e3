use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub type Id = String;

pub fn generate_id() -> Id {
    Uuid::new_v4().to_string()
}

/// Tables written or read by the seed pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Regions,
    FocusCenters,
    Companies,
    Personnel,
    Profiles,
    Projects,
    Milestones,
    ProjectTasks,
    ProjectForecasts,
    ProjectExpenses,
    ChatGroups,
    ChatGroupMembers,
    ChatMessages,
    KanbanColumns,
    KanbanTasks,
    KbCategories,
    KbArticles,
    HrLeaveRequests,
    HrPayroll,
    HrBenefits,
    HrPerformanceReviews,
    HrDocuments,
    Suppliers,
    InventoryItems,
    PurchaseOrders,
    Equipment,
    WorkOrders,
    CrmCompanies,
    CrmContacts,
    CrmDeals,
    CrmCommunicationLogs,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Regions => "regions",
            Table::FocusCenters => "focus_centers",
            Table::Companies => "companies",
            Table::Personnel => "personnel",
            Table::Profiles => "profiles",
            Table::Projects => "projects",
            Table::Milestones => "milestones",
            Table::ProjectTasks => "project_tasks",
            Table::ProjectForecasts => "project_forecasts",
            Table::ProjectExpenses => "project_expenses",
            Table::ChatGroups => "chat_groups",
            Table::ChatGroupMembers => "chat_group_members",
            Table::ChatMessages => "chat_messages",
            Table::KanbanColumns => "kanban_columns",
            Table::KanbanTasks => "kanban_tasks",
            Table::KbCategories => "kb_categories",
            Table::KbArticles => "kb_articles",
            Table::HrLeaveRequests => "hr_leave_requests",
            Table::HrPayroll => "hr_payroll",
            Table::HrBenefits => "hr_benefits",
            Table::HrPerformanceReviews => "hr_performance_reviews",
            Table::HrDocuments => "hr_documents",
            Table::Suppliers => "suppliers",
            Table::InventoryItems => "inventory_items",
            Table::PurchaseOrders => "purchase_orders",
            Table::Equipment => "equipment",
            Table::WorkOrders => "work_orders",
            Table::CrmCompanies => "crm_companies",
            Table::CrmContacts => "crm_contacts",
            Table::CrmDeals => "crm_deals",
            Table::CrmCommunicationLogs => "crm_communication_logs",
        }
    }

    /// Columns carrying a UNIQUE constraint in the schema.
    pub fn unique_columns(&self) -> &'static [&'static str] {
        match self {
            Table::Regions | Table::Companies => &["id", "name"],
            Table::InventoryItems => &["id", "sku"],
            _ => &["id"],
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed row of one table, shared by the generators and the backend layer.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    const TABLE: Table;

    fn id(&self) -> &Id;
}

macro_rules! impl_record {
    ($ty:ty, $table:expr) => {
        impl $crate::model::Record for $ty {
            const TABLE: $crate::model::Table = $table;

            fn id(&self) -> &$crate::model::Id {
                &self.id
            }
        }
    };
}

pub(crate) use impl_record;
