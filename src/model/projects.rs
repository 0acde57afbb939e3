use crate::model::common::impl_record;
use crate::model::{Id, Table};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    Planning,
    Active,
    #[serde(rename = "On Hold")]
    OnHold,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Id,
    pub name: String,
    pub description: Option<String>,
    pub company_id: Id,
    pub region_id: Id,
    pub focus_center_id: Id,
    pub manager_id: Option<Id>,
    pub status: ProjectStatus,
    pub startdate: NaiveDate,
    pub enddate: NaiveDate,
    pub budget: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MilestoneStatus {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: Id,
    pub project_id: Id,
    pub name: String,
    pub description: Option<String>,
    pub startdate: NaiveDate,
    pub duedate: NaiveDate,
    pub status: MilestoneStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    Review,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectTask {
    pub id: Id,
    pub project_id: Id,
    pub milestone_id: Id,
    pub name: String,
    pub description: Option<String>,
    pub assignee_id: Option<Id>,
    pub status: TaskStatus,
    pub priority: Priority,
    pub startdate: NaiveDate,
    pub duedate: NaiveDate,
    pub actual_end_date: Option<NaiveDate>,
    pub estimated_hours: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectForecast {
    pub id: Id,
    pub project_id: Id,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub forecast_amount: f64,
    pub actual_amount: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectExpense {
    pub id: Id,
    pub project_id: Id,
    pub category: String,
    pub description: String,
    pub amount: f64,
    pub expense_date: NaiveDate,
    pub approved_by: Option<Id>,
    pub created_at: DateTime<Utc>,
}

impl_record!(Project, Table::Projects);
impl_record!(Milestone, Table::Milestones);
impl_record!(ProjectTask, Table::ProjectTasks);
impl_record!(ProjectForecast, Table::ProjectForecasts);
impl_record!(ProjectExpense, Table::ProjectExpenses);
