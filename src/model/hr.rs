use crate::model::common::impl_record;
use crate::model::{Id, Table};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: Id,
    pub personnel_id: Id,
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
    pub status: ApprovalStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRecord {
    pub id: Id,
    pub personnel_id: Id,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub gross_pay: f64,
    pub deductions: f64,
    pub net_pay: f64,
    pub paid_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Benefit {
    pub id: Id,
    pub personnel_id: Id,
    pub benefit_type: String,
    pub provider: String,
    pub monthly_cost: f64,
    pub start_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReview {
    pub id: Id,
    pub personnel_id: Id,
    pub reviewer_id: Option<Id>,
    pub review_date: NaiveDate,
    pub rating: i32,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HrDocument {
    pub id: Id,
    pub personnel_id: Id,
    pub document_type: String,
    pub title: String,
    pub file_url: String,
    pub uploaded_at: DateTime<Utc>,
}

impl_record!(LeaveRequest, Table::HrLeaveRequests);
impl_record!(PayrollRecord, Table::HrPayroll);
impl_record!(Benefit, Table::HrBenefits);
impl_record!(PerformanceReview, Table::HrPerformanceReviews);
impl_record!(HrDocument, Table::HrDocuments);
