//! Chat, kanban and knowledge base rows.

use crate::model::common::impl_record;
use crate::model::{Id, Priority, Table};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatGroup {
    pub id: Id,
    pub name: String,
    pub description: Option<String>,
    pub project_id: Option<Id>,
    pub created_by: Id,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Admin,
    Member,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatGroupMember {
    pub id: Id,
    pub group_id: Id,
    pub user_id: Id,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Id,
    pub group_id: Id,
    pub sender_id: Id,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KanbanColumn {
    pub id: Id,
    pub project_id: Id,
    pub name: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KanbanTask {
    pub id: Id,
    pub column_id: Id,
    pub title: String,
    pub description: Option<String>,
    pub assignee_id: Option<Id>,
    pub priority: Priority,
    pub position: i32,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KbCategory {
    pub id: Id,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KbArticle {
    pub id: Id,
    pub category_id: Id,
    pub title: String,
    pub content: String,
    pub author_id: Option<Id>,
    pub tags: Vec<String>,
    pub published: bool,
    pub views: i32,
    pub created_at: DateTime<Utc>,
}

impl_record!(ChatGroup, Table::ChatGroups);
impl_record!(ChatGroupMember, Table::ChatGroupMembers);
impl_record!(ChatMessage, Table::ChatMessages);
impl_record!(KanbanColumn, Table::KanbanColumns);
impl_record!(KanbanTask, Table::KanbanTasks);
impl_record!(KbCategory, Table::KbCategories);
impl_record!(KbArticle, Table::KbArticles);
