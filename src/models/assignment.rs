use serde::{Deserialize, Serialize};

use super::{Book, Member};

pub const ISSUED_STATUS: &str = "Issued";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: i64,
    #[serde(default)]
    pub book: Option<Book>,
    #[serde(default)]
    pub member: Option<Member>,
    #[serde(default)]
    pub issue_date: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Reference to an existing entity by id, as the API expects in nested payloads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAssignment {
    pub book: EntityRef,
    pub member: EntityRef,
    pub due_date: String,
    pub issue_date: String,
    pub status: String,
}
