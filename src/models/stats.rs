use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub total_books: i64,
    pub total_members: i64,
    pub total_assignments: i64,
    pub total_returns: i64,
}
