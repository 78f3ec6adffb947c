pub mod desk;
pub mod filter;
pub mod fines;
pub mod forms;

pub use desk::{
    DashboardView, DeskService, InventoryView, IssueFormView, IssuedRow, IssuedView, MembersView,
    ScanOutcome,
};
pub use fines::{FINE_PER_DAY, FineDetails, FineSummary};
