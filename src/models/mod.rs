pub mod assignment;
pub mod book;
pub mod member;
pub mod notice;
pub mod stats;

pub use assignment::{Assignment, EntityRef, NewAssignment, ISSUED_STATUS};
pub use book::{Book, BookDraft, DEFAULT_CATEGORY, NewBook, PLACEHOLDER_COVER};
pub use member::{Member, NewMember};
pub use notice::{Notice, NoticeIcon};
pub use stats::DashboardStats;
