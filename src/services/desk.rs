use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::api::LibraryApi;
use crate::error::AppError;
use crate::lookup::BookLookup;
use crate::models::{Assignment, Book, BookDraft, DashboardStats, Member, NewAssignment, NewBook, NewMember};
use crate::services::fines::{self, FineDetails, FineSummary};
use crate::services::filter;
use crate::services::forms::{self, BookForm, Choice, IssueForm, MemberForm};

/// Screen workflows on top of the library API and the metadata lookup.
pub struct DeskService {
    api: Arc<dyn LibraryApi>,
    lookup: Arc<dyn BookLookup>,
}

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub stats: DashboardStats,
    pub books: Vec<Book>,
}

#[derive(Debug, Serialize)]
pub struct InventoryView {
    pub books: Vec<Book>,
}

#[derive(Debug, Serialize)]
pub struct MembersView {
    pub members: Vec<Member>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ScanOutcome {
    /// Already catalogued; the caller should offer a restock instead.
    Existing { book: Book },
    Found { draft: BookDraft },
    NotFound,
}

#[derive(Debug, Serialize)]
pub struct IssueFormView {
    pub books: Vec<Choice>,
    pub members: Vec<Choice>,
    pub default_due_date: String,
}

#[derive(Debug, Serialize)]
pub struct IssuedRow {
    #[serde(flatten)]
    pub assignment: Assignment,
    pub late_days: i64,
    pub fine: i64,
    pub overdue: bool,
}

#[derive(Debug, Serialize)]
pub struct IssuedView {
    pub rows: Vec<IssuedRow>,
    #[serde(flatten)]
    pub summary: FineSummary,
}

impl DeskService {
    pub fn new(api: Arc<dyn LibraryApi>, lookup: Arc<dyn BookLookup>) -> Self {
        Self { api, lookup }
    }

    /// Stats and books are requested together; each falls back to empty on its own failure.
    pub async fn dashboard(&self, search: &str) -> DashboardView {
        let (stats, books) = tokio::join!(self.api.dashboard_stats(), self.api.list_books());

        let stats = stats.unwrap_or_else(|e| {
            error!("Stats Error: {}", e);
            DashboardStats::default()
        });
        let books = books.unwrap_or_else(|e| {
            error!("Books Error: {}", e);
            Vec::new()
        });

        DashboardView {
            stats,
            books: filter::dashboard_books(books, search)
                .into_iter()
                .map(Book::with_display_defaults)
                .collect(),
        }
    }

    pub async fn inventory(&self, search: &str) -> Result<InventoryView, AppError> {
        let books = self.api.list_books().await?;
        let books = filter::filter_books(books, search)
            .into_iter()
            .map(Book::with_display_defaults)
            .collect();
        Ok(InventoryView { books })
    }

    pub async fn scan_isbn(&self, code: &str) -> Result<ScanOutcome, AppError> {
        let isbn = forms::validate_isbn(code)?;

        let books = self.api.list_books().await?;
        if let Some(book) = books.into_iter().find(|b| b.isbn.as_deref() == Some(isbn)) {
            info!("ISBN {} already catalogued as book {}", isbn, book.id);
            return Ok(ScanOutcome::Existing { book });
        }

        match self.lookup.find_by_isbn(isbn).await? {
            Some(draft) => Ok(ScanOutcome::Found { draft }),
            None => {
                warn!("No volume found for ISBN {}", isbn);
                Ok(ScanOutcome::NotFound)
            }
        }
    }

    pub async fn add_book(&self, form: BookForm) -> Result<NewBook, AppError> {
        let book = form.validate()?;
        self.api.create_book(&book).await?;
        Ok(book)
    }

    /// Puts the whole book back with its quantity raised by `additional`.
    pub async fn restock(&self, id: i64, additional: i64) -> Result<Book, AppError> {
        let mut book = self
            .api
            .list_books()
            .await?
            .into_iter()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Book {}", id)))?;

        book.qty = book
            .qty
            .checked_add(additional)
            .ok_or_else(|| AppError::validation("Enter how many copies to add."))?;
        self.api.update_book(&book).await?;
        Ok(book)
    }

    pub async fn delete_book(&self, id: i64) -> Result<(), AppError> {
        self.api.delete_book(id).await?;
        info!("Book {} removed from inventory", id);
        Ok(())
    }

    pub async fn members(&self, search: &str) -> Result<MembersView, AppError> {
        let members = self.api.list_members().await?;
        Ok(MembersView { members: filter::filter_members(members, search) })
    }

    pub async fn add_member(&self, form: MemberForm, today: NaiveDate) -> Result<NewMember, AppError> {
        let member = form.validate(today)?;
        self.api.create_member(&member).await?;
        Ok(member)
    }

    pub async fn delete_member(&self, id: i64) -> Result<(), AppError> {
        self.api.delete_member(id).await?;
        info!("Member {} removed", id);
        Ok(())
    }

    async fn issuable(&self) -> Result<(Vec<Book>, Vec<Member>), AppError> {
        let (members, books) = tokio::try_join!(self.api.list_members(), self.api.list_books())?;

        let available: Vec<Book> = books.into_iter().filter(Book::in_stock).collect();
        if available.is_empty() {
            return Err(AppError::validation("No books available in stock."));
        }
        Ok((available, members))
    }

    pub async fn issue_form(&self, today: NaiveDate) -> Result<IssueFormView, AppError> {
        let (books, members) = self.issuable().await?;

        Ok(IssueFormView {
            books: books
                .into_iter()
                .map(|b| Choice { id: b.id, label: b.title })
                .collect(),
            members: members
                .into_iter()
                .map(|m| Choice { id: m.id, label: m.name })
                .collect(),
            default_due_date: forms::default_due_date(today).format("%Y-%m-%d").to_string(),
        })
    }

    pub async fn issue_book(&self, form: IssueForm, today: NaiveDate) -> Result<NewAssignment, AppError> {
        let (books, _) = self.issuable().await?;
        let assignment = form.validate(today)?;

        if !books.iter().any(|b| b.id == assignment.book.id) {
            return Err(AppError::validation("Selected book is not available."));
        }

        self.api.create_assignment(&assignment).await?;
        Ok(assignment)
    }

    pub async fn issued(&self, search: &str, today: NaiveDate) -> Result<IssuedView, AppError> {
        let mut assignments = self.api.list_assignments().await?;
        sort_newest_first(&mut assignments);

        let summary = fines::summarize(&assignments, today);
        let rows = assignments
            .into_iter()
            .filter(|a| filter::assignment_matches(a, search))
            .map(|assignment| {
                let FineDetails { days, fine } =
                    fines::fine_details(assignment.due_date.as_deref(), today);
                IssuedRow {
                    assignment,
                    late_days: days,
                    fine,
                    overdue: days > 0,
                }
            })
            .collect();

        Ok(IssuedView { rows, summary })
    }

    pub async fn return_book(&self, assignment_id: i64) -> Result<(), AppError> {
        self.api.delete_assignment(assignment_id).await?;
        info!("Assignment {} returned", assignment_id);
        Ok(())
    }
}

/// Newest issue date first; rows without a readable date go last.
fn sort_newest_first(assignments: &mut [Assignment]) {
    assignments.sort_by(|a, b| {
        let a_day = a.issue_date.as_deref().and_then(fines::parse_day);
        let b_day = b.issue_date.as_deref().and_then(fines::parse_day);
        b_day.cmp(&a_day)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(id: i64, issued: Option<&str>) -> Assignment {
        Assignment {
            id,
            book: None,
            member: None,
            issue_date: issued.map(str::to_string),
            due_date: None,
            status: None,
        }
    }

    #[test]
    fn sorts_by_issue_date_descending() {
        let mut rows = vec![
            assignment(1, Some("2026-01-05")),
            assignment(2, None),
            assignment(3, Some("2026-03-01")),
            assignment(4, Some("garbage")),
            assignment(5, Some("2026-02-14")),
        ];

        sort_newest_first(&mut rows);
        let ids: Vec<i64> = rows.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![3, 5, 1, 2, 4]);
    }
}
