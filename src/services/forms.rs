use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{EntityRef, ISSUED_STATUS, NewAssignment, NewBook, NewMember};

/// Shortest input accepted as an ISBN (ISBN-10).
pub const MIN_ISBN_LEN: usize = 10;

/// Default loan period offered by the issue form.
pub const LOAN_DAYS: i64 = 7;

/// Raw add-book form. Every field is what the user typed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookForm {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub image_url: String,
    pub category: String,
    pub qty: String,
}

impl BookForm {
    pub fn validate(self) -> Result<NewBook, AppError> {
        let title = self.title.trim();
        let author = self.author.trim();
        let qty = self.qty.trim();

        if title.is_empty() || author.is_empty() || qty.is_empty() {
            return Err(AppError::validation("Complete the required information.!"));
        }

        let qty = qty
            .parse::<i64>()
            .map_err(|_| AppError::validation("Quantity must be a whole number."))?;

        Ok(NewBook {
            title: title.to_string(),
            author: author.to_string(),
            image_url: self.image_url.trim().to_string(),
            category: self.category.trim().to_string(),
            qty,
            isbn: self.isbn.trim().to_string(),
        })
    }
}

pub fn validate_isbn(code: &str) -> Result<&str, AppError> {
    let code = code.trim();
    if code.chars().count() < MIN_ISBN_LEN {
        return Err(AppError::validation("Give a correct ISBN."));
    }
    Ok(code)
}

#[derive(Debug, Clone, Deserialize)]
pub struct RestockForm {
    pub additional: String,
}

impl RestockForm {
    pub fn validate(&self) -> Result<i64, AppError> {
        match self.additional.trim().parse::<i64>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(AppError::validation("Enter how many copies to add.")),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MemberForm {
    pub name: String,
    pub email: String,
}

impl MemberForm {
    pub fn validate(self, today: NaiveDate) -> Result<NewMember, AppError> {
        let name = self.name.trim();
        let email = self.email.trim();

        if name.is_empty() || email.is_empty() {
            return Err(AppError::validation("Please fill all fields"));
        }

        Ok(NewMember {
            name: name.to_string(),
            email: email.to_string(),
            registered_date: today.format("%Y-%m-%d").to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IssueForm {
    pub book_id: Option<i64>,
    pub member_id: Option<i64>,
    pub due_date: String,
}

impl IssueForm {
    pub fn validate(self, today: NaiveDate) -> Result<NewAssignment, AppError> {
        let due_date = self.due_date.trim();
        let (Some(book_id), Some(member_id)) = (self.book_id, self.member_id) else {
            return Err(AppError::validation("Fill all fields"));
        };
        if due_date.is_empty() {
            return Err(AppError::validation("Fill all fields"));
        }

        let due = NaiveDate::parse_from_str(due_date, "%Y-%m-%d")
            .map_err(|_| AppError::validation("Return date must be YYYY-MM-DD."))?;

        Ok(NewAssignment {
            book: EntityRef { id: book_id },
            member: EntityRef { id: member_id },
            due_date: due.format("%Y-%m-%d").to_string(),
            issue_date: today.format("%Y-%m-%d").to_string(),
            status: ISSUED_STATUS.to_string(),
        })
    }
}

pub fn default_due_date(today: NaiveDate) -> NaiveDate {
    today + Duration::days(LOAN_DAYS)
}

#[derive(Debug, Clone, Serialize)]
pub struct Choice {
    pub id: i64,
    pub label: String,
}
