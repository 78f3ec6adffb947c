use crate::models::{Assignment, Book, Member};

/// Rows shown in the dashboard's recent-books table.
pub const DASHBOARD_BOOK_LIMIT: usize = 5;

/// Case-insensitive substring match. An empty term matches everything.
pub fn matches_term(haystack: &str, term: &str) -> bool {
    haystack.to_lowercase().contains(&term.to_lowercase())
}

pub fn book_matches(book: &Book, term: &str) -> bool {
    matches_term(&book.title, term)
        || matches_term(&book.author, term)
        || book.isbn.as_deref().is_some_and(|isbn| isbn.contains(term))
}

pub fn member_matches(member: &Member, term: &str) -> bool {
    matches_term(&member.name, term) || matches_term(&member.email, term)
}

pub fn assignment_matches(assignment: &Assignment, term: &str) -> bool {
    assignment
        .member
        .as_ref()
        .is_some_and(|m| matches_term(&m.name, term))
        || assignment
            .book
            .as_ref()
            .is_some_and(|b| matches_term(&b.title, term))
}

pub fn filter_books(books: Vec<Book>, term: &str) -> Vec<Book> {
    books.into_iter().filter(|b| book_matches(b, term)).collect()
}

/// Title-only search, capped for the dashboard.
pub fn dashboard_books(books: Vec<Book>, term: &str) -> Vec<Book> {
    books
        .into_iter()
        .filter(|b| matches_term(&b.title, term))
        .take(DASHBOARD_BOOK_LIMIT)
        .collect()
}

pub fn filter_members(members: Vec<Member>, term: &str) -> Vec<Member> {
    members.into_iter().filter(|m| member_matches(m, term)).collect()
}
