#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use chrono::{Duration, NaiveDate};
use serde_json::Value;
use tower::ServiceExt;

use library_desk::api::LibraryApi;
use library_desk::config::DeskConfig;
use library_desk::error::AppError;
use library_desk::lookup::BookLookup;
use library_desk::models::{
    Assignment, Book, BookDraft, DashboardStats, Member, NewAssignment, NewBook, NewMember,
};
use library_desk::routes::router;
use library_desk::state::AppState;
use library_desk::store;

#[derive(Default)]
pub struct Library {
    pub books: Vec<Book>,
    pub members: Vec<Member>,
    pub assignments: Vec<Assignment>,
    pub stats: DashboardStats,
    pub fail_stats: bool,
    pub offline: bool,
    next_id: i64,
}

impl Library {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        1000 + self.next_id
    }

    fn check_online(&self) -> Result<(), AppError> {
        if self.offline {
            return Err(AppError::Api("connection refused".to_string()));
        }
        Ok(())
    }
}

/// In-memory stand-in for the library REST API.
#[derive(Default, Clone)]
pub struct FakeLibraryApi {
    pub inner: Arc<Mutex<Library>>,
}

impl FakeLibraryApi {
    pub fn with(f: impl FnOnce(&mut Library)) -> Self {
        let api = Self::default();
        f(&mut api.inner.lock().unwrap());
        api
    }

    pub fn library(&self) -> std::sync::MutexGuard<'_, Library> {
        self.inner.lock().unwrap()
    }
}

#[async_trait]
impl LibraryApi for FakeLibraryApi {
    async fn list_books(&self) -> Result<Vec<Book>, AppError> {
        let lib = self.library();
        lib.check_online()?;
        Ok(lib.books.clone())
    }

    async fn create_book(&self, book: &NewBook) -> Result<(), AppError> {
        let mut lib = self.library();
        lib.check_online()?;
        let id = lib.next_id();
        lib.books.push(Book {
            id,
            title: book.title.clone(),
            author: book.author.clone(),
            image_url: Some(book.image_url.clone()),
            category: Some(book.category.clone()),
            qty: book.qty,
            isbn: Some(book.isbn.clone()),
        });
        Ok(())
    }

    async fn update_book(&self, book: &Book) -> Result<(), AppError> {
        let mut lib = self.library();
        lib.check_online()?;
        match lib.books.iter_mut().find(|b| b.id == book.id) {
            Some(existing) => {
                *existing = book.clone();
                Ok(())
            }
            None => Err(AppError::Api(format!("PUT /books/{} failed with 404", book.id))),
        }
    }

    async fn delete_book(&self, id: i64) -> Result<(), AppError> {
        let mut lib = self.library();
        lib.check_online()?;
        lib.books.retain(|b| b.id != id);
        Ok(())
    }

    async fn list_members(&self) -> Result<Vec<Member>, AppError> {
        let lib = self.library();
        lib.check_online()?;
        Ok(lib.members.clone())
    }

    async fn create_member(&self, member: &NewMember) -> Result<(), AppError> {
        let mut lib = self.library();
        lib.check_online()?;
        let id = lib.next_id();
        lib.members.push(Member {
            id,
            name: member.name.clone(),
            email: member.email.clone(),
            registered_date: Some(member.registered_date.clone()),
        });
        Ok(())
    }

    async fn delete_member(&self, id: i64) -> Result<(), AppError> {
        let mut lib = self.library();
        lib.check_online()?;
        lib.members.retain(|m| m.id != id);
        Ok(())
    }

    async fn list_assignments(&self) -> Result<Vec<Assignment>, AppError> {
        let lib = self.library();
        lib.check_online()?;
        Ok(lib.assignments.clone())
    }

    async fn create_assignment(&self, assignment: &NewAssignment) -> Result<(), AppError> {
        let mut lib = self.library();
        lib.check_online()?;
        let id = lib.next_id();
        let book = lib.books.iter().find(|b| b.id == assignment.book.id).cloned();
        let member = lib.members.iter().find(|m| m.id == assignment.member.id).cloned();
        lib.assignments.push(Assignment {
            id,
            book,
            member,
            issue_date: Some(assignment.issue_date.clone()),
            due_date: Some(assignment.due_date.clone()),
            status: Some(assignment.status.clone()),
        });
        Ok(())
    }

    async fn delete_assignment(&self, id: i64) -> Result<(), AppError> {
        let mut lib = self.library();
        lib.check_online()?;
        lib.assignments.retain(|a| a.id != id);
        Ok(())
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, AppError> {
        let lib = self.library();
        lib.check_online()?;
        if lib.fail_stats {
            return Err(AppError::Api("GET /dashboard/stats failed with 500".to_string()));
        }
        Ok(lib.stats.clone())
    }
}

/// Lookup that knows a fixed set of drafts; anything else is "not found".
#[derive(Default, Clone)]
pub struct FakeLookup {
    pub drafts: Vec<BookDraft>,
    pub broken: bool,
}

#[async_trait]
impl BookLookup for FakeLookup {
    async fn find_by_isbn(&self, isbn: &str) -> Result<Option<BookDraft>, AppError> {
        if self.broken {
            return Err(AppError::Lookup("dns error".to_string()));
        }
        Ok(self.drafts.iter().find(|d| d.isbn == isbn).cloned())
    }
}

pub fn book(id: i64, title: &str, author: &str, qty: i64, isbn: &str) -> Book {
    Book {
        id,
        title: title.to_string(),
        author: author.to_string(),
        image_url: None,
        category: Some("General".to_string()),
        qty,
        isbn: Some(isbn.to_string()),
    }
}

pub fn member(id: i64, name: &str, email: &str) -> Member {
    Member {
        id,
        name: name.to_string(),
        email: email.to_string(),
        registered_date: Some("2026-01-02".to_string()),
    }
}

/// Fixed desk day so fixtures and handlers agree on "today".
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
}

pub fn days_from_today(offset: i64) -> String {
    (today() + Duration::days(offset)).format("%Y-%m-%d").to_string()
}

pub async fn app_with(api: FakeLibraryApi, lookup: FakeLookup) -> Router {
    let pool = store::connect_in_memory()
        .await
        .expect("Failed to create store");

    router(AppState {
        store: pool,
        api: Arc::new(api),
        lookup: Arc::new(lookup),
        config: Arc::new(DeskConfig::default()),
        today,
    })
}

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: Value,
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    TestResponse { status, location, body }
}

pub async fn login(app: &Router) {
    let res = send(
        app,
        "POST",
        "/login",
        Some(serde_json::json!({ "username": "admin", "password": "123" })),
    )
    .await;
    assert_eq!(res.status, StatusCode::SEE_OTHER);
    assert_eq!(res.location.as_deref(), Some("/dashboard"));
}
