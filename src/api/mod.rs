use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::models::{Assignment, Book, DashboardStats, Member, NewAssignment, NewBook, NewMember};

/// The library REST API. Owns stock, members, loans and their statistics.
#[async_trait]
pub trait LibraryApi: Send + Sync {
    async fn list_books(&self) -> Result<Vec<Book>, AppError>;
    async fn create_book(&self, book: &NewBook) -> Result<(), AppError>;
    async fn update_book(&self, book: &Book) -> Result<(), AppError>;
    async fn delete_book(&self, id: i64) -> Result<(), AppError>;

    async fn list_members(&self) -> Result<Vec<Member>, AppError>;
    async fn create_member(&self, member: &NewMember) -> Result<(), AppError>;
    async fn delete_member(&self, id: i64) -> Result<(), AppError>;

    async fn list_assignments(&self) -> Result<Vec<Assignment>, AppError>;
    async fn create_assignment(&self, assignment: &NewAssignment) -> Result<(), AppError>;
    async fn delete_assignment(&self, id: i64) -> Result<(), AppError>;

    async fn dashboard_stats(&self) -> Result<DashboardStats, AppError>;
}

pub struct LibraryHttpClient {
    client: Client,
    base_url: String,
}

impl LibraryHttpClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build http client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self.client.get(self.url(path)).send().await?;
        let response = ensure_success(response, "GET", path).await?;

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::Api(format!("Failed to parse response of GET {}: {}", path, e)))
    }

    async fn delete(&self, path: &str) -> Result<(), AppError> {
        let response = self.client.delete(self.url(path)).send().await?;
        ensure_success(response, "DELETE", path).await?;
        Ok(())
    }
}

async fn ensure_success(response: Response, method: &str, path: &str) -> Result<Response, AppError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(AppError::Api(format!("{} {} failed with {}: {}", method, path, status, body)))
}

#[async_trait]
impl LibraryApi for LibraryHttpClient {
    async fn list_books(&self) -> Result<Vec<Book>, AppError> {
        self.get_json("/books").await
    }

    async fn create_book(&self, book: &NewBook) -> Result<(), AppError> {
        let response = self.client.post(self.url("/books")).json(book).send().await?;
        ensure_success(response, "POST", "/books").await?;
        tracing::info!("Book created: {}", book.title);
        Ok(())
    }

    async fn update_book(&self, book: &Book) -> Result<(), AppError> {
        let path = format!("/books/{}", book.id);
        let response = self.client.put(self.url(&path)).json(book).send().await?;
        ensure_success(response, "PUT", &path).await?;
        tracing::info!("Book {} updated (qty {})", book.id, book.qty);
        Ok(())
    }

    async fn delete_book(&self, id: i64) -> Result<(), AppError> {
        self.delete(&format!("/books/{}", id)).await
    }

    async fn list_members(&self) -> Result<Vec<Member>, AppError> {
        self.get_json("/members").await
    }

    async fn create_member(&self, member: &NewMember) -> Result<(), AppError> {
        let response = self.client.post(self.url("/members")).json(member).send().await?;
        ensure_success(response, "POST", "/members").await?;
        tracing::info!("Member registered: {}", member.email);
        Ok(())
    }

    async fn delete_member(&self, id: i64) -> Result<(), AppError> {
        self.delete(&format!("/members/{}", id)).await
    }

    async fn list_assignments(&self) -> Result<Vec<Assignment>, AppError> {
        self.get_json("/assignments").await
    }

    async fn create_assignment(&self, assignment: &NewAssignment) -> Result<(), AppError> {
        let response = self
            .client
            .post(self.url("/assignments"))
            .json(assignment)
            .send()
            .await?;
        ensure_success(response, "POST", "/assignments").await?;
        tracing::info!(
            "Book {} issued to member {} until {}",
            assignment.book.id,
            assignment.member.id,
            assignment.due_date
        );
        Ok(())
    }

    async fn delete_assignment(&self, id: i64) -> Result<(), AppError> {
        self.delete(&format!("/assignments/{}", id)).await
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, AppError> {
        self.get_json("/dashboard/stats").await
    }
}
