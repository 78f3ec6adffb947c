pub mod dto;

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::config::DeskConfig;
use crate::error::AppError;
use crate::models::{BookDraft, DEFAULT_CATEGORY, PLACEHOLDER_COVER};

/// Book metadata service used to pre-fill the add-book form from a scanned ISBN.
#[async_trait]
pub trait BookLookup: Send + Sync {
    /// `Ok(None)` when the service knows no volume for this ISBN.
    async fn find_by_isbn(&self, isbn: &str) -> Result<Option<BookDraft>, AppError>;
}

pub struct GoogleBooksClient {
    client: Client,
    volumes_url: String,
    api_key: Option<String>,
}

impl GoogleBooksClient {
    pub fn new(config: &DeskConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build http client: {}", e)))?;
        Ok(Self {
            client,
            volumes_url: config.google_books_url.clone(),
            api_key: config.google_books_api_key.clone(),
        })
    }

    fn query_url(&self, isbn: &str) -> Result<Url, AppError> {
        let mut params = vec![("q", format!("isbn:{}", isbn))];
        if let Some(key) = &self.api_key {
            params.push(("key", key.clone()));
        }

        Url::parse_with_params(&self.volumes_url, &params)
            .map_err(|e| AppError::Config(format!("Invalid books lookup url: {}", e)))
    }
}

#[async_trait]
impl BookLookup for GoogleBooksClient {
    async fn find_by_isbn(&self, isbn: &str) -> Result<Option<BookDraft>, AppError> {
        let url = self.query_url(isbn)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::Lookup(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Lookup(format!("Books API error {}: {}", status, body)));
        }

        let parsed = response
            .json::<dto::VolumesResponse>()
            .await
            .map_err(|e| AppError::Lookup(format!("Failed to parse volumes response: {}", e)))?;

        Ok(draft_from_response(isbn, parsed))
    }
}

/// Maps the first volume of a lookup response onto the add-book form.
pub fn draft_from_response(isbn: &str, response: dto::VolumesResponse) -> Option<BookDraft> {
    let volume = response.items?.into_iter().next()?;
    let info = volume.volume_info;

    let author = match info.authors {
        Some(authors) if !authors.is_empty() => authors.join(", "),
        _ => "Unknown Author".to_string(),
    };

    let category = info
        .categories
        .and_then(|categories| categories.into_iter().next())
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

    let image_url = info
        .image_links
        .and_then(|links| links.thumbnail)
        .filter(|thumb| !thumb.is_empty())
        .map(|thumb| thumb.replacen("http://", "https://", 1))
        .unwrap_or_else(|| PLACEHOLDER_COVER.to_string());

    Some(BookDraft {
        isbn: isbn.to_string(),
        title: info.title.unwrap_or_default(),
        author,
        category,
        image_url,
        qty: 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> dto::VolumesResponse {
        serde_json::from_str(json).expect("valid volumes json")
    }

    #[test]
    fn maps_first_volume_onto_draft() {
        let response = parse(
            r#"{
                "kind": "books#volumes",
                "totalItems": 2,
                "items": [
                    {"volumeInfo": {
                        "title": "The Rust Programming Language",
                        "authors": ["Steve Klabnik", "Carol Nichols"],
                        "categories": ["Computers", "Programming"],
                        "imageLinks": {"thumbnail": "http://books.google.com/books/content?id=1"}
                    }},
                    {"volumeInfo": {"title": "Second"}}
                ]
            }"#,
        );

        let draft = draft_from_response("9781718503106", response).expect("draft");
        assert_eq!(draft.title, "The Rust Programming Language");
        assert_eq!(draft.author, "Steve Klabnik, Carol Nichols");
        assert_eq!(draft.category, "Computers");
        assert_eq!(draft.image_url, "https://books.google.com/books/content?id=1");
        assert_eq!(draft.qty, 1);
        assert_eq!(draft.isbn, "9781718503106");
    }

    #[test]
    fn fills_defaults_for_sparse_volume() {
        let response = parse(r#"{"items": [{"volumeInfo": {}}]}"#);

        let draft = draft_from_response("0123456789", response).expect("draft");
        assert_eq!(draft.title, "");
        assert_eq!(draft.author, "Unknown Author");
        assert_eq!(draft.category, "General");
        assert_eq!(draft.image_url, PLACEHOLDER_COVER);
    }

    #[test]
    fn no_items_means_not_found() {
        assert!(draft_from_response("0123456789", parse(r#"{"totalItems": 0}"#)).is_none());
        assert!(draft_from_response("0123456789", parse(r#"{"items": []}"#)).is_none());
    }

    #[test]
    fn query_url_carries_isbn_and_optional_key() {
        let mut config = DeskConfig::default();
        let client = GoogleBooksClient::new(&config).expect("client");
        let url = client.query_url("9781718503106").expect("url");
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/books/v1/volumes?q=isbn%3A9781718503106"
        );

        config.google_books_api_key = Some("secret".to_string());
        let client = GoogleBooksClient::new(&config).expect("client");
        let url = client.query_url("9781718503106").expect("url");
        assert!(url.as_str().ends_with("&key=secret"));
    }
}
