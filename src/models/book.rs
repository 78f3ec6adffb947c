use serde::{Deserialize, Serialize};

pub const PLACEHOLDER_COVER: &str = "https://via.placeholder.com/150?text=No+Cover";
pub const DEFAULT_CATEGORY: &str = "General";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub qty: i64,
    #[serde(default)]
    pub isbn: Option<String>,
}

impl Book {
    pub fn in_stock(&self) -> bool {
        self.qty > 0
    }

    pub fn cover(&self) -> &str {
        match self.image_url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => PLACEHOLDER_COVER,
        }
    }

    /// Fills in the cover and category a listing shows when the API left them blank.
    pub fn with_display_defaults(mut self) -> Self {
        self.image_url = Some(self.cover().to_string());
        if self.category.as_deref().is_none_or(str::is_empty) {
            self.category = Some(DEFAULT_CATEGORY.to_string());
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub image_url: String,
    pub category: String,
    pub qty: i64,
    pub isbn: String,
}

/// Add-book form contents pre-filled from a metadata lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDraft {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub category: String,
    pub image_url: String,
    pub qty: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare(image_url: Option<&str>, category: Option<&str>) -> Book {
        Book {
            id: 1,
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            image_url: image_url.map(str::to_string),
            category: category.map(str::to_string),
            qty: 1,
            isbn: None,
        }
    }

    #[test]
    fn blank_cover_and_category_get_defaults() {
        let book = bare(Some(""), None).with_display_defaults();
        assert_eq!(book.image_url.as_deref(), Some(PLACEHOLDER_COVER));
        assert_eq!(book.category.as_deref(), Some("General"));
    }

    #[test]
    fn present_cover_and_category_are_kept() {
        let book = bare(Some("https://example.org/dune.jpg"), Some("Fiction")).with_display_defaults();
        assert_eq!(book.image_url.as_deref(), Some("https://example.org/dune.jpg"));
        assert_eq!(book.category.as_deref(), Some("Fiction"));
    }
}
