//! ISBN metadata lookup over external catalog providers
//!
//! Two heterogeneous upstream schemas (a Google-Books-shaped volumes API
//! and an Open-Library-shaped editions API) are normalized into one
//! canonical [`BookMetadata`] shape. Providers are tried in fixed priority
//! order; the secondary is never queried once the primary has answered. A
//! transport error or timeout counts as a miss for that provider only.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::{
    config::CatalogsConfig,
    error::{AppError, AppResult},
    models::metadata::BookMetadata,
};

/// Fixed template the secondary provider's cover URLs are synthesized from
const SECONDARY_COVER_URL: &str = "http://covers.openlibrary.org/b/isbn";

/// A single external catalog: `lookup` answers `Ok(None)` on a clean miss
/// and `Err` when the catalog itself is unreachable.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    fn name(&self) -> &'static str;
    async fn lookup(&self, isbn: &str) -> AppResult<Option<BookMetadata>>;
}

/// Lookup chain over the configured providers
pub struct MetadataService {
    providers: Vec<Box<dyn CatalogProvider>>,
}

impl MetadataService {
    pub fn new(config: &CatalogsConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            providers: vec![
                Box::new(GoogleBooksProvider {
                    client: client.clone(),
                    base_url: config.primary_url.clone(),
                }),
                Box::new(OpenLibraryProvider {
                    client,
                    base_url: config.secondary_url.clone(),
                }),
            ],
        })
    }

    /// Try each provider in order; the first hit wins. Provider failures
    /// fall through to the next provider; exhausting the chain is a
    /// NotFound for the caller.
    pub async fn lookup(&self, isbn: &str) -> AppResult<BookMetadata> {
        for provider in &self.providers {
            match provider.lookup(isbn).await {
                Ok(Some(metadata)) => {
                    tracing::debug!("ISBN {} resolved by {}", isbn, provider.name());
                    return Ok(metadata);
                }
                Ok(None) => {
                    tracing::debug!("ISBN {} not found by {}", isbn, provider.name());
                }
                Err(e) => {
                    tracing::warn!("Catalog provider {} failed: {}", provider.name(), e);
                }
            }
        }

        Err(AppError::NotFound("Book not found".to_string()))
    }
}

// ---------------------------------------------------------------------------
// Primary provider: Google-Books-shaped volumes API
// ---------------------------------------------------------------------------

struct GoogleBooksProvider {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    items: Option<Vec<Volume>>,
}

#[derive(Debug, Deserialize)]
struct Volume {
    #[serde(rename = "volumeInfo")]
    volume_info: VolumeInfo,
}

#[derive(Debug, Deserialize, Default)]
struct VolumeInfo {
    title: Option<String>,
    authors: Option<Vec<String>>,
    publisher: Option<String>,
    #[serde(rename = "publishedDate")]
    published_date: Option<String>,
    description: Option<String>,
    #[serde(rename = "imageLinks")]
    image_links: Option<ImageLinks>,
    #[serde(rename = "pageCount")]
    page_count: Option<i32>,
    language: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct ImageLinks {
    thumbnail: Option<String>,
}

fn normalize_volume(isbn: &str, info: VolumeInfo) -> BookMetadata {
    // The year is the first segment of a "YYYY-MM-DD"-style date string.
    let publication_year = info
        .published_date
        .as_deref()
        .and_then(|d| d.split('-').next())
        .filter(|y| !y.is_empty())
        .map(str::to_string);

    let author = info
        .authors
        .filter(|a| !a.is_empty())
        .map(|a| a.join(", "));

    BookMetadata {
        isbn: isbn.to_string(),
        title: info.title,
        author,
        publisher: info.publisher,
        publication_year,
        description: info.description,
        cover_image_url: info.image_links.and_then(|l| l.thumbnail),
        page_count: info.page_count,
        language: info.language,
    }
}

#[async_trait]
impl CatalogProvider for GoogleBooksProvider {
    fn name(&self) -> &'static str {
        "google-books"
    }

    async fn lookup(&self, isbn: &str) -> AppResult<Option<BookMetadata>> {
        let url = format!("{}/volumes?q=isbn:{}", self.base_url, isbn);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Primary catalog unreachable: {}", e)))?;

        if !response.status().is_success() {
            return Ok(None);
        }

        let body: VolumesResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Primary catalog bad response: {}", e)))?;

        let Some(mut items) = body.items.filter(|i| !i.is_empty()) else {
            return Ok(None);
        };

        Ok(Some(normalize_volume(isbn, items.remove(0).volume_info)))
    }
}

// ---------------------------------------------------------------------------
// Secondary provider: Open-Library-shaped editions API
// ---------------------------------------------------------------------------

struct OpenLibraryProvider {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize, Default)]
struct EditionResponse {
    title: Option<String>,
    authors: Option<Vec<NamedRef>>,
    publishers: Option<Vec<String>>,
    publish_date: Option<String>,
    notes: Option<String>,
    number_of_pages: Option<i32>,
    languages: Option<Vec<KeyedRef>>,
}

#[derive(Debug, Deserialize, Default)]
struct NamedRef {
    name: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct KeyedRef {
    key: Option<String>,
}

fn normalize_edition(isbn: &str, edition: EditionResponse) -> BookMetadata {
    let author = edition.authors.and_then(|authors| {
        let names: Vec<String> = authors.into_iter().filter_map(|a| a.name).collect();
        if names.is_empty() {
            None
        } else {
            Some(names.join(", "))
        }
    });

    // The year is the last token of a "July 1, 2008"-style date string.
    let publication_year = edition
        .publish_date
        .as_deref()
        .and_then(|d| d.split_whitespace().last())
        .map(str::to_string);

    // Language codes arrive as "/languages/eng" path references.
    let language = edition.languages.and_then(|langs| {
        langs
            .into_iter()
            .next()
            .and_then(|l| l.key)
            .and_then(|k| k.rsplit('/').next().map(str::to_string))
    });

    BookMetadata {
        isbn: isbn.to_string(),
        title: edition.title,
        author,
        publisher: edition.publishers.and_then(|p| p.into_iter().next()),
        publication_year,
        description: edition.notes,
        cover_image_url: Some(format!("{}/{}-M.jpg", SECONDARY_COVER_URL, isbn)),
        page_count: edition.number_of_pages,
        language,
    }
}

#[async_trait]
impl CatalogProvider for OpenLibraryProvider {
    fn name(&self) -> &'static str {
        "open-library"
    }

    async fn lookup(&self, isbn: &str) -> AppResult<Option<BookMetadata>> {
        let url = format!("{}/isbn/{}.json", self.base_url, isbn);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Secondary catalog unreachable: {}", e)))?;

        if !response.status().is_success() {
            return Ok(None);
        }

        let edition: EditionResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Secondary catalog bad response: {}", e)))?;

        Ok(Some(normalize_edition(isbn, edition)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_volume_full_record() {
        let info: VolumeInfo = serde_json::from_value(json!({
            "title": "The Hobbit",
            "authors": ["J. R. R. Tolkien", "Christopher Tolkien"],
            "publisher": "Allen & Unwin",
            "publishedDate": "1937-09-21",
            "description": "A hole in the ground",
            "imageLinks": {"thumbnail": "http://example.com/hobbit.jpg"},
            "pageCount": 310,
            "language": "en"
        }))
        .unwrap();

        let meta = normalize_volume("9780048231888", info);
        assert_eq!(meta.title.as_deref(), Some("The Hobbit"));
        assert_eq!(
            meta.author.as_deref(),
            Some("J. R. R. Tolkien, Christopher Tolkien")
        );
        assert_eq!(meta.publication_year.as_deref(), Some("1937"));
        assert_eq!(
            meta.cover_image_url.as_deref(),
            Some("http://example.com/hobbit.jpg")
        );
        assert_eq!(meta.page_count, Some(310));
        assert_eq!(meta.language.as_deref(), Some("en"));
    }

    #[test]
    fn test_normalize_volume_missing_fields_stay_absent() {
        let info: VolumeInfo = serde_json::from_value(json!({
            "title": "Anonymous Pamphlet"
        }))
        .unwrap();

        let meta = normalize_volume("1234567890", info);
        assert_eq!(meta.title.as_deref(), Some("Anonymous Pamphlet"));
        assert_eq!(meta.author, None);
        assert_eq!(meta.publisher, None);
        assert_eq!(meta.publication_year, None);
        assert_eq!(meta.cover_image_url, None);
    }

    #[test]
    fn test_normalize_volume_year_only_date() {
        let info: VolumeInfo = serde_json::from_value(json!({
            "publishedDate": "2008"
        }))
        .unwrap();

        let meta = normalize_volume("1234567890", info);
        assert_eq!(meta.publication_year.as_deref(), Some("2008"));
    }

    #[test]
    fn test_normalize_edition_full_record() {
        let edition: EditionResponse = serde_json::from_value(json!({
            "title": "Fantastic Mr Fox",
            "authors": [{"name": "Roald Dahl"}, {"name": "Quentin Blake"}],
            "publishers": ["Puffin", "Penguin"],
            "publish_date": "October 1, 1988",
            "notes": "Reissue edition",
            "number_of_pages": 96,
            "languages": [{"key": "/languages/eng"}]
        }))
        .unwrap();

        let meta = normalize_edition("9780140328721", edition);
        assert_eq!(meta.title.as_deref(), Some("Fantastic Mr Fox"));
        assert_eq!(meta.author.as_deref(), Some("Roald Dahl, Quentin Blake"));
        assert_eq!(meta.publisher.as_deref(), Some("Puffin"));
        assert_eq!(meta.publication_year.as_deref(), Some("1988"));
        assert_eq!(meta.description.as_deref(), Some("Reissue edition"));
        assert_eq!(meta.language.as_deref(), Some("eng"));
    }

    #[test]
    fn test_normalize_edition_synthesizes_cover_url() {
        let edition = EditionResponse::default();
        let meta = normalize_edition("9780140328721", edition);
        assert_eq!(
            meta.cover_image_url.as_deref(),
            Some("http://covers.openlibrary.org/b/isbn/9780140328721-M.jpg")
        );
    }

    #[test]
    fn test_normalize_edition_missing_fields_stay_absent() {
        let edition = EditionResponse::default();
        let meta = normalize_edition("123", edition);
        assert_eq!(meta.title, None);
        assert_eq!(meta.author, None);
        assert_eq!(meta.publisher, None);
        assert_eq!(meta.publication_year, None);
        assert_eq!(meta.language, None);
    }

    struct FixedProvider {
        name: &'static str,
        result: Option<&'static str>,
        fail: bool,
    }

    #[async_trait]
    impl CatalogProvider for FixedProvider {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn lookup(&self, isbn: &str) -> AppResult<Option<BookMetadata>> {
            if self.fail {
                return Err(AppError::Upstream("unreachable".to_string()));
            }
            Ok(self.result.map(|title| BookMetadata {
                isbn: isbn.to_string(),
                title: Some(title.to_string()),
                author: None,
                publisher: None,
                publication_year: None,
                description: None,
                cover_image_url: None,
                page_count: None,
                language: None,
            }))
        }
    }

    fn chain(providers: Vec<Box<dyn CatalogProvider>>) -> MetadataService {
        MetadataService { providers }
    }

    #[tokio::test]
    async fn test_chain_primary_hit_wins() {
        let service = chain(vec![
            Box::new(FixedProvider { name: "primary", result: Some("from primary"), fail: false }),
            Box::new(FixedProvider { name: "secondary", result: Some("from secondary"), fail: false }),
        ]);

        let meta = service.lookup("123").await.unwrap();
        assert_eq!(meta.title.as_deref(), Some("from primary"));
    }

    #[tokio::test]
    async fn test_chain_falls_back_on_miss() {
        let service = chain(vec![
            Box::new(FixedProvider { name: "primary", result: None, fail: false }),
            Box::new(FixedProvider { name: "secondary", result: Some("from secondary"), fail: false }),
        ]);

        let meta = service.lookup("123").await.unwrap();
        assert_eq!(meta.title.as_deref(), Some("from secondary"));
    }

    #[tokio::test]
    async fn test_chain_falls_back_on_provider_failure() {
        let service = chain(vec![
            Box::new(FixedProvider { name: "primary", result: None, fail: true }),
            Box::new(FixedProvider { name: "secondary", result: Some("from secondary"), fail: false }),
        ]);

        let meta = service.lookup("123").await.unwrap();
        assert_eq!(meta.title.as_deref(), Some("from secondary"));
    }

    #[tokio::test]
    async fn test_chain_exhausted_is_not_found() {
        let service = chain(vec![
            Box::new(FixedProvider { name: "primary", result: None, fail: false }),
            Box::new(FixedProvider { name: "secondary", result: None, fail: false }),
        ]);

        let err = service.lookup("123").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
