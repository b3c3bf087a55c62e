use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::application::interfaces::{DirectoryApi, PageView};
use crate::domain::{
    paging, CategoryCount, CategorySuggestion, DomainError, Listing, ListingDraft, ListingPatch,
    ModerationStatus,
};

/// In-memory stand-in for the directory backend. Backs the test suites and
/// `--mock-api` runs without touching the network.
#[derive(Default)]
pub struct InMemoryDirectoryApi {
    listings: Mutex<Vec<Listing>>,
    category_counts: Mutex<Vec<CategoryCount>>,
    suggestions: Mutex<Vec<CategorySuggestion>>,
    requests: AtomicU64,
    failing: AtomicBool,
}

impl InMemoryDirectoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category_counts(mut self, counts: Vec<CategoryCount>) -> Self {
        self.category_counts = Mutex::new(counts);
        self
    }

    pub fn with_suggestions(mut self, suggestions: Vec<CategorySuggestion>) -> Self {
        self.suggestions = Mutex::new(suggestions);
        self
    }

    /// Number of calls that reached this "backend".
    pub fn request_count(&self) -> u64 {
        self.requests.load(Ordering::SeqCst)
    }

    /// When set, every call fails as if the network were down.
    pub fn fail_next_requests(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn record_request(&self) -> Result<(), DomainError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            Err(DomainError::api("simulated connection failure"))
        } else {
            Ok(())
        }
    }

    fn missing(id: &str) -> DomainError {
        DomainError::not_found(format!("Business {} not found", id))
    }
}

#[async_trait]
impl DirectoryApi for InMemoryDirectoryApi {
    async fn category_counts(&self) -> Result<Vec<CategoryCount>, DomainError> {
        self.record_request()?;
        let seeded = self.category_counts.lock().await.clone();
        if !seeded.is_empty() {
            return Ok(seeded);
        }
        // No seed: derive counts from the stored listings, first-seen order.
        let listings = self.listings.lock().await;
        let mut counts: Vec<CategoryCount> = Vec::new();
        for listing in listings.iter() {
            match counts.iter_mut().find(|c| c.name() == listing.category()) {
                Some(existing) => {
                    *existing = CategoryCount::new(listing.category(), existing.count() + 1)
                }
                None => counts.push(CategoryCount::new(listing.category(), 1)),
            }
        }
        Ok(counts)
    }

    async fn list_listings(
        &self,
        page: u32,
        limit: usize,
    ) -> Result<PageView<Listing>, DomainError> {
        self.record_request()?;
        let listings = self.listings.lock().await;
        let total_pages = paging::total_pages(listings.len(), limit);
        let items = paging::window(&listings, page, limit).to_vec();
        Ok(PageView::new(items, page, total_pages, listings.len() as u64))
    }

    async fn get_listing(&self, id: &str) -> Result<Listing, DomainError> {
        self.record_request()?;
        self.listings
            .lock()
            .await
            .iter()
            .find(|l| l.id() == id)
            .cloned()
            .ok_or_else(|| Self::missing(id))
    }

    async fn get_category_listing(&self, id: &str) -> Result<Listing, DomainError> {
        self.get_listing(id).await
    }

    async fn create_listing(&self, draft: &ListingDraft) -> Result<Listing, DomainError> {
        self.record_request()?;
        let images = draft
            .image()
            .map(|image| vec![format!("memory://{}", image.file_name())])
            .unwrap_or_default();
        let listing = Listing::reconstitute(
            Uuid::new_v4().to_string(),
            draft.name().to_string(),
            draft.category().to_string(),
            draft.description().to_string(),
            draft.address().to_string(),
            draft.phone().to_string(),
            draft.email().to_string(),
            (!draft.website().is_empty()).then(|| draft.website().to_string()),
            (!draft.logo().is_empty()).then(|| draft.logo().to_string()),
            images,
            ModerationStatus::Pending,
        );
        self.listings.lock().await.push(listing.clone());
        Ok(listing)
    }

    async fn update_listing(
        &self,
        id: &str,
        patch: &ListingPatch,
    ) -> Result<Listing, DomainError> {
        self.record_request()?;
        let mut listings = self.listings.lock().await;
        let listing = listings
            .iter_mut()
            .find(|l| l.id() == id)
            .ok_or_else(|| Self::missing(id))?;
        listing.apply(patch);
        Ok(listing.clone())
    }

    async fn delete_listing(&self, id: &str) -> Result<(), DomainError> {
        self.record_request()?;
        let mut listings = self.listings.lock().await;
        let before = listings.len();
        listings.retain(|l| l.id() != id);
        if listings.len() == before {
            return Err(Self::missing(id));
        }
        Ok(())
    }

    async fn category_suggestions(&self) -> Result<Vec<CategorySuggestion>, DomainError> {
        self.record_request()?;
        let seeded = self.suggestions.lock().await.clone();
        if !seeded.is_empty() {
            return Ok(seeded);
        }
        let listings = self.listings.lock().await;
        let mut suggestions: Vec<CategorySuggestion> = Vec::new();
        for listing in listings.iter() {
            if !suggestions.iter().any(|s| s.name() == listing.category()) {
                suggestions.push(CategorySuggestion::new(
                    Uuid::new_v4().to_string(),
                    listing.category(),
                ));
            }
        }
        Ok(suggestions)
    }
}
