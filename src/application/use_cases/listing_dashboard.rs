use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::application::interfaces::{DirectoryApi, PageSource, PageView};
use crate::domain::{DomainError, Listing, ListingPatch, PageControls};

/// Listings shown per dashboard screen.
pub const LISTINGS_PER_PAGE: usize = 4;

/// Server-side page source: one bounded fetch per page turn, the way the
/// dashboard pages the caller's own listings. Suits large, frequently
/// changing collections; searching beyond what the server supports is not
/// possible from here.
///
/// Every request carries a monotonically increasing ticket; a response
/// whose ticket is no longer current is discarded, so a slow earlier fetch
/// can never overwrite a faster later one. A failed fetch keeps the
/// previously loaded page in place.
pub struct ListingDashboard {
    api: Arc<dyn DirectoryApi>,
    items: Vec<Listing>,
    page: u32,
    total_pages: u32,
    total_count: u64,
    per_page: usize,
    ticket: u64,
    last_error: Option<String>,
}

impl ListingDashboard {
    pub fn new(api: Arc<dyn DirectoryApi>) -> Self {
        Self {
            api,
            items: Vec::new(),
            page: 1,
            total_pages: 0,
            total_count: 0,
            per_page: LISTINGS_PER_PAGE,
            ticket: 0,
            last_error: None,
        }
    }

    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    /// Issues a new request ticket, invalidating any in-flight one.
    fn begin_request(&mut self) -> u64 {
        self.ticket += 1;
        self.ticket
    }

    fn is_current(&self, ticket: u64) -> bool {
        ticket == self.ticket
    }

    /// Commits a fetched page unless a newer request superseded it.
    fn commit(&mut self, ticket: u64, view: &PageView<Listing>) -> bool {
        if !self.is_current(ticket) {
            debug!("Discarding stale page response (ticket {})", ticket);
            return false;
        }
        self.items = view.items().to_vec();
        self.page = view.page();
        self.total_pages = view.total_pages();
        self.total_count = view.total_count();
        self.last_error = None;
        true
    }

    /// Fetches one page from the server.
    pub async fn load_page(&mut self, page: u32) -> Result<PageView<Listing>, DomainError> {
        let ticket = self.begin_request();
        match self.api.list_listings(page.max(1), self.per_page).await {
            Ok(view) => {
                info!("Loaded page {} of {} ({} listings total)", view.page(), view.total_pages(), view.total_count());
                self.commit(ticket, &view);
                Ok(view)
            }
            Err(e) => {
                // Previous page stays visible; the message is terminal.
                warn!("Failed to load listings: {}", e);
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn next_page(&mut self) -> Result<PageView<Listing>, DomainError> {
        if self.controls().can_next {
            self.load_page(self.page + 1).await
        } else {
            Ok(self.view())
        }
    }

    pub async fn prev_page(&mut self) -> Result<PageView<Listing>, DomainError> {
        if self.controls().can_prev {
            self.load_page(self.page - 1).await
        } else {
            Ok(self.view())
        }
    }

    /// Pushes an edit to the backend, then swaps the updated record into
    /// the current page without re-fetching.
    pub async fn update(&mut self, id: &str, patch: &ListingPatch) -> Result<Listing, DomainError> {
        let updated = self.api.update_listing(id, patch).await?;
        if let Some(slot) = self.items.iter_mut().find(|l| l.id() == id) {
            *slot = updated.clone();
        }
        info!("Updated listing {}", id);
        Ok(updated)
    }

    /// Deletes a listing, then re-fetches the current page so the window
    /// reflects the shrunken collection.
    pub async fn delete(&mut self, id: &str) -> Result<(), DomainError> {
        self.api.delete_listing(id).await?;
        info!("Deleted listing {}", id);
        self.load_page(self.page).await?;
        Ok(())
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Total listings across all pages ("You have N business listings").
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn items(&self) -> &[Listing] {
        &self.items
    }

    pub fn controls(&self) -> PageControls {
        PageControls::at(self.page, self.total_pages)
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn view(&self) -> PageView<Listing> {
        PageView::new(self.items.clone(), self.page, self.total_pages, self.total_count)
    }
}

#[async_trait]
impl PageSource<Listing> for ListingDashboard {
    async fn load(&mut self, page: u32) -> Result<PageView<Listing>, DomainError> {
        self.load_page(page).await
    }

    fn per_page(&self) -> usize {
        self.per_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::InMemoryDirectoryApi;
    use crate::domain::{ListingDraft, ModerationStatus};

    async fn seeded_api(n: usize) -> Arc<InMemoryDirectoryApi> {
        let api = Arc::new(InMemoryDirectoryApi::new());
        for i in 0..n {
            let draft = ListingDraft::new()
                .with_name(format!("Business {:02}", i))
                .with_category("Services")
                .with_description("A business")
                .with_address("1 Main St")
                .with_phone("5550000")
                .with_email("biz@dir.test");
            api.create_listing(&draft).await.expect("create should succeed");
        }
        api
    }

    #[tokio::test]
    async fn test_server_paging_bounds_transfer() {
        let api = seeded_api(10).await;
        let mut dashboard = ListingDashboard::new(api);

        let view = dashboard.load_page(1).await.expect("load should succeed");
        assert_eq!(view.items().len(), 4);
        assert_eq!(view.total_pages(), 3);
        assert_eq!(view.total_count(), 10);
        assert!(!view.controls().can_prev);
        assert!(view.controls().can_next);
    }

    #[tokio::test]
    async fn test_last_page_partial_and_next_disabled() {
        let api = seeded_api(10).await;
        let mut dashboard = ListingDashboard::new(api);
        dashboard.load_page(3).await.expect("load should succeed");

        assert_eq!(dashboard.items().len(), 2);
        assert!(!dashboard.controls().can_next);
        assert!(dashboard.controls().can_prev);

        // next_page past the end is a no-op.
        let view = dashboard.next_page().await.expect("next should succeed");
        assert_eq!(view.page(), 3);
    }

    #[tokio::test]
    async fn test_update_swaps_in_place() {
        let api = seeded_api(3).await;
        let mut dashboard = ListingDashboard::new(api);
        dashboard.load_page(1).await.expect("load should succeed");

        let id = dashboard.items()[1].id().to_string();
        let patch = ListingPatch {
            name: Some("Renamed".to_string()),
            ..Default::default()
        };
        dashboard.update(&id, &patch).await.expect("update should succeed");

        let item = dashboard
            .items()
            .iter()
            .find(|l| l.id() == id)
            .expect("item should still be on the page");
        assert_eq!(item.name(), "Renamed");
        assert_eq!(item.status(), ModerationStatus::Pending);
    }

    #[tokio::test]
    async fn test_delete_refetches_current_page() {
        let api = seeded_api(5).await;
        let mut dashboard = ListingDashboard::new(api);
        dashboard.load_page(2).await.expect("load should succeed");
        assert_eq!(dashboard.items().len(), 1);

        let id = dashboard.items()[0].id().to_string();
        dashboard.delete(&id).await.expect("delete should succeed");

        // 4 listings remain and the current page was re-fetched.
        assert_eq!(dashboard.total_count(), 4);
        assert_eq!(dashboard.total_pages(), 1);
        assert!(dashboard.items().is_empty());
    }

    #[tokio::test]
    async fn test_stale_ticket_is_discarded() {
        let api = seeded_api(10).await;
        let mut dashboard = ListingDashboard::new(api);

        let first = dashboard.begin_request();
        let second = dashboard.begin_request();
        assert!(!dashboard.is_current(first));
        assert!(dashboard.is_current(second));

        let stale = PageView::new(Vec::new(), 7, 9, 99);
        assert!(!dashboard.commit(first, &stale));
        assert_eq!(dashboard.page(), 1);
        assert_eq!(dashboard.total_count(), 0);

        assert!(dashboard.commit(second, &stale));
        assert_eq!(dashboard.page(), 7);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_page() {
        let api = seeded_api(6).await;
        let mut dashboard = ListingDashboard::new(api.clone());
        dashboard.load_page(1).await.expect("load should succeed");
        assert_eq!(dashboard.items().len(), 4);

        api.fail_next_requests(true);
        let result = dashboard.load_page(2).await;
        assert!(result.is_err());
        assert_eq!(dashboard.items().len(), 4);
        assert_eq!(dashboard.page(), 1);
        assert!(dashboard.last_error().is_some());
    }
}
