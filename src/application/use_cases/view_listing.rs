use std::sync::Arc;

use tracing::warn;

use crate::application::interfaces::DirectoryApi;
use crate::domain::{DomainError, Listing};

/// Character limit for the collapsed description preview.
pub const DESCRIPTION_PREVIEW_LIMIT: usize = 150;

/// Terminal state of a detail fetch. A missing id is a rendered outcome,
/// not an error that propagates.
#[derive(Debug, Clone)]
pub enum DetailView {
    Found(Box<Listing>),
    NotFound,
}

impl DetailView {
    pub fn listing(&self) -> Option<&Listing> {
        match self {
            DetailView::Found(listing) => Some(listing),
            DetailView::NotFound => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DetailView::NotFound)
    }
}

pub struct ViewListing {
    api: Arc<dyn DirectoryApi>,
}

impl ViewListing {
    pub fn new(api: Arc<dyn DirectoryApi>) -> Self {
        Self { api }
    }

    /// `GET /ads/business/:id`: the search-results detail route.
    pub async fn by_id(&self, id: &str) -> Result<DetailView, DomainError> {
        Self::into_view(self.api.get_listing(id).await, id)
    }

    /// `GET /ads/get-categorybusiness/:id`: the category-browse route.
    pub async fn by_category_entry(&self, id: &str) -> Result<DetailView, DomainError> {
        Self::into_view(self.api.get_category_listing(id).await, id)
    }

    fn into_view(result: Result<Listing, DomainError>, id: &str) -> Result<DetailView, DomainError> {
        match result {
            Ok(listing) => Ok(DetailView::Found(Box::new(listing))),
            Err(e) if e.is_not_found() => {
                warn!("Business {} not found", id);
                Ok(DetailView::NotFound)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::interfaces::DirectoryApi;
    use crate::connector::InMemoryDirectoryApi;
    use crate::domain::ListingDraft;

    #[tokio::test]
    async fn test_missing_id_is_terminal_not_found() {
        let api = Arc::new(InMemoryDirectoryApi::new());
        let view_listing = ViewListing::new(api);

        let view = view_listing.by_id("no-such-id").await.expect("fetch should not error");
        assert!(view.is_not_found());
        assert!(view.listing().is_none());
    }

    #[tokio::test]
    async fn test_found_listing_by_both_routes() {
        let api = Arc::new(InMemoryDirectoryApi::new());
        let created = api
            .create_listing(
                &ListingDraft::new()
                    .with_name("Acme Plumbing")
                    .with_category("Services")
                    .with_description("Pipes")
                    .with_address("1 Side Rd")
                    .with_phone("5550000")
                    .with_email("acme@plumb.test"),
            )
            .await
            .expect("create should succeed");

        let view_listing = ViewListing::new(api);

        let view = view_listing.by_id(created.id()).await.expect("fetch should succeed");
        assert_eq!(view.listing().map(|l| l.name()), Some("Acme Plumbing"));

        let view = view_listing
            .by_category_entry(created.id())
            .await
            .expect("fetch should succeed");
        assert!(!view.is_not_found());
    }
}
