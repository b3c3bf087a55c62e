use std::sync::Arc;

use tracing::{info, warn};

use crate::application::interfaces::DirectoryApi;
use crate::domain::{CategorySuggestion, DomainError, Listing, ListingDraft};

/// Validates and submits the business-creation form. Validation failures
/// block submission; nothing reaches the network for an invalid draft.
pub struct PostListing {
    api: Arc<dyn DirectoryApi>,
}

impl PostListing {
    pub fn new(api: Arc<dyn DirectoryApi>) -> Self {
        Self { api }
    }

    /// Entries for the category picker.
    pub async fn suggestions(&self) -> Result<Vec<CategorySuggestion>, DomainError> {
        self.api.category_suggestions().await
    }

    pub async fn execute(&self, draft: &ListingDraft) -> Result<Listing, DomainError> {
        let errors = draft.validate();
        if !errors.is_empty() {
            warn!("Listing draft rejected with {} field error(s)", errors.len());
            return Err(DomainError::ValidationFailed(errors));
        }

        info!("Submitting listing '{}'", draft.name());
        let listing = self.api.create_listing(draft).await?;
        info!("Created listing {} (status: {})", listing.id(), listing.status().as_str());
        Ok(listing)
    }
}
