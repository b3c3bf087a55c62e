use async_trait::async_trait;

use crate::application::interfaces::PageView;
use crate::domain::{
    CategoryCount, CategorySuggestion, DomainError, Listing, ListingDraft, ListingPatch,
};

/// The remote directory backend, as consumed by the client. The production
/// implementation speaks HTTP; an in-memory one backs tests and mock runs.
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    /// `GET /business/category-counts`: ordered category/count pairs.
    async fn category_counts(&self) -> Result<Vec<CategoryCount>, DomainError>;

    /// `GET /ads/businesses?page=&limit=`: one server-side page of the
    /// caller's listings.
    async fn list_listings(&self, page: u32, limit: usize)
        -> Result<PageView<Listing>, DomainError>;

    /// `GET /ads/business/:id`: single listing, `NotFound` on a missing id.
    async fn get_listing(&self, id: &str) -> Result<Listing, DomainError>;

    /// `GET /ads/get-categorybusiness/:id`: category-browse detail variant.
    async fn get_category_listing(&self, id: &str) -> Result<Listing, DomainError>;

    /// `POST /ads/create-business`: multipart form, at most one image part.
    async fn create_listing(&self, draft: &ListingDraft) -> Result<Listing, DomainError>;

    /// `PUT /ads/business/:id`: returns the updated listing.
    async fn update_listing(&self, id: &str, patch: &ListingPatch)
        -> Result<Listing, DomainError>;

    /// `DELETE /ads/business/:id`.
    async fn delete_listing(&self, id: &str) -> Result<(), DomainError>;

    /// `GET /ads/get-category`: entries for the category picker.
    async fn category_suggestions(&self) -> Result<Vec<CategorySuggestion>, DomainError>;
}
