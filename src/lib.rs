pub mod application;
pub mod connector;
pub mod domain;

pub use application::{
    BrowseCategories, DetailView, DirectoryApi, ListingDashboard, PageSource, PageView,
    PostListing, SessionStore, ViewListing, CATEGORIES_PER_PAGE, DESCRIPTION_PREVIEW_LIMIT,
    LISTINGS_PER_PAGE,
};

pub use connector::{HttpDirectoryApi, InMemoryDirectoryApi, JsonSessionStore, DEFAULT_BASE_URL};

pub use domain::{
    CategoryCount, CategorySuggestion, CountBand, DomainError, FieldError, ImageAttachment,
    Listing, ListingDraft, ListingPatch, ModerationStatus, PageControls, Session,
    ValidationErrors, HIGH_COUNT_THRESHOLD,
};
