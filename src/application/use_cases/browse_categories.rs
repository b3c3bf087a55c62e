use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::application::interfaces::{DirectoryApi, PageSource, PageView};
use crate::domain::{paging, CategoryCount, CountBand, DomainError, PageControls};

/// Categories shown per screen in the category browser.
pub const CATEGORIES_PER_PAGE: usize = 10;

/// Client-side page source: the full category/count collection is fetched
/// once, then searched, band-filtered, and sliced in memory. Suits small,
/// rarely-changing collections; filter results are always complete at the
/// cost of one larger transfer.
///
/// Changing the search term or band resets the current page to 1. A failed
/// refresh keeps whatever was loaded before.
pub struct BrowseCategories {
    api: Arc<dyn DirectoryApi>,
    categories: Vec<CategoryCount>,
    loaded: bool,
    search_term: String,
    band: CountBand,
    page: u32,
    per_page: usize,
    last_error: Option<String>,
}

impl BrowseCategories {
    pub fn new(api: Arc<dyn DirectoryApi>) -> Self {
        Self {
            api,
            categories: Vec::new(),
            loaded: false,
            search_term: String::new(),
            band: CountBand::All,
            page: 1,
            per_page: CATEGORIES_PER_PAGE,
            last_error: None,
        }
    }

    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    /// Re-fetches the whole collection. On failure the previous collection
    /// stays in place and the error message is surfaced.
    pub async fn refresh(&mut self) -> Result<(), DomainError> {
        match self.api.category_counts().await {
            Ok(categories) => {
                info!("Loaded {} categories", categories.len());
                self.categories = categories;
                self.loaded = true;
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                warn!("Failed to load categories: {}", e);
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    async fn ensure_loaded(&mut self) -> Result<(), DomainError> {
        if !self.loaded {
            self.refresh().await?;
        }
        Ok(())
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.page = 1;
    }

    pub fn set_band(&mut self, band: CountBand) {
        self.band = band;
        self.page = 1;
    }

    /// Jumps to an arbitrary page. Not clamped to the filtered total: a
    /// page past the end shows an empty window, matching the observed
    /// behavior of the view this replaces.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    pub fn next_page(&mut self) {
        if self.controls().can_next {
            self.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        if self.controls().can_prev {
            self.page -= 1;
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn band(&self) -> CountBand {
        self.band
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Search match then band match; both predicates are pure, so the
    /// order is immaterial.
    pub fn filtered(&self) -> Vec<CategoryCount> {
        self.categories
            .iter()
            .filter(|c| c.matches_search(&self.search_term))
            .filter(|c| self.band.matches(c.count()))
            .cloned()
            .collect()
    }

    pub fn total_pages(&self) -> u32 {
        paging::total_pages(self.filtered().len(), self.per_page)
    }

    pub fn controls(&self) -> PageControls {
        PageControls::at(self.page, self.total_pages())
    }

    /// The currently visible window over the filtered collection.
    pub fn view(&self) -> PageView<CategoryCount> {
        let filtered = self.filtered();
        let total_pages = paging::total_pages(filtered.len(), self.per_page);
        let total_count = filtered.len() as u64;
        let items = paging::window(&filtered, self.page, self.per_page).to_vec();
        PageView::new(items, self.page, total_pages, total_count)
    }
}

#[async_trait]
impl PageSource<CategoryCount> for BrowseCategories {
    async fn load(&mut self, page: u32) -> Result<PageView<CategoryCount>, DomainError> {
        self.ensure_loaded().await?;
        self.set_page(page);
        Ok(self.view())
    }

    fn per_page(&self) -> usize {
        self.per_page
    }
}
