use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, PageControls};

/// One window of a paginated collection, whichever side produced it.
///
/// The server-paginated endpoint spells the fields `businesses`/`pages`/
/// `total`; newer deployments use `items`/`totalPages`/`totalCount`. Both
/// are accepted on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageView<T> {
    #[serde(alias = "businesses")]
    items: Vec<T>,
    page: u32,
    #[serde(rename = "totalPages", alias = "pages")]
    total_pages: u32,
    #[serde(rename = "totalCount", alias = "total")]
    total_count: u64,
}

impl<T> PageView<T> {
    pub fn new(items: Vec<T>, page: u32, total_pages: u32, total_count: u64) -> Self {
        Self {
            items,
            page,
            total_pages,
            total_count,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn controls(&self) -> PageControls {
        PageControls::at(self.page, self.total_pages)
    }
}

/// The one interface both data-sourcing strategies sit behind.
///
/// Strategy (a) keeps the whole collection client-side and slices it;
/// strategy (b) asks the server for one page at a time. Callers pick one
/// implementation deliberately and never mix the two.
#[async_trait]
pub trait PageSource<T>: Send {
    /// Loads the window for a 1-indexed page.
    async fn load(&mut self, page: u32) -> Result<PageView<T>, DomainError>;

    fn per_page(&self) -> usize;
}
