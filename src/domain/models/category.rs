use serde::{Deserialize, Serialize};
use tracing::warn;

/// Listings-per-category volume band used by the category browser filter.
/// `High` is 50 listings or more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CountBand {
    #[default]
    All,
    High,
    Low,
}

pub const HIGH_COUNT_THRESHOLD: u64 = 50;

impl CountBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            CountBand::All => "all",
            CountBand::High => "high",
            CountBand::Low => "low",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "all" => CountBand::All,
            "high" => CountBand::High,
            "low" => CountBand::Low,
            unknown => {
                warn!("Unknown count band '{}', defaulting to all", unknown);
                CountBand::All
            }
        }
    }

    pub fn matches(&self, count: u64) -> bool {
        match self {
            CountBand::All => true,
            CountBand::High => count >= HIGH_COUNT_THRESHOLD,
            CountBand::Low => count < HIGH_COUNT_THRESHOLD,
        }
    }
}

/// A category name with its derived listing count. The backend aggregation
/// keys the name under `_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    #[serde(alias = "_id")]
    name: String,
    count: u64,
}

impl CategoryCount {
    pub fn new(name: impl Into<String>, count: u64) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn is_high_volume(&self) -> bool {
        self.count >= HIGH_COUNT_THRESHOLD
    }

    /// Case-insensitive substring match on the category name.
    pub fn matches_search(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(&term.to_lowercase())
    }
}

/// Entry in the category picker shown on the posting form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySuggestion {
    #[serde(alias = "_id")]
    id: String,
    name: String,
}

impl CategorySuggestion {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
