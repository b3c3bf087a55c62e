use serde::{Deserialize, Serialize};
use tracing::warn;

/// Moderation state attached to every listing by the administrative
/// collaborator. New listings start out pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ModerationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationStatus::Pending => "pending",
            ModerationStatus::Approved => "approved",
            ModerationStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "pending" => ModerationStatus::Pending,
            "approved" => ModerationStatus::Approved,
            "rejected" => ModerationStatus::Rejected,
            unknown => {
                warn!("Unknown moderation status '{}', defaulting to pending", unknown);
                ModerationStatus::Pending
            }
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, ModerationStatus::Approved)
    }
}

/// A business record as held by the backend. The client keeps a transient
/// copy for display and editing, discarded when the command finishes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    #[serde(alias = "_id")]
    id: String,
    name: String,
    category: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    logo: Option<String>,
    #[serde(default)]
    images: Vec<String>,
    #[serde(default)]
    status: ModerationStatus,
}

impl Listing {
    /// Reconstitutes from backend data (used by adapters).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: String,
        name: String,
        category: String,
        description: String,
        address: String,
        phone: String,
        email: String,
        website: Option<String>,
        logo: Option<String>,
        images: Vec<String>,
        status: ModerationStatus,
    ) -> Self {
        Self {
            id,
            name,
            category,
            description,
            address,
            phone,
            email,
            website,
            logo,
            images,
            status,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn website(&self) -> Option<&str> {
        self.website.as_deref()
    }

    pub fn logo(&self) -> Option<&str> {
        self.logo.as_deref()
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(|s| s.as_str())
    }

    pub fn status(&self) -> ModerationStatus {
        self.status
    }

    /// Truncated description for card/detail previews; the full text is
    /// shown behind a "see more" affordance.
    pub fn description_preview(&self, limit: usize) -> String {
        if self.description.chars().count() <= limit {
            self.description.clone()
        } else {
            let cut: String = self.description.chars().take(limit).collect();
            format!("{}...", cut)
        }
    }

    pub fn summary(&self) -> String {
        format!("{} ({}) [{}]", self.name, self.category, self.status.as_str())
    }

    /// Applies an edit patch, returning the fields the backend accepts on
    /// update. Unset patch fields keep their current value.
    pub fn apply(&mut self, patch: &ListingPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(address) = &patch.address {
            self.address = address.clone();
        }
        if let Some(phone) = &patch.phone {
            self.phone = phone.clone();
        }
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
    }
}

/// Editable subset of a listing, sent as the PUT body. Matches the fields
/// the dashboard edit form exposes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ListingPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.address.is_none()
            && self.phone.is_none()
            && self.email.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_listing() -> Listing {
        Listing::reconstitute(
            "biz-1".to_string(),
            "Sterling Bakery".to_string(),
            "Food".to_string(),
            "Fresh bread daily".to_string(),
            "12 Main St".to_string(),
            "5551234".to_string(),
            "hello@bakery.test".to_string(),
            None,
            None,
            vec![],
            ModerationStatus::Pending,
        )
    }

    #[test]
    fn test_status_round_trip() {
        assert_eq!(ModerationStatus::from_str("approved"), ModerationStatus::Approved);
        assert_eq!(ModerationStatus::from_str("REJECTED"), ModerationStatus::Rejected);
        assert_eq!(ModerationStatus::from_str("bogus"), ModerationStatus::Pending);
        assert_eq!(ModerationStatus::Approved.as_str(), "approved");
    }

    #[test]
    fn test_description_preview_truncates() {
        let mut listing = sample_listing();
        listing.description = "a".repeat(200);

        let preview = listing.description_preview(150);
        assert_eq!(preview.chars().count(), 153);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn test_description_preview_short_text_unchanged() {
        let listing = sample_listing();
        assert_eq!(listing.description_preview(150), "Fresh bread daily");
    }

    #[test]
    fn test_apply_patch_updates_only_set_fields() {
        let mut listing = sample_listing();
        let patch = ListingPatch {
            name: Some("Sterling Bakery & Cafe".to_string()),
            phone: Some("5559999".to_string()),
            ..Default::default()
        };

        listing.apply(&patch);

        assert_eq!(listing.name(), "Sterling Bakery & Cafe");
        assert_eq!(listing.phone(), "5559999");
        assert_eq!(listing.category(), "Food");
        assert_eq!(listing.email(), "hello@bakery.test");
    }

    #[test]
    fn test_listing_deserializes_backend_shape() {
        let json = r#"{
            "_id": "651f",
            "name": "Acme Plumbing",
            "category": "Services",
            "description": "Pipes",
            "address": "1 Side Rd",
            "phone": "5550000",
            "email": "acme@plumb.test",
            "images": ["https://img.test/a.jpg"],
            "status": "approved"
        }"#;

        let listing: Listing = serde_json::from_str(json).expect("listing should parse");
        assert_eq!(listing.id(), "651f");
        assert_eq!(listing.primary_image(), Some("https://img.test/a.jpg"));
        assert!(listing.status().is_approved());
        assert_eq!(listing.website(), None);
    }
}
