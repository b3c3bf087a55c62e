use std::fmt;
use std::path::Path;

use serde::Serialize;

/// A single field-level validation failure, surfaced next to the field in
/// the original form. Fields and messages are fixed at compile time, so
/// these only serialize outward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// The full set of failures for one validation pass. Validation is
/// advisory UX; the backend remains the source of truth.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn push(&mut self, field: &'static str, message: &'static str) {
        self.errors.push(FieldError { field, message });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn message_for(&self, field: &str) -> Option<&'static str> {
        self.errors.iter().find(|e| e.field == field).map(|e| e.message)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{}", joined)
    }
}

/// Transient image selection for the posting form. Owns the loaded bytes;
/// replacing or clearing the selection drops the previous one, so the
/// resource lifetime is scoped to the draft rather than to process exit.
#[derive(Debug, Clone)]
pub struct ImageAttachment {
    file_name: String,
    content_type: &'static str,
    bytes: Vec<u8>,
}

impl ImageAttachment {
    pub fn new(file_name: impl Into<String>, content_type: &'static str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }

    /// Loads the file at `path`, inferring the content type from its
    /// extension.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "image".to_string());
        let content_type = match path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .as_deref()
        {
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("png") => "image/png",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            _ => "application/octet-stream",
        };
        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// The business-creation form. Field names and messages match the posting
/// form's schema: name/category/description/address/phone/email required,
/// phone digits only, website and logo optional but must be URLs when set.
#[derive(Debug, Clone, Default)]
pub struct ListingDraft {
    name: String,
    category: String,
    description: String,
    address: String,
    phone: String,
    email: String,
    website: String,
    logo: String,
    image: Option<ImageAttachment>,
}

impl ListingDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = website.into();
        self
    }

    pub fn with_logo(mut self, logo: impl Into<String>) -> Self {
        self.logo = logo.into();
        self
    }

    /// Replaces the image selection, dropping any previous attachment.
    pub fn attach_image(&mut self, image: ImageAttachment) {
        self.image = Some(image);
    }

    pub fn clear_image(&mut self) {
        self.image = None;
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

    pub fn website(&self) -> &str {
        &self.website
    }

    pub fn logo(&self) -> &str {
        &self.logo
    }

    pub fn image(&self) -> Option<&ImageAttachment> {
        self.image.as_ref()
    }

    /// Field-level validation. A non-empty result blocks submission.
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::default();

        if self.name.trim().is_empty() {
            errors.push("name", "Business name is required");
        }
        if self.category.trim().is_empty() {
            errors.push("category", "Category is required");
        }
        if self.description.trim().is_empty() {
            errors.push("description", "Description is required");
        }
        if self.address.trim().is_empty() {
            errors.push("address", "Address is required");
        }

        if self.phone.trim().is_empty() {
            errors.push("phone", "Phone is required");
        } else if !self.phone.chars().all(|c| c.is_ascii_digit()) {
            errors.push("phone", "Must be only digits");
        }

        if self.email.trim().is_empty() {
            errors.push("email", "Email is required");
        } else if !looks_like_email(&self.email) {
            errors.push("email", "Invalid email format");
        }

        if !self.website.trim().is_empty() && reqwest::Url::parse(&self.website).is_err() {
            errors.push("website", "Invalid URL");
        }
        if !self.logo.trim().is_empty() && reqwest::Url::parse(&self.logo).is_err() {
            errors.push("logo", "Must be a valid URL");
        }

        errors
    }
}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.contains(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> ListingDraft {
        ListingDraft::new()
            .with_name("Sterling Bakery")
            .with_category("Food")
            .with_description("Fresh bread daily")
            .with_address("12 Main St")
            .with_phone("5551234")
            .with_email("hello@bakery.test")
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(valid_draft().validate().is_empty());
    }

    #[test]
    fn test_non_digit_phone_rejected() {
        let errors = valid_draft().with_phone("555-1234").validate();
        assert_eq!(errors.message_for("phone"), Some("Must be only digits"));
    }

    #[test]
    fn test_required_fields() {
        let errors = ListingDraft::new().validate();
        assert_eq!(errors.message_for("name"), Some("Business name is required"));
        assert_eq!(errors.message_for("category"), Some("Category is required"));
        assert_eq!(errors.message_for("description"), Some("Description is required"));
        assert_eq!(errors.message_for("address"), Some("Address is required"));
        assert_eq!(errors.message_for("phone"), Some("Phone is required"));
        assert_eq!(errors.message_for("email"), Some("Email is required"));
        assert_eq!(errors.len(), 6);
    }

    #[test]
    fn test_email_format() {
        let errors = valid_draft().with_email("not-an-email").validate();
        assert_eq!(errors.message_for("email"), Some("Invalid email format"));

        let errors = valid_draft().with_email("a@b.test").validate();
        assert!(errors.is_empty());
    }

    #[test]
    fn test_optional_urls() {
        // Absent website/logo are fine.
        assert!(valid_draft().validate().is_empty());

        let errors = valid_draft().with_website("not a url").validate();
        assert_eq!(errors.message_for("website"), Some("Invalid URL"));

        let errors = valid_draft().with_logo("also not a url").validate();
        assert_eq!(errors.message_for("logo"), Some("Must be a valid URL"));

        let errors = valid_draft()
            .with_website("https://bakery.test")
            .with_logo("https://bakery.test/logo.png")
            .validate();
        assert!(errors.is_empty());
    }

    #[test]
    fn test_attach_image_replaces_previous() {
        let mut draft = valid_draft();
        draft.attach_image(ImageAttachment::new("a.png", "image/png", vec![1, 2]));
        draft.attach_image(ImageAttachment::new("b.jpg", "image/jpeg", vec![3]));

        let image = draft.image().expect("image should be attached");
        assert_eq!(image.file_name(), "b.jpg");
        assert_eq!(image.content_type(), "image/jpeg");
        assert_eq!(image.bytes(), &[3]);
    }

    #[test]
    fn test_validation_errors_display() {
        let errors = valid_draft().with_phone("x").validate();
        assert_eq!(errors.to_string(), "phone: Must be only digits");
    }

    #[test]
    fn test_validation_errors_serialize() {
        let errors = valid_draft().with_phone("x").validate();
        let json = serde_json::to_string(&errors).expect("errors should serialize");
        assert_eq!(
            json,
            r#"{"errors":[{"field":"phone","message":"Must be only digits"}]}"#
        );
    }
}
