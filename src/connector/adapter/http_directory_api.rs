use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::application::interfaces::{DirectoryApi, PageView};
use crate::domain::{
    CategoryCount, CategorySuggestion, DomainError, Listing, ListingDraft, ListingPatch, Session,
};

/// Default target: the deployed directory backend.
pub const DEFAULT_BASE_URL: &str = "https://sterling-yellow-pages-backend.onrender.com/api";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// HTTP client for the directory REST backend.
///
/// Implements [`DirectoryApi`] so use cases stay decoupled from transport
/// and serialization details. The session is passed in explicitly; its
/// bearer token is attached when present, and anonymous reads work
/// without one.
pub struct HttpDirectoryApi {
    client: reqwest::Client,
    base_url: String,
    session: Session,
}

impl HttpDirectoryApi {
    pub fn new(base_url: impl Into<String>, session: Session) -> Self {
        let base: String = base_url.into();
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            base_url: base.trim_end_matches('/').to_string(),
            session,
        }
    }

    /// Construct from `YELLOWPAGES_API_URL`, falling back to the deployed
    /// backend.
    pub fn from_env(session: Session) -> Self {
        let base = std::env::var("YELLOWPAGES_API_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base, session)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(
        &self,
        builder: reqwest::RequestBuilder,
        what: &str,
    ) -> Result<reqwest::Response, DomainError> {
        debug!("{}: issuing request", what);
        let response = self
            .authorize(builder)
            .send()
            .await
            .map_err(|e| DomainError::api(format!("{}: request failed: {}", what, e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DomainError::not_found(format!("{}: no such record", what)));
        }

        // The backend reports failures as an optional `message` string.
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| format!("server returned {}", status));
        warn!("{}: {}", what, message);
        Err(DomainError::api(message))
    }

    async fn parse<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        what: &str,
    ) -> Result<T, DomainError> {
        response
            .json::<T>()
            .await
            .map_err(|e| DomainError::api(format!("{}: failed to parse response: {}", what, e)))
    }

    fn multipart_form(draft: &ListingDraft) -> Result<reqwest::multipart::Form, DomainError> {
        let mut form = reqwest::multipart::Form::new()
            .text("name", draft.name().to_string())
            .text("category", draft.category().to_string())
            .text("description", draft.description().to_string())
            .text("address", draft.address().to_string())
            .text("phone", draft.phone().to_string())
            .text("email", draft.email().to_string())
            .text("website", draft.website().to_string())
            .text("logo", draft.logo().to_string());

        if let Some(image) = draft.image() {
            let part = reqwest::multipart::Part::bytes(image.bytes().to_vec())
                .file_name(image.file_name().to_string())
                .mime_str(image.content_type())
                .map_err(|e| DomainError::internal(format!("invalid image content type: {}", e)))?;
            form = form.part("image", part);
        }
        Ok(form)
    }
}

#[async_trait]
impl DirectoryApi for HttpDirectoryApi {
    async fn category_counts(&self) -> Result<Vec<CategoryCount>, DomainError> {
        let request = self.client.get(self.url("/business/category-counts"));
        let response = self.send(request, "category-counts").await?;
        Self::parse(response, "category-counts").await
    }

    async fn list_listings(
        &self,
        page: u32,
        limit: usize,
    ) -> Result<PageView<Listing>, DomainError> {
        let request = self
            .client
            .get(self.url("/ads/businesses"))
            .query(&[("page", page.to_string()), ("limit", limit.to_string())]);
        let response = self.send(request, "list-businesses").await?;
        Self::parse(response, "list-businesses").await
    }

    async fn get_listing(&self, id: &str) -> Result<Listing, DomainError> {
        let request = self.client.get(self.url(&format!("/ads/business/{}", id)));
        let response = self.send(request, "get-business").await?;
        Self::parse(response, "get-business").await
    }

    async fn get_category_listing(&self, id: &str) -> Result<Listing, DomainError> {
        let request = self
            .client
            .get(self.url(&format!("/ads/get-categorybusiness/{}", id)));
        let response = self.send(request, "get-categorybusiness").await?;
        Self::parse(response, "get-categorybusiness").await
    }

    async fn create_listing(&self, draft: &ListingDraft) -> Result<Listing, DomainError> {
        let form = Self::multipart_form(draft)?;
        let request = self
            .client
            .post(self.url("/ads/create-business"))
            .multipart(form);
        let response = self.send(request, "create-business").await?;
        Self::parse(response, "create-business").await
    }

    async fn update_listing(
        &self,
        id: &str,
        patch: &ListingPatch,
    ) -> Result<Listing, DomainError> {
        let request = self
            .client
            .put(self.url(&format!("/ads/business/{}", id)))
            .json(patch);
        let response = self.send(request, "update-business").await?;
        Self::parse(response, "update-business").await
    }

    async fn delete_listing(&self, id: &str) -> Result<(), DomainError> {
        let request = self.client.delete(self.url(&format!("/ads/business/{}", id)));
        self.send(request, "delete-business").await?;
        Ok(())
    }

    async fn category_suggestions(&self) -> Result<Vec<CategorySuggestion>, DomainError> {
        let request = self.client.get(self.url("/ads/get-category"));
        let response = self.send(request, "get-category").await?;
        Self::parse(response, "get-category").await
    }
}
