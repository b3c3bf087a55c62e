//! Integration tests for the yellowpages client.
//!
//! End-to-end flows over the in-memory directory backend: post a listing,
//! find it on the dashboard, browse its category, edit it, delete it.

use std::sync::Arc;

use yellowpages::{
    BrowseCategories, CountBand, InMemoryDirectoryApi, ListingDashboard, ListingDraft,
    ListingPatch, ModerationStatus, PageSource, PostListing, ViewListing,
};

fn draft(name: &str, category: &str) -> ListingDraft {
    ListingDraft::new()
        .with_name(name)
        .with_category(category)
        .with_description("A local business serving the neighborhood for years.")
        .with_address("42 High Street")
        .with_phone("5550101")
        .with_email("contact@business.test")
}

#[tokio::test]
async fn test_post_then_see_on_dashboard() {
    let api = Arc::new(InMemoryDirectoryApi::new());
    let post = PostListing::new(api.clone());

    let created = post
        .execute(&draft("Harbor Cafe", "Food"))
        .await
        .expect("Failed to create listing");
    assert_eq!(created.status(), ModerationStatus::Pending);

    let mut dashboard = ListingDashboard::new(api);
    let view = dashboard.load_page(1).await.expect("Failed to load page");
    assert_eq!(view.total_count(), 1);
    assert_eq!(view.items()[0].name(), "Harbor Cafe");
}

#[tokio::test]
async fn test_posted_categories_show_in_browser() {
    let api = Arc::new(InMemoryDirectoryApi::new());
    let post = PostListing::new(api.clone());

    for i in 0..3 {
        post.execute(&draft(&format!("Cafe {}", i), "Food"))
            .await
            .expect("Failed to create listing");
    }
    post.execute(&draft("Hardware Store", "Retail"))
        .await
        .expect("Failed to create listing");

    let mut browser = BrowseCategories::new(api);
    let view = browser.load(1).await.expect("Failed to load categories");
    assert_eq!(view.total_count(), 2);

    browser.set_search("foo");
    assert_eq!(browser.filtered().iter().filter(|c| c.name() == "Food").count(), 1);
    assert_eq!(browser.page(), 1);

    // Everything here is below the high-volume threshold.
    browser.set_search("");
    browser.set_band(CountBand::High);
    assert!(browser.filtered().is_empty());
}

#[tokio::test]
async fn test_edit_then_view_detail() {
    let api = Arc::new(InMemoryDirectoryApi::new());
    let post = PostListing::new(api.clone());
    let created = post
        .execute(&draft("Harbor Cafe", "Food"))
        .await
        .expect("Failed to create listing");

    let mut dashboard = ListingDashboard::new(api.clone());
    dashboard.load_page(1).await.expect("Failed to load page");
    dashboard
        .update(
            created.id(),
            &ListingPatch {
                phone: Some("5550999".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to update listing");

    let view_listing = ViewListing::new(api);
    let detail = view_listing
        .by_id(created.id())
        .await
        .expect("Failed to fetch detail");
    let listing = detail.listing().expect("Listing should exist");
    assert_eq!(listing.phone(), "5550999");
    assert_eq!(listing.name(), "Harbor Cafe");
}

#[tokio::test]
async fn test_delete_then_detail_is_terminal_not_found() {
    let api = Arc::new(InMemoryDirectoryApi::new());
    let post = PostListing::new(api.clone());
    let created = post
        .execute(&draft("Harbor Cafe", "Food"))
        .await
        .expect("Failed to create listing");

    let mut dashboard = ListingDashboard::new(api.clone());
    dashboard.load_page(1).await.expect("Failed to load page");
    dashboard
        .delete(created.id())
        .await
        .expect("Failed to delete listing");
    assert_eq!(dashboard.total_count(), 0);

    let view_listing = ViewListing::new(api);
    let detail = view_listing
        .by_id(created.id())
        .await
        .expect("Detail fetch should not error");
    assert!(detail.is_not_found());
}

#[tokio::test]
async fn test_invalid_draft_never_reaches_backend() {
    let api = Arc::new(InMemoryDirectoryApi::new());
    let post = PostListing::new(api.clone());

    let result = post.execute(&draft("Harbor Cafe", "Food").with_phone("CALL-US")).await;
    assert!(result.is_err());
    assert_eq!(api.request_count(), 0);
}

#[tokio::test]
async fn test_dashboard_pages_partition_collection() {
    let api = Arc::new(InMemoryDirectoryApi::new());
    let post = PostListing::new(api.clone());
    for i in 0..9 {
        post.execute(&draft(&format!("Business {:02}", i), "Services"))
            .await
            .expect("Failed to create listing");
    }

    let mut dashboard = ListingDashboard::new(api);
    let mut seen = Vec::new();
    let first = dashboard.load_page(1).await.expect("Failed to load page");
    let pages = first.total_pages();
    seen.extend(first.into_items());
    for page in 2..=pages {
        let view = dashboard.load_page(page).await.expect("Failed to load page");
        assert!(view.items().len() <= 4);
        seen.extend(view.into_items());
    }

    let names: Vec<String> = seen.iter().map(|l| l.name().to_string()).collect();
    let expected: Vec<String> = (0..9).map(|i| format!("Business {:02}", i)).collect();
    assert_eq!(names, expected);
}
