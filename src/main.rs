use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use indicatif::ProgressBar;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use yellowpages::{
    BrowseCategories, CountBand, DetailView, DirectoryApi, DomainError, HttpDirectoryApi,
    ImageAttachment, InMemoryDirectoryApi, JsonSessionStore, ListingDashboard, ListingDraft,
    ListingPatch, PageSource, PostListing, Session, SessionStore, ViewListing,
    DESCRIPTION_PREVIEW_LIMIT,
};

#[derive(Parser)]
#[command(name = "yellowpages")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    #[arg(short, long, global = true, default_value = "~/.yellowpages")]
    data_dir: String,

    /// Directory backend base URL (defaults to YELLOWPAGES_API_URL).
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Use an in-memory backend instead of the network.
    #[arg(long, global = true)]
    mock_api: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse per-category listing counts.
    Categories {
        /// Case-insensitive substring match on the category name.
        #[arg(short, long, default_value = "")]
        search: String,

        /// Volume band: all, high (>= 50 listings), or low.
        #[arg(short, long, default_value = "all")]
        band: String,

        #[arg(short, long, default_value = "1")]
        page: u32,
    },

    /// Page through your own business listings.
    Listings {
        #[arg(short, long, default_value = "1")]
        page: u32,
    },

    /// Show one listing in full.
    Show {
        id: String,

        /// Use the category-browse detail route.
        #[arg(long)]
        by_category: bool,

        /// Print the full description instead of the preview.
        #[arg(long)]
        full: bool,
    },

    /// Post a new business listing.
    Post {
        #[arg(long)]
        name: String,

        #[arg(long)]
        category: String,

        #[arg(long)]
        description: String,

        #[arg(long)]
        address: String,

        #[arg(long)]
        phone: String,

        #[arg(long)]
        email: String,

        #[arg(long, default_value = "")]
        website: String,

        #[arg(long, default_value = "")]
        logo: String,

        /// Path to a single image to upload with the listing.
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Update fields of an existing listing.
    Update {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        address: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        email: Option<String>,
    },

    /// Delete a listing.
    Delete {
        id: String,
    },

    /// List the category picker entries.
    Suggest,

    /// Store a session token for authenticated calls.
    Login {
        #[arg(long)]
        token: String,

        #[arg(long)]
        user_id: String,

        #[arg(long)]
        username: Option<String>,
    },

    /// Clear the stored session.
    Logout,

    /// Show listing totals, the data directory, and the active session.
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let data_dir = expand_tilde(&cli.data_dir);
    std::fs::create_dir_all(&data_dir)?;

    let session_store = JsonSessionStore::new(&data_dir);
    let session = session_store.load()?.unwrap_or_else(Session::anonymous);

    // Session commands don't touch the backend at all.
    match &cli.command {
        Commands::Login {
            token,
            user_id,
            username,
        } => {
            let mut session = Session::login(token.clone(), user_id.clone());
            if let Some(username) = username {
                session = session.with_username(username.clone());
            }
            session_store.save(&session)?;
            println!("Logged in as {}.", session.display_name());
            return Ok(());
        }
        Commands::Logout => {
            session_store.clear()?;
            println!("Logged out.");
            return Ok(());
        }
        _ => {}
    }

    let api: Arc<dyn DirectoryApi> = if cli.mock_api {
        info!("Using in-memory directory backend");
        Arc::new(InMemoryDirectoryApi::new())
    } else {
        let http = match cli.api_url.as_deref() {
            Some(url) => HttpDirectoryApi::new(url, session.clone()),
            None => HttpDirectoryApi::from_env(session.clone()),
        };
        info!("Using directory backend at {}", http.base_url());
        Arc::new(http)
    };

    match cli.command {
        Commands::Categories { search, band, page } => {
            let mut browser = BrowseCategories::new(api);
            browser.set_search(search);
            browser.set_band(CountBand::from_str(&band));

            let progress = spinner("Loading categories...");
            let result = browser.load(page).await;
            progress.finish_and_clear();
            let view = result?;

            if view.is_empty() {
                println!("No categories found");
            } else {
                for category in view.items() {
                    let volume = if category.is_high_volume() { "high" } else { "low" };
                    println!(
                        "  {} - {} listing(s) [{}]",
                        category.name(),
                        category.count(),
                        volume
                    );
                }
            }
            println!();
            println!("Page {} of {}", view.page(), view.total_pages());
        }

        Commands::Listings { page } => {
            let mut dashboard = ListingDashboard::new(api);

            let progress = spinner("Loading your listings...");
            let result = dashboard.load_page(page).await;
            progress.finish_and_clear();
            let view = result?;

            if view.is_empty() {
                println!("You haven't added any business listings yet.");
            } else {
                println!("You have {} business listing(s).\n", view.total_count());
                for listing in view.items() {
                    println!("  {} ({})", listing.name(), listing.id());
                    println!("    Category: {}", listing.category());
                    println!("    Status:   {}", listing.status().as_str());
                    println!("    {} - {}", listing.address(), listing.phone());
                    println!();
                }
                println!("{} of {}", view.page(), view.total_pages());
            }
        }

        Commands::Show {
            id,
            by_category,
            full,
        } => {
            let view_listing = ViewListing::new(api);

            let progress = spinner("Loading details...");
            let result = if by_category {
                view_listing.by_category_entry(&id).await
            } else {
                view_listing.by_id(&id).await
            };
            progress.finish_and_clear();

            match result? {
                DetailView::NotFound => println!("Business not found."),
                DetailView::Found(listing) => {
                    println!("{}", listing.name());
                    println!("Category: {}", listing.category());
                    println!("Status:   {}", listing.status().as_str());
                    println!();
                    if full {
                        println!("{}", listing.description());
                    } else {
                        println!("{}", listing.description_preview(DESCRIPTION_PREVIEW_LIMIT));
                    }
                    println!();
                    println!("Address: {}", listing.address());
                    println!("Phone:   {}", listing.phone());
                    if listing.email().is_empty() {
                        println!("Email:   Not available");
                    } else {
                        println!("Email:   {}", listing.email());
                    }
                    if let Some(website) = listing.website() {
                        println!("Website: {}", website);
                    }
                    if let Some(image) = listing.primary_image() {
                        println!("Image:   {}", image);
                    }
                }
            }
        }

        Commands::Post {
            name,
            category,
            description,
            address,
            phone,
            email,
            website,
            logo,
            image,
        } => {
            let mut draft = ListingDraft::new()
                .with_name(name)
                .with_category(category)
                .with_description(description)
                .with_address(address)
                .with_phone(phone)
                .with_email(email)
                .with_website(website)
                .with_logo(logo);

            if let Some(path) = image {
                draft.attach_image(ImageAttachment::from_path(&path)?);
            }

            let post = PostListing::new(api);
            let progress = spinner("Submitting...");
            let result = post.execute(&draft).await;
            progress.finish_and_clear();

            match result {
                Ok(listing) => {
                    println!("Business created successfully!");
                    println!("  id:     {}", listing.id());
                    println!("  status: {}", listing.status().as_str());
                }
                Err(DomainError::ValidationFailed(errors)) => {
                    eprintln!("Listing was not submitted:");
                    for error in errors.errors() {
                        eprintln!("  {}: {}", error.field, error.message);
                    }
                    std::process::exit(1);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Commands::Update {
            id,
            name,
            category,
            description,
            address,
            phone,
            email,
        } => {
            let patch = ListingPatch {
                name,
                category,
                description,
                address,
                phone,
                email,
            };
            if patch.is_empty() {
                println!("Nothing to update.");
                return Ok(());
            }

            let progress = spinner("Updating...");
            let result = api.update_listing(&id, &patch).await;
            progress.finish_and_clear();

            let listing = result?;
            println!("Updated: {}", listing.summary());
        }

        Commands::Delete { id } => {
            let progress = spinner("Deleting...");
            let result = api.delete_listing(&id).await;
            progress.finish_and_clear();
            result?;
            println!("Business deleted successfully.");
        }

        Commands::Suggest => {
            let post = PostListing::new(api);
            let progress = spinner("Loading categories...");
            let result = post.suggestions().await;
            progress.finish_and_clear();

            let suggestions = result?;
            if suggestions.is_empty() {
                println!("No categories available.");
            } else {
                for suggestion in suggestions {
                    println!("  {}", suggestion.name());
                }
            }
        }

        Commands::Stats => {
            let mut dashboard = ListingDashboard::new(api).with_per_page(1);
            let progress = spinner("Loading...");
            let result = dashboard.load_page(1).await;
            progress.finish_and_clear();
            let view = result?;

            println!("YellowPages");
            println!("===========");
            println!("Your listings: {}", view.total_count());
            println!("Data dir:      {}", data_dir);
            match session.user_id() {
                Some(user_id) => println!("Session:       {} ({})", session.display_name(), user_id),
                None => println!("Session:       anonymous"),
            }
        }

        // Handled before the backend was constructed.
        Commands::Login { .. } | Commands::Logout => {}
    }

    Ok(())
}

fn spinner(message: &str) -> ProgressBar {
    let progress = ProgressBar::new_spinner();
    progress.set_message(message.to_string());
    progress.enable_steady_tick(Duration::from_millis(80));
    progress
}

fn expand_tilde(path: &str) -> String {
    if path == "~" || path.starts_with("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            if path == "~" {
                return home.to_string_lossy().to_string();
            }
            return path.replacen("~", &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}
