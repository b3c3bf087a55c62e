mod browse_categories;
mod listing_dashboard;
mod post_listing;
mod view_listing;

pub use browse_categories::*;
pub use listing_dashboard::*;
pub use post_listing::*;
pub use view_listing::*;
