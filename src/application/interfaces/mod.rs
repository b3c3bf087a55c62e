mod directory_api;
mod page_source;
mod session_store;

pub use directory_api::*;
pub use page_source::*;
pub use session_store::*;
