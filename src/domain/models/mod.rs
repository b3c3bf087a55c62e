mod category;
mod draft;
mod listing;
pub mod paging;
mod session;

pub use category::*;
pub use draft::*;
pub use listing::*;
pub use paging::*;
pub use session::*;
