mod http_directory_api;
mod in_memory_directory_api;
mod json_session_store;

pub use http_directory_api::*;
pub use in_memory_directory_api::*;
pub use json_session_store::*;
