//! # Connector Layer
//!
//! External integrations implementing the application interfaces:
//! - HTTP client for the directory backend (reqwest)
//! - In-memory backend for tests and mock runs
//! - JSON file session store

pub mod adapter;

pub use adapter::*;
