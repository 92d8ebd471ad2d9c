//! Melodia Server Library
//!
//! Configuration, blob store adapters and service wiring for the Melodia
//! operator binary.
//!
//! This library exposes the core components for testing purposes.

pub mod config;
pub mod error;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::{BlobBackend, MelodiaConfig};
pub use error::{Result, ServerError};
pub use services::{LocalBlobStore, SupabaseBlobStore};
pub use state::AppState;
