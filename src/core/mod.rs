//! Core business logic abstractions

pub mod cache;
pub mod config;
pub mod log;
pub mod session;
pub mod sip;
pub mod vault;

// Re-export main types for cleaner imports
pub use session::Session;
pub use sip::{Projection, ProjectionInput, project};
pub use vault::{Receipt, VaultClient, WalletProvider};
