//! # AI Oversight Shared
//!
//! Common types used across all oversight crates: the entity model of the
//! static content store, the resource catalog, configuration and errors.

pub mod config;
pub mod control;
pub mod error;
pub mod link;
pub mod mitigation;
pub mod phase;
pub mod question;
pub mod resource;
pub mod risk;

// Re-exports
pub use config::*;
pub use control::*;
pub use error::*;
pub use link::*;
pub use mitigation::*;
pub use phase::*;
pub use question::*;
pub use resource::*;
pub use risk::*;
