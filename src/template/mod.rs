//! Template ids known to the Courier workspace.
//!
//! This module provides:
//! - [`TemplateSet`], the ordered list of template ids used for validation
//! - [`TemplateCache`], the primary and fallback JSON files on disk
//! - [`NotificationListing`], the `GET notifications` response body
//!
//! # Example
//!
//! ```ignore
//! let cache = TemplateCache::new("storage/templates.json", "storage/fallback-templates.json");
//!
//! let templates = match cache.load_primary().await? {
//!     Some(templates) => templates,
//!     None => {
//!         let listing: NotificationListing = fetch("notifications").await?;
//!         let templates = listing.template_set();
//!         cache.store_primary(&templates).await?;
//!         templates
//!     }
//! };
//!
//! assert!(templates.contains("welcome-email"));
//! ```

mod cache;
mod listing;
mod store;

pub use cache::TemplateCache;
pub use listing::NotificationListing;
pub use store::TemplateSet;
