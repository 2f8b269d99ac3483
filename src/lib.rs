// Configuration, errors and ambient concerns
pub mod config;
pub mod error;
pub mod metrics;
pub mod telemetry;

// Template ids and their on-disk caches
pub mod template;

// Courier API client
pub mod courier;

pub use courier::{Attachment, CourierClient, SendRequest};
pub use error::{CourierError, Result};
