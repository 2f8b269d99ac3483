//! Courier API client.
//!
//! - [`CourierClient`]: template bootstrap, validation and sends
//! - [`CourierApi`]: base URL, headers and raw requests
//! - [`SendRequest`] / [`Attachment`]: the `POST send` body

mod api;
mod client;
mod payload;

pub use api::CourierApi;
pub use client::CourierClient;
pub use payload::{Attachment, SendPayload, SendRequest, CHANNEL_ATTACHMENT_FILENAME};
