//! Blocking HTTP transport for the sevdesk API.
//!
//! # Example
//!
//! ```no_run
//! use sevdesk::Sevdesk;
//! use sevdesk::http::HttpGateway;
//! use sevdesk::Settings;
//!
//! let settings = Settings::from_env();
//! let client = Sevdesk::new(HttpGateway::from_settings(&settings)?, settings);
//! for contact in client.contacts().all_customers(0, 100)? {
//!     println!("{} {}", contact.id, contact.name.unwrap_or_default());
//! }
//! # Ok::<(), sevdesk::SevdeskError>(())
//! ```

mod client;
mod query;

pub use client::{DEFAULT_BASE_URL, HttpGateway};
pub use query::flatten;
