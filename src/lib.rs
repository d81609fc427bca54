//! # sevdesk
//!
//! Client for the [sevdesk](https://api.sevdesk.de) accounting API: contacts,
//! invoices, orders and text templates.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! Transport sits behind the [`Gateway`](core::Gateway) trait, so request
//! building can be exercised without a network.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::{Value, json};
//! use sevdesk::core::*;
//! use sevdesk::Sevdesk;
//!
//! /// Answers the number lookup and echoes the save request.
//! struct Echo;
//!
//! impl Gateway for Echo {
//!     fn call(&self, method: Method, path: &str, params: Params) -> Result<Value> {
//!         match (method, path) {
//!             (Method::Get, SEQUENCE_PATH) => Ok(json!({
//!                 "objects": {"nextSequence": 1001, "format": "RE-%NUMBER"}
//!             })),
//!             _ => Ok(json!({"objects": {"invoice": {
//!                 "id": "1",
//!                 "invoiceNumber": params["invoice"]["invoiceNumber"],
//!             }}})),
//!         }
//!     }
//! }
//!
//! let settings = Settings::new("0123456789abcdef")
//!     .tax_rate("19")
//!     .tax_text("Umsatzsteuer 19%")
//!     .tax_type("default")
//!     .invoice_type("RE")
//!     .currency("EUR")
//!     .sev_user_id("4711");
//!
//! let client = Sevdesk::new(Echo, settings);
//! let invoice = client
//!     .invoices()
//!     .create(42, &[json!({"name": "Beratung", "price": 150, "quantity": 8})], &Overrides::new())
//!     .unwrap();
//!
//! assert_eq!(invoice.invoice_number.as_deref(), Some("RE-1001"));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Gateway trait, payload builder, resources |
//! | `http` | Blocking `reqwest` gateway |
//! | `env` | Load settings from a `.env` file |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod api;

#[cfg(feature = "http")]
pub mod http;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::api::Sevdesk;
#[cfg(feature = "core")]
pub use crate::core::*;
