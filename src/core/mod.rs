//! Request building for the sevdesk API.
//!
//! This module holds everything that does not depend on a concrete HTTP
//! client: the [`Gateway`] seam, configuration, line item normalization,
//! document number resolution and the override merge that produces save
//! requests for invoices and orders.

mod error;
mod gateway;
mod items;
pub mod merge;
mod payload;
mod sequence;
pub mod settings;
mod types;

pub use error::*;
pub use gateway::*;
pub use items::*;
pub use merge::{merge, merge_maps, merged};
pub use payload::*;
pub use sequence::*;
pub use settings::{DocumentDefaults, Settings};
pub use types::*;
