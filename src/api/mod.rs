//! Resource views over the sevdesk REST API.
//!
//! [`Sevdesk`] owns a [`Gateway`] and the [`Settings`]; each resource
//! borrows both and turns a method call into exactly one remote call (two
//! for document creation: number lookup, then save).

mod contact;
mod invoice;
mod order;
mod text_template;

pub use contact::Contacts;
pub use invoice::Invoices;
pub use order::Orders;
pub use text_template::TextTemplates;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::core::{Gateway, Method, Params, Result, SevdeskError, Settings, decode, objects, object_ref};

/// API paths relative to the API root.
pub mod routes {
    pub const CONTACT: &str = "Contact";
    pub const INVOICE: &str = "Invoice";
    pub const CREATE_INVOICE: &str = "Invoice/Factory/saveInvoice";
    pub const INVOICE_FROM_ORDER: &str = "Invoice/Factory/createInvoiceFromOrder";
    pub const ORDER: &str = "Order";
    pub const CREATE_ORDER: &str = "Order/Factory/saveOrder";
    pub const TEXT_TEMPLATE: &str = "TextTemplate";
}

/// Default page sizes for list calls.
pub mod limits {
    pub const CONTACTS: u32 = 999_999;
    pub const ORDERS: u32 = 9_999;
    pub const TEXT_TEMPLATES: u32 = 1_000;
}

/// Entry point: a gateway plus the configuration documents are built from.
///
/// ```
/// use sevdesk::{Sevdesk, Settings};
/// use sevdesk::core::{Gateway, Method, Params, Result};
/// use serde_json::{Value, json};
///
/// struct Empty;
///
/// impl Gateway for Empty {
///     fn call(&self, _: Method, _: &str, _: Params) -> Result<Value> {
///         Ok(json!({"objects": []}))
///     }
/// }
///
/// let client = Sevdesk::new(Empty, Settings::new("token"));
/// assert!(client.invoices().all_draft().unwrap().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Sevdesk<G> {
    gateway: G,
    settings: Settings,
}

impl<G: Gateway> Sevdesk<G> {
    pub fn new(gateway: G, settings: Settings) -> Self {
        Self { gateway, settings }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn contacts(&self) -> Contacts<'_, G> {
        Contacts::new(&self.gateway)
    }

    pub fn invoices(&self) -> Invoices<'_, G> {
        Invoices::new(&self.gateway, &self.settings)
    }

    pub fn orders(&self) -> Orders<'_, G> {
        Orders::new(&self.gateway, &self.settings)
    }

    pub fn text_templates(&self) -> TextTemplates<'_, G> {
        TextTemplates::new(&self.gateway)
    }
}

#[cfg(feature = "http")]
impl Sevdesk<crate::http::HttpGateway> {
    /// Build an HTTP-backed client from `api_token` (and optional `base_url`).
    pub fn connect(settings: Settings) -> Result<Self> {
        let gateway = crate::http::HttpGateway::from_settings(&settings)?;
        Ok(Self::new(gateway, settings))
    }
}

/// Build a parameter map from key/value pairs.
pub(crate) fn params<const N: usize>(pairs: [(&str, Value); N]) -> Params {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

/// GET `path` and decode every entry of `objects`.
pub(crate) fn list<G, T>(gateway: &G, path: &str, params: Params) -> Result<Vec<T>>
where
    G: Gateway + ?Sized,
    T: DeserializeOwned,
{
    let response = gateway.call(Method::Get, path, params)?;
    match objects(response)? {
        Value::Array(entries) => entries.into_iter().map(decode).collect(),
        other => Err(SevdeskError::UnexpectedResponse(format!(
            "expected a list of objects, got {other}"
        ))),
    }
}

/// GET `path` and decode the first entry of `objects`.
pub(crate) fn first<G, T>(gateway: &G, path: &str, params: Params) -> Result<T>
where
    G: Gateway + ?Sized,
    T: DeserializeOwned,
{
    list(gateway, path, params)?
        .into_iter()
        .next()
        .ok_or_else(|| SevdeskError::RemoteNotFound(format!("{path} returned no objects")))
}

/// Filter on the owning contact.
pub(crate) fn contact_filter(contact_id: u64) -> Params {
    params([("contact", object_ref(contact_id, "Contact"))])
}

/// Filter on documents dated at or before `until`.
pub(crate) fn before_filter(until: DateTime<Utc>) -> Params {
    params([("endDate", json!(until.timestamp()))])
}

/// Filter on documents dated at or after `since`.
pub(crate) fn after_filter(since: DateTime<Utc>) -> Params {
    params([("startDate", json!(since.timestamp()))])
}
