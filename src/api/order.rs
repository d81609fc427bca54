use chrono::{DateTime, Utc};
use serde_json::{Value, json};

use super::{after_filter, before_filter, contact_filter, first, list, params, routes};
use crate::core::{
    DocumentKind, Gateway, Method, OrderStatus, Overrides, Params, PayloadBuilder, PdfDocument,
    Result, SevOrder, Settings, decode, objects,
};

/// Orders: estimates, order confirmations and delivery notes.
#[derive(Debug, Clone, Copy)]
pub struct Orders<'a, G> {
    gateway: &'a G,
    settings: &'a Settings,
}

impl<'a, G: Gateway> Orders<'a, G> {
    pub fn new(gateway: &'a G, settings: &'a Settings) -> Self {
        Self { gateway, settings }
    }

    /// All orders with their category and unity embedded.
    pub fn all(&self, depth: u8, limit: u32) -> Result<Vec<SevOrder>> {
        let query = params([
            ("depth", json!(depth)),
            ("limit", json!(limit)),
            ("embed", json!("category,unity")),
            ("countAll", json!("true")),
        ]);
        list(self.gateway, routes::ORDER, query)
    }

    pub fn all_draft(&self) -> Result<Vec<SevOrder>> {
        self.all_with_status(OrderStatus::Draft)
    }

    /// Orders that were delivered to the customer and await a decision.
    pub fn all_open(&self) -> Result<Vec<SevOrder>> {
        self.all_with_status(OrderStatus::Delivered)
    }

    pub fn all_accepted(&self) -> Result<Vec<SevOrder>> {
        self.all_with_status(OrderStatus::Accepted)
    }

    pub fn all_with_status(&self, status: OrderStatus) -> Result<Vec<SevOrder>> {
        list(self.gateway, routes::ORDER, params([("status", json!(status.code()))]))
    }

    pub fn all_by_contact(&self, contact_id: u64) -> Result<Vec<SevOrder>> {
        list(self.gateway, routes::ORDER, contact_filter(contact_id))
    }

    pub fn all_before(&self, until: DateTime<Utc>) -> Result<Vec<SevOrder>> {
        list(self.gateway, routes::ORDER, before_filter(until))
    }

    pub fn all_after(&self, since: DateTime<Utc>) -> Result<Vec<SevOrder>> {
        list(self.gateway, routes::ORDER, after_filter(since))
    }

    pub fn get(&self, order_id: u64) -> Result<SevOrder> {
        first(self.gateway, &format!("{}/{order_id}", routes::ORDER), Params::new())
    }

    /// The save request [`create`](Self::create) would send.
    pub fn payload(&self, contact_id: u64, items: &[Value], overrides: &Overrides) -> Result<Params> {
        PayloadBuilder::new(self.gateway, self.settings, DocumentKind::Order)
            .build(contact_id, items, overrides)
    }

    /// Create an order for `contact_id`.
    ///
    /// The order type comes from the `orderType` override (default `AN`) and
    /// selects the number range.
    pub fn create(&self, contact_id: u64, items: &[Value], overrides: &Overrides) -> Result<SevOrder> {
        let payload = self.payload(contact_id, items, overrides)?;
        let response = self.gateway.call(Method::Post, routes::CREATE_ORDER, payload)?;
        let mut saved = objects(response)?;
        decode(saved.get_mut("order").map(Value::take).unwrap_or(Value::Null))
    }

    pub fn raw_pdf(&self, order_id: u64, preview: bool) -> Result<PdfDocument> {
        let path = format!("{}/{order_id}/getPdf", routes::ORDER);
        let response = self
            .gateway
            .call(Method::Get, &path, params([("preventSendBy", json!(preview))]))?;
        decode(objects(response)?)
    }

    pub fn send_per_mail(&self, order_id: u64, email: &str, subject: &str, text: &str) -> Result<Value> {
        let path = format!("{}/{order_id}/sendViaEmail", routes::ORDER);
        self.gateway.call(
            Method::Post,
            &path,
            params([
                ("toEmail", json!(email)),
                ("subject", json!(subject)),
                ("text", json!(text)),
            ]),
        )
    }
}
