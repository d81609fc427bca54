use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::{Value, json};

use super::{after_filter, before_filter, contact_filter, list, params, routes};
use crate::core::{
    AmountType, DocumentKind, Gateway, InvoiceStatus, Method, Overrides, Params, PartialType,
    PayloadBuilder, PdfDocument, Result, SevInvoice, Settings, decode, object_ref,
    objects,
};

/// Invoices.
#[derive(Debug, Clone, Copy)]
pub struct Invoices<'a, G> {
    gateway: &'a G,
    settings: &'a Settings,
}

impl<'a, G: Gateway> Invoices<'a, G> {
    pub fn new(gateway: &'a G, settings: &'a Settings) -> Self {
        Self { gateway, settings }
    }

    pub fn all(&self) -> Result<Vec<SevInvoice>> {
        list(self.gateway, routes::INVOICE, Params::new())
    }

    pub fn all_draft(&self) -> Result<Vec<SevInvoice>> {
        self.all_with_status(InvoiceStatus::Draft)
    }

    pub fn all_open(&self) -> Result<Vec<SevInvoice>> {
        self.all_with_status(InvoiceStatus::Open)
    }

    pub fn all_paid(&self) -> Result<Vec<SevInvoice>> {
        self.all_with_status(InvoiceStatus::Paid)
    }

    pub fn all_with_status(&self, status: InvoiceStatus) -> Result<Vec<SevInvoice>> {
        list(self.gateway, routes::INVOICE, params([("status", json!(status.code()))]))
    }

    pub fn all_by_contact(&self, contact_id: u64) -> Result<Vec<SevInvoice>> {
        list(self.gateway, routes::INVOICE, contact_filter(contact_id))
    }

    /// Invoices dated at or before `until`.
    pub fn all_before(&self, until: DateTime<Utc>) -> Result<Vec<SevInvoice>> {
        list(self.gateway, routes::INVOICE, before_filter(until))
    }

    /// Invoices dated at or after `since`.
    pub fn all_after(&self, since: DateTime<Utc>) -> Result<Vec<SevInvoice>> {
        list(self.gateway, routes::INVOICE, after_filter(since))
    }

    /// The save request [`create`](Self::create) would send.
    pub fn payload(&self, contact_id: u64, items: &[Value], overrides: &Overrides) -> Result<Params> {
        PayloadBuilder::new(self.gateway, self.settings, DocumentKind::Invoice)
            .build(contact_id, items, overrides)
    }

    /// Create an invoice for `contact_id`.
    ///
    /// Draws the next number from the `RE` range, normalizes `items` and
    /// merges `overrides` over the computed request (see [`PayloadBuilder`]).
    pub fn create(&self, contact_id: u64, items: &[Value], overrides: &Overrides) -> Result<SevInvoice> {
        let payload = self.payload(contact_id, items, overrides)?;
        let response = self.gateway.call(Method::Post, routes::CREATE_INVOICE, payload)?;
        let mut saved = objects(response)?;
        decode(saved.get_mut("invoice").map(Value::take).unwrap_or(Value::Null))
    }

    pub fn update(&self, invoice_id: u64, params: Params) -> Result<SevInvoice> {
        let path = format!("{}/{invoice_id}", routes::INVOICE);
        let response = self.gateway.call(Method::Put, &path, params)?;
        decode(objects(response)?)
    }

    /// The rendered PDF. With `preview` the invoice is not marked as sent.
    pub fn raw_pdf(&self, invoice_id: u64, preview: bool) -> Result<PdfDocument> {
        let path = format!("{}/{invoice_id}/getPdf", routes::INVOICE);
        let response = self
            .gateway
            .call(Method::Get, &path, params([("preventSendBy", json!(preview))]))?;
        decode(objects(response)?)
    }

    pub fn send_per_mail(&self, invoice_id: u64, email: &str, subject: &str, text: &str) -> Result<Value> {
        let path = format!("{}/{invoice_id}/sendViaEmail", routes::INVOICE);
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

    /// Invoice (part of) an order. `amount` is read according to `amount_type`.
    pub fn create_from_order(
        &self,
        order_id: u64,
        amount_type: AmountType,
        amount: Decimal,
        partial_type: PartialType,
    ) -> Result<Value> {
        let response = self.gateway.call(
            Method::Post,
            routes::INVOICE_FROM_ORDER,
            params([
                ("order", object_ref(order_id, "Order")),
                ("type", json!(amount_type.code())),
                ("amount", json!(amount.to_string())),
                ("partialType", json!(partial_type.code())),
            ]),
        )?;
        objects(response)
    }
}
