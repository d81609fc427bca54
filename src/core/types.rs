use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value, json};

/// `StaticCountry` id of Germany, the default address country of new documents.
pub const GERMANY: u64 = 1;

/// The two document types the payload builder can assemble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    Invoice,
    Order,
}

impl DocumentKind {
    /// sevdesk object name, also used as `objectType` of number sequences.
    pub fn object_name(self) -> &'static str {
        match self {
            Self::Invoice => "Invoice",
            Self::Order => "Order",
        }
    }

    /// Key of the header map in a save request.
    pub fn header_key(self) -> &'static str {
        match self {
            Self::Invoice => "invoice",
            Self::Order => "order",
        }
    }

    /// Key of the line item list in a save request.
    pub fn items_key(self) -> &'static str {
        match self {
            Self::Invoice => "invoicePosSave",
            Self::Order => "orderPosSave",
        }
    }

    pub fn number_key(self) -> &'static str {
        match self {
            Self::Invoice => "invoiceNumber",
            Self::Order => "orderNumber",
        }
    }

    pub fn date_key(self) -> &'static str {
        match self {
            Self::Invoice => "invoiceDate",
            Self::Order => "orderDate",
        }
    }

    /// Object name of a single line item.
    pub fn position_object(self) -> &'static str {
        match self {
            Self::Invoice => "InvoicePos",
            Self::Order => "OrderPos",
        }
    }

    /// Prefix of the human-readable document header ("Rechnung NR. RE-1001").
    pub fn header_prefix(self) -> &'static str {
        match self {
            Self::Invoice => "Rechnung NR. ",
            Self::Order => "Angebot NR. ",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invoice => f.write_str("invoice"),
            Self::Order => f.write_str("order"),
        }
    }
}

/// Invoice status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvoiceStatus {
    DeactivatedRecurring,
    Draft,
    Open,
    Paid,
}

impl InvoiceStatus {
    pub fn code(self) -> u32 {
        match self {
            Self::DeactivatedRecurring => 50,
            Self::Draft => 100,
            Self::Open => 200,
            Self::Paid => 1000,
        }
    }
}

/// Invoice type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvoiceType {
    /// RE: a simple selling process.
    Normal,
    /// WKR: generates normal invoices at fixed intervals.
    Recurring,
    /// SR: cancels an already created normal invoice.
    Cancellation,
    /// MA: payment reminder, often with a fee.
    Reminder,
    /// TR: one part of a split invoice.
    Part,
    /// ER: completes a series of part invoices.
    Final,
}

impl InvoiceType {
    pub fn code(self) -> &'static str {
        match self {
            Self::Normal => "RE",
            Self::Recurring => "WKR",
            Self::Cancellation => "SR",
            Self::Reminder => "MA",
            Self::Part => "TR",
            Self::Final => "ER",
        }
    }
}

/// Order status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Draft,
    Delivered,
    RejectedOrCancelled,
    Accepted,
    PartiallyCalculated,
    Calculated,
}

impl OrderStatus {
    pub fn code(self) -> u32 {
        match self {
            Self::Draft => 100,
            Self::Delivered => 200,
            Self::RejectedOrCancelled => 300,
            Self::Accepted => 500,
            Self::PartiallyCalculated => 750,
            Self::Calculated => 1000,
        }
    }
}

/// Order type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderType {
    #[default]
    EstimateOrProposal,
    OrderConfirmation,
    DeliveryNote,
}

impl OrderType {
    pub fn code(self) -> &'static str {
        match self {
            Self::EstimateOrProposal => "AN",
            Self::OrderConfirmation => "AB",
            Self::DeliveryNote => "LI",
        }
    }
}

/// Contact categories. `Custom` carries an account-specific category id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactCategory {
    Supplier,
    Customer,
    Partner,
    ProspectCustomer,
    Custom(u64),
}

impl ContactCategory {
    pub fn id(self) -> u64 {
        match self {
            Self::Supplier => 2,
            Self::Customer => 3,
            Self::Partner => 4,
            Self::ProspectCustomer => 28,
            Self::Custom(id) => id,
        }
    }
}

/// How the amount of an invoice created from an order is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AmountType {
    Percentage,
    Net,
    Gross,
}

impl AmountType {
    pub fn code(self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Net => "net",
            Self::Gross => "gross",
        }
    }
}

/// Kind of invoice created from an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartialType {
    /// RE: invoice for the whole order.
    Normal,
    /// TR: part invoice.
    Part,
    /// AR: advance invoice.
    Advance,
}

impl PartialType {
    pub fn code(self) -> &'static str {
        match self {
            Self::Normal => "RE",
            Self::Part => "TR",
            Self::Advance => "AR",
        }
    }
}

/// sevdesk object reference: `{"id": …, "objectName": …}`.
pub fn object_ref(id: impl Into<Value>, object_name: &str) -> Value {
    json!({ "id": id.into(), "objectName": object_name })
}

/// sevdesk serializes ids as strings but accepts numbers; read either.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

/// Scalar attributes arrive as strings, numbers or booleans depending on
/// the endpoint; keep their text. `null` reads as absent.
fn opt_scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(flag) => Ok(Some(flag.to_string())),
        other => Err(serde::de::Error::custom(format!(
            "expected a scalar, got {other}"
        ))),
    }
}

/// A contact (organisation or person).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SevContact {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "opt_scalar_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "opt_scalar_string")]
    pub customer_number: Option<String>,
    /// Every other attribute returned by the API.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// An invoice as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SevInvoice {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "opt_scalar_string")]
    pub invoice_number: Option<String>,
    #[serde(default, deserialize_with = "opt_scalar_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "opt_scalar_string")]
    pub header: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// An order (estimate, confirmation, delivery note) as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SevOrder {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "opt_scalar_string")]
    pub order_number: Option<String>,
    #[serde(default, deserialize_with = "opt_scalar_string")]
    pub order_type: Option<String>,
    #[serde(default, deserialize_with = "opt_scalar_string")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// A stored text template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextTemplate {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "opt_scalar_string")]
    pub text: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Rendered PDF of an invoice or order. `content` stays base64 encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfDocument {
    pub filename: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    pub content: String,
    #[serde(default)]
    pub base64encoded: bool,
}
