use serde_json::{Value, json};

use super::error::{Result, SevdeskError};
use super::gateway::{Gateway, Method, Params, objects};
use super::types::OrderType;

pub const SEQUENCE_PATH: &str = "SevSequence/Factory/getByType";
pub const NEXT_ORDER_NUMBER_PATH: &str = "Order/Factory/getNextOrderNumber";

/// Token in a sequence format that receives the running number.
pub const NUMBER_PLACEHOLDER: &str = "%NUMBER";

/// Looks up the next free document number from the account's number ranges.
///
/// sevdesk keeps the counters; this type only asks for the next value and
/// renders it with the range's format, e.g. `RE-%NUMBER` + `1001` →
/// `RE-1001`. Nothing is reserved locally.
#[derive(Debug, Clone)]
pub struct SequenceResolver<G> {
    gateway: G,
}

impl<G: Gateway> SequenceResolver<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Next number for `object_type` (e.g. "Invoice") and document subtype (e.g. "RE").
    pub fn next_number(&self, object_type: &str, subtype: &str) -> Result<String> {
        let mut params = Params::new();
        params.insert("objectType".into(), json!(object_type));
        params.insert("type".into(), json!(subtype));

        let sequence = objects(self.gateway.call(Method::Get, SEQUENCE_PATH, params)?)?;
        let next = sequence
            .get("nextSequence")
            .and_then(scalar_text)
            .ok_or_else(|| SevdeskError::UnexpectedResponse("sequence without nextSequence".into()))?;
        let format = sequence
            .get("format")
            .and_then(Value::as_str)
            .ok_or_else(|| SevdeskError::UnexpectedResponse("sequence without format".into()))?;

        let number = format_sequence(format, &next);
        tracing::debug!(object_type, subtype, %number, "resolved next document number");
        Ok(number)
    }

    /// Next order number as computed by sevdesk's order factory.
    ///
    /// With `use_next_number` the counter is advanced on the remote side.
    pub fn next_order_number(&self, order_type: OrderType, use_next_number: bool) -> Result<String> {
        let mut params = Params::new();
        params.insert("orderType".into(), json!(order_type.code()));
        params.insert("useNextNumber".into(), json!(use_next_number));

        let number = objects(self.gateway.call(Method::Get, NEXT_ORDER_NUMBER_PATH, params)?)?;
        scalar_text(&number)
            .ok_or_else(|| SevdeskError::UnexpectedResponse(format!("order number {number}")))
    }
}

/// Substitute `next` for every placeholder in `format`.
pub fn format_sequence(format: &str, next: &str) -> String {
    format.replace(NUMBER_PLACEHOLDER, next)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
