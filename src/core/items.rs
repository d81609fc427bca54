use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::error::{Result, SevdeskError};
use super::settings::DocumentDefaults;
use super::types::{DocumentKind, object_ref};

/// Default `Unity` id of a position ("Stück").
pub const DEFAULT_UNIT_ID: u64 = 1;

/// A normalized document position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub price: Decimal,
    pub quantity: Decimal,
    pub text: String,
    pub tax_rate: Decimal,
    pub discount: Decimal,
    pub unit_id: u64,
    pub part_id: Option<u64>,
}

impl LineItem {
    /// A position with every optional field at its default.
    pub fn new(name: impl Into<String>, price: Decimal, tax_rate: Decimal) -> Self {
        Self {
            name: name.into(),
            price,
            quantity: Decimal::ONE,
            text: String::new(),
            tax_rate,
            discount: Decimal::ZERO,
            unit_id: DEFAULT_UNIT_ID,
            part_id: None,
        }
    }

    /// The position as sevdesk expects it inside `invoicePosSave` / `orderPosSave`.
    pub fn to_wire(&self, kind: DocumentKind) -> Value {
        let mut wire = json!({
            "objectName": kind.position_object(),
            "mapAll": "true",
            "quantity": self.quantity.to_string(),
            "price": self.price.to_string(),
            "name": self.name,
            "text": self.text,
            "taxRate": self.tax_rate.to_string(),
            "unity": object_ref(self.unit_id, "Unity"),
            "discount": self.discount.to_string(),
        });
        if let (Some(part_id), Some(map)) = (self.part_id, wire.as_object_mut()) {
            map.insert("part".into(), object_ref(part_id, "Part"));
        }
        wire
    }
}

/// Turn caller-supplied item maps into [`LineItem`]s.
///
/// Recognised keys: `name`, `price`, `quantity`, `text`, `tax_rate`,
/// `discount`, `unit_id`, `part_id`. Entries without both `name` and
/// `price` are skipped; the remaining items keep their input order.
pub fn normalize_items(
    raw_items: &[Value],
    defaults: &DocumentDefaults,
    kind: DocumentKind,
) -> Result<Vec<LineItem>> {
    if raw_items.is_empty() {
        return Err(SevdeskError::EmptyLineItems(kind));
    }

    let mut items = Vec::with_capacity(raw_items.len());
    for (position, raw) in raw_items.iter().enumerate() {
        let (Some(name), Some(price)) = (field(raw, "name"), field(raw, "price")) else {
            tracing::warn!(position, %kind, "skipping line item without name or price");
            continue;
        };

        let mut item = LineItem::new(
            read_string(name).ok_or(SevdeskError::InvalidLineItem { position, field: "name" })?,
            read_decimal(price).ok_or(SevdeskError::InvalidLineItem { position, field: "price" })?,
            defaults.tax_rate,
        );
        if let Some(value) = field(raw, "quantity") {
            item.quantity = read_decimal(value)
                .ok_or(SevdeskError::InvalidLineItem { position, field: "quantity" })?;
        }
        if let Some(value) = field(raw, "text") {
            item.text =
                read_string(value).ok_or(SevdeskError::InvalidLineItem { position, field: "text" })?;
        }
        if let Some(value) = field(raw, "tax_rate") {
            item.tax_rate = read_decimal(value)
                .ok_or(SevdeskError::InvalidLineItem { position, field: "tax_rate" })?;
        }
        if let Some(value) = field(raw, "discount") {
            item.discount = read_decimal(value)
                .ok_or(SevdeskError::InvalidLineItem { position, field: "discount" })?;
        }
        if let Some(value) = field(raw, "unit_id") {
            item.unit_id =
                read_id(value).ok_or(SevdeskError::InvalidLineItem { position, field: "unit_id" })?;
        }
        if let Some(value) = field(raw, "part_id") {
            item.part_id = Some(
                read_id(value).ok_or(SevdeskError::InvalidLineItem { position, field: "part_id" })?,
            );
        }
        items.push(item);
    }
    Ok(items)
}

/// A non-null field of an item map.
fn field<'a>(raw: &'a Value, key: &str) -> Option<&'a Value> {
    raw.get(key).filter(|v| !v.is_null())
}

fn read_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn read_decimal(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

fn read_id(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn defaults() -> DocumentDefaults {
        DocumentDefaults {
            tax_rate: dec!(19),
            tax_text: "Umsatzsteuer 19%".into(),
            tax_type: "default".into(),
            invoice_type: Some("RE".into()),
            currency: "EUR".into(),
            sev_user_id: 4711,
        }
    }

    #[test]
    fn applies_defaults() {
        let items =
            normalize_items(&[json!({"name": "Widget", "price": 10})], &defaults(), DocumentKind::Invoice)
                .unwrap();
        assert_eq!(items, vec![LineItem::new("Widget", dec!(10), dec!(19))]);
        assert_eq!(items[0].quantity, Decimal::ONE);
        assert_eq!(items[0].unit_id, 1);
    }

    #[test]
    fn reads_all_fields() {
        let raw = json!({
            "name": "Beratung",
            "price": "150.00",
            "quantity": 8,
            "text": "Workshop",
            "tax_rate": 7,
            "discount": "5",
            "unit_id": "9",
            "part_id": 12
        });
        let items = normalize_items(&[raw], &defaults(), DocumentKind::Order).unwrap();
        let item = &items[0];
        assert_eq!(item.price, dec!(150.00));
        assert_eq!(item.quantity, dec!(8));
        assert_eq!(item.text, "Workshop");
        assert_eq!(item.tax_rate, dec!(7));
        assert_eq!(item.discount, dec!(5));
        assert_eq!(item.unit_id, 9);
        assert_eq!(item.part_id, Some(12));
    }

    #[test]
    fn drops_items_without_name_or_price() {
        let raw = [
            json!({"quantity": 2, "price": 5}),
            json!({"name": "Widget", "price": 10}),
            json!({"name": "No price"}),
            json!("not even a map"),
            json!({"name": "Gadget", "price": 3.5}),
        ];
        let items = normalize_items(&raw, &defaults(), DocumentKind::Invoice).unwrap();
        let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Widget", "Gadget"]);
        assert_eq!(items[1].price, dec!(3.5));
    }

    #[test]
    fn null_name_counts_as_missing() {
        let items = normalize_items(
            &[json!({"name": null, "price": 1})],
            &defaults(),
            DocumentKind::Invoice,
        )
        .unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn empty_input_fails() {
        let err = normalize_items(&[], &defaults(), DocumentKind::Order).unwrap_err();
        assert!(matches!(err, SevdeskError::EmptyLineItems(DocumentKind::Order)));
    }

    #[test]
    fn unreadable_price_fails_with_position() {
        let raw = [json!({"name": "A", "price": 1}), json!({"name": "B", "price": "ten"})];
        let err = normalize_items(&raw, &defaults(), DocumentKind::Invoice).unwrap_err();
        assert!(matches!(
            err,
            SevdeskError::InvalidLineItem { position: 1, field: "price" }
        ));
    }

    #[test]
    fn wire_shape_for_orders_includes_part() {
        let mut item = LineItem::new("Widget", dec!(10), dec!(19));
        item.part_id = Some(3);
        let wire = item.to_wire(DocumentKind::Order);
        assert_eq!(wire["objectName"], "OrderPos");
        assert_eq!(wire["part"], json!({"id": 3, "objectName": "Part"}));
        assert_eq!(wire["unity"], json!({"id": 1, "objectName": "Unity"}));
        assert_eq!(wire["quantity"], "1");
        assert_eq!(wire["discount"], "0");
    }

    #[test]
    fn wire_shape_without_part() {
        let wire = LineItem::new("Widget", dec!(10), dec!(19)).to_wire(DocumentKind::Invoice);
        assert_eq!(wire["objectName"], "InvoicePos");
        assert!(wire.get("part").is_none());
        assert_eq!(wire["mapAll"], "true");
    }
}
