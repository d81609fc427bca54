use chrono::{Local, NaiveDateTime};
use serde_json::{Map, Value, json};

use super::error::{Result, SevdeskError};
use super::gateway::Gateway;
use super::items::{LineItem, normalize_items};
use super::merge::merge_maps;
use super::sequence::SequenceResolver;
use super::settings::{DocumentDefaults, Settings};
use super::types::{
    DocumentKind, GERMANY, InvoiceStatus, InvoiceType, OrderStatus, OrderType, object_ref,
};

/// Caller-supplied values merged over the computed request.
pub type Overrides = Map<String, Value>;

/// Format of `invoiceDate` / `orderDate`.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Everything needed to render a save request, already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub kind: DocumentKind,
    pub contact_id: u64,
    pub number: String,
    pub issued_at: NaiveDateTime,
    pub defaults: DocumentDefaults,
    pub items: Vec<LineItem>,
}

/// Render `draft` and merge `overrides` over it.
///
/// The top-level override keys `country`, `status` and (orders only)
/// `orderType` also feed the computed header. Like every other override key
/// they stay in the merged result as given.
pub fn compose(draft: &Draft, overrides: &Overrides) -> Map<String, Value> {
    let kind = draft.kind;
    let items: Vec<Value> = draft.items.iter().map(|item| item.to_wire(kind)).collect();

    let mut request = Map::new();
    request.insert(kind.header_key().into(), header(draft, overrides));
    request.insert(kind.items_key().into(), Value::Array(items));

    merge_maps(&mut request, overrides.clone());
    request
}

fn header(draft: &Draft, overrides: &Overrides) -> Value {
    let kind = draft.kind;
    let defaults = &draft.defaults;
    let draft_status = match kind {
        DocumentKind::Invoice => InvoiceStatus::Draft.code(),
        DocumentKind::Order => OrderStatus::Draft.code(),
    };

    let mut header = Map::new();
    header.insert("objectName".into(), json!(kind.object_name()));
    header.insert("contact".into(), object_ref(draft.contact_id, "Contact"));
    header.insert(
        "header".into(),
        json!(format!("{}{}", kind.header_prefix(), draft.number)),
    );
    header.insert(kind.number_key().into(), json!(draft.number));
    header.insert(
        kind.date_key().into(),
        json!(draft.issued_at.format(DATE_FORMAT).to_string()),
    );
    header.insert("discount".into(), json!(0));
    header.insert(
        "addressCountry".into(),
        object_ref(
            given(overrides, "country").unwrap_or_else(|| json!(GERMANY)),
            "StaticCountry",
        ),
    );
    header.insert(
        "status".into(),
        given(overrides, "status").unwrap_or_else(|| json!(draft_status)),
    );
    header.insert(
        "contactPerson".into(),
        object_ref(defaults.sev_user_id, "SevUser"),
    );
    header.insert("taxRate".into(), json!(defaults.tax_rate.to_string()));
    header.insert("taxText".into(), json!(defaults.tax_text));
    header.insert("taxType".into(), json!(defaults.tax_type));
    match kind {
        DocumentKind::Invoice => {
            header.insert("invoiceType".into(), json!(defaults.invoice_type));
        }
        DocumentKind::Order => {
            header.insert("orderType".into(), json!(order_type(overrides)));
            header.insert("version".into(), json!(0));
        }
    }
    header.insert("currency".into(), json!(defaults.currency));
    header.insert("mapAll".into(), json!("true"));
    Value::Object(header)
}

/// A non-null top-level override.
fn given(overrides: &Overrides, key: &str) -> Option<Value> {
    overrides.get(key).filter(|v| !v.is_null()).cloned()
}

fn order_type(overrides: &Overrides) -> String {
    match overrides.get("orderType") {
        Some(Value::String(code)) if !code.is_empty() => code.clone(),
        _ => OrderType::default().code().to_string(),
    }
}

/// Number range subtype the next document number is drawn from.
fn sequence_subtype(kind: DocumentKind, overrides: &Overrides) -> String {
    match kind {
        DocumentKind::Invoice => InvoiceType::Normal.code().to_string(),
        DocumentKind::Order => order_type(overrides),
    }
}

/// Assembles save requests for invoices and orders.
///
/// ```
/// use sevdesk::core::*;
/// use serde_json::{Value, json};
///
/// struct Offline;
///
/// impl Gateway for Offline {
///     fn call(&self, _: Method, _: &str, _: Params) -> Result<Value> {
///         Ok(json!({"objects": {"nextSequence": 1001, "format": "RE-%NUMBER"}}))
///     }
/// }
///
/// let settings = Settings::new("token")
///     .tax_rate("19")
///     .tax_text("Umsatzsteuer 19%")
///     .tax_type("default")
///     .invoice_type("RE")
///     .currency("EUR")
///     .sev_user_id("4711");
///
/// let payload = PayloadBuilder::new(Offline, &settings, DocumentKind::Invoice)
///     .build(42, &[json!({"name": "Beratung", "price": 150})], &Overrides::new())
///     .unwrap();
///
/// assert_eq!(payload["invoice"]["invoiceNumber"], "RE-1001");
/// assert_eq!(payload["invoicePosSave"][0]["name"], "Beratung");
/// ```
#[derive(Debug, Clone)]
pub struct PayloadBuilder<'a, G> {
    gateway: G,
    settings: &'a Settings,
    kind: DocumentKind,
    issued_at: Option<NaiveDateTime>,
}

impl<'a, G: Gateway> PayloadBuilder<'a, G> {
    pub fn new(gateway: G, settings: &'a Settings, kind: DocumentKind) -> Self {
        Self {
            gateway,
            settings,
            kind,
            issued_at: None,
        }
    }

    /// Fix the document date instead of using the current local time.
    pub fn issued_at(mut self, at: NaiveDateTime) -> Self {
        self.issued_at = Some(at);
        self
    }

    /// Build the request body for a new document.
    ///
    /// Fails before any remote call if `raw_items` is empty or the
    /// configuration is incomplete. The document number is resolved next;
    /// if that fails nothing else happens.
    pub fn build(
        &self,
        contact_id: u64,
        raw_items: &[Value],
        overrides: &Overrides,
    ) -> Result<Map<String, Value>> {
        if raw_items.is_empty() {
            return Err(SevdeskError::EmptyLineItems(self.kind));
        }
        let defaults = DocumentDefaults::load(self.settings, self.kind)?;
        let number = SequenceResolver::new(&self.gateway)
            .next_number(self.kind.object_name(), &sequence_subtype(self.kind, overrides))?;
        let items = normalize_items(raw_items, &defaults, self.kind)?;

        let draft = Draft {
            kind: self.kind,
            contact_id,
            number,
            issued_at: self.issued_at.unwrap_or_else(|| Local::now().naive_local()),
            defaults,
            items,
        };
        Ok(compose(&draft, overrides))
    }
}
