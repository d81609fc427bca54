use serde_json::{Value, json};

use super::{list, params, routes};
use crate::core::{Gateway, Method, Result, TextTemplate, objects};

/// Stored text templates for document headers and footers.
#[derive(Debug, Clone, Copy)]
pub struct TextTemplates<'a, G> {
    gateway: &'a G,
}

impl<'a, G: Gateway> TextTemplates<'a, G> {
    pub fn new(gateway: &'a G) -> Self {
        Self { gateway }
    }

    pub fn all(&self, limit: u32) -> Result<Vec<TextTemplate>> {
        list(self.gateway, routes::TEXT_TEMPLATE, params([("limit", json!(limit))]))
    }

    /// Templates matching a category, object type and text type. The shape of
    /// the answer varies with the filters, so it is returned undecoded.
    pub fn get(&self, category: &str, object_type: &str, text_type: &str) -> Result<Value> {
        let query = params([
            ("category", json!(category)),
            ("objectType", json!(object_type)),
            ("textType", json!(text_type)),
        ]);
        objects(self.gateway.call(Method::Get, routes::TEXT_TEMPLATE, query)?)
    }
}
