#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use serde_json::{Value, json};
use sevdesk::core::*;

/// One recorded remote call.
#[derive(Debug, Clone)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub params: Params,
}

/// Replays queued responses in order and records every call it receives.
#[derive(Default)]
pub struct MockGateway {
    responses: RefCell<VecDeque<Result<Value>>>,
    calls: RefCell<Vec<Call>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, response: Value) -> Self {
        self.responses.borrow_mut().push_back(Ok(response));
        self
    }

    pub fn fail(self, error: SevdeskError) -> Self {
        self.responses.borrow_mut().push_back(Err(error));
        self
    }

    /// Queue a number range answer for the next sequence lookup.
    pub fn sequence(self, next: u64, format: &str) -> Self {
        self.respond(json!({"objects": {"nextSequence": next, "format": format}}))
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn last(&self) -> Call {
        self.calls
            .borrow()
            .last()
            .cloned()
            .expect("no call recorded")
    }
}

impl Gateway for MockGateway {
    fn call(&self, method: Method, path: &str, params: Params) -> Result<Value> {
        self.calls.borrow_mut().push(Call {
            method,
            path: path.to_string(),
            params,
        });
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(SevdeskError::Transport(format!("unexpected call to {path}"))))
    }
}

/// Settings with every document key filled in.
pub fn settings() -> Settings {
    Settings::new("0123456789abcdef")
        .tax_rate("19")
        .tax_text("Umsatzsteuer 19%")
        .tax_type("default")
        .invoice_type("RE")
        .currency("EUR")
        .sev_user_id("4711")
}

pub fn map(value: Value) -> Params {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}
