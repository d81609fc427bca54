use serde_json::{Value, json};

use super::{first, list, params, routes};
use crate::core::{
    ContactCategory, Gateway, Method, Params, Result, SevContact, decode, object_ref, objects,
};

/// Contacts (organisations and persons).
#[derive(Debug, Clone, Copy)]
pub struct Contacts<'a, G> {
    gateway: &'a G,
}

impl<'a, G: Gateway> Contacts<'a, G> {
    pub fn new(gateway: &'a G) -> Self {
        Self { gateway }
    }

    /// All contacts. `depth = 0` returns organisations only, `1` adds persons.
    pub fn all(&self, depth: u8, limit: u32) -> Result<Vec<SevContact>> {
        list(self.gateway, routes::CONTACT, paging(depth, limit))
    }

    pub fn all_by_city(&self, city: &str, depth: u8, limit: u32) -> Result<Vec<SevContact>> {
        let mut query = paging(depth, limit);
        query.insert("city".into(), json!(city));
        list(self.gateway, routes::CONTACT, query)
    }

    pub fn all_suppliers(&self, depth: u8, limit: u32) -> Result<Vec<SevContact>> {
        self.all_in(ContactCategory::Supplier, depth, limit)
    }

    pub fn all_customers(&self, depth: u8, limit: u32) -> Result<Vec<SevContact>> {
        self.all_in(ContactCategory::Customer, depth, limit)
    }

    pub fn all_partners(&self, depth: u8, limit: u32) -> Result<Vec<SevContact>> {
        self.all_in(ContactCategory::Partner, depth, limit)
    }

    pub fn all_prospect_customers(&self, depth: u8, limit: u32) -> Result<Vec<SevContact>> {
        self.all_in(ContactCategory::ProspectCustomer, depth, limit)
    }

    /// Contacts of an account-specific category.
    pub fn all_custom(&self, category: u64, depth: u8, limit: u32) -> Result<Vec<SevContact>> {
        self.all_in(ContactCategory::Custom(category), depth, limit)
    }

    fn all_in(&self, category: ContactCategory, depth: u8, limit: u32) -> Result<Vec<SevContact>> {
        let mut query = paging(depth, limit);
        query.insert("category".into(), category_ref(category));
        list(self.gateway, routes::CONTACT, query)
    }

    pub fn get(&self, contact_id: u64) -> Result<SevContact> {
        first(self.gateway, &format!("{}/{contact_id}", routes::CONTACT), Params::new())
    }

    pub fn create_supplier(&self, name: &str, params: Params) -> Result<SevContact> {
        self.create(name, ContactCategory::Supplier, params)
    }

    pub fn create_customer(&self, name: &str, params: Params) -> Result<SevContact> {
        self.create(name, ContactCategory::Customer, params)
    }

    pub fn create_partner(&self, name: &str, params: Params) -> Result<SevContact> {
        self.create(name, ContactCategory::Partner, params)
    }

    pub fn create_prospect_customer(&self, name: &str, params: Params) -> Result<SevContact> {
        self.create(name, ContactCategory::ProspectCustomer, params)
    }

    pub fn create_custom(&self, name: &str, category: u64, params: Params) -> Result<SevContact> {
        self.create(name, ContactCategory::Custom(category), params)
    }

    /// Create an organisation contact. `name` and `category` overwrite any
    /// values of the same key in `params`.
    fn create(&self, name: &str, category: ContactCategory, mut params: Params) -> Result<SevContact> {
        params.insert("name".into(), json!(name));
        params.insert("category".into(), category_ref(category));
        let response = self.gateway.call(Method::Post, routes::CONTACT, params)?;
        decode(objects(response)?)
    }

    pub fn update(&self, contact_id: u64, params: Params) -> Result<SevContact> {
        let path = format!("{}/{contact_id}", routes::CONTACT);
        let response = self.gateway.call(Method::Put, &path, params)?;
        decode(objects(response)?)
    }

    /// Delete a contact, returning sevdesk's raw acknowledgement.
    pub fn delete(&self, contact_id: u64) -> Result<Value> {
        let path = format!("{}/{contact_id}", routes::CONTACT);
        self.gateway.call(Method::Delete, &path, Params::new())
    }
}

fn paging(depth: u8, limit: u32) -> Params {
    params([("depth", json!(depth)), ("limit", json!(limit))])
}

fn category_ref(category: ContactCategory) -> Value {
    object_ref(category.id(), "Category")
}
