use std::str::FromStr;

use rust_decimal::Decimal;

use super::error::{Result, SevdeskError};
use super::types::DocumentKind;

pub const API_TOKEN: &str = "api_token";
pub const BASE_URL: &str = "base_url";
pub const TAX_RATE: &str = "tax_rate";
pub const TAX_TEXT: &str = "tax_text";
pub const TAX_TYPE: &str = "tax_type";
pub const INVOICE_TYPE: &str = "invoice_type";
pub const CURRENCY: &str = "currency";
pub const SEV_USER_ID: &str = "sev_user_id";

/// Every recognised configuration key.
pub const KEYS: [&str; 8] = [
    API_TOKEN,
    BASE_URL,
    TAX_RATE,
    TAX_TEXT,
    TAX_TYPE,
    INVOICE_TYPE,
    CURRENCY,
    SEV_USER_ID,
];

/// Client configuration.
///
/// Values are kept as the raw strings they were read from; they are only
/// interpreted when a document is built (see [`DocumentDefaults::load`]).
///
/// ```
/// use sevdesk::Settings;
///
/// let settings = Settings::new("0123456789abcdef")
///     .tax_rate("19")
///     .tax_text("Umsatzsteuer 19%")
///     .tax_type("default")
///     .invoice_type("RE")
///     .currency("EUR")
///     .sev_user_id("4711");
///
/// assert_eq!(settings.get("currency"), Some("EUR"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    api_token: Option<String>,
    base_url: Option<String>,
    tax_rate: Option<String>,
    tax_text: Option<String>,
    tax_type: Option<String>,
    invoice_type: Option<String>,
    currency: Option<String>,
    sev_user_id: Option<String>,
}

impl Settings {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: Some(api_token.into()),
            ..Self::default()
        }
    }

    /// Build settings from a lookup function keyed by environment variable
    /// name (`SEVDESK_API_TOKEN`, `SEVDESK_TAX_RATE`, …).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();
        for key in KEYS {
            if let Some(value) = lookup(&env_var_name(key)) {
                settings.set(key, value);
            }
        }
        settings
    }

    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load a `.env` file (if present) into the environment, then read it.
    #[cfg(feature = "env")]
    pub fn from_dotenv() -> Self {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Look up a value by its configuration key (e.g. `"tax_rate"`).
    pub fn get(&self, key: &str) -> Option<&str> {
        let slot = match key {
            API_TOKEN => &self.api_token,
            BASE_URL => &self.base_url,
            TAX_RATE => &self.tax_rate,
            TAX_TEXT => &self.tax_text,
            TAX_TYPE => &self.tax_type,
            INVOICE_TYPE => &self.invoice_type,
            CURRENCY => &self.currency,
            SEV_USER_ID => &self.sev_user_id,
            _ => return None,
        };
        slot.as_deref()
    }

    /// Set a value by configuration key. Unknown keys are ignored.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let slot = match key {
            API_TOKEN => &mut self.api_token,
            BASE_URL => &mut self.base_url,
            TAX_RATE => &mut self.tax_rate,
            TAX_TEXT => &mut self.tax_text,
            TAX_TYPE => &mut self.tax_type,
            INVOICE_TYPE => &mut self.invoice_type,
            CURRENCY => &mut self.currency,
            SEV_USER_ID => &mut self.sev_user_id,
            _ => return,
        };
        *slot = Some(value.into());
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn tax_rate(mut self, rate: impl Into<String>) -> Self {
        self.tax_rate = Some(rate.into());
        self
    }

    pub fn tax_text(mut self, text: impl Into<String>) -> Self {
        self.tax_text = Some(text.into());
        self
    }

    pub fn tax_type(mut self, tax_type: impl Into<String>) -> Self {
        self.tax_type = Some(tax_type.into());
        self
    }

    pub fn invoice_type(mut self, invoice_type: impl Into<String>) -> Self {
        self.invoice_type = Some(invoice_type.into());
        self
    }

    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.currency = Some(code.into());
        self
    }

    pub fn sev_user_id(mut self, id: impl Into<String>) -> Self {
        self.sev_user_id = Some(id.into());
        self
    }

    /// The configured value of `key`, treating `""` and `"0"` as absent.
    pub fn required(&self, key: &'static str) -> Result<&str> {
        match self.get(key) {
            Some(value) if !value.is_empty() && value != "0" => Ok(value),
            _ => Err(SevdeskError::ConfigurationMissing(key)),
        }
    }
}

fn env_var_name(key: &str) -> String {
    format!("SEVDESK_{}", key.to_ascii_uppercase())
}

/// Configuration-sourced defaults for a new document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentDefaults {
    pub tax_rate: Decimal,
    pub tax_text: String,
    pub tax_type: String,
    /// Only set for invoices.
    pub invoice_type: Option<String>,
    pub currency: String,
    pub sev_user_id: u64,
}

impl DocumentDefaults {
    /// Validate and read the defaults required for `kind`.
    ///
    /// Keys are checked in the order tax_rate, tax_text, tax_type,
    /// invoice_type (invoices only), currency, sev_user_id; the first missing
    /// one is reported.
    pub fn load(settings: &Settings, kind: DocumentKind) -> Result<Self> {
        let tax_rate = settings.required(TAX_RATE)?;
        let tax_text = settings.required(TAX_TEXT)?;
        let tax_type = settings.required(TAX_TYPE)?;
        let invoice_type = match kind {
            DocumentKind::Invoice => Some(settings.required(INVOICE_TYPE)?.to_string()),
            DocumentKind::Order => None,
        };
        let currency = settings.required(CURRENCY)?;
        let sev_user_id = settings.required(SEV_USER_ID)?;

        Ok(Self {
            tax_rate: parse(TAX_RATE, tax_rate)?,
            tax_text: tax_text.to_string(),
            tax_type: tax_type.to_string(),
            invoice_type,
            currency: currency.to_string(),
            sev_user_id: parse(SEV_USER_ID, sev_user_id)?,
        })
    }
}

fn parse<T: FromStr>(key: &'static str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| SevdeskError::ConfigurationInvalid {
            key,
            value: value.to_string(),
        })
}
