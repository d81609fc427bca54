//! Create a draft invoice for a contact.
//!
//! Reads `SEVDESK_API_TOKEN`, `SEVDESK_TAX_RATE`, `SEVDESK_TAX_TEXT`,
//! `SEVDESK_TAX_TYPE`, `SEVDESK_INVOICE_TYPE`, `SEVDESK_CURRENCY` and
//! `SEVDESK_SEV_USER_ID` from the environment or a `.env` file.
//!
//! ```sh
//! RUST_LOG=sevdesk=debug cargo run --example create_invoice --features all -- 42
//! ```

use serde_json::json;
use sevdesk::{Overrides, Sevdesk, SevdeskError, Settings};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let contact_id: u64 = match std::env::args().nth(1).map(|arg| arg.parse()) {
        Some(Ok(id)) => id,
        _ => {
            eprintln!("usage: create_invoice <contact-id>");
            std::process::exit(2);
        }
    };

    let client = match Sevdesk::connect(Settings::from_dotenv()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("  Setup failed: {e}");
            std::process::exit(1);
        }
    };

    let items = [
        json!({"name": "Softwareentwicklung", "price": "120.00", "quantity": 80}),
        json!({"name": "Hosting (monatlich)", "price": "49.90", "tax_rate": 19}),
    ];

    // ── 1. Preview the request ────────────────────────────────────────
    println!("=== Save Request ===");
    match client.invoices().payload(contact_id, &items, &Overrides::new()) {
        Ok(payload) => match serde_json::to_string_pretty(&payload) {
            Ok(text) => println!("{text}"),
            Err(e) => println!("  Not printable: {e}"),
        },
        Err(e) => println!("  Build failed: {e}"),
    }

    // ── 2. Create the invoice ─────────────────────────────────────────
    println!("\n=== Create ===");
    match client.invoices().create(contact_id, &items, &Overrides::new()) {
        Ok(invoice) => {
            tracing::info!(id = %invoice.id, "invoice created");
            println!(
                "  Created invoice {} ({})",
                invoice.invoice_number.unwrap_or_default(),
                invoice.id
            );
        }
        Err(SevdeskError::RemoteNotFound(what)) => println!("  Not found: {what}"),
        Err(e) if e.is_remote() => println!("  Rejected by sevdesk: {e}"),
        Err(e) => println!("  Failed: {e}"),
    }
}
