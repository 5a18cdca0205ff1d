//! Basic usage example.
//!
//! Connects to the sandbox, prints the master account and its funding
//! sources, then walks every customer.
//!
//! Run with:
//! DWOLLA_CLIENT_ID=... DWOLLA_CLIENT_SECRET=... cargo run --example basic_usage

use futures_util::StreamExt;

use dwolla_rs::{Credentials, DwollaClient};

#[tokio::main]
async fn main() -> dwolla_rs::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let credentials = Credentials::from_env()?;
    println!("Connecting to Dwolla {}...", credentials.environment());

    let client = DwollaClient::connect(credentials).await?;
    println!(
        "Connected! Root advertises: {}",
        client.root_links().relations().collect::<Vec<_>>().join(", ")
    );

    let account = client.accounts().retrieve().await?;
    println!("\nAccount: {} ({})", account.name, account.id);

    let sources = client.accounts().funding_sources(&account).await?;
    println!("Found {} funding source(s):", sources.len());
    for source in sources.iter().filter(|s| !s.removed) {
        println!(
            "  - {} [{}] {}",
            source.name,
            source.status,
            source.bank_name.as_deref().unwrap_or("")
        );
    }

    println!("\nCustomers:");
    let mut customers = client.customers().list_stream()?;
    let mut count = 0;
    while let Some(customer) = customers.next().await {
        let customer = customer?;
        println!("  - {} <{}> {}", customer.full_name(), customer.email, customer.status);
        count += 1;
    }
    println!("{count} customer(s) total");

    println!("\nDone!");
    Ok(())
}
