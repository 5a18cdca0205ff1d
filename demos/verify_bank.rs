//! Attach a bank account to a customer and verify it with micro-deposits.
//!
//! The sandbox settles micro-deposits immediately and accepts any two
//! amounts below $0.10.
//!
//! Run with:
//! DWOLLA_CLIENT_ID=... DWOLLA_CLIENT_SECRET=... cargo run --example verify_bank -- <customer-id>

use rust_decimal_macros::dec;

use dwolla_rs::models::{Amount, BankAccountType, MicroDepositVerification, NewFundingSource};
use dwolla_rs::{CustomerId, Credentials, DwollaClient};

#[tokio::main]
async fn main() -> dwolla_rs::Result<()> {
    tracing_subscriber::fmt::init();

    let customer_id = std::env::args()
        .nth(1)
        .expect("usage: verify_bank <customer-id>");

    let client = DwollaClient::connect(Credentials::from_env()?).await?;
    let customer = client.customers().get(&CustomerId::new(customer_id)).await?;
    println!("Customer: {} [{}]", customer.full_name(), customer.status);

    let bank = NewFundingSource::new(
        "222222226",
        "123456789",
        BankAccountType::Checking,
        "Demo Checking",
    );
    let location = client
        .customers()
        .create_funding_source(&customer, &bank)
        .await?;
    println!("Created funding source: {location}");

    let source = client.funding_sources().get(&location).await?;
    client.funding_sources().initiate_micro_deposits(&source).await?;
    println!("Micro-deposits initiated");

    let deposits = client.funding_sources().micro_deposits(&source).await?;
    println!("Micro-deposit status: {}", deposits.status);

    let outcome = client
        .funding_sources()
        .verify_micro_deposits(&source, Amount::usd(dec!(0.03)), Amount::usd(dec!(0.09)))
        .await?;

    match outcome {
        MicroDepositVerification::Verified => println!("Funding source verified!"),
        MicroDepositVerification::NotYetSettled => {
            println!("Deposits have not settled yet; submit the amounts again later")
        }
    }

    Ok(())
}
