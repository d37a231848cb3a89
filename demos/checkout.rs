//! Inquiry, checkout and status polling example.
//!
//! Reads credentials from the environment:
//!
//! - `BILLPAY_CLIENT_ID`, `BILLPAY_CLIENT_SECRET` (required)
//! - `BILLPAY_PRIVATE_KEY` (PEM text, required for checkout)
//! - `BILLPAY_BASE_URL`, `BILLPAY_TOKEN_URL` (optional, point these at a sandbox)
//!
//! Run with: cargo run --example checkout -- <product-code> <client-number>

use billpay_rs::models::Fields;
use billpay_rs::BillpayClient;

#[tokio::main]
async fn main() -> billpay_rs::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let product_code = args
        .next()
        .unwrap_or_else(|| "pdam-jabar-kota-cirebon".to_string());
    let client_number = args.next().unwrap_or_else(|| "0811111111".to_string());

    let client = BillpayClient::from_env()?;
    println!("Using API at {}", client.config().base_url);

    let bill = client
        .inquiry(product_code.as_str(), client_number.as_str(), Fields::new())
        .await?;
    println!("Inquiry: {:#}", bill);

    let amount = bill["data"]["attributes"]["amount"].as_u64().unwrap_or(0);
    let order_id = format!("demo-{}", chrono::Utc::now().timestamp_millis());

    if client.signer().is_none() {
        println!("No BILLPAY_PRIVATE_KEY set; skipping checkout");
        return Ok(());
    }

    let order = client
        .checkout(
            order_id.as_str(),
            product_code.as_str(),
            client_number.as_str(),
            amount,
            Fields::new(),
        )
        .await?;
    println!("Order placed: {:#}", order);

    let status = client.check_status(order_id.as_str()).await?;
    println!(
        "Order {} status: {}",
        order_id, status["data"]["attributes"]["status"]
    );

    Ok(())
}
