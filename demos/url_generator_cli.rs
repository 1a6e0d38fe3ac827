use anyhow::{anyhow, Result};
use campaign_qr_api::qr;
use campaign_qr_api::url_generator::{create, CreateOptions, ParamSpec};
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (optional)
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <url> [key=value1,value2 ...]", args[0]);
        return Err(anyhow!("Missing URL argument"));
    }

    let mut params = Vec::new();
    for arg in &args[2..] {
        let (key, values) = arg
            .split_once('=')
            .ok_or_else(|| anyhow!("Expected key=value1,value2, got {}", arg))?;
        params.push(ParamSpec::new(key, values.split(',')));
    }

    println!("Generating URLs for: {}", args[1]);
    let start = std::time::Instant::now();
    let urls = create(CreateOptions::new(args[1].clone(), params)).await?;
    let duration = start.elapsed();

    println!("\nResults ({} URLs in {:?}):", urls.len(), duration);
    for (i, url) in urls.iter().enumerate() {
        println!("  {}. {}", i + 1, url);
    }

    if let Some(first) = urls.first() {
        let data_url = qr::to_data_url(first, qr::DEFAULT_MIN_DIMENSION)?;
        println!("\nQR code for the first URL ({} bytes as data URL)", data_url.len());
    }

    Ok(())
}
