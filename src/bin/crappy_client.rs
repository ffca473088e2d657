//! crappy-client: send one payload over TCP and read one bounded reply.

use crappy_http::client::send_request;
use crappy_http::config::ClientConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = ClientConfig::load()?;

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!(
        host = %config.host,
        port = config.port,
        payload_bytes = config.payload.len(),
        "Sending request"
    );

    let (request, response) = send_request(&config.payload, &config.host, config.port)?;

    println!("Request:\n{}", request);
    println!("Response:\n{}", response);

    Ok(())
}
