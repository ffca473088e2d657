//! crappy-server: serially answer every TCP connection with one
//! configured pseudo-HTTP frame, until a connection sends zero bytes.

use crappy_http::config::ServerConfig;
use crappy_http::server::Responder;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = ServerConfig::load()?;

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
        response_bytes = config.response.len(),
        "Starting crappy-http server"
    );

    let responder = Responder::bind(&config)?;
    let (last_response, last_request) = responder.run()?;

    info!(
        last_response = %last_response,
        last_request = %last_request,
        "Server stopped"
    );

    Ok(())
}
