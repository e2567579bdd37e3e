use polychat_api::{setup, telemetry};
use polychat_core::Config;

// Use mimalloc as the global allocator for better performance and lower
// fragmentation, especially on musl-based systems inside containers.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    telemetry::init_telemetry();

    // Initialize the application (provider backend, state, routes)
    let (_state, router) = setup::initialize_app(&config)?;

    // Start the server
    setup::server::start_server(&config, router).await?;

    Ok(())
}
