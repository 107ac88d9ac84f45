use admissions_api::setup;
use admissions_core::GatewayConfig;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = GatewayConfig::from_env()?;

    let router = setup::initialize_gateway(&config).await?;

    setup::server::start_server("admissions-gateway", config.base.server_port, router).await?;

    Ok(())
}
