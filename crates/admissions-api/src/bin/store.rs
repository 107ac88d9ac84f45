use admissions_api::setup;
use admissions_core::StoreServiceConfig;

// Use mimalloc as the global allocator for better performance and lower fragmentation,
// especially when running on musl-based systems inside containers.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = StoreServiceConfig::from_env()?;

    let router = setup::initialize_store(&config).await?;

    setup::server::start_server("admissions-store", config.base.server_port, router).await?;

    Ok(())
}
