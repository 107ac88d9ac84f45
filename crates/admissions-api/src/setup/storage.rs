//! Storage setup and initialization

use std::sync::Arc;

use admissions_core::GatewayConfig;
use admissions_storage::{LocalStorage, Storage};
use anyhow::{Context, Result};

/// Local storage under `UPLOAD_DIR`, with public URLs under `UPLOAD_PUBLIC_PREFIX`.
pub async fn setup_storage(config: &GatewayConfig) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing upload storage...");
    let storage = LocalStorage::new(
        config.upload_dir.clone(),
        config.upload_public_prefix.clone(),
    )
    .await
    .context("Failed to initialize upload storage")?;

    tracing::info!(
        path = %storage.base_path().display(),
        prefix = %config.upload_public_prefix,
        "Upload storage initialized"
    );

    Ok(Arc::new(storage))
}
