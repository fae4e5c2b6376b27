use std::sync::Arc;

use anyhow::{Context, Result};
use cesano_distance::{
    AppConfig, LookupService, LookupSession, TracingPresenter, geocoding, logging, web,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().with_context(|| "Failed to load configuration")?;
    logging::init(&config.logging)?;

    tracing::info!(
        "Cesano Distance v{} measuring from {} ({}, {})",
        cesano_distance::VERSION,
        config.reference.name,
        config.reference.latitude,
        config.reference.longitude
    );

    let reference = config.reference.reference_point()?;
    let geocoder = geocoding::from_config(&config.geocoding)?;
    let service = LookupService::new(geocoder, reference);
    let session = Arc::new(LookupSession::new(
        service,
        Arc::new(TracingPresenter),
        config.presentation.min_display(),
    ));

    web::run(&config.server, session).await
}
