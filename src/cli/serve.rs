use std::sync::Arc;
use crate::api;
use crate::batch::{BatchAuditRunner, Dashboard};
use crate::cli::commands::ServeArgs;
use crate::cli::load_settings;
use crate::errors::PagescopeError;
use crate::psi::PageSpeedClient;
use tracing::info;

pub async fn handle_serve(args: ServeArgs) -> Result<(), PagescopeError> {
    let (_config, settings) = load_settings(&args.client).await?;
    info!(host = %args.host, port = args.port, endpoint = %settings.endpoint, "Starting dashboard API");

    let client = Arc::new(PageSpeedClient::new(settings.clone())?);
    let runner = BatchAuditRunner::from_settings(client, &settings);
    let state = api::AppState::new(Dashboard::new(runner));
    let app = api::build_router(state);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| PagescopeError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
