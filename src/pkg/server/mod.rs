pub mod handlers;
pub mod router;
pub mod state;

use tokio::net::TcpListener;

use crate::{conf::Settings, prelude::Result};
use router::build_routes;
use state::AppState;

pub async fn listen(settings: &Settings) -> Result<()> {
    let state = AppState::new(settings).await?;
    let listener = bind(&settings.listen_port).await?;
    tracing::info!("{} listening at port {}", settings.service_name, settings.listen_port);
    serve(listener, state).await
}

pub async fn bind(port: &str) -> Result<TcpListener> {
    Ok(TcpListener::bind(format!("0.0.0.0:{}", port)).await?)
}

pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    tokio::select! {
        r = axum::serve(listener, build_routes(state)) => {
            tracing::warn!("server ended unexpectedly: {:?}", &r);
            r?;
        },
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("received ctrl+c interrupt, closing server");
        }
    }
    Ok(())
}
