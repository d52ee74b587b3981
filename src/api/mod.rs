pub mod deploy;
pub mod error;
pub mod open;
pub mod stars;

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, header},
    routing::{get, post},
};
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::info;

use crate::config::Config;

pub struct ApiContext {
    pub config: Config,
    pub client: reqwest::Client,
}

impl ApiContext {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

pub fn router(ctx: Arc<ApiContext>) -> Router {
    Router::new()
        .route("/api/deploy", post(deploy::trigger_deploy))
        .route("/api/stars", post(stars::create_invoice))
        .route("/open", get(open::open_redirect))
        // Hosts cache the entry point aggressively; every response opts out.
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store, max-age=0"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

pub async fn serve(ctx: Arc<ApiContext>) -> color_eyre::Result<()> {
    let addr = ctx.config.bind_addr;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("api listening on {addr}");
    axum::serve(listener, router(ctx)).await?;
    Ok(())
}
