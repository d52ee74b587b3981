use std::sync::Arc;

use axum::{extract::State, response::Redirect};

/// `GET /open`: entry point for the mini-app host. Redirects to `/` with the
/// build id as a query parameter so the host cannot serve a stale cached
/// page.
pub async fn open_redirect(State(ctx): State<Arc<super::ApiContext>>) -> Redirect {
    Redirect::temporary(&format!("/?v={}", ctx.config.build_id))
}
