use std::sync::Arc;

use axum::{Json, extract::State};
use serde_json::{Value, json};
use tracing::info;

use crate::api::{ApiContext, error::ApiError};

/// `POST /api/deploy`: forwards an empty POST to the configured deploy hook.
pub async fn trigger_deploy(
    State(ctx): State<Arc<ApiContext>>,
) -> Result<Json<Value>, ApiError> {
    let hook = ctx
        .config
        .deploy_hook
        .as_deref()
        .ok_or(ApiError::MissingConfig("DEPLOY_HOOK_URL"))?;

    let response = ctx.client.post(hook).send().await?;
    if !response.status().is_success() {
        return Err(ApiError::Upstream(format!(
            "hook call failed with status {}",
            response.status().as_u16()
        )));
    }

    info!("deploy hook triggered");
    Ok(Json(json!({ "ok": true })))
}
