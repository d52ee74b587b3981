use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use crate::api::{ApiContext, error::ApiError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRequest {
    pub title: String,
    pub description: String,
    pub payload: String,
    pub amount_stars: u32,
}

#[derive(Debug, Deserialize)]
struct BotApiResponse {
    ok: bool,
    result: Option<String>,
    description: Option<String>,
}

/// `POST /api/stars`: creates a Stars invoice link through the Bot API.
/// Currency is fixed to XTR with a single price line.
pub async fn create_invoice(
    State(ctx): State<Arc<ApiContext>>,
    Json(body): Json<InvoiceRequest>,
) -> Result<Json<Value>, ApiError> {
    let token = ctx
        .config
        .bot_token
        .as_deref()
        .ok_or(ApiError::MissingConfig("BOT_TOKEN"))?;

    let url = format!(
        "{}/bot{}/createInvoiceLink",
        ctx.config.telegram_api_base, token
    );
    let request = json!({
        "title": &body.title,
        "description": &body.description,
        "payload": &body.payload,
        "currency": "XTR",
        "prices": [{ "label": &body.title, "amount": body.amount_stars }],
    });

    let response: BotApiResponse = ctx
        .client
        .post(&url)
        .json(&request)
        .send()
        .await?
        .json()
        .await?;

    if !response.ok {
        return Err(ApiError::Upstream(
            response
                .description
                .unwrap_or_else(|| "createInvoiceLink failed".to_string()),
        ));
    }

    let link = response
        .result
        .ok_or_else(|| ApiError::Upstream("createInvoiceLink returned no link".to_string()))?;

    info!("invoice link created for {:?}", body.payload);
    Ok(Json(json!({ "ok": true, "url": link })))
}
