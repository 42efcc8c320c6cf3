//! API routes
//!
//! Thin transport over the store and generator. Save is the only operation
//! that can fail; load and generate always answer 200 with defaults or
//! fallback text.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::credentials::CredentialSet;
use crate::store::ConfigDocument;
use crate::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveConfigRequest {
    #[serde(default)]
    pub items: Vec<Value>,
    #[serde(default)]
    pub api_keys: CredentialSet,
}

#[derive(Debug, Serialize)]
struct SaveConfigResponse {
    status: &'static str,
    message: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoadConfigResponse {
    config: ConfigDocument,
    api_keys: CredentialSet,
}

#[derive(Debug, Deserialize)]
pub struct GeneratePromptRequest {
    pub style: String,
}

#[derive(Debug, Serialize)]
struct GeneratePromptResponse {
    prompt: String,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn save_config(
    State(state): State<AppState>,
    Json(request): Json<SaveConfigRequest>,
) -> Result<Json<SaveConfigResponse>, (StatusCode, String)> {
    let document = ConfigDocument {
        items: request.items,
    };

    state
        .store
        .save(&document, &request.api_keys)
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "failed to save configuration");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        })?;

    Ok(Json(SaveConfigResponse {
        status: "success",
        message: "Configuration saved successfully",
    }))
}

async fn load_config(State(state): State<AppState>) -> Json<LoadConfigResponse> {
    let (config, api_keys) = state.store.load().await;
    Json(LoadConfigResponse { config, api_keys })
}

async fn generate_prompt(
    State(state): State<AppState>,
    Json(request): Json<GeneratePromptRequest>,
) -> Result<Json<GeneratePromptResponse>, (StatusCode, String)> {
    if request.style.trim().is_empty() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            "style must not be empty".to_string(),
        ));
    }

    let prompt = state.generator.generate(&request.style).await.into_text();
    Ok(Json(GeneratePromptResponse { prompt }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/save-config", post(save_config))
        .route("/api/load-config", get(load_config))
        .route("/api/generate-prompt", post(generate_prompt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn save_request_accepts_dashboard_payload() {
        let raw = json!({
            "items": [{"id": 1, "style": "Calm song", "channelId": ""}],
            "apiKeys": {"GEMINI_API_KEY": "x", "YOUTUBE_API_KEY": ""}
        });
        let request: SaveConfigRequest = serde_json::from_value(raw).unwrap();
        assert_eq!(request.items.len(), 1);
        assert_eq!(request.api_keys["GEMINI_API_KEY"], "x");
    }

    #[test]
    fn save_request_fields_default_when_absent() {
        let request: SaveConfigRequest = serde_json::from_value(json!({})).unwrap();
        assert!(request.items.is_empty());
        assert!(request.api_keys.is_empty());
    }

    #[test]
    fn load_response_uses_camel_case_api_keys() {
        let response = LoadConfigResponse {
            config: ConfigDocument::default(),
            api_keys: CredentialSet::new(),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("apiKeys").is_some());
        assert!(value.get("config").is_some());
    }
}
