use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{prompts, AiError, NutrientSuggestion, NutritionAi};
use crate::config::AiConfig;
use crate::nutrition::{result::Macros, value::NutrientValue, NutrientDeficiency, NutritionResult};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

/// Shape the estimate prompt asks for; food and quantity come from the caller.
#[derive(Debug, Deserialize)]
struct EstimatePayload {
    calories: NutrientValue,
    macros: Macros,
    #[serde(default)]
    micros: std::collections::BTreeMap<String, NutrientValue>,
}

#[derive(Debug, Deserialize)]
struct SuggestPayload {
    suggestions: Vec<NutrientSuggestion>,
}

/// Client for any OpenAI-compatible `/chat/completions` endpoint.
#[derive(Clone)]
pub struct OpenAiClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
    cuisine: String,
}

impl OpenAiClient {
    pub fn new(cfg: &AiConfig) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone(),
            model: cfg.model.clone(),
            cuisine: cfg.suggestion_cuisine.clone(),
        })
    }

    /// Sends one system+user exchange and parses the reply content as `T`.
    async fn complete_json<T: DeserializeOwned>(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
    ) -> Result<T, AiError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(AiError::Status { status, body });
        }

        let chat: ChatResponse = response.json().await?;
        if let Some(usage) = &chat.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "completion usage"
            );
        }
        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(AiError::EmptyResponse)?;

        Ok(serde_json::from_str(&content)?)
    }
}

#[async_trait]
impl NutritionAi for OpenAiClient {
    #[instrument(skip(self))]
    async fn estimate(&self, food: &str, quantity: &str) -> Result<NutritionResult, AiError> {
        let payload: EstimatePayload = self
            .complete_json(
                prompts::ESTIMATE_SYSTEM,
                &prompts::estimate_user(food, quantity),
                prompts::ESTIMATE_TEMPERATURE,
            )
            .await?;
        Ok(NutritionResult {
            food: food.to_string(),
            quantity: quantity.to_string(),
            calories: payload.calories,
            macros: payload.macros,
            micros: payload.micros,
        })
    }

    #[instrument(skip(self, deficiencies), fields(count = deficiencies.len()))]
    async fn suggest(
        &self,
        deficiencies: &[NutrientDeficiency],
    ) -> Result<Vec<NutrientSuggestion>, AiError> {
        let payload: SuggestPayload = self
            .complete_json(
                &prompts::suggest_system(&self.cuisine),
                &prompts::suggest_user(deficiencies),
                prompts::SUGGEST_TEMPERATURE,
            )
            .await?;
        Ok(payload.suggestions)
    }
}
