use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::ProviderConfig;
use crate::error::Error;

use super::Provider;

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// Chat-completion client. The generated text is read from
/// `choices[0].message.content`.
pub struct OpenAiProvider {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl OpenAiProvider {
    pub fn new(config: &ProviderConfig) -> Result<OpenAiProvider, Error> {
        let api_key = config
            .api_key
            .clone()
            .filter(|api_key| !api_key.is_empty())
            .ok_or_else(|| Error::InvalidConfig {
                reason: "no provider api key configured".into(),
            })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| Error::InvalidConfig {
                reason: err.to_string(),
            })?;

        Ok(OpenAiProvider {
            client,
            endpoint: config.endpoint.clone(),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    #[tracing::instrument(skip(self, prompt), fields(model = %self.model))]
    async fn generate(&self, prompt: &str) -> Result<String, Error> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(provider_error)?;

        let status = response.status();
        let body = response.text().await.map_err(provider_error)?;

        if !status.is_success() {
            warn!(%status, "provider rejected generation request");
            return Err(Error::ProviderError {
                reason: format!("provider responded with status {}", status),
            });
        }

        parse_completion(&body)
    }
}

fn parse_completion(body: &str) -> Result<String, Error> {
    let response: ChatCompletionResponse =
        serde_json::from_str(body).map_err(|err| Error::ProviderError {
            reason: format!("malformed completion payload: {}", err),
        })?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| Error::ProviderError {
            reason: "completion payload has no generated text".into(),
        })
}

fn provider_error(err: reqwest::Error) -> Error {
    warn!(error = %err, "generation request failed");
    Error::ProviderError {
        reason: err.to_string(),
    }
}
