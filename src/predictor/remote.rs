use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::RemoteConfig;
use crate::parse;
use crate::predictor::{PredictorEngine, MAX_PREDICTIONS};

const SYSTEM_PERSONA: &str = "You are a pattern recognition expert.";

pub struct RemotePredictor {
    endpoint: String,
    model: String,
    api_key: String,
    client: Client,
}

impl RemotePredictor {
    pub fn new(config: RemoteConfig, api_key: String) -> Result<Self> {
        if config.model.trim().is_empty() {
            return Err(anyhow!("remote.enable is true but remote.model is empty"));
        }
        if api_key.trim().is_empty() {
            return Err(anyhow!("remote.enable is true but the API key is empty"));
        }

        Ok(Self {
            endpoint: format!(
                "{}/chat/completions",
                config.api_base.trim_end_matches('/')
            ),
            model: config.model,
            api_key,
            client: Client::builder()
                .build()
                .context("failed to build HTTP client")?,
        })
    }

    async fn run_completion(&self, history: &[u32]) -> Result<String> {
        let payload = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PERSONA.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: build_prompt(history),
                },
            ],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .context("failed to call completion API")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("failed to read completion response body")?;

        if !status.is_success() {
            return Err(anyhow!("completion API failed ({status}): {body}"));
        }

        let parsed: ChatResponse =
            serde_json::from_str(&body).context("invalid completion response format")?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("completion reply carried no choices"))?;
        Ok(choice.message.content)
    }
}

fn build_prompt(history: &[u32]) -> String {
    let numbers = history
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "The past numbers are: [{numbers}]. Based on patterns and repetition, \
         predict the next 5 to 7 numbers most likely to come next. Reply only \
         with numbers separated by commas."
    )
}

#[async_trait]
impl PredictorEngine for RemotePredictor {
    async fn predict(&self, history: &[u32], _wrong: &[u32]) -> Result<Vec<u32>> {
        let raw = self.run_completion(history).await?;
        let numbers = parse::numbers(&raw);
        if numbers.is_empty() {
            return Err(anyhow!("completion reply contained no numbers: {raw:?}"));
        }
        Ok(numbers.into_iter().take(MAX_PREDICTIONS).collect())
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ChatReplyMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_full_history() {
        let prompt = build_prompt(&[1, 2, 2, 3]);
        assert!(prompt.contains("The past numbers are: [1, 2, 2, 3]"));
        assert!(prompt.contains("Reply only with numbers separated by commas"));
    }

    #[test]
    fn parses_completion_reply_shape() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"4, 8, 15"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.choices[0].message.content, "4, 8, 15");
    }

    #[test]
    fn rejects_empty_api_key() {
        let error = RemotePredictor::new(RemoteConfig::default(), "  ".to_string());
        assert!(error.is_err());
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let config = RemoteConfig {
            api_base: "https://api.openai.com/v1/".to_string(),
            ..RemoteConfig::default()
        };
        let predictor = RemotePredictor::new(config, "sk-test".to_string()).unwrap();
        assert_eq!(predictor.endpoint, "https://api.openai.com/v1/chat/completions");
    }
}
