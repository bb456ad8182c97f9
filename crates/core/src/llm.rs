use crate::error::LlmError;
use crate::traits::LlmClient;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
///
/// Groq, OpenAI, and most local inference servers speak this protocol;
/// model selection and token limits are configuration.
pub struct ChatCompletionsClient {
    endpoint: String,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
    client: Client,
}

impl ChatCompletionsClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
        max_tokens: u32,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key,
            model: model.into(),
            max_tokens,
            client: Client::new(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatRequestMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatRequestMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

fn first_completion_text(response: ChatResponse) -> Result<String, LlmError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.is_empty())
        .ok_or(LlmError::EmptyCompletion)
}

#[async_trait]
impl LlmClient for ChatCompletionsClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatRequestMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.max_tokens,
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let details = response.text().await.unwrap_or_default();
            return Err(LlmError::Backend {
                status: status.to_string(),
                details,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        first_completion_text(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_text_is_taken_from_the_first_choice() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": "the answer"}},
                            {"message": {"role": "assistant", "content": "ignored"}}]}"#,
        )
        .expect("valid chat completions body");

        assert_eq!(
            first_completion_text(response).expect("completion text"),
            "the answer"
        );
    }

    #[test]
    fn missing_or_empty_content_is_an_error() {
        let empty: ChatResponse =
            serde_json::from_str(r#"{"choices": []}"#).expect("valid chat completions body");
        assert!(matches!(
            first_completion_text(empty),
            Err(LlmError::EmptyCompletion)
        ));

        let blank: ChatResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": ""}}]}"#)
                .expect("valid chat completions body");
        assert!(matches!(
            first_completion_text(blank),
            Err(LlmError::EmptyCompletion)
        ));
    }
}
