//! Wire types of the OpenAI-compatible chat completions API

use serde::{Deserialize, Serialize};
use tribunal_domain::{AgentRequest, ProviderErrorBody, ProviderErrorEnvelope};

/// Upper bound for error bodies quoted in diagnostics
const MAX_ERROR_SNIPPET: usize = 512;

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: [ChatMessage<'a>; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_completion_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

impl<'a> ChatRequest<'a> {
    /// Reasoning models get no temperature and a completion-token limit.
    pub fn from_agent_request(request: &'a AgentRequest) -> Self {
        let model = request.model();
        let reasoning = model.is_reasoning();

        Self {
            model: model.as_str(),
            messages: [
                ChatMessage {
                    role: "system",
                    content: request.system_prompt(),
                },
                ChatMessage {
                    role: "user",
                    content: request.user_prompt(),
                },
            ],
            temperature: (!reasoning).then(|| request.temperature()),
            max_tokens: (!reasoning).then(|| request.max_output_tokens()),
            max_completion_tokens: reasoning.then(|| request.max_output_tokens()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse {
    /// Text of the first choice, if any.
    pub fn into_text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
    }
}

/// Parse an error response body; non-JSON bodies become the message.
pub fn parse_error_body(body: &str) -> ProviderErrorBody {
    match serde_json::from_str::<ProviderErrorEnvelope>(body) {
        Ok(envelope) => envelope.error,
        Err(_) => {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                ProviderErrorBody::default()
            } else {
                ProviderErrorBody::from_message(truncate(trimmed, MAX_ERROR_SNIPPET))
            }
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tribunal_domain::Model;

    fn request(model: Model) -> AgentRequest {
        AgentRequest::builder("system text", "user text")
            .model(model)
            .temperature(0.3)
            .max_output_tokens(1500)
            .build()
            .unwrap()
    }

    #[test]
    fn test_chat_request_for_standard_model() {
        let agent_request = request(Model::Gpt4oMini);
        let body = serde_json::to_value(ChatRequest::from_agent_request(&agent_request)).unwrap();

        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0], json!({"role": "system", "content": "system text"}));
        assert_eq!(body["messages"][1], json!({"role": "user", "content": "user text"}));
        assert!((body["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
        assert_eq!(body["max_tokens"], 1500);
        assert!(body.get("max_completion_tokens").is_none());
    }

    #[test]
    fn test_chat_request_for_reasoning_model() {
        let agent_request = request(Model::O4Mini);
        let body = serde_json::to_value(ChatRequest::from_agent_request(&agent_request)).unwrap();

        assert!(body.get("temperature").is_none());
        assert!(body.get("max_tokens").is_none());
        assert_eq!(body["max_completion_tokens"], 1500);
    }

    #[test]
    fn test_response_text_from_first_choice() {
        let response: ChatResponse = serde_json::from_value(json!({
            "id": "chatcmpl-1",
            "model": "gpt-4o-mini-2024-07-18",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "{\"ok\":true}"}},
                {"index": 1, "message": {"role": "assistant", "content": "ignored"}}
            ]
        }))
        .unwrap();

        assert_eq!(response.into_text().as_deref(), Some("{\"ok\":true}"));
    }

    #[test]
    fn test_response_without_content() {
        let null_content: ChatResponse = serde_json::from_value(json!({
            "choices": [{"message": {"role": "assistant", "content": null}}]
        }))
        .unwrap();
        assert_eq!(null_content.into_text(), None);

        let no_choices: ChatResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        assert_eq!(no_choices.into_text(), None);
    }

    #[test]
    fn test_parse_error_body() {
        let body = parse_error_body(
            r#"{"error": {"message": "You exceeded your current quota", "type": "insufficient_quota", "code": "insufficient_quota"}}"#,
        );
        assert_eq!(body.code.as_deref(), Some("insufficient_quota"));
        assert_eq!(body.error_type.as_deref(), Some("insufficient_quota"));

        let html = parse_error_body("<html>Bad Gateway</html>");
        assert_eq!(html.message.as_deref(), Some("<html>Bad Gateway</html>"));
        assert_eq!(html.code, None);

        let long = parse_error_body(&"x".repeat(2000));
        assert!(long.message.unwrap().len() < 600);
    }
}
