//! Completion-endpoint gateway and structured-output decoding.
//!
//! The tutoring step asks the model for a strict two-field JSON object
//! (the next message to show and whether the problem is solved). The
//! schema is declared on the request itself via `response_format`, and the
//! reply is still decoded defensively: a malformed or schema-violating
//! body degrades to a non-completing verdict carrying the raw text rather
//! than failing the step.

use crate::turn::{ContentPart, Role, Turn};
use anyhow::{Context, Result};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestMessageContentPartImageArgs,
        ChatCompletionRequestMessageContentPartTextArgs, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, ChatCompletionRequestUserMessageContentPart,
        CreateChatCompletionRequestArgs, ImageUrlArgs, ResponseFormat, ResponseFormatJsonSchema,
    },
};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// The structured decision a tutoring step produces.
///
/// `deny_unknown_fields` makes an extra field a decode failure instead of
/// silently ignoring it, and it is what marks the generated JSON schema as
/// a closed object for the endpoint's strict mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TutorVerdict {
    /// The next message to show the student.
    pub answer_value: String,
    /// Whether the problem has been solved and the session should end.
    pub solving_completed: bool,
}

/// A completion body that could not be read as a [`TutorVerdict`].
#[derive(Debug, thiserror::Error)]
#[error("completion body did not match the tutor verdict shape: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

/// Strict decode of a completion body into a [`TutorVerdict`].
///
/// Callers fold the error case into a fallback verdict; keeping the decode
/// itself tagged makes the failure observable and testable on its own.
pub fn decode_verdict(raw: &str) -> Result<TutorVerdict, DecodeError> {
    Ok(serde_json::from_str(raw)?)
}

/// Access to the external completion endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Runs one tutoring-step completion over the windowed history and
    /// returns the decoded verdict.
    ///
    /// Decode failures are recovered here (raw text, not completed);
    /// transport and endpoint failures surface as `Err` for the caller to
    /// recover.
    async fn complete_step(&self, turns: Vec<Turn>) -> Result<TutorVerdict>;

    /// Runs one free-form chat completion: fixed system instruction plus
    /// the raw user text, no history, no schema constraint.
    async fn complete_chat(&self, system_prompt: String, user_text: String) -> Result<String>;
}

/// Production gateway for any OpenAI-compatible service (Groq by default).
pub struct OpenAICompatibleGateway {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAICompatibleGateway {
    /// Creates a gateway from an API configuration (credential and base
    /// URL) and a model identifier.
    pub fn new(config: OpenAIConfig, model: String) -> Self {
        Self {
            client: Client::with_config(config),
            model,
        }
    }
}

/// Maps one turn onto the endpoint's wire message format.
///
/// System and assistant turns flatten to plain text; user turns keep their
/// content parts so an attached image reference travels alongside the text.
fn wire_message(turn: &Turn) -> Result<ChatCompletionRequestMessage> {
    let message = match turn.role {
        Role::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(turn.text())
            .build()?
            .into(),
        Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(turn.text())
            .build()?
            .into(),
        Role::User => {
            let parts = turn
                .content
                .iter()
                .map(|part| {
                    Ok(match part {
                        ContentPart::Text(text) => {
                            ChatCompletionRequestMessageContentPartTextArgs::default()
                                .text(text.clone())
                                .build()?
                                .into()
                        }
                        ContentPart::ImageUrl(url) => {
                            ChatCompletionRequestMessageContentPartImageArgs::default()
                                .image_url(ImageUrlArgs::default().url(url.clone()).build()?)
                                .build()?
                                .into()
                        }
                    })
                })
                .collect::<Result<Vec<ChatCompletionRequestUserMessageContentPart>>>()?;
            ChatCompletionRequestUserMessageArgs::default()
                .content(parts)
                .build()?
                .into()
        }
    };
    Ok(message)
}

#[async_trait]
impl CompletionGateway for OpenAICompatibleGateway {
    async fn complete_step(&self, turns: Vec<Turn>) -> Result<TutorVerdict> {
        let messages = turns
            .iter()
            .map(wire_message)
            .collect::<Result<Vec<_>>>()?;

        let schema = serde_json::to_value(schemars::schema_for!(TutorVerdict))?;
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .response_format(ResponseFormat::JsonSchema {
                json_schema: ResponseFormatJsonSchema {
                    description: None,
                    name: "tutor_result".to_string(),
                    schema: Some(schema),
                    strict: Some(true),
                },
            })
            .temperature(1.0)
            .top_p(1.0)
            .max_completion_tokens(512u32)
            .build()?;

        let response = self.client.chat().create(request).await?;
        let raw = response
            .choices
            .first()
            .context("completion response contained no choices")?
            .message
            .content
            .clone()
            .unwrap_or_default();

        Ok(match decode_verdict(&raw) {
            Ok(verdict) => verdict,
            Err(err) => {
                warn!(error = %err, "Falling back to raw completion text as a nudge");
                TutorVerdict {
                    answer_value: raw,
                    solving_completed: false,
                }
            }
        })
    }

    async fn complete_chat(&self, system_prompt: String, user_text: String) -> Result<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system_prompt)
                    .build()?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(user_text)
                    .build()?
                    .into(),
            ])
            .temperature(0.7)
            .max_completion_tokens(512u32)
            .build()?;

        let response = self.client.chat().create(request).await?;
        Ok(response
            .choices
            .first()
            .context("completion response contained no choices")?
            .message
            .content
            .clone()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_valid_verdict() {
        let verdict =
            decode_verdict(r#"{"answer_value": "Great! Now isolate x.", "solving_completed": false}"#)
                .unwrap();
        assert_eq!(verdict.answer_value, "Great! Now isolate x.");
        assert!(!verdict.solving_completed);
    }

    #[test]
    fn decode_rejects_unknown_fields() {
        let raw = r#"{"answer_value": "done", "solving_completed": true, "confidence": 0.9}"#;
        assert!(decode_verdict(raw).is_err());
    }

    #[test]
    fn decode_rejects_missing_fields() {
        assert!(decode_verdict(r#"{"answer_value": "done"}"#).is_err());
    }

    #[test]
    fn decode_rejects_wrong_types() {
        let raw = r#"{"answer_value": "done", "solving_completed": "yes"}"#;
        assert!(decode_verdict(raw).is_err());
    }

    #[test]
    fn decode_rejects_non_json() {
        assert!(decode_verdict("Let's start by writing the equation down.").is_err());
        assert!(decode_verdict("").is_err());
    }

    #[test]
    fn verdict_schema_is_a_closed_object() {
        let schema = serde_json::to_value(schemars::schema_for!(TutorVerdict)).unwrap();
        assert_eq!(schema["additionalProperties"], serde_json::json!(false));
        let required = schema["required"].as_array().unwrap();
        assert!(required.contains(&serde_json::json!("answer_value")));
        assert!(required.contains(&serde_json::json!("solving_completed")));
    }

    #[test]
    fn wire_message_for_user_turn_keeps_both_parts() {
        let turn = Turn::user_step("Find x", Some("https://example.com/problem.jpeg"));
        let message = serde_json::to_value(wire_message(&turn).unwrap()).unwrap();
        assert_eq!(message["role"], "user");
        let parts = message["content"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0]["type"], "text");
        assert_eq!(parts[0]["text"], "Find x");
        assert_eq!(parts[1]["type"], "image_url");
        assert_eq!(parts[1]["image_url"]["url"], "https://example.com/problem.jpeg");
    }

    #[test]
    fn wire_message_flattens_system_and_assistant_turns() {
        let system = serde_json::to_value(wire_message(&Turn::system("instructions")).unwrap())
            .unwrap();
        assert_eq!(system["role"], "system");
        assert_eq!(system["content"], "instructions");

        let assistant =
            serde_json::to_value(wire_message(&Turn::assistant("Nice work!")).unwrap()).unwrap();
        assert_eq!(assistant["role"], "assistant");
        assert_eq!(assistant["content"], "Nice work!");
    }
}
