//! Conversation turns and their content parts.
//!
//! A `Turn` is one role-tagged unit of conversation: the tutoring
//! instruction, a student's step (text and/or an image of their work),
//! or the tutor's reply. Turns are plain data; mapping them onto the
//! completion endpoint's wire format lives in `gateway`.

use serde::{Deserialize, Serialize};

/// The speaker of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One piece of a turn's content: inline text or an image reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentPart {
    Text(String),
    ImageUrl(String),
}

/// A single conversation turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: Vec<ContentPart>,
}

impl Turn {
    /// Creates a system turn carrying the tutoring instruction.
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: vec![ContentPart::Text(text.into())],
        }
    }

    /// Creates an assistant turn from the tutor's reply text.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: vec![ContentPart::Text(text.into())],
        }
    }

    /// Builds the user turn for one student step.
    ///
    /// The text part (if the text is non-empty) always precedes the image
    /// part (if present). Both inputs absent yields an empty content list;
    /// the builder accepts that, and the orchestrator rejects it before
    /// anything is sent to the model.
    pub fn user_step(text: &str, image_url: Option<&str>) -> Self {
        let mut content = Vec::new();
        if !text.is_empty() {
            content.push(ContentPart::Text(text.to_string()));
        }
        if let Some(url) = image_url {
            content.push(ContentPart::ImageUrl(url.to_string()));
        }
        Self {
            role: Role::User,
            content,
        }
    }

    /// Concatenated text of all text parts, used when flattening a turn
    /// into a plain-string wire message.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|part| match part {
                ContentPart::Text(text) => Some(text.as_str()),
                ContentPart::ImageUrl(_) => None,
            })
            .collect()
    }
}
