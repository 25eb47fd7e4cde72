use crate::correlation::CorrelationId;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// ChatMessage
// ---------------------------------------------------------------------------

/// A platform-agnostic chat response: text plus structured actions.
///
/// Actions carry the field values needed for next-turn rehydration, so a
/// menu click arrives as a fresh invocation with the chosen field already
/// populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<MessageAction>,
}

impl ChatMessage {
    pub fn text(text: impl Into<String>) -> Self {
        ChatMessage {
            text: text.into(),
            actions: Vec::new(),
        }
    }

    pub fn with_action(mut self, action: MessageAction) -> Self {
        self.actions.push(action);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.actions.is_empty()
    }

    /// Append another message below this one (running summary + menu prompt).
    pub fn append(&mut self, other: ChatMessage) {
        if !other.text.is_empty() {
            if !self.text.is_empty() {
                self.text.push('\n');
            }
            self.text.push_str(&other.text);
        }
        self.actions.extend(other.actions);
    }
}

// ---------------------------------------------------------------------------
// MessageAction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageAction {
    /// A button re-invoking `command` with the given fields pre-bound.
    Button {
        label: String,
        command: String,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        fields: BTreeMap<String, String>,
    },
    /// A selection menu whose chosen value populates `field` on the next turn.
    Menu {
        text: String,
        field: String,
        options: Vec<MenuOption>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuOption {
    pub label: String,
    pub value: String,
}

impl MenuOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        MenuOption {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Convenience constructor for the common "pick one of these" prompt.
pub fn menu(
    text: impl Into<String>,
    field: impl Into<String>,
    options: Vec<MenuOption>,
) -> ChatMessage {
    ChatMessage::default().with_action(MessageAction::Menu {
        text: text.into(),
        field: field.into(),
        options,
    })
}

// ---------------------------------------------------------------------------
// ChatSurface
// ---------------------------------------------------------------------------

/// The narrow boundary to the chat platform.
///
/// `post` sends the message addressed by `correlation`, updating in place if
/// a message with that id was already sent. The engine never talks to the
/// platform any other way.
#[async_trait]
pub trait ChatSurface: Send + Sync {
    async fn post(&self, correlation: &CorrelationId, message: &ChatMessage) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_joins_text_and_actions() {
        let mut msg = ChatMessage::text("Selected details:");
        msg.append(menu(
            "Pick a project",
            "projectName",
            vec![MenuOption::new("Mercury", "mercury")],
        ));
        assert_eq!(msg.text, "Selected details:");
        assert_eq!(msg.actions.len(), 1);

        let mut msg = ChatMessage::text("a");
        msg.append(ChatMessage::text("b"));
        assert_eq!(msg.text, "a\nb");
    }

    #[test]
    fn action_payload_round_trips() {
        let msg = menu(
            "Pick a team",
            "teamName",
            vec![MenuOption::new("Platform", "platform")],
        );
        let json = serde_json::to_string(&msg).unwrap();
        let back: ChatMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(msg, back);
    }
}
