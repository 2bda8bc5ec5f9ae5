use serde::Serialize;

use solace_types::models::{ConversationTurn, Sender};

/// Oldest turns beyond this are not forwarded to the model.
pub const MAX_HISTORY_TURNS: usize = 20;

pub const SYSTEM_PROMPT: &str = "\
# Solace: mental-health companion

## Identity
You are Solace, a warm and professional mental-health companion. You are not a \
doctor, but you have strong empathy and a solid grounding in everyday psychology.

## Principles
1. Listen first: understand the user's feelings before responding.
2. Stay non-judgmental: accept every emotion without labelling it right or wrong.
3. Guide gently: use open questions that help the user explore for themselves.
4. Know your limits: in a serious crisis, gently recommend professional help.

## Reply structure
Each reply should:
1. Name the feeling: \"It sounds like you feel...\"
2. Empathise: \"That feeling makes a lot of sense...\"
3. Invite reflection: \"What do you think brought this on?\"
4. Offer company: \"I'm here with you.\"

## Special cases
- Self-harm or suicidal thoughts: be gentle but firm in recommending professional help.
- Severe symptoms: never diagnose; suggest seeing a qualified professional.
- Out of scope: be honest about your limits.

## Style
- Warm and sincere, never preachy.
- A warm emoji such as 😊 is welcome where it fits.
- Keep replies to roughly 80-120 words.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// System prompt, then the most recent history turns in order, then the new
/// user message.
pub fn build_messages(user_message: &str, history: &[ConversationTurn]) -> Vec<ChatMessage> {
    let skip = history.len().saturating_sub(MAX_HISTORY_TURNS);

    let mut messages = Vec::with_capacity(history.len() - skip + 2);
    messages.push(ChatMessage::new(Role::System, SYSTEM_PROMPT));
    messages.extend(history[skip..].iter().map(|turn| {
        let role = match turn.sender {
            Sender::User => Role::User,
            Sender::Assistant => Role::Assistant,
        };
        ChatMessage::new(role, turn.content.clone())
    }));
    messages.push(ChatMessage::new(Role::User, user_message));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_keeps_roles_and_order() {
        let history = vec![
            ConversationTurn::user("I can't sleep"),
            ConversationTurn::assistant("That sounds exhausting."),
        ];
        let messages = build_messages("It's been a week", &history);

        let roles: Vec<Role> = messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, [Role::System, Role::User, Role::Assistant, Role::User]);
        assert_eq!(messages[1].content, "I can't sleep");
        assert_eq!(messages[3].content, "It's been a week");
    }

    #[test]
    fn long_history_is_truncated_from_the_front() {
        let history: Vec<ConversationTurn> = (0..30)
            .map(|i| ConversationTurn::user(format!("turn {}", i)))
            .collect();
        let messages = build_messages("latest", &history);

        assert_eq!(messages.len(), MAX_HISTORY_TURNS + 2);
        assert_eq!(messages[1].content, "turn 10");
        assert_eq!(messages[MAX_HISTORY_TURNS].content, "turn 29");
    }

    #[test]
    fn roles_serialize_lowercase() {
        let json = serde_json::to_string(&ChatMessage::new(Role::Assistant, "hi")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
    }
}
