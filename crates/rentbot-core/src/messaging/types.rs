use crate::domain::{ChatId, UserId};

/// Messenger-agnostic inbound update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IncomingUpdate {
    Command(Command),
    Text(TextMessage),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
    pub chat_id: ChatId,
    pub user_id: Option<UserId>,
    /// Lowercased, without the leading `/` and any `@botname` suffix.
    pub name: String,
    pub args: String,
    /// Message text as received.
    pub raw: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextMessage {
    pub chat_id: ChatId,
    pub user_id: Option<UserId>,
    pub text: String,
}

impl IncomingUpdate {
    /// Build an update from message text; anything starting with `/` is a command.
    pub fn from_text(chat_id: ChatId, user_id: Option<UserId>, text: &str) -> Self {
        if text.starts_with('/') {
            let (name, args) = parse_command(text);
            return Self::Command(Command {
                chat_id,
                user_id,
                name,
                args,
                raw: text.to_string(),
            });
        }
        Self::Text(TextMessage {
            chat_id,
            user_id,
            text: text.to_string(),
        })
    }

    pub fn chat_id(&self) -> ChatId {
        match self {
            Self::Command(c) => c.chat_id,
            Self::Text(t) => t.chat_id,
        }
    }
}

fn parse_command(text: &str) -> (String, String) {
    // Telegram may send `/cmd@botname arg1 ...`
    let mut parts = text.trim().splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim();
    let rest = parts.next().unwrap_or("").trim().to_string();

    let cmd = first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase();

    (cmd, rest)
}

/// How the transport should render a reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextFormat {
    Plain,
    /// Legacy Telegram Markdown (code fences, `[text](url)`).
    Markdown,
}

/// Capabilities / feature flags of a messenger implementation.
#[derive(Clone, Copy, Debug)]
pub struct MessagingCapabilities {
    pub supports_markdown: bool,
    pub max_message_len: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_are_split_and_normalized() {
        let update = IncomingUpdate::from_text(ChatId(1), Some(UserId(2)), "/AddLink@rent_bot янв=http://x");
        let IncomingUpdate::Command(cmd) = update else {
            panic!("expected command");
        };
        assert_eq!(cmd.name, "addlink");
        assert_eq!(cmd.args, "янв=http://x");
        assert_eq!(cmd.raw, "/AddLink@rent_bot янв=http://x");
    }

    #[test]
    fn command_without_args() {
        let IncomingUpdate::Command(cmd) = IncomingUpdate::from_text(ChatId(1), None, "/looklinks") else {
            panic!("expected command");
        };
        assert_eq!(cmd.name, "looklinks");
        assert_eq!(cmd.args, "");
    }

    #[test]
    fn plain_text_is_not_a_command() {
        let update = IncomingUpdate::from_text(ChatId(7), None, "заезд 3-5 июл");
        assert_eq!(update.chat_id(), ChatId(7));
        assert!(matches!(update, IncomingUpdate::Text(ref t) if t.text == "заезд 3-5 июл"));
    }
}
