//! Admin commands and guest-message replies.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    classifier::{self, Classification},
    config::{Config, HostProfile},
    domain::UserId,
    errors::Error,
    months,
    messaging::{
        port::MessagingPort,
        types::{Command, IncomingUpdate, TextFormat},
    },
    registry::LinkRepository,
    security::is_admin,
    templates, Result,
};

// Lazy left group: a link containing `=` keeps it.
static ADD_LINK_ARGS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+?)=(.+)").expect("valid addlink regex"));

/// One outbound message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub format: TextFormat,
}

impl Reply {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: TextFormat::Plain,
        }
    }

    pub fn markdown(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: TextFormat::Markdown,
        }
    }
}

/// Split `/addlink` arguments into `(month, link)`.
pub fn parse_add_link(args: &str) -> Result<(String, String)> {
    let caps = ADD_LINK_ARGS_RE
        .captures(args)
        .ok_or_else(|| Error::MalformedCommand(format!("addlink {args}")))?;
    Ok((caps[1].to_string(), caps[2].to_string()))
}

pub struct CommandRouter {
    admin_id: String,
    links_file_name: String,
    host: HostProfile,
    repo: Arc<dyn LinkRepository>,
}

impl CommandRouter {
    pub fn new(cfg: &Config, repo: Arc<dyn LinkRepository>) -> Self {
        Self {
            admin_id: cfg.admin_id.clone(),
            links_file_name: cfg.links_file_name(),
            host: cfg.host.clone(),
            repo,
        }
    }

    /// Reply for an update, or `None` when nothing should be sent.
    pub async fn route(&self, update: &IncomingUpdate) -> Option<Reply> {
        match update {
            IncomingUpdate::Command(cmd) => match cmd.name.as_str() {
                "start" | "addlink" | "looklinks" => Some(self.handle_admin_command(cmd).await),
                _ => self.handle_text(&cmd.raw).await,
            },
            IncomingUpdate::Text(msg) => self.handle_text(&msg.text).await,
        }
    }

    async fn handle_admin_command(&self, cmd: &Command) -> Reply {
        if !self.is_admin(cmd.user_id) {
            if cmd.name != "start" {
                tracing::warn!(user = ?cmd.user_id, command = %cmd.name, "rejected non-admin command");
            }
            return Reply::plain(templates::MSG_ADMIN_ONLY);
        }

        match cmd.name.as_str() {
            "start" => Reply::plain(templates::MSG_START_ADMIN),
            "addlink" => self.add_link(&cmd.args).await,
            _ => self.look_links().await,
        }
    }

    fn is_admin(&self, user_id: Option<UserId>) -> bool {
        is_admin(user_id, &self.admin_id)
    }

    async fn add_link(&self, args: &str) -> Reply {
        let (month, link) = match parse_add_link(args) {
            Ok(parts) => parts,
            Err(_) => return Reply::plain(templates::MSG_BAD_FORMAT),
        };

        match self.repo.upsert(&month, &link).await {
            Ok(_) => Reply::plain(templates::MSG_RECORD_SAVED),
            Err(Error::UnrecognizedMonth(_)) => Reply::plain(templates::MSG_UNRECOGNIZED_MONTH),
            Err(e @ Error::StorageRead { .. }) => {
                tracing::error!("failed to read links file: {e}");
                Reply::plain(templates::MSG_READ_ERROR)
            }
            Err(e) => {
                tracing::error!("failed to update links file: {e}");
                Reply::plain(templates::MSG_WRITE_ERROR)
            }
        }
    }

    async fn look_links(&self) -> Reply {
        match self.repo.dump_all().await {
            Ok(content) => Reply::plain(templates::links_dump(&self.links_file_name, &content)),
            Err(Error::FileNotFound(_)) => {
                Reply::plain(templates::links_file_missing(&self.links_file_name))
            }
            Err(e) => {
                tracing::error!("failed to read links file: {e}");
                Reply::plain(templates::MSG_READ_ERROR)
            }
        }
    }

    async fn handle_text(&self, text: &str) -> Option<Reply> {
        tracing::debug!("received message: {text}");

        match classifier::classify(text) {
            Classification::DateRange {
                ref start_day,
                ref end_day,
                ref month_token,
            } => {
                tracing::info!(start = %start_day, end = %end_day, month = %month_token, "booking dates found");

                let month = months::to_genitive(month_token);
                let link = match self.repo.lookup_by_month_prefix(month_token).await {
                    Ok(link) => link,
                    Err(e) => {
                        tracing::error!("failed to read links file: {e}");
                        None
                    }
                };
                Some(Reply::markdown(templates::welcome(
                    &self.host,
                    start_day,
                    end_day,
                    &month,
                    link.as_deref(),
                )))
            }
            Classification::Receipt { url } => Some(Reply::markdown(templates::receipt_ack(&url))),
            Classification::Unclassified => {
                tracing::debug!("no booking dates found");
                None
            }
        }
    }
}

/// Route one update and deliver the reply, if any.
///
/// Replies longer than the messenger allows (a large `/looklinks` dump) go out
/// in several messages.
pub async fn process_update(
    router: &CommandRouter,
    messenger: &dyn MessagingPort,
    update: IncomingUpdate,
) -> Result<()> {
    let Some(reply) = router.route(&update).await else {
        return Ok(());
    };
    let limit = messenger.capabilities().max_message_len;
    for chunk in split_message(&reply.text, limit) {
        messenger
            .send_text(update.chat_id(), &chunk, reply.format)
            .await?;
    }
    Ok(())
}

/// Split `text` into chunks of at most `limit` characters, preferring line breaks.
fn split_message(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    if text.chars().count() <= limit {
        return vec![text.to_string()];
    }

    let mut out: Vec<String> = Vec::new();
    let mut chunk = String::new();
    let mut chunk_len = 0usize;
    for line in text.split_inclusive('\n') {
        let line_len = line.chars().count();
        if chunk_len + line_len > limit && !chunk.is_empty() {
            out.push(std::mem::take(&mut chunk));
            chunk_len = 0;
        }
        if line_len > limit {
            // A single line longer than the limit is cut by characters.
            let chars: Vec<char> = line.chars().collect();
            for piece in chars.chunks(limit) {
                out.push(piece.iter().collect());
            }
            continue;
        }
        chunk.push_str(line);
        chunk_len += line_len;
    }
    if !chunk.is_empty() {
        out.push(chunk);
    }
    out
}
