use std::sync::Arc;

use crate::error::Error;
use crate::rest::RestClient;
use crate::runes::RuneBook;

/// A recognized chat command: the first token after the prefix, with
/// anything unrecognized interpreted as a champion name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Choices,
    Champion(String),
}

/// Recognize a command in already-lowercased message content. `None` when
/// the content is not prefixed, or is the bare prefix with no token. Extra
/// tokens after the first are ignored.
pub fn parse(content: &str, prefix: &str) -> Option<Command> {
    let rest = content.strip_prefix(prefix)?;
    let rest = rest.strip_prefix(' ')?;
    let token = rest.split_whitespace().next()?;
    Some(match token {
        "help" => Command::Help,
        "choices" => Command::Choices,
        name => Command::Champion(name.to_string()),
    })
}

/// Turns recognized commands into exactly one outbound message each.
#[derive(Clone)]
pub struct CommandDispatcher {
    rest: Arc<RestClient>,
    runes: Arc<RuneBook>,
    prefix: String,
}

impl CommandDispatcher {
    pub fn new(rest: Arc<RestClient>, runes: Arc<RuneBook>, prefix: String) -> Self {
        Self { rest, runes, prefix }
    }

    /// Handle one inbound chat message. Non-command content is a no-op;
    /// every recognized command sends exactly one reply, including unknown
    /// champion names (a not-found message, never silence).
    pub async fn dispatch(
        &self,
        author_id: &str,
        channel_id: &str,
        content: &str,
    ) -> Result<(), Error> {
        let Some(command) = parse(content, &self.prefix) else {
            return Ok(());
        };
        tracing::debug!("dispatching {command:?} for user {author_id}");

        match command {
            Command::Help => {
                self.rest
                    .send_message(channel_id, &self.help_text(author_id))
                    .await?;
            }
            Command::Choices => {
                self.rest
                    .send_message(channel_id, &self.choices_text(author_id))
                    .await?;
            }
            Command::Champion(name) => match self.runes.page(&name) {
                Some(page) => {
                    self.rest
                        .send_embed_message(
                            channel_id,
                            &format!("Most used rune page for **{}**:", page.champion),
                            page.embed(),
                        )
                        .await?;
                }
                None => {
                    self.rest
                        .send_message(
                            channel_id,
                            &format!(
                                "<@{author_id}>, I don't know a champion called `{name}`. \
                                 Try `{} choices`.",
                                self.prefix
                            ),
                        )
                        .await?;
                }
            },
        }
        Ok(())
    }

    fn help_text(&self, author_id: &str) -> String {
        format!(
            "<@{author_id}>, here's how you use this bot!\n\n\
             Prepend all commands with `{prefix}`; valid commands:\n\n\
             - `help`             // Displays this help message.\n\
             - `choices`          // Display valid champion choices.\n\
             - `{{champion-name}}` // Returns the most used rune page for the given champion.\n",
            prefix = self.prefix
        )
    }

    fn choices_text(&self, author_id: &str) -> String {
        let names: Vec<String> = self
            .runes
            .champions()
            .map(|name| format!("`{name}`"))
            .collect();
        format!(
            "<@{author_id}>, I know rune pages for: {}",
            names.join(", ")
        )
    }
}
