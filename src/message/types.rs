//! Owned protocol message.

use std::time::Instant;

use chrono::{DateTime, Local, Utc};

use crate::chan::ChannelExt;
use crate::command::Command;
use crate::error::ProtocolError;

use super::nom_parser;

/// Where a message belongs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MessageKind {
    /// A NOTICE.
    Notice,
    /// Server-originated or otherwise not tied to a channel or peer.
    Server,
    /// Addressed to a channel.
    Channel,
    /// Addressed to a single user.
    Private,
}

/// One inbound event or one outbound intent.
///
/// Fields are fixed once the message is built. The session re-files a
/// message with [`into_kind`](Self::into_kind) or rewrites its text with
/// [`with_body`](Self::with_body), both of which consume the value.
#[derive(Clone, Debug)]
pub struct Message {
    kind: MessageKind,
    command: Command,
    sender: Option<String>,
    params: Vec<String>,
    body: Option<String>,
    timestamp: DateTime<Utc>,
    created: Instant,
}

impl Message {
    /// Create a message with no sender, params or body.
    pub fn new(kind: MessageKind, command: Command) -> Self {
        Self {
            kind,
            command,
            sender: None,
            params: Vec::new(),
            body: None,
            timestamp: Utc::now(),
            created: Instant::now(),
        }
    }

    /// Build the reply to a PING, echoing its token.
    pub fn pong_for(ping: &Message) -> Self {
        let pong = Message::new(MessageKind::Server, Command::PONG);
        match ping.body() {
            Some(body) => pong.with_body(body),
            None => pong.with_params(ping.params().iter().cloned()),
        }
    }

    /// Parse one line, with or without its CR/LF terminator.
    ///
    /// Returns `None` for an empty line. Short or odd lines never fail:
    /// whatever cannot be found is left absent.
    pub fn parse(line: &str) -> Option<Message> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return None;
        }

        let raw = nom_parser::tokenize(line);
        let command = raw
            .command
            .map(Command::from_token)
            .unwrap_or_else(|| Command::Unknown(String::new()));
        let sender = raw
            .origin
            .and_then(|origin| origin.split_once('!'))
            .map(|(nick, _)| nick.to_owned());
        let params: Vec<String> = raw.params.into_iter().map(str::to_owned).collect();
        let kind = classify(&command, sender.is_some(), &params);

        let mut msg = Message::new(kind, command);
        msg.sender = sender;
        msg.params = params;
        msg.body = raw.body.map(str::to_owned);
        Some(msg)
    }

    /// Set the sender nickname.
    #[must_use]
    pub fn with_sender(mut self, nick: impl Into<String>) -> Self {
        self.sender = Some(nick.into());
        self
    }

    /// Replace the parameter list.
    #[must_use]
    pub fn with_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the trailing body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Re-file the message under another kind.
    #[must_use]
    pub fn into_kind(mut self, kind: MessageKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn command(&self) -> &Command {
        &self.command
    }

    /// Nickname of the originating user, absent for server lines.
    pub fn sender(&self) -> Option<&str> {
        self.sender.as_deref()
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Parameter at `index`, if the line carried that many.
    pub fn param(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }

    pub fn last_param(&self) -> Option<&str> {
        self.params.last().map(String::as_str)
    }

    /// Free text after the `" :"` separator.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// The first parameter, or the body when there are no parameters.
    ///
    /// Servers differ on whether JOIN, PART and NICK carry their argument
    /// as a middle or a trailing parameter.
    pub fn first_param_or_body(&self) -> Option<&str> {
        self.param(0).or_else(|| self.body())
    }

    /// Wall-clock creation time.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Monotonic creation instant, for ordering messages.
    pub fn created(&self) -> Instant {
        self.created
    }

    /// Local time as `HH:MM`.
    pub fn short_timestamp(&self) -> String {
        self.timestamp.with_timezone(&Local).format("%H:%M").to_string()
    }

    /// Local date and time, e.g. `Jan 05, 2024 14:03:09`.
    pub fn long_timestamp(&self) -> String {
        self.timestamp
            .with_timezone(&Local)
            .format("%b %d, %Y %H:%M:%S")
            .to_string()
    }
}

fn classify(command: &Command, from_user: bool, params: &[String]) -> MessageKind {
    match command {
        Command::NOTICE => MessageKind::Notice,
        Command::PRIVMSG if from_user => match params.first() {
            Some(target) if target.is_channel_name() => MessageKind::Channel,
            _ => MessageKind::Private,
        },
        _ => MessageKind::Server,
    }
}

impl PartialEq for Message {
    /// Protocol content only; creation times are ignored.
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.command == other.command
            && self.sender == other.sender
            && self.params == other.params
            && self.body == other.body
    }
}

impl std::str::FromStr for Message {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Message::parse(s).ok_or(ProtocolError::EmptyMessage)
    }
}
