//! Event-driven session state.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Local};
use tracing::{debug, warn};

use crate::casemap::IrcKey;
use crate::chan::ChannelExt;
use crate::command::Command;
use crate::config::SessionConfig;
use crate::encode;
use crate::error::EncodeError;
use crate::message::{Message, MessageKind};
use crate::response::Reply;

use super::channel::Channel;
use super::chat::PrivateChat;
use super::listener::{NullSender, RawSender, SessionListener};
use super::log::MessageLog;
use super::Diagnostics;

/// Membership prefixes servers put in front of nicks in NAMES replies.
const MEMBER_PREFIXES: [char; 5] = ['~', '&', '@', '%', '+'];

/// Format used for the time part of a topic-set line.
const TOPIC_TIME_FORMAT: &str = "%m %d, %Y %H:%M:%S";

/// State for one server connection.
///
/// Feed it every inbound line in arrival order with
/// [`feed_line`](Self::feed_line) (or [`apply`](Self::apply) for an
/// already parsed message). It is the single writer of its channels,
/// private chats and server log; readers on other threads go through the
/// `Arc` handles it hands out.
pub struct Session {
    config: SessionConfig,
    nickname: String,
    connected: bool,
    channels: HashMap<IrcKey, Arc<Channel>>,
    private_chats: HashMap<IrcKey, Arc<PrivateChat>>,
    server_log: Arc<MessageLog>,
    listeners: Arc<[Arc<dyn SessionListener>]>,
    sender: Arc<dyn RawSender>,
    diagnostics: Diagnostics,
}

impl Session {
    /// Create a session whose outbound lines are discarded.
    pub fn new(config: SessionConfig) -> Self {
        Self::with_sender(config, Arc::new(NullSender))
    }

    /// Create a session writing outbound lines to `sender`.
    pub fn with_sender(config: SessionConfig, sender: Arc<dyn RawSender>) -> Self {
        Self {
            nickname: config.nickname.clone(),
            config,
            connected: false,
            channels: HashMap::new(),
            private_chats: HashMap::new(),
            server_log: Arc::new(MessageLog::new()),
            listeners: Arc::from(Vec::new()),
            sender,
            diagnostics: Diagnostics::default(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The local nickname, following confirmed NICK changes.
    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    /// Whether the welcome numeric has been seen.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Register a listener. Listeners are notified in registration order.
    pub fn add_listener(&mut self, listener: Arc<dyn SessionListener>) {
        let mut listeners: Vec<_> = self.listeners.iter().cloned().collect();
        listeners.push(listener);
        self.listeners = listeners.into();
    }

    pub fn channel(&self, name: &str) -> Option<Arc<Channel>> {
        self.channels.get(&IrcKey::new(name)).cloned()
    }

    pub fn channels(&self) -> Vec<Arc<Channel>> {
        self.channels.values().cloned().collect()
    }

    /// The conversation with `nick`, matched case-insensitively.
    pub fn private_chat(&self, nick: &str) -> Option<Arc<PrivateChat>> {
        self.private_chats.get(&IrcKey::new(nick)).cloned()
    }

    pub fn private_chats(&self) -> Vec<Arc<PrivateChat>> {
        self.private_chats.values().cloned().collect()
    }

    /// Messages not tied to a channel or peer.
    pub fn server_log(&self) -> &Arc<MessageLog> {
        &self.server_log
    }

    pub fn diagnostics(&self) -> Diagnostics {
        self.diagnostics
    }

    /// Parse and apply one raw line. Empty lines are ignored.
    pub fn feed_line(&mut self, raw: &str) {
        if let Some(msg) = Message::parse(raw) {
            self.apply(msg);
        }
    }

    /// Build a line from intent text and send it.
    ///
    /// `target` is the active channel or peer. A PRIVMSG to a peer opens
    /// the private chat if needed; outgoing PRIVMSGs are appended to the
    /// matching channel or chat log without notifying listeners.
    pub fn submit(&mut self, intent: &str, target: Option<&str>) -> Result<(), EncodeError> {
        let line = encode::build_with_quit_reason(intent, target, &self.config.quit_message)?;
        debug!(%line, "submitting");
        self.record_outgoing(&line);
        self.sender.send_raw(line);
        Ok(())
    }

    /// Apply one parsed message.
    ///
    /// Never fails. Events that point at a channel the session does not
    /// track, or that lack the parameters their handler needs, are logged
    /// and counted in [`Diagnostics::ignored`].
    pub fn apply(&mut self, msg: Message) {
        self.diagnostics.applied += 1;
        debug!(command = %msg.command(), sender = ?msg.sender(), "applying event");

        let command = msg.command().clone();
        match command {
            Command::Reply(Reply::RPL_WELCOME) => self.on_welcome(&msg),
            Command::Reply(Reply::RPL_TOPIC) => self.on_topic(msg),
            Command::Reply(Reply::RPL_TOPICWHOTIME) => self.on_topic_set(msg),
            Command::Reply(Reply::RPL_NAMREPLY) => self.on_names(&msg),
            Command::Reply(reply) if reply.is_nick_error() => {
                let msg = msg.into_kind(MessageKind::Server);
                self.server_log.push(msg.clone());
                self.notify(|l| l.on_nick_error(&msg));
            }
            Command::ERROR => {
                let msg = msg.into_kind(MessageKind::Server);
                self.server_log.push(msg.clone());
                self.notify(|l| l.on_server_error(&msg));
            }
            Command::NICK => self.on_nick(&msg),
            Command::JOIN => self.on_join(&msg),
            Command::QUIT => self.on_quit(&msg),
            Command::PART => self.on_part(&msg),
            Command::PRIVMSG => self.on_privmsg(msg),
            Command::NOTICE => {
                let msg = msg.into_kind(MessageKind::Notice);
                self.server_log.push(msg.clone());
                let server = self.config.server_name.as_str();
                self.notify(|l| l.on_notice(&msg, server));
            }
            Command::PING => self.sender.send_raw(Message::pong_for(&msg).to_string()),
            other => {
                if other.is_unknown() {
                    self.diagnostics.unrecognized += 1;
                }
                self.server_log.push(msg.clone());
                self.notify(|l| l.on_server_message(&msg));
            }
        }
    }

    fn on_welcome(&mut self, msg: &Message) {
        self.connected = true;
        if let Some(nick) = msg.param(0).filter(|n| *n != "*") {
            self.nickname = nick.to_owned();
        }
        self.notify(|l| l.on_connected());
    }

    fn on_topic(&mut self, msg: Message) {
        let Some(channel) = msg.last_param().and_then(|name| self.channel(name)) else {
            return self.ignore(&msg, "topic for unknown channel");
        };

        channel.set_topic(msg.body().unwrap_or_default());
        let msg = msg.into_kind(MessageKind::Channel);
        channel.push(msg.clone());
        self.notify(|l| l.on_channel_message(&msg, &channel));
    }

    fn on_topic_set(&mut self, msg: Message) {
        let Some(channel) = msg
            .param(1)
            .or_else(|| msg.last_param())
            .and_then(|name| self.channel(name))
        else {
            return self.ignore(&msg, "topic time for unknown channel");
        };
        let Some(setter) = msg.param(2) else {
            return self.ignore(&msg, "topic time without setter");
        };

        let text = match msg.param(3).and_then(format_epoch) {
            Some(when) => format!("{} - {}", setter, when),
            None => setter.to_owned(),
        };

        let msg = msg.with_body(text).into_kind(MessageKind::Channel);
        channel.push(msg.clone());
        self.notify(|l| l.on_channel_message(&msg, &channel));
    }

    fn on_names(&mut self, msg: &Message) {
        let Some(channel) = msg.last_param().and_then(|name| self.channel(name)) else {
            return self.ignore(msg, "names for unknown channel");
        };

        for entry in msg.body().unwrap_or_default().split_whitespace() {
            let nick = entry.trim_start_matches(MEMBER_PREFIXES);
            if !nick.is_empty() {
                channel.add_member(nick);
            }
        }
    }

    fn on_nick(&mut self, msg: &Message) {
        let new = msg.body().or_else(|| msg.param(0));
        let (Some(old), Some(new)) = (msg.sender(), new) else {
            return self.ignore(msg, "NICK without sender or new nick");
        };

        if self.is_me(old) {
            debug!(%old, %new, "local nickname changed");
            self.nickname = new.to_owned();
        }

        for channel in self.channels.values() {
            if channel.rename_member(old, new) {
                self.notify(|l| l.on_user_renamed(channel, old, new));
            }
        }

        let (old_key, new_key) = (IrcKey::new(old), IrcKey::new(new));
        if old_key == new_key {
            if let Some(chat) = self.private_chats.get(&old_key) {
                chat.set_peer(new);
            }
        } else if !self.private_chats.contains_key(&new_key) {
            if let Some(chat) = self.private_chats.remove(&old_key) {
                chat.set_peer(new);
                self.private_chats.insert(new_key, chat);
            }
        }
    }

    fn on_join(&mut self, msg: &Message) {
        let (Some(nick), Some(name)) = (msg.sender(), msg.first_param_or_body()) else {
            return self.ignore(msg, "JOIN without sender or channel");
        };

        if self.is_me(nick) {
            let channel = Arc::new(Channel::new(name));
            self.channels.insert(channel.key(), Arc::clone(&channel));
            self.notify(|l| l.on_channel_joined(&channel));
            return;
        }

        let Some(channel) = self.channel(name) else {
            return self.ignore(msg, "JOIN to unknown channel");
        };
        channel.add_member(nick);
        self.notify(|l| l.on_user_entered(nick, &channel));
    }

    fn on_quit(&mut self, msg: &Message) {
        let Some(nick) = msg.sender() else {
            return self.ignore(msg, "QUIT without sender");
        };

        for channel in self.channels.values() {
            if channel.remove_member(nick) {
                self.notify(|l| l.on_user_quit(msg));
            }
        }
    }

    fn on_part(&mut self, msg: &Message) {
        let Some(nick) = msg.sender() else {
            return self.ignore(msg, "PART without sender");
        };

        if self.is_me(nick) {
            let removed = msg
                .first_param_or_body()
                .and_then(|name| self.channels.remove(&IrcKey::new(name)));
            match removed {
                Some(channel) => self.notify(|l| l.on_channel_left(channel.name())),
                None => self.ignore(msg, "PART from unknown channel"),
            }
            return;
        }

        for channel in self.channels.values() {
            if channel.remove_member(nick) {
                self.notify(|l| l.on_user_left(nick, channel));
            }
        }
    }

    fn on_privmsg(&mut self, msg: Message) {
        let (Some(sender), Some(dest)) = (msg.sender(), msg.param(0)) else {
            return self.ignore(&msg, "PRIVMSG without sender or target");
        };

        if self.is_me(dest) {
            let chat = self.open_chat(sender);
            let msg = msg.into_kind(MessageKind::Private);
            chat.push(msg.clone());
            self.notify(|l| l.on_private_message(&msg, &chat));
            return;
        }

        let Some(channel) = self.channel(dest) else {
            return self.ignore(&msg, "PRIVMSG to unknown channel");
        };
        let msg = msg.into_kind(MessageKind::Channel);
        channel.push(msg.clone());
        self.notify(|l| l.on_channel_message(&msg, &channel));
    }

    fn record_outgoing(&mut self, line: &str) {
        let Some(msg) = Message::parse(line) else {
            return;
        };
        if msg.command() != &Command::PRIVMSG {
            return;
        }
        let Some(dest) = msg.param(0).map(str::to_owned) else {
            return;
        };

        let msg = msg.with_sender(self.nickname.clone());
        if dest.is_channel_name() {
            if let Some(channel) = self.channel(&dest) {
                channel.push(msg.into_kind(MessageKind::Channel));
            }
        } else {
            self.open_chat(&dest).push(msg.into_kind(MessageKind::Private));
        }
    }

    fn open_chat(&mut self, peer: &str) -> Arc<PrivateChat> {
        Arc::clone(
            self.private_chats
                .entry(IrcKey::new(peer))
                .or_insert_with(|| Arc::new(PrivateChat::new(peer))),
        )
    }

    fn is_me(&self, nick: &str) -> bool {
        IrcKey::new(&self.nickname).matches(nick)
    }

    fn ignore(&mut self, msg: &Message, reason: &'static str) {
        self.diagnostics.ignored += 1;
        warn!(command = %msg.command(), %reason, line = %msg, "ignoring event");
    }

    fn notify(&self, f: impl Fn(&dyn SessionListener)) {
        for listener in self.listeners.iter() {
            f(listener.as_ref());
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("nickname", &self.nickname)
            .field("connected", &self.connected)
            .field("channels", &self.channels.len())
            .field("private_chats", &self.private_chats.len())
            .field("listeners", &self.listeners.len())
            .field("diagnostics", &self.diagnostics)
            .finish()
    }
}

/// Render a Unix epoch string in local time.
fn format_epoch(raw: &str) -> Option<String> {
    let secs = raw.parse::<i64>().ok()?;
    let utc = DateTime::from_timestamp(secs, 0)?;
    Some(utc.with_timezone(&Local).format(TOPIC_TIME_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Outbox;

    fn session(nick: &str) -> (Session, Arc<Outbox>) {
        let outbox = Arc::new(Outbox::new());
        let session = Session::with_sender(
            SessionConfig::new("irc.example.net", nick),
            outbox.clone(),
        );
        (session, outbox)
    }

    #[test]
    fn test_join_creates_channel() {
        let (mut s, _) = session("bob");
        s.feed_line(":bob!b@host JOIN #rust");
        let chan = s.channel("#RUST").unwrap();
        assert_eq!(chan.name(), "#rust");
        assert_eq!(chan.topic(), None);
    }

    #[test]
    fn test_part_removes_channel() {
        let (mut s, _) = session("bob");
        s.feed_line(":bob!b@host JOIN :#rust");
        s.feed_line(":bob!b@host PART #rust :bye");
        assert!(s.channel("#rust").is_none());
        assert_eq!(s.diagnostics().ignored, 0);
    }

    #[test]
    fn test_ping_answers_pong() {
        let (mut s, outbox) = session("bob");
        s.feed_line("PING :abc123");
        assert_eq!(outbox.drain(), vec!["PONG :abc123"]);
        assert!(s.server_log().is_empty());
    }

    #[test]
    fn test_unknown_channel_is_ignored() {
        let (mut s, _) = session("bob");
        s.feed_line(":srv 332 bob #nowhere :topic");
        s.feed_line(":alice!a@h PRIVMSG #nowhere :hi");
        s.feed_line(":srv 353 bob = #nowhere :alice");
        assert_eq!(s.diagnostics().ignored, 3);
        assert!(s.channels().is_empty());
    }

    #[test]
    fn test_topic_set_text() {
        let (mut s, _) = session("bob");
        s.feed_line(":bob!b@h JOIN #rust");
        s.feed_line(":srv 333 bob #rust alice 0");
        let msg = s.channel("#rust").unwrap().log().last().unwrap();
        let expected = format!("alice - {}", format_epoch("0").unwrap());
        assert_eq!(msg.body(), Some(expected.as_str()));
        assert_eq!(msg.kind(), MessageKind::Channel);
    }

    #[test]
    fn test_topic_set_without_time() {
        let (mut s, _) = session("bob");
        s.feed_line(":bob!b@h JOIN #rust");
        s.feed_line(":srv 333 bob #rust alice");
        let msg = s.channel("#rust").unwrap().log().last().unwrap();
        assert_eq!(msg.body(), Some("alice"));
    }

    #[test]
    fn test_topic_set_without_setter_is_ignored() {
        let (mut s, _) = session("bob");
        s.feed_line(":bob!b@h JOIN #rust");
        s.feed_line(":srv 333 #rust");
        s.feed_line(":srv 333 bob #rust");
        assert!(s.channel("#rust").unwrap().log().is_empty());
        assert_eq!(s.diagnostics().ignored, 2);
    }

    #[test]
    fn test_welcome_confirms_nick() {
        let (mut s, _) = session("bob");
        assert!(!s.is_connected());
        s.feed_line(":srv 001 bob_ :Welcome");
        assert!(s.is_connected());
        assert_eq!(s.nickname(), "bob_");
    }

    #[test]
    fn test_unrecognized_goes_to_server_log() {
        let (mut s, _) = session("bob");
        s.feed_line(":srv CAP * LS :multi-prefix");
        s.feed_line(":srv 372 bob :- motd line");
        assert_eq!(s.server_log().len(), 2);
        assert_eq!(s.diagnostics().unrecognized, 2);
    }

    #[test]
    fn test_format_epoch_rejects_garbage() {
        assert!(format_epoch("soon").is_none());
        assert!(format_epoch("1700000000").is_some());
    }
}
