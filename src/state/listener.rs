//! Consumer-facing notification and outbound interfaces.

use std::sync::{Arc, Mutex};

use tracing::trace;

use crate::message::Message;

use super::channel::Channel;
use super::chat::PrivateChat;

/// Receives session events.
///
/// Every method has an empty default, so implementors only override what
/// they need. Listeners are called on the thread applying events, in
/// registration order, after the session has updated its state.
#[allow(unused_variables)]
pub trait SessionListener: Send + Sync {
    /// Registration completed (numeric 001).
    fn on_connected(&self) {}

    fn on_channel_message(&self, msg: &Message, channel: &Arc<Channel>) {}

    fn on_private_message(&self, msg: &Message, chat: &Arc<PrivateChat>) {}

    /// The local user joined `channel`.
    fn on_channel_joined(&self, channel: &Arc<Channel>) {}

    /// The local user left the channel named `channel`; it is no longer
    /// tracked by the session.
    fn on_channel_left(&self, channel: &str) {}

    /// The server refused the nickname (431-434, 436).
    fn on_nick_error(&self, msg: &Message) {}

    /// The server sent ERROR.
    fn on_server_error(&self, msg: &Message) {}

    fn on_user_renamed(&self, channel: &Arc<Channel>, old_nick: &str, new_nick: &str) {}

    fn on_user_entered(&self, nick: &str, channel: &Arc<Channel>) {}

    /// Called once per channel the quitting user was in; the sender of
    /// `msg` is the user.
    fn on_user_quit(&self, msg: &Message) {}

    fn on_user_left(&self, nick: &str, channel: &Arc<Channel>) {}

    /// A NOTICE arrived on the server named `server`.
    fn on_notice(&self, msg: &Message, server: &str) {}

    /// Anything the session keeps in the server log without a dedicated
    /// callback, including unrecognized commands.
    fn on_server_message(&self, msg: &Message) {}
}

/// Hands protocol lines to the transport.
///
/// Implementations add the line terminator and flush.
pub trait RawSender: Send + Sync {
    fn send_raw(&self, line: String);
}

/// Discards every line.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSender;

impl RawSender for NullSender {
    fn send_raw(&self, line: String) {
        trace!(%line, "dropping outbound line, no transport attached");
    }
}

/// Buffers outbound lines for the caller to drain.
///
/// Useful when driving the session without a socket, and in tests.
#[derive(Debug, Default)]
pub struct Outbox {
    lines: Mutex<Vec<String>>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every buffered line, oldest first.
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock().unwrap_or_else(|e| e.into_inner()))
    }
}

impl RawSender for Outbox {
    fn send_raw(&self, line: String) {
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(line);
    }
}

#[cfg(feature = "tokio")]
impl RawSender for tokio::sync::mpsc::UnboundedSender<String> {
    fn send_raw(&self, line: String) {
        if self.send(line).is_err() {
            tracing::warn!("transport writer closed, outbound line dropped");
        }
    }
}

impl<T: RawSender + ?Sized> RawSender for Arc<T> {
    fn send_raw(&self, line: String) {
        (**self).send_raw(line);
    }
}
