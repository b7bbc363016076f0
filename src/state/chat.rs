//! Private conversations.

use std::sync::RwLock;

use crate::casemap::IrcKey;
use crate::message::Message;

use super::log::MessageLog;
use super::{read_lock, write_lock};

/// A one-to-one conversation with a peer.
///
/// Identity is the case-folded peer nickname; the display form follows
/// the peer's latest NICK.
#[derive(Debug)]
pub struct PrivateChat {
    peer: RwLock<String>,
    log: MessageLog,
}

impl PrivateChat {
    pub(crate) fn new(peer: impl Into<String>) -> Self {
        Self {
            peer: RwLock::new(peer.into()),
            log: MessageLog::new(),
        }
    }

    /// The peer's nickname.
    pub fn peer(&self) -> String {
        read_lock(&self.peer).clone()
    }

    pub fn key(&self) -> IrcKey {
        IrcKey::new(&read_lock(&self.peer))
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    pub fn messages(&self) -> Vec<Message> {
        self.log.snapshot()
    }

    pub(crate) fn set_peer(&self, nick: &str) {
        *write_lock(&self.peer) = nick.to_owned();
    }

    pub(crate) fn push(&self, msg: Message) {
        self.log.push(msg);
    }
}
