//! Joined channel state.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use crate::casemap::IrcKey;
use crate::message::Message;

use super::log::MessageLog;
use super::{read_lock, write_lock};

/// A channel the local user has joined.
///
/// Topic, members and log each sit behind their own lock, so readers on
/// another thread never wait on unrelated updates. Only the session
/// creates or mutates channels.
#[derive(Debug)]
pub struct Channel {
    name: String,
    topic: RwLock<Option<String>>,
    /// Folded nick to display form.
    members: RwLock<HashMap<IrcKey, String>>,
    log: MessageLog,
}

impl Channel {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            topic: RwLock::new(None),
            members: RwLock::new(HashMap::new()),
            log: MessageLog::new(),
        }
    }

    /// Channel name as first seen in the JOIN.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self) -> IrcKey {
        IrcKey::new(&self.name)
    }

    /// Current topic; `None` until a topic reply arrives.
    pub fn topic(&self) -> Option<String> {
        read_lock(&self.topic).clone()
    }

    /// Snapshot of the member nicknames, in their latest display form.
    pub fn members(&self) -> HashSet<String> {
        read_lock(&self.members).values().cloned().collect()
    }

    /// Whether `nick` is a member, compared case-insensitively.
    pub fn has_member(&self, nick: &str) -> bool {
        read_lock(&self.members).contains_key(&IrcKey::new(nick))
    }

    pub fn member_count(&self) -> usize {
        read_lock(&self.members).len()
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    /// Snapshot of the channel log, oldest first.
    pub fn messages(&self) -> Vec<Message> {
        self.log.snapshot()
    }

    pub(crate) fn set_topic(&self, topic: impl Into<String>) {
        *write_lock(&self.topic) = Some(topic.into());
    }

    /// Returns `false` when the nick was already present. The display
    /// form is refreshed either way.
    pub(crate) fn add_member(&self, nick: &str) -> bool {
        write_lock(&self.members)
            .insert(IrcKey::new(nick), nick.to_owned())
            .is_none()
    }

    /// Returns `false` when the nick was not a member.
    pub(crate) fn remove_member(&self, nick: &str) -> bool {
        write_lock(&self.members)
            .remove(&IrcKey::new(nick))
            .is_some()
    }

    /// Swap `old` for `new`, under a single lock. Returns `false` and
    /// leaves the set alone when `old` was not a member.
    pub(crate) fn rename_member(&self, old: &str, new: &str) -> bool {
        let mut members = write_lock(&self.members);
        if members.remove(&IrcKey::new(old)).is_none() {
            return false;
        }
        members.insert(IrcKey::new(new), new.to_owned());
        true
    }

    pub(crate) fn push(&self, msg: Message) {
        self.log.push(msg);
    }
}
