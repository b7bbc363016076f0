//! Append-only message log.

use std::sync::RwLock;

use crate::message::Message;

use super::{read_lock, write_lock};

/// Append-only, lock-guarded list of messages.
///
/// One writer (the session) appends; any number of readers take
/// snapshots from other threads.
#[derive(Debug, Default)]
pub struct MessageLog {
    entries: RwLock<Vec<Message>>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&self, msg: Message) {
        write_lock(&self.entries).push(msg);
    }

    /// Copy of every message, oldest first.
    pub fn snapshot(&self) -> Vec<Message> {
        read_lock(&self.entries).clone()
    }

    /// Copy of the newest `n` messages, oldest first.
    pub fn tail(&self, n: usize) -> Vec<Message> {
        let entries = read_lock(&self.entries);
        entries[entries.len().saturating_sub(n)..].to_vec()
    }

    pub fn last(&self) -> Option<Message> {
        read_lock(&self.entries).last().cloned()
    }

    pub fn len(&self) -> usize {
        read_lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tail_and_last() {
        let log = MessageLog::new();
        assert!(log.is_empty());
        for line in ["PING :a", "PING :b", "PING :c"] {
            log.push(Message::parse(line).unwrap());
        }
        assert_eq!(log.len(), 3);
        let tail = log.tail(2);
        assert_eq!(tail[0].body(), Some("b"));
        assert_eq!(tail[1].body(), Some("c"));
        assert_eq!(log.tail(10).len(), 3);
        assert_eq!(log.last().unwrap().body(), Some("c"));
    }
}
