//! Sans-IO session state for one IRC connection.
//!
//! [`Session`] consumes parsed messages and keeps channels, private chats,
//! the local nickname and a server log consistent with them. It does no
//! I/O of its own: replies such as PONG go out through a [`RawSender`],
//! and consumers observe changes through [`SessionListener`] callbacks.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use slirc_session::state::{Outbox, Session};
//! use slirc_session::SessionConfig;
//!
//! let outbox = Arc::new(Outbox::new());
//! let mut session = Session::with_sender(
//!     SessionConfig::new("irc.example.net", "bob"),
//!     outbox.clone(),
//! );
//!
//! session.feed_line(":bob!bob@host JOIN #rust");
//! session.feed_line(":alice!a@host PRIVMSG #rust :hello world");
//! session.feed_line("PING :abc123");
//!
//! let channel = session.channel("#rust").unwrap();
//! assert_eq!(channel.messages()[0].body(), Some("hello world"));
//! assert_eq!(outbox.drain(), vec!["PONG :abc123"]);
//! ```

mod channel;
mod chat;
mod listener;
mod log;
mod tracker;

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub use self::channel::Channel;
pub use self::chat::PrivateChat;
pub use self::listener::{NullSender, Outbox, RawSender, SessionListener};
pub use self::log::MessageLog;
pub use self::tracker::Session;

/// Counters for events the session processed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostics {
    /// Messages passed to [`Session::apply`].
    pub applied: u64,
    /// Events dropped because they referenced untracked state or were
    /// missing required parameters.
    pub ignored: u64,
    /// Messages whose command was not in the known table.
    pub unrecognized: u64,
}

// Every write under these locks is a single insert, remove or push, so a
// poisoned lock still guards consistent data.
pub(crate) fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
