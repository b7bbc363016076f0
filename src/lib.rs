//! # slirc-session
//!
//! Client-side IRC session engine: turns raw server lines into structured
//! messages, keeps channel, user and private-chat state consistent as they
//! arrive, and turns typed user intent back into protocol lines.
//!
//! ## Features
//!
//! - Tolerant line parser that never fails on short or odd input
//! - Outbound builder for `/join`, `/msg`, `/quit` and friends
//! - Sans-IO [`Session`] state machine with listener callbacks
//! - Case-insensitive nickname and channel handling (RFC 1459 case mapping)
//! - Optional Tokio transport that drives a session over TCP

#![deny(clippy::all)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! ## Quick Start
//!
//! ### Parsing lines
//!
//! ```rust
//! use slirc_session::{Command, Message};
//!
//! let msg = Message::parse(":nick!user@host PRIVMSG #chan :hello world").unwrap();
//! assert_eq!(msg.command(), &Command::PRIVMSG);
//! assert_eq!(msg.sender(), Some("nick"));
//! assert_eq!(msg.body(), Some("hello world"));
//! ```
//!
//! ### Building lines
//!
//! ```rust
//! use slirc_session::encode::build;
//!
//! assert_eq!(build("/join #test", None).unwrap(), "JOIN #test");
//! assert_eq!(build("/msg alice hi", None).unwrap(), "PRIVMSG alice :hi");
//! ```
//!
//! ### Tracking state
//!
//! ```rust
//! use slirc_session::{Session, SessionConfig};
//!
//! let mut session = Session::new(SessionConfig::new("irc.example.net", "bob"));
//! session.feed_line(":bob!b@host JOIN #rust");
//! session.feed_line(":irc.example.net 353 bob = #rust :bob @alice +carol");
//! assert_eq!(session.channel("#rust").unwrap().member_count(), 3);
//! ```

pub mod casemap;
pub mod chan;
pub mod command;
pub mod config;
pub mod encode;
pub mod error;
pub mod message;
pub mod response;
pub mod state;

#[cfg(feature = "tokio")]
pub mod transport;

pub use self::casemap::{irc_eq, irc_to_lower, IrcKey};
pub use self::chan::ChannelExt;
pub use self::command::Command;
pub use self::config::{SessionConfig, MAX_IRC_LINE_LEN};
pub use self::error::{EncodeError, ProtocolError};
pub use self::message::{Message, MessageKind};
pub use self::response::Reply;
pub use self::state::{
    Channel, Diagnostics, MessageLog, Outbox, PrivateChat, RawSender, Session, SessionListener,
};

#[cfg(feature = "tokio")]
pub use self::transport::{Connection, LineCodec};
