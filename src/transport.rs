//! Tokio transport: line framing and a connection driver that feeds a
//! [`Session`](crate::state::Session).
//!
//! ```no_run
//! use slirc_session::transport::{intent_channel, outbound_channel, Connection, Intent};
//! use slirc_session::{Session, SessionConfig};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let config = SessionConfig::new("irc.libera.chat", "slirc-bot");
//! let (sender, outbound) = outbound_channel();
//! let mut session = Session::with_sender(config.clone(), sender);
//! let (intent_tx, intents) = intent_channel();
//! intent_tx.send(Intent::new("/join #rust", None))?;
//!
//! let connection = Connection::connect(&config).await?;
//! connection.run(&mut session, outbound, intents).await?;
//! # Ok(())
//! # }
//! ```

mod codec;
mod connection;

pub use self::codec::LineCodec;
pub use self::connection::{intent_channel, outbound_channel, Connection, Intent};
