//! Outbound line building.
//!
//! Turns what the user typed into one protocol line. Text that does not
//! start with [`COMMAND_PREFIX`] is a message to the active channel or
//! peer; `/`-commands from a small fixed set are rewritten into their
//! protocol verbs; any other `/`-command is sent through as a raw line.
//!
//! # Example
//!
//! ```
//! use slirc_session::encode::build;
//!
//! assert_eq!(build("/join #test", None).unwrap(), "JOIN #test");
//! assert_eq!(build("/quit", None).unwrap(), "QUIT :leaving");
//! assert_eq!(build("hi there", Some("#rust")).unwrap(), "PRIVMSG #rust :hi there");
//! ```

mod command;

use crate::error::EncodeError;

use self::command::{split_word, UserCommand};

/// Marks intent text as a command rather than chat.
pub const COMMAND_PREFIX: char = '/';

/// Reason sent with `/quit` when none is given.
pub const DEFAULT_QUIT_REASON: &str = "leaving";

/// Build a protocol line from intent text.
///
/// `target` is the active channel or peer. It receives plain text, and
/// stands in for the channel argument of `/part`, `/topic` and `/kick`.
pub fn build(intent: &str, target: Option<&str>) -> Result<String, EncodeError> {
    build_with_quit_reason(intent, target, DEFAULT_QUIT_REASON)
}

/// Like [`build`], with a custom default `/quit` reason.
pub fn build_with_quit_reason(
    intent: &str,
    target: Option<&str>,
    quit_reason: &str,
) -> Result<String, EncodeError> {
    if intent.is_empty() {
        return Err(EncodeError::EmptyIntent);
    }

    let Some(rest) = intent.strip_prefix(COMMAND_PREFIX) else {
        let dest = target.ok_or(EncodeError::NoTarget)?;
        return Ok(format!("PRIVMSG {} :{}", dest, intent));
    };

    if rest.trim().is_empty() {
        return Err(EncodeError::EmptyIntent);
    }

    let (word, args) = split_word(rest);
    match UserCommand::from_word(word) {
        Some(cmd) => cmd.rewrite(args, target, quit_reason),
        None => Ok(rest.to_string()),
    }
}
