//! IRC command types.
//!
//! Every inbound line resolves to exactly one [`Command`]. Verbs the
//! session does not know are kept as [`Command::Unknown`] rather than
//! rejected, so they can still reach the listener's log path.
//!
//! # Reference
//! - RFC 2812: Internet Relay Chat: Client Protocol

use crate::response::Reply;

/// The resolved command of a protocol line.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Three-digit numeric reply.
    Reply(Reply),
    /// `ERROR message`
    ERROR,
    /// `NICK nickname`
    NICK,
    /// `QUIT [message]`
    QUIT,
    /// `JOIN channel`
    JOIN,
    /// `PART channel [message]`
    PART,
    /// `MODE target modes`
    MODE,
    /// `TOPIC channel [topic]`
    TOPIC,
    /// `NAMES [channels]`
    NAMES,
    /// `LIST [channels]`
    LIST,
    /// `INVITE nickname channel`
    INVITE,
    /// `KICK channel user [comment]`
    KICK,
    /// `PRIVMSG target text`
    PRIVMSG,
    /// `NOTICE target text`
    NOTICE,
    /// `PING token`
    PING,
    /// `PONG token`
    PONG,
    /// A verb outside the table above, kept verbatim.
    Unknown(String),
}

impl Command {
    /// Resolve a command token.
    ///
    /// Verbs match case-insensitively; three-digit tokens become replies.
    /// Never fails: anything unrecognized becomes [`Command::Unknown`].
    pub fn from_token(token: &str) -> Command {
        if let Ok(reply) = token.parse::<Reply>() {
            return Command::Reply(reply);
        }

        match token.to_ascii_uppercase().as_str() {
            "ERROR" => Command::ERROR,
            "NICK" => Command::NICK,
            "QUIT" => Command::QUIT,
            "JOIN" => Command::JOIN,
            "PART" => Command::PART,
            "MODE" => Command::MODE,
            "TOPIC" => Command::TOPIC,
            "NAMES" => Command::NAMES,
            "LIST" => Command::LIST,
            "INVITE" => Command::INVITE,
            "KICK" => Command::KICK,
            "PRIVMSG" => Command::PRIVMSG,
            "NOTICE" => Command::NOTICE,
            "PING" => Command::PING,
            "PONG" => Command::PONG,
            _ => Command::Unknown(token.to_owned()),
        }
    }

    /// Whether the token was outside the known table.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Command::Unknown(_) | Command::Reply(Reply::Other(_)))
    }
}

impl From<Reply> for Command {
    fn from(reply: Reply) -> Self {
        Command::Reply(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbs_are_case_insensitive() {
        assert_eq!(Command::from_token("privmsg"), Command::PRIVMSG);
        assert_eq!(Command::from_token("Join"), Command::JOIN);
    }

    #[test]
    fn test_numerics_become_replies() {
        assert_eq!(Command::from_token("001"), Command::Reply(Reply::RPL_WELCOME));
        assert_eq!(Command::from_token("372"), Command::Reply(Reply::Other(372)));
    }

    #[test]
    fn test_unknown_is_kept_verbatim() {
        let cmd = Command::from_token("CAP");
        assert_eq!(cmd, Command::Unknown("CAP".to_string()));
        assert!(cmd.is_unknown());
        assert!(!Command::PING.is_unknown());
    }

    #[test]
    fn test_verbs_are_not_prefix_matched() {
        assert_eq!(
            Command::from_token("JOINED"),
            Command::Unknown("JOINED".to_string())
        );
    }
}
