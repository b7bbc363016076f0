use std::fmt;

use super::types::Command;

impl Command {
    /// The wire form of the command token.
    pub fn as_str(&self) -> std::borrow::Cow<'_, str> {
        use std::borrow::Cow;

        Cow::Borrowed(match self {
            Command::Reply(reply) => return Cow::Owned(reply.to_string()),
            Command::ERROR => "ERROR",
            Command::NICK => "NICK",
            Command::QUIT => "QUIT",
            Command::JOIN => "JOIN",
            Command::PART => "PART",
            Command::MODE => "MODE",
            Command::TOPIC => "TOPIC",
            Command::NAMES => "NAMES",
            Command::LIST => "LIST",
            Command::INVITE => "INVITE",
            Command::KICK => "KICK",
            Command::PRIVMSG => "PRIVMSG",
            Command::NOTICE => "NOTICE",
            Command::PING => "PING",
            Command::PONG => "PONG",
            Command::Unknown(verb) => verb,
        })
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str())
    }
}
