//! IRC numeric replies understood by the session.
//!
//! Servers answer with three-digit numerics. Only the handful the session
//! acts on get their own variant; every other code is kept as
//! [`Reply::Other`] so it can still be logged.
//!
//! # Reference
//! - RFC 2812: Internet Relay Chat: Client Protocol
//! - Modern IRC documentation: <https://modern.ircdocs.horse/>

#![allow(non_camel_case_types)]

use std::fmt;
use std::str::FromStr;

/// IRC server numeric reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reply {
    /// 001 - Welcome to the IRC network; registration finished
    RPL_WELCOME,
    /// 332 - Channel topic
    RPL_TOPIC,
    /// 333 - Who set the topic and when
    RPL_TOPICWHOTIME,
    /// 353 - Channel member list
    RPL_NAMREPLY,
    /// 431 - No nickname given
    ERR_NONICKNAMEGIVEN,
    /// 432 - Erroneous nickname
    ERR_ERRONEUSNICKNAME,
    /// 433 - Nickname is already in use
    ERR_NICKNAMEINUSE,
    /// 436 - Nickname collision (434 from older servers is folded in here)
    ERR_NICKCOLLISION,
    /// Any other three-digit numeric
    Other(u16),
}

impl Reply {
    /// Creates a Reply from a numeric code.
    pub fn from_code(code: u16) -> Reply {
        match code {
            1 => Reply::RPL_WELCOME,
            332 => Reply::RPL_TOPIC,
            333 => Reply::RPL_TOPICWHOTIME,
            353 => Reply::RPL_NAMREPLY,
            431 => Reply::ERR_NONICKNAMEGIVEN,
            432 => Reply::ERR_ERRONEUSNICKNAME,
            433 => Reply::ERR_NICKNAMEINUSE,
            434 | 436 => Reply::ERR_NICKCOLLISION,
            other => Reply::Other(other),
        }
    }

    /// Returns the numeric code.
    #[inline]
    pub fn code(&self) -> u16 {
        match self {
            Reply::RPL_WELCOME => 1,
            Reply::RPL_TOPIC => 332,
            Reply::RPL_TOPICWHOTIME => 333,
            Reply::RPL_NAMREPLY => 353,
            Reply::ERR_NONICKNAMEGIVEN => 431,
            Reply::ERR_ERRONEUSNICKNAME => 432,
            Reply::ERR_NICKNAMEINUSE => 433,
            Reply::ERR_NICKCOLLISION => 436,
            Reply::Other(code) => *code,
        }
    }

    /// Whether this reply rejects the requested nickname.
    #[inline]
    pub fn is_nick_error(&self) -> bool {
        matches!(
            self,
            Reply::ERR_NONICKNAMEGIVEN
                | Reply::ERR_ERRONEUSNICKNAME
                | Reply::ERR_NICKNAMEINUSE
                | Reply::ERR_NICKCOLLISION
        )
    }
}

impl FromStr for Reply {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Reply, &'static str> {
        if s.len() != 3 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err("not a three-digit numeric");
        }
        s.parse::<u16>()
            .map(Reply::from_code)
            .map_err(|_| "not a three-digit numeric")
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_numerics() {
        assert_eq!("001".parse(), Ok(Reply::RPL_WELCOME));
        assert_eq!("353".parse(), Ok(Reply::RPL_NAMREPLY));
        assert_eq!("436".parse(), Ok(Reply::ERR_NICKCOLLISION));
        assert_eq!("372".parse(), Ok(Reply::Other(372)));
    }

    #[test]
    fn test_reject_non_numerics() {
        assert!("PRIVMSG".parse::<Reply>().is_err());
        assert!("01".parse::<Reply>().is_err());
        assert!("1234".parse::<Reply>().is_err());
    }

    #[test]
    fn test_display_pads_code() {
        assert_eq!(Reply::RPL_WELCOME.to_string(), "001");
        assert_eq!(Reply::Other(5).to_string(), "005");
    }

    #[test]
    fn test_classification() {
        assert!(Reply::ERR_NICKNAMEINUSE.is_nick_error());
        assert!(!Reply::RPL_TOPIC.is_nick_error());
        assert!(!Reply::Other(482).is_nick_error());
    }
}
