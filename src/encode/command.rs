//! Slash-command rewriting.

use crate::chan::ChannelExt;
use crate::error::EncodeError;

/// The slash commands rewritten into protocol verbs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum UserCommand {
    Join,
    Nick,
    Part,
    Mode,
    Topic,
    Kick,
    List,
    Msg,
    Notice,
    Quit,
}

const TABLE: [(&str, UserCommand); 10] = [
    ("join", UserCommand::Join),
    ("nick", UserCommand::Nick),
    ("part", UserCommand::Part),
    ("mode", UserCommand::Mode),
    ("topic", UserCommand::Topic),
    ("kick", UserCommand::Kick),
    ("list", UserCommand::List),
    ("msg", UserCommand::Msg),
    ("notice", UserCommand::Notice),
    ("quit", UserCommand::Quit),
];

impl UserCommand {
    /// Match a command word case-insensitively.
    pub(crate) fn from_word(word: &str) -> Option<UserCommand> {
        TABLE
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(word))
            .map(|&(_, cmd)| cmd)
    }

    pub(crate) fn name(self) -> &'static str {
        TABLE
            .iter()
            .find(|&&(_, cmd)| cmd == self)
            .map(|&(name, _)| name)
            .unwrap_or_default()
    }

    /// Rewrite into a protocol line.
    ///
    /// `target` is the active channel or peer, used when a channel
    /// argument is left out.
    pub(crate) fn rewrite(
        self,
        args: Option<&str>,
        target: Option<&str>,
        quit_reason: &str,
    ) -> Result<String, EncodeError> {
        let missing = EncodeError::MissingArgument {
            command: self.name(),
        };
        let active_channel = target.filter(|t| t.is_channel_name());

        let line = match self {
            UserCommand::Join => format!("JOIN {}", args.ok_or(missing)?),
            UserCommand::Nick => format!("NICK {}", args.ok_or(missing)?),
            UserCommand::Mode => format!("MODE {}", args.ok_or(missing)?),
            UserCommand::List => match args {
                Some(args) => format!("LIST {}", args),
                None => "LIST".to_string(),
            },
            UserCommand::Quit => format!("QUIT :{}", args.unwrap_or(quit_reason)),
            UserCommand::Msg | UserCommand::Notice => {
                let verb = if self == UserCommand::Msg {
                    "PRIVMSG"
                } else {
                    "NOTICE"
                };
                let (dest, text) = split_word(args.ok_or(missing)?);
                format!("{} {} :{}", verb, dest, text.unwrap_or_default())
            }
            UserCommand::Part => {
                let (channel, reason) = channel_first(args, active_channel);
                with_trailing(format!("PART {}", channel.ok_or(missing)?), reason)
            }
            UserCommand::Topic => {
                let (channel, text) = channel_first(args, active_channel);
                with_trailing(format!("TOPIC {}", channel.ok_or(missing)?), text)
            }
            UserCommand::Kick => {
                let (channel, rest) = channel_first(args, active_channel);
                let channel = channel.ok_or_else(|| missing.clone())?;
                let (nick, reason) = split_word(rest.ok_or(missing)?);
                with_trailing(format!("KICK {} {}", channel, nick), reason)
            }
        };

        Ok(line)
    }
}

/// Split at the first whitespace; the tail is `None` when blank.
pub(crate) fn split_word(s: &str) -> (&str, Option<&str>) {
    let s = s.trim_start();
    match s.split_once(char::is_whitespace) {
        Some((head, tail)) => {
            let tail = tail.trim_start();
            (head, (!tail.is_empty()).then_some(tail))
        }
        None => (s, None),
    }
}

/// Take an explicit leading channel, else fall back to the active one.
fn channel_first<'a>(
    args: Option<&'a str>,
    active: Option<&'a str>,
) -> (Option<&'a str>, Option<&'a str>) {
    match args.map(split_word) {
        Some((first, rest)) if first.is_channel_name() => (Some(first), rest),
        _ => (active, args),
    }
}

fn with_trailing(mut line: String, trailing: Option<&str>) -> String {
    if let Some(text) = trailing {
        line.push_str(" :");
        line.push_str(text);
    }
    line
}
