//! IRC case-mapping functions.
//!
//! IRC uses a special case-insensitive comparison where some characters
//! are considered equivalent (e.g., `[` and `{`). This implements the
//! `rfc1459` case mapping which is the most common.
//!
//! Nicknames and channel names are compared through [`IrcKey`], which
//! holds the folded form and is used for every map lookup in the session.

use std::borrow::Borrow;
use std::fmt;

#[inline]
fn fold(c: char) -> char {
    match c {
        '[' => '{',
        ']' => '}',
        '\\' => '|',
        '~' => '^',
        'A'..='Z' => c.to_ascii_lowercase(),
        _ => c,
    }
}

/// Convert a string to IRC lowercase using RFC 1459 case mapping.
///
/// In addition to ASCII lowercase conversion, this maps:
/// - `[` → `{`
/// - `]` → `}`
/// - `\` → `|`
/// - `~` → `^`
pub fn irc_to_lower(s: &str) -> String {
    s.chars().map(fold).collect()
}

/// Compare two strings using IRC case-insensitive comparison.
pub fn irc_eq(a: &str, b: &str) -> bool {
    a.len() == b.len() && a.chars().map(fold).eq(b.chars().map(fold))
}

/// A case-folded nickname or channel name used as a map key.
///
/// Two names that differ only by RFC 1459 case produce equal keys.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IrcKey(String);

impl IrcKey {
    /// Fold `name` into a key.
    pub fn new(name: &str) -> Self {
        Self(irc_to_lower(name))
    }

    /// The folded form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `name` folds to this key.
    pub fn matches(&self, name: &str) -> bool {
        irc_eq(&self.0, name)
    }
}

impl From<&str> for IrcKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl Borrow<str> for IrcKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IrcKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_irc_to_lower() {
        assert_eq!(irc_to_lower("Nick[Away]"), "nick{away}");
        assert_eq!(irc_to_lower("a\\b~c"), "a|b^c");
    }

    #[test]
    fn test_irc_eq() {
        assert!(irc_eq("FooBar", "foobar"));
        assert!(irc_eq("nick[1]", "NICK{1}"));
        assert!(!irc_eq("nick", "nick_"));
    }

    #[test]
    fn test_key_lookup_is_case_insensitive() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(IrcKey::new("Alice"), 1);
        assert_eq!(map.get(&IrcKey::new("ALICE")), Some(&1));
        assert_eq!(map.get("alice"), Some(&1));
        assert!(IrcKey::new("alice").matches("AlIcE"));
    }
}
