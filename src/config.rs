//! Session configuration.

use crate::encode::DEFAULT_QUIT_REASON;

/// Default plaintext IRC port.
pub const DEFAULT_PORT: u16 = 6667;

/// Maximum line length accepted from the server, in bytes.
pub const MAX_IRC_LINE_LEN: usize = 8191;

/// Identity and server details for one connection.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    /// Display name for the server; defaults to the host.
    pub server_name: String,
    /// Host to connect to.
    pub host: String,
    pub port: u16,
    /// Desired nickname.
    pub nickname: String,
    /// Username (ident).
    pub username: String,
    /// Real name / GECOS.
    pub realname: String,
    /// Server password, if required.
    pub password: Option<String>,
    /// Reason used by `/quit` without arguments.
    pub quit_message: String,
    pub max_line_len: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            server_name: String::new(),
            host: String::new(),
            port: DEFAULT_PORT,
            nickname: String::new(),
            username: String::new(),
            realname: String::new(),
            password: None,
            quit_message: DEFAULT_QUIT_REASON.to_string(),
            max_line_len: MAX_IRC_LINE_LEN,
        }
    }
}

impl SessionConfig {
    /// Config for `host` using `nickname` for every identity field.
    pub fn new(host: impl Into<String>, nickname: impl Into<String>) -> Self {
        let host = host.into();
        let nickname = nickname.into();
        Self {
            server_name: host.clone(),
            host,
            username: nickname.clone(),
            realname: nickname.clone(),
            nickname,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_server_name(mut self, name: impl Into<String>) -> Self {
        self.server_name = name.into();
        self
    }

    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    #[must_use]
    pub fn with_identity(mut self, username: impl Into<String>, realname: impl Into<String>) -> Self {
        self.username = username.into();
        self.realname = realname.into();
        self
    }

    #[must_use]
    pub fn with_quit_message(mut self, reason: impl Into<String>) -> Self {
        self.quit_message = reason.into();
        self
    }

    /// `host:port`, for connecting.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Lines that register the connection: `PASS` (if set), `NICK`, `USER`.
    pub fn registration_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(3);
        if let Some(pass) = &self.password {
            lines.push(format!("PASS {}", pass));
        }
        lines.push(format!("NICK {}", self.nickname));
        lines.push(format!("USER {} 0 * :{}", self.username, self.realname));
        lines
    }
}
