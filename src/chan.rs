//! Channel-name detection.

/// Sigils that open a channel name on common networks.
pub const CHANNEL_PREFIXES: [char; 4] = ['#', '&', '+', '!'];

/// Extension for telling channel targets apart from nicknames.
pub trait ChannelExt {
    /// Whether this target names a channel rather than a user.
    fn is_channel_name(&self) -> bool;
}

impl ChannelExt for str {
    fn is_channel_name(&self) -> bool {
        self.len() > 1 && self.starts_with(CHANNEL_PREFIXES)
    }
}

impl ChannelExt for String {
    fn is_channel_name(&self) -> bool {
        self.as_str().is_channel_name()
    }
}
