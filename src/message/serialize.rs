use std::fmt::{self, Write};

use super::types::Message;

/// Renders `[:sender ]COMMAND[ params][ :body]`.
///
/// The sender is written as a bare nickname; the user and host parts of
/// the original origin are not retained.
impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(sender) = self.sender() {
            f.write_char(':')?;
            f.write_str(sender)?;
            f.write_char(' ')?;
        }

        f.write_str(&self.command().as_str())?;

        for param in self.params() {
            f.write_char(' ')?;
            f.write_str(param)?;
        }

        if let Some(body) = self.body() {
            f.write_str(" :")?;
            f.write_str(body)?;
        }

        Ok(())
    }
}
