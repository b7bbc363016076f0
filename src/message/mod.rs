//! Protocol messages and the inbound line parser.

mod nom_parser;
mod serialize;
mod types;

pub use self::types::{Message, MessageKind};
