//! IRC command resolution and serialization.

mod serialize;
mod types;

pub use self::types::Command;
