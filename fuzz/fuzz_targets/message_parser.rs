//! Fuzz target for line parsing and intent building
//!
//! Feeds random input to the parser, the intent builder and a live session,
//! none of which may panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use slirc_session::{encode, Message, Session, SessionConfig};
use std::str;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = str::from_utf8(data) else {
        return;
    };
    if input.len() > 8191 {
        return;
    }

    if let Some(msg) = Message::parse(input) {
        let _ = msg.to_string();
    }

    let _ = encode::build(input, Some("#fuzz"));

    let mut session = Session::new(SessionConfig::new("irc.example.net", "fuzzer"));
    session.feed_line(":fuzzer!f@h JOIN #fuzz");
    for line in input.lines() {
        session.feed_line(line);
    }
});
