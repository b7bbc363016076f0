//! Nom-based line tokenizer.
//!
//! The grammar is deliberately loose: the first `" :"` ends the tokenized
//! part of the line, an optional `:origin` comes first, then the command
//! token, then whitespace-separated parameters. Nothing here can fail;
//! missing pieces are reported as absent.

use nom::{
    bytes::complete::{take_till, take_till1},
    character::complete::{char, space0},
    combinator::opt,
    error::{context, VerboseError},
    sequence::preceded,
    IResult,
};

type ParseResult<I, O> = IResult<I, O, VerboseError<I>>;

/// Parse the origin (the part after the leading `:` and before the first space).
fn parse_origin(input: &str) -> ParseResult<&str, &str> {
    context(
        "parsing message origin",
        preceded(char(':'), take_till(|c: char| c == ' ')),
    )(input)
}

/// Parse one whitespace-delimited token.
fn parse_token(input: &str) -> ParseResult<&str, &str> {
    context(
        "parsing command",
        preceded(space0, take_till1(|c: char| c.is_ascii_whitespace())),
    )(input)
}

/// The pieces of one line, borrowed from the input.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawLine<'a> {
    /// Origin without the leading `:`.
    pub origin: Option<&'a str>,
    /// The command token, absent on a line holding only an origin.
    pub command: Option<&'a str>,
    /// Parameters before the trailing body.
    pub params: Vec<&'a str>,
    /// Text after the first `" :"`.
    pub body: Option<&'a str>,
}

/// Split a line (without CR/LF) into its pieces.
pub(crate) fn tokenize(line: &str) -> RawLine<'_> {
    let (head, body) = match line.find(" :") {
        Some(pos) => (&line[..pos], Some(&line[pos + 2..])),
        None => (line, None),
    };

    let (rest, origin) = opt(parse_origin)(head).unwrap_or((head, None));
    let (rest, command) = opt(parse_token)(rest).unwrap_or((rest, None));

    RawLine {
        origin,
        command,
        params: rest.split_whitespace().collect(),
        body,
    }
}
