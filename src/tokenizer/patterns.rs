//! Flat token patterns, one per table entry of the tokenizer.
//!
//! Each pattern only recognizes a prefix of its input; the tokenizer uses the
//! length of the match to build the token.

use nom::branch::alt;
use nom::bytes::complete::{is_not, tag};
use nom::character::complete::{anychar, char, one_of, satisfy};
use nom::combinator::{not, peek, recognize};
use nom::multi::{many0, many1};
use nom::sequence::{pair, preceded, terminated};
use nom::Parser;

use crate::result::ParseResult;

use super::dollar_scriptlet;

pub fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

pub fn is_identifier_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Literal text. Stops before `$` followed by `{` or an identifier start, and
/// before `<%`. `\$` keeps the dollar inside the text.
pub fn text(input: &str) -> ParseResult<&str, &str> {
    recognize(many1(alt((
        is_not("$<\\"),
        recognize(pair(char('\\'), char('$'))),
        recognize(char('\\')),
        recognize(pair(
            char('$'),
            not(satisfy(|c| c == '{' || is_identifier_start(c))),
        )),
        recognize(pair(char('<'), not(char('%')))),
    ))))
    .parse(input)
}

pub fn identifier(input: &str) -> ParseResult<&str, &str> {
    recognize(pair(
        satisfy(is_identifier_start),
        many0(satisfy(is_identifier_continue)),
    ))
    .parse(input)
}

/// The `$` of a dollar reference; only matches when a name follows.
pub fn dollar_reference_dollar(input: &str) -> ParseResult<&str, &str> {
    terminated(tag("$"), peek(satisfy(is_identifier_start))).parse(input)
}

/// `name(.name)*`
pub fn dollar_reference_body(input: &str) -> ParseResult<&str, &str> {
    recognize(pair(identifier, many0(preceded(char('.'), identifier)))).parse(input)
}

pub fn block_scriptlet_open(input: &str) -> ParseResult<&str, &str> {
    terminated(tag("<%"), not(one_of("=@"))).parse(input)
}

pub fn expression_scriptlet_open(input: &str) -> ParseResult<&str, &str> {
    tag("<%=").parse(input)
}

pub fn import_block_open(input: &str) -> ParseResult<&str, &str> {
    tag("<%@").parse(input)
}

pub fn dollar_scriptlet_open(input: &str) -> ParseResult<&str, &str> {
    tag("${").parse(input)
}

/// Everything up to the first unescaped `%>`, or to the end of input.
/// Shared by scriptlets and import blocks.
pub fn scriptlet_body(input: &str) -> ParseResult<&str, &str> {
    recognize(many1(alt((
        is_not("%\\"),
        recognize(pair(char('\\'), anychar)),
        recognize(char('\\')),
        recognize(pair(char('%'), not(char('>')))),
    ))))
    .parse(input)
}

pub fn scriptlet_close(input: &str) -> ParseResult<&str, &str> {
    tag("%>").parse(input)
}

/// Body of a `${ ... }`, which may be empty. Never fails.
pub fn dollar_scriptlet_body(input: &str) -> ParseResult<&str, &str> {
    let len = dollar_scriptlet::scan(input);
    Ok((&input[len..], &input[..len]))
}

pub fn dollar_scriptlet_close(input: &str) -> ParseResult<&str, &str> {
    tag("}").parse(input)
}
