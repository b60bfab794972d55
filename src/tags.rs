//! Annotation clause tokenizer using nom.
//!
//! Splits one annotation string into an ordered sequence of clauses, each a
//! key with positional arguments:
//!
//! ```text
//! name(uid);len(50);nullable
//! ─┬──────  ─┬─────  ─┬──────
//!  │         │        └── bare clause, no arguments
//!  │         └── key + one argument
//!  └── key + one argument
//! ```
//!
//! Clauses are separated by `;`, arguments by `,`. Order is preserved: the
//! model builder applies clauses in the annotation's own textual order.

use nom::{
    IResult,
    bytes::complete::take_while1,
    character::complete::{char, multispace0},
    combinator::{map, opt},
    multi::{separated_list0, separated_list1},
    sequence::{delimited, pair, preceded, terminated},
};

use crate::error::{DdlError, DdlResult};

/// An ordered list of `(key, arguments)` clauses.
pub type Clauses = Vec<(String, Vec<String>)>;

/// Parse a clause key (identifier).
fn clause_key(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)
}

/// Parse one argument: anything up to the next `,` or `)`.
fn clause_arg(input: &str) -> IResult<&str, String> {
    map(
        take_while1(|c: char| c != ',' && c != ')'),
        |a: &str| a.trim().to_string(),
    )(input)
}

/// Parse a parenthesized argument list. `()` yields no arguments.
fn clause_args(input: &str) -> IResult<&str, Vec<String>> {
    delimited(
        char('('),
        separated_list0(char(','), clause_arg),
        char(')'),
    )(input)
}

/// Parse a single clause: key with optional argument list.
fn clause(input: &str) -> IResult<&str, (String, Vec<String>)> {
    map(
        pair(preceded(multispace0, clause_key), opt(clause_args)),
        |(key, args)| (key.to_string(), args.unwrap_or_default()),
    )(input)
}

fn clauses(input: &str) -> IResult<&str, Clauses> {
    terminated(
        separated_list1(preceded(multispace0, char(';')), clause),
        opt(preceded(multispace0, char(';'))),
    )(input)
}

/// Parse a complete annotation string into ordered clauses.
///
/// An empty (or all-whitespace) annotation yields no clauses.
pub fn parse(input: &str) -> DdlResult<Clauses> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Vec::new());
    }

    match clauses(input) {
        Ok((rest, list)) if rest.trim().is_empty() => Ok(list),
        Ok((rest, _)) => Err(DdlError::Parse(format!(
            "unexpected trailing content: '{rest}'"
        ))),
        Err(e) => Err(DdlError::Parse(format!("tokenize failed: {e:?}"))),
    }
}
