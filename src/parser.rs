use nom::{Err, IResult};

use crate::error::{ErrorKind, Expectation, ParserError};
use crate::token::Spanned;

/// Grammar input: the scanned tokens that are still to be consumed.
pub type Tokens<'a> = &'a [Spanned<'a>];

pub type TokenResult<'a, O> = IResult<Tokens<'a>, O, ParserError<Tokens<'a>>>;

pub fn expected<'a, O>(input: Tokens<'a>, expectation: Expectation) -> TokenResult<'a, O> {
    Err(Err::Error(ParserError::Base {
        location: input,
        kind: ErrorKind::Expected(expectation),
        child: None,
    }))
}

/// Consumes one token if `select` accepts it.
pub fn select_token<'a, O, F>(
    expectation: Expectation,
    select: F,
) -> impl FnMut(Tokens<'a>) -> TokenResult<'a, O>
where
    F: Fn(&'a Spanned<'a>) -> Option<O>,
{
    move |input| match input.split_first() {
        Some((spanned, rest)) => match select(spanned) {
            Some(output) => Ok((rest, output)),
            None => expected(input, expectation),
        },
        None => expected(input, expectation),
    }
}
