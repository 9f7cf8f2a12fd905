use crate::error::Expectation;
use crate::parser::{select_token, TokenResult, Tokens};
use crate::token::{DataToken, Spanned, Token};

pub fn integer<'a>(input: Tokens<'a>) -> TokenResult<'a, u32> {
    select_token(Expectation::Integer, |spanned: &'a Spanned<'a>| match spanned.token {
        Token::Data(DataToken::Integer(value)) => Some(value),
        _ => None,
    })(input)
}
