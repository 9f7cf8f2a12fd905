use crate::error::Expectation;
use crate::parser::{select_token, TokenResult, Tokens};
use crate::token::{Spanned, SymbolToken, Token};

macro_rules! implement_symbol_parser {
    ($symbol_name:ident, $symbol_token:ident, $symbol:literal) => {
        pub fn $symbol_name<'a>(input: Tokens<'a>) -> TokenResult<'a, &'a Spanned<'a>> {
            select_token(Expectation::Symbol($symbol), |spanned: &'a Spanned<'a>| {
                match spanned.token {
                    Token::Symbol(SymbolToken::$symbol_token) => Some(spanned),
                    _ => None,
                }
            })(input)
        }

        #[cfg(test)]
        mod $symbol_name {
            use super::*;

            use cool_asserts::assert_matches;
            use nom::Err as NomErr;

            use crate::error::{ErrorKind, ParserError};
            use crate::tokenizer::scan;

            #[test]
            fn $symbol_name() {
                let tokens = scan(concat!($symbol, " Wiimote"));

                assert_matches!(super::$symbol_name(&tokens), Ok((rest, spanned)) => {
                    assert_eq!(spanned.lexeme, concat!($symbol));
                    assert_eq!(rest.len(), 1);
                });
            }

            mod unexpected_token {
                use super::*;

                #[test]
                fn $symbol_name() {
                    let tokens = scan("Wiimote");

                    assert_matches!(
                        super::super::$symbol_name(&tokens),
                        Err(NomErr::Error(ParserError::Base {
                            location,
                            kind: ErrorKind::Expected(Expectation::Symbol($symbol)),
                            child: None,
                        })) => {
                            assert_eq!(location.len(), 1);
                        }
                    );
                }
            }

            mod empty {
                use super::*;

                #[test]
                fn $symbol_name() {
                    let tokens = scan("");

                    assert_matches!(
                        super::super::$symbol_name(&tokens),
                        Err(NomErr::Error(ParserError::Base {
                            kind: ErrorKind::Expected(Expectation::Symbol($symbol)),
                            child: None,
                            ..
                        }))
                    );
                }
            }
        }
    };
}

implement_symbol_parser!(dot, Dot, '.');
implement_symbol_parser!(comma, Comma, ',');
implement_symbol_parser!(equal_sign, EqualSign, '=');
implement_symbol_parser!(open_parenthesis, OpenParenthesis, '(');
implement_symbol_parser!(close_parenthesis, CloseParenthesis, ')');
implement_symbol_parser!(plus, Plus, '+');
implement_symbol_parser!(minus, Minus, '-');
