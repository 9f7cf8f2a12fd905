use nom::Err;

use crate::binding::Transition;
use crate::button::Device;
use crate::error::{ErrorKind, Expectation, ParserError};
use crate::parser::{expected, select_token, TokenResult, Tokens};
use crate::token::{AxisToken, KeywordToken, Spanned, Token};

/// Maps a scanned word to its token, `None` for words the language does not know.
pub fn classify_word(word: &str) -> Option<Token> {
    match word {
        "Wiimote" => Some(Token::Device(Device::Wiimote)),
        "Nunchuk" => Some(Token::Device(Device::Nunchuk)),
        "Press" => Some(Token::Event(Transition::Press)),
        "Release" => Some(Token::Event(Transition::Release)),
        "Roll" => Some(AxisToken::Roll.into()),
        "Pitch" => Some(AxisToken::Pitch.into()),
        "Acc" => Some(AxisToken::Acc.into()),
        "NOTE" => Some(KeywordToken::Note.into()),
        "PROG_CHG" => Some(KeywordToken::ProgChg.into()),
        word => [Device::Wiimote, Device::Nunchuk]
            .iter()
            .find_map(|device| {
                device
                    .button_names()
                    .iter()
                    .find(|name| **name == word)
                    .map(|name| Token::Button(*device, *name))
            }),
    }
}

macro_rules! implement_keyword_parser {
    ($keyword_name:ident, $keyword:ident, $text:expr) => {
        pub fn $keyword_name<'a>(input: Tokens<'a>) -> TokenResult<'a, &'a Spanned<'a>> {
            select_token(Expectation::Keyword($text), |spanned: &'a Spanned<'a>| {
                match spanned.token {
                    Token::Keyword(KeywordToken::$keyword) => Some(spanned),
                    _ => None,
                }
            })(input)
        }
    };
}

implement_keyword_parser!(note_keyword, Note, "NOTE");
implement_keyword_parser!(prog_chg_keyword, ProgChg, "PROG_CHG");

pub fn device<'a>(input: Tokens<'a>) -> TokenResult<'a, Device> {
    select_token(Expectation::Device, |spanned: &'a Spanned<'a>| match spanned.token {
        Token::Device(device) => Some(device),
        _ => None,
    })(input)
}

pub fn event<'a>(input: Tokens<'a>) -> TokenResult<'a, Transition> {
    select_token(Expectation::Event, |spanned: &'a Spanned<'a>| match spanned.token {
        Token::Event(transition) => Some(transition),
        _ => None,
    })(input)
}

/// A button name of `device`. Wiimote buttons `1` and `2` scan as integers
/// and are matched by their text.
pub fn button_name<'a>(device: Device) -> impl FnMut(Tokens<'a>) -> TokenResult<'a, &'a str> {
    move |input| match input.split_first() {
        Some((spanned, rest)) => match spanned.token {
            Token::Button(family, name) if family == device => Ok((rest, name)),
            Token::Data(_) if device.button_names().iter().any(|name| *name == spanned.lexeme) => {
                Ok((rest, spanned.lexeme))
            }
            Token::Axis(axis) => Err(Err::Failure(ParserError::Base {
                location: input,
                kind: ErrorKind::UnsupportedAxisEvent(axis),
                child: None,
            })),
            _ => expected(input, Expectation::Button(device)),
        },
        None => expected(input, Expectation::Button(device)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use cool_asserts::assert_matches;
    use nom::Err as NomErr;

    use crate::tokenizer::scan;

    #[test]
    fn classify_word_test() {
        assert_eq!(classify_word("Wiimote"), Some(Token::Device(Device::Wiimote)));
        assert_eq!(classify_word("Home"), Some(Token::Button(Device::Wiimote, "Home")));
        assert_eq!(classify_word("Z"), Some(Token::Button(Device::Nunchuk, "Z")));
        assert_eq!(classify_word("Acc"), Some(Token::Axis(AxisToken::Acc)));
        assert_eq!(classify_word("note"), None);
        assert_eq!(classify_word("Trigger"), None);
    }

    #[test]
    fn note_keyword_test() {
        let tokens = scan("NOTE(");

        assert_matches!(note_keyword(&tokens), Ok((rest, spanned)) => {
            assert_eq!(spanned.lexeme, "NOTE");
            assert_eq!(rest.len(), 1);
        });
    }

    #[test]
    fn wrong_keyword_test() {
        let tokens = scan("PROG_CHG");

        assert_matches!(
            note_keyword(&tokens),
            Err(NomErr::Error(ParserError::Base {
                kind: ErrorKind::Expected(Expectation::Keyword("NOTE")),
                child: None,
                ..
            }))
        );
    }

    #[test]
    fn device_test() {
        let tokens = scan("Nunchuk.C");

        assert_matches!(device(&tokens), Ok((_, Device::Nunchuk)));
    }

    #[test]
    fn event_test() {
        let tokens = scan("Release =");

        assert_matches!(event(&tokens), Ok((_, Transition::Release)));
    }

    #[test]
    fn button_name_test() {
        let tokens = scan("Left");

        assert_matches!(button_name(Device::Wiimote)(&tokens), Ok((_, "Left")));
    }

    #[test]
    fn numeric_button_name_test() {
        let tokens = scan("2");

        assert_matches!(button_name(Device::Wiimote)(&tokens), Ok((_, "2")));
    }

    #[test]
    fn numeric_button_name_out_of_set_test() {
        let tokens = scan("3");

        assert_matches!(
            button_name(Device::Wiimote)(&tokens),
            Err(NomErr::Error(ParserError::Base {
                kind: ErrorKind::Expected(Expectation::Button(Device::Wiimote)),
                ..
            }))
        );
    }

    #[test]
    fn other_family_button_name_test() {
        let tokens = scan("A");

        assert_matches!(
            button_name(Device::Nunchuk)(&tokens),
            Err(NomErr::Error(ParserError::Base {
                kind: ErrorKind::Expected(Expectation::Button(Device::Nunchuk)),
                ..
            }))
        );
    }

    #[test]
    fn axis_event_test() {
        let tokens = scan("Roll");

        assert_matches!(
            button_name(Device::Wiimote)(&tokens),
            Err(NomErr::Failure(ParserError::Base {
                kind: ErrorKind::UnsupportedAxisEvent(AxisToken::Roll),
                ..
            }))
        );
    }
}
