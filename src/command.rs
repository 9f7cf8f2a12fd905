use nom::branch::alt;
use nom::combinator::{cut, map, opt};
use nom::sequence::{delimited, pair, preceded, tuple};
use nom::Err;

use crate::compiler::CompilerConfig;
use crate::error::Expectation;
use crate::keyword::{note_keyword, prog_chg_keyword};
use crate::literal::integer;
use crate::message::Message;
use crate::parser::{expected, TokenResult, Tokens};
use crate::symbol::{close_parenthesis, comma, minus, open_parenthesis, plus};

/// `PROG_CHG [ '(' program ')' ]` or `NOTE '(' note ',' velocity [ ',' channel ] ')'`.
///
/// The argument list of `PROG_CHG` is only committed to once its closing
/// parenthesis is due, so a following statement that opens with `(` is left
/// alone.
pub fn message<'a>(
    config: &CompilerConfig,
) -> impl FnMut(Tokens<'a>) -> TokenResult<'a, Message> + '_ {
    move |input: Tokens<'a>| {
        let program_change_parser = map(
            preceded(
                prog_chg_keyword,
                opt(delimited(open_parenthesis, integer, cut(close_parenthesis))),
            ),
            |program| Message::program_change(program.unwrap_or(config.default_program)),
        );

        let note_parser = map(
            preceded(
                note_keyword,
                cut(delimited(
                    open_parenthesis,
                    tuple((integer, comma, integer, opt(preceded(comma, integer)))),
                    close_parenthesis,
                )),
            ),
            |(note, _, velocity, channel)| {
                Message::note(note, velocity, channel.unwrap_or(config.default_channel))
            },
        );

        match alt((program_change_parser, note_parser))(input) {
            Err(Err::Error(_)) => expected(input, Expectation::Message),
            result => result,
        }
    }
}

/// `'+' [ NUMBER ]` or `'-' [ NUMBER ]`, a magnitude of 1 when omitted.
pub fn step_suffix<'a>(input: Tokens<'a>) -> TokenResult<'a, i64> {
    let increment_parser = map(preceded(plus, opt(integer)), |step| {
        i64::from(step.unwrap_or(1))
    });
    let decrement_parser = map(preceded(minus, opt(integer)), |step| {
        -i64::from(step.unwrap_or(1))
    });

    alt((increment_parser, decrement_parser))(input)
}

pub fn command<'a>(
    config: &CompilerConfig,
) -> impl FnMut(Tokens<'a>) -> TokenResult<'a, Message> + '_ {
    move |input: Tokens<'a>| {
        let (rest, (base, step)) = pair(message(config), opt(step_suffix))(input)?;

        match step {
            Some(step) => Ok((rest, base.stepped(step))),
            None => Ok((rest, base)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use cool_asserts::assert_matches;
    use nom::Err as NomErr;

    use crate::error::{ErrorKind, ParserError};
    use crate::tokenizer::scan;

    #[test]
    fn program_change_test() {
        let config = CompilerConfig::default();
        let tokens = scan("PROG_CHG(5)");

        assert_matches!(message(&config)(&tokens), Ok((rest, message)) => {
            assert_eq!(message, Message::program_change(5));
            assert!(rest.is_empty());
        });
    }

    #[test]
    fn program_change_default_test() {
        let config = CompilerConfig::default();
        let tokens = scan("PROG_CHG\nWiimote.B");

        assert_matches!(message(&config)(&tokens), Ok((rest, message)) => {
            assert_eq!(message, Message::program_change(1));
            assert_eq!(rest.len(), 3);
        });
    }

    #[test]
    fn program_change_followed_by_chord_test() {
        let config = CompilerConfig::default();
        let tokens = scan("PROG_CHG\n(Wiimote.A + Wiimote.B)");

        assert_matches!(message(&config)(&tokens), Ok((rest, message)) => {
            assert_eq!(message, Message::program_change(1));
            assert_eq!(rest.len(), 9);
        });
    }

    #[test]
    fn program_change_unclosed_test() {
        let config = CompilerConfig::default();
        let tokens = scan("PROG_CHG(5 =");

        assert_matches!(
            message(&config)(&tokens),
            Err(NomErr::Failure(ParserError::Base {
                kind: ErrorKind::Expected(Expectation::Symbol(')')),
                ..
            }))
        );
    }

    #[test]
    fn note_test() {
        let config = CompilerConfig::default();
        let tokens = scan("NOTE(60, 100, 3)");

        assert_matches!(message(&config)(&tokens), Ok((_, message)) => {
            assert_eq!(message, Message::note(60, 100, 3));
        });
    }

    #[test]
    fn note_default_channel_test() {
        let config = CompilerConfig::default().with_default_channel(9);
        let tokens = scan("NOTE(0x3c,100)");

        assert_matches!(message(&config)(&tokens), Ok((_, message)) => {
            assert_eq!(message, Message::note(60, 100, 9));
        });
    }

    #[test]
    fn note_missing_velocity_test() {
        let config = CompilerConfig::default();
        let tokens = scan("NOTE(60)");

        assert_matches!(
            message(&config)(&tokens),
            Err(NomErr::Failure(ParserError::Base {
                kind: ErrorKind::Expected(Expectation::Symbol(',')),
                ..
            }))
        );
    }

    #[test]
    fn not_a_message_test() {
        let config = CompilerConfig::default();
        let tokens = scan("Wiimote.A");

        assert_matches!(
            message(&config)(&tokens),
            Err(NomErr::Error(ParserError::Base {
                location,
                kind: ErrorKind::Expected(Expectation::Message),
                child: None,
            })) => {
                assert_eq!(location.len(), 3);
            }
        );
    }

    #[test]
    fn step_suffix_test() {
        assert_matches!(step_suffix(&scan("+")), Ok((_, 1)));
        assert_matches!(step_suffix(&scan("+3")), Ok((_, 3)));
        assert_matches!(step_suffix(&scan("-")), Ok((_, -1)));
        assert_matches!(step_suffix(&scan("- 5")), Ok((_, -5)));
    }

    #[test]
    fn increment_command_test() {
        let config = CompilerConfig::default();
        let tokens = scan("NOTE(60,100)+");

        assert_matches!(command(&config)(&tokens), Ok((_, message)) => {
            assert_eq!(message, Message::note(60, 100, 0).stepped(1));
        });
    }

    #[test]
    fn decrement_command_test() {
        let config = CompilerConfig::default();
        let tokens = scan("NOTE(60,100)-5");

        assert_matches!(command(&config)(&tokens), Ok((_, message)) => {
            assert_eq!(message, Message::note(60, 100, 0).stepped(-5));
        });
    }

    #[test]
    fn plain_command_test() {
        let config = CompilerConfig::default();
        let tokens = scan("PROG_CHG(2) Wiimote");

        assert_matches!(command(&config)(&tokens), Ok((rest, message)) => {
            assert_eq!(message, Message::program_change(2));
            assert_eq!(rest.len(), 1);
        });
    }
}
