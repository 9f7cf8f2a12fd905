use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{
    alpha1, alphanumeric1, char, digit1, hex_digit1, line_ending, not_line_ending, space1,
};
use nom::combinator::{map, recognize, value};
use nom::multi::many0_count;
use nom::sequence::{pair, preceded};
use nom::IResult;
use parse_int::parse;
use std::error::Error;
use std::fmt::{Display, Formatter};
use tracing::trace;

use crate::keyword::classify_word;
use crate::token::{DataToken, Position, Spanned, SymbolToken, Token};

#[derive(Debug, PartialEq, Clone)]
pub enum TokenizerError {
    UnexpectedCharacter(char, Position),
    UnknownWord(String, Position),
    IntegerOutOfRange(String, Position),
}

impl TokenizerError {
    pub fn position(&self) -> Position {
        match self {
            TokenizerError::UnexpectedCharacter(_, position)
            | TokenizerError::UnknownWord(_, position)
            | TokenizerError::IntegerOutOfRange(_, position) => *position,
        }
    }

    pub fn lexeme(&self) -> String {
        match self {
            TokenizerError::UnexpectedCharacter(character, _) => character.to_string(),
            TokenizerError::UnknownWord(word, _) => word.clone(),
            TokenizerError::IntegerOutOfRange(literal, _) => literal.clone(),
        }
    }
}

impl Display for TokenizerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenizerError::UnexpectedCharacter(character, position) => {
                write!(f, "unexpected character {:?} at {}", character, position)
            }
            TokenizerError::UnknownWord(word, position) => {
                write!(f, "unknown word {:?} at {}", word, position)
            }
            TokenizerError::IntegerOutOfRange(literal, position) => {
                write!(f, "integer {} out of range at {}", literal, position)
            }
        }
    }
}

impl Error for TokenizerError {}

enum Lexeme<'a> {
    Skip,
    Newline,
    Word(&'a str),
    Integer(&'a str),
    Symbol(SymbolToken),
}

/// Lazily turns source text into tokens.
///
/// Whitespace, `#` comments and newlines produce no tokens. A character that
/// starts no token is reported and skipped on its own, after which scanning
/// resumes. An unknown identifier is reported once and skipped as a whole
/// word rather than one character at a time.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    text: &'a str,
    rest: &'a str,
    position: Position,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            rest: text,
            position: Position::default(),
        }
    }

    /// Position right after the last consumed character.
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn restart(&mut self) {
        self.rest = self.text;
        self.position = Position::default();
    }

    fn advance(&mut self, rest: &'a str, consumed: &str) {
        self.rest = rest;
        self.position.column += consumed.chars().count();
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Spanned<'a>, TokenizerError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.rest.is_empty() {
                return None;
            }

            let position = self.position;

            let (rest, lexeme) = match lexeme(self.rest) {
                Ok(result) => result,
                Err(_) => {
                    let mut chars = self.rest.chars();
                    let character = chars.next()?;
                    let rest = chars.as_str();
                    let consumed = &self.rest[..self.rest.len() - rest.len()];

                    self.advance(rest, consumed);

                    return Some(Err(TokenizerError::UnexpectedCharacter(
                        character, position,
                    )));
                }
            };

            let text = &self.rest[..self.rest.len() - rest.len()];

            let token = match lexeme {
                Lexeme::Skip => {
                    self.advance(rest, text);
                    continue;
                }
                Lexeme::Newline => {
                    self.rest = rest;
                    self.position = Position::new(position.line + 1, 1);
                    continue;
                }
                Lexeme::Word(word) => classify_word(word)
                    .ok_or_else(|| TokenizerError::UnknownWord(word.to_string(), position)),
                Lexeme::Integer(literal) => parse::<u32>(literal)
                    .map(|value| DataToken::Integer(value).into())
                    .map_err(|_| TokenizerError::IntegerOutOfRange(literal.to_string(), position)),
                Lexeme::Symbol(symbol) => Ok(symbol.into()),
            };

            self.advance(rest, text);

            let token = token.map(|token| Spanned {
                token,
                lexeme: text,
                position,
            });

            if let Ok(ref spanned) = token {
                trace!(token = ?spanned.token, %position, "scanned token");
            }

            return Some(token);
        }
    }
}

fn lexeme(text: &str) -> IResult<&str, Lexeme<'_>> {
    alt((skip, newline, word, integer, symbol))(text)
}

fn skip(text: &str) -> IResult<&str, Lexeme<'_>> {
    map(alt((space1, preceded(char('#'), not_line_ending))), |_| {
        Lexeme::Skip
    })(text)
}

fn newline(text: &str) -> IResult<&str, Lexeme<'_>> {
    map(alt((line_ending, tag("\r"))), |_| Lexeme::Newline)(text)
}

fn word(text: &str) -> IResult<&str, Lexeme<'_>> {
    let word_parser = recognize(pair(
        alt((alpha1, tag("_"))),
        many0_count(alt((alphanumeric1, tag("_")))),
    ));

    map(word_parser, Lexeme::Word)(text)
}

fn integer(text: &str) -> IResult<&str, Lexeme<'_>> {
    let hex_parser = recognize(pair(tag("0x"), hex_digit1));

    map(alt((hex_parser, digit1)), Lexeme::Integer)(text)
}

fn symbol(text: &str) -> IResult<&str, Lexeme<'_>> {
    let symbol_parser = alt((
        value(SymbolToken::Dot, char('.')),
        value(SymbolToken::Comma, char(',')),
        value(SymbolToken::EqualSign, char('=')),
        value(SymbolToken::OpenParenthesis, char('(')),
        value(SymbolToken::CloseParenthesis, char(')')),
        value(SymbolToken::Plus, char('+')),
        value(SymbolToken::Minus, char('-')),
    ));

    map(symbol_parser, Lexeme::Symbol)(text)
}

#[cfg(test)]
pub(crate) fn scan(text: &str) -> Vec<Spanned<'_>> {
    Scanner::new(text).filter_map(Result::ok).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use cool_asserts::assert_matches;

    use crate::binding::Transition;
    use crate::button::Device;
    use crate::token::{AxisToken, KeywordToken};

    fn tokens(text: &str) -> Vec<Token> {
        scan(text).into_iter().map(|spanned| spanned.token).collect()
    }

    #[test]
    fn button_assign_test() {
        assert_eq!(
            tokens("Wiimote.A = NOTE(60, 100)"),
            vec![
                Token::Device(Device::Wiimote),
                SymbolToken::Dot.into(),
                Token::Button(Device::Wiimote, "A"),
                SymbolToken::EqualSign.into(),
                KeywordToken::Note.into(),
                SymbolToken::OpenParenthesis.into(),
                DataToken::Integer(60).into(),
                SymbolToken::Comma.into(),
                DataToken::Integer(100).into(),
                SymbolToken::CloseParenthesis.into(),
            ]
        );
    }

    #[test]
    fn keywords_test() {
        assert_eq!(
            tokens("Nunchuk C Z Press Release Roll Pitch Acc PROG_CHG"),
            vec![
                Token::Device(Device::Nunchuk),
                Token::Button(Device::Nunchuk, "C"),
                Token::Button(Device::Nunchuk, "Z"),
                Token::Event(Transition::Press),
                Token::Event(Transition::Release),
                AxisToken::Roll.into(),
                AxisToken::Pitch.into(),
                AxisToken::Acc.into(),
                KeywordToken::ProgChg.into(),
            ]
        );
    }

    #[test]
    fn integers_test() {
        assert_eq!(
            tokens("1 2 0x1f 42"),
            vec![
                Token::Data(DataToken::Integer(1)),
                DataToken::Integer(2).into(),
                DataToken::Integer(0x1f).into(),
                DataToken::Integer(42).into(),
            ]
        );
    }

    #[test]
    fn step_suffix_test() {
        assert_eq!(
            tokens("+-5"),
            vec![
                Token::Symbol(SymbolToken::Plus),
                SymbolToken::Minus.into(),
                DataToken::Integer(5).into(),
            ]
        );
    }

    #[test]
    fn symbols_test() {
        assert_eq!(
            tokens(". , = ( ) + -"),
            vec![
                Token::Symbol(SymbolToken::Dot),
                SymbolToken::Comma.into(),
                SymbolToken::EqualSign.into(),
                SymbolToken::OpenParenthesis.into(),
                SymbolToken::CloseParenthesis.into(),
                SymbolToken::Plus.into(),
                SymbolToken::Minus.into(),
            ]
        );
    }

    #[test]
    fn unlisted_symbol_test() {
        let mut scanner = Scanner::new("*-");

        assert_matches!(scanner.next(), Some(Err(TokenizerError::UnexpectedCharacter('*', _))));
        assert_matches!(
            scanner.next(),
            Some(Ok(Spanned { token: Token::Symbol(SymbolToken::Minus), .. }))
        );
    }

    #[test]
    fn comments_and_newlines_test() {
        let spanned = scan("# header\nWiimote.A # trailing\r\n  Nunchuk");

        assert_eq!(spanned.len(), 4);
        assert_eq!(spanned[0].position, Position::new(2, 1));
        assert_eq!(spanned[2].lexeme, "A");
        assert_eq!(spanned[2].position, Position::new(2, 9));
        assert_eq!(spanned[3].position, Position::new(3, 3));
    }

    #[test]
    fn unexpected_character_test() {
        let mut scanner = Scanner::new("Wiimote$.A");

        assert_matches!(scanner.next(), Some(Ok(Spanned { token: Token::Device(Device::Wiimote), .. })));
        assert_matches!(
            scanner.next(),
            Some(Err(TokenizerError::UnexpectedCharacter('$', position))) => {
                assert_eq!(position, Position::new(1, 8));
            }
        );
        assert_matches!(scanner.next(), Some(Ok(Spanned { token: Token::Symbol(SymbolToken::Dot), .. })));
        assert_matches!(scanner.next(), Some(Ok(Spanned { token: Token::Button(Device::Wiimote, "A"), .. })));
        assert_matches!(scanner.next(), None);
    }

    #[test]
    fn unexpected_multibyte_character_test() {
        let mut scanner = Scanner::new("é.");

        assert_matches!(scanner.next(), Some(Err(TokenizerError::UnexpectedCharacter('é', _))));
        assert_matches!(scanner.next(), Some(Ok(Spanned { lexeme: ".", position, .. })) => {
            assert_eq!(position, Position::new(1, 2));
        });
    }

    #[test]
    fn unknown_word_test() {
        let mut scanner = Scanner::new("Wiimote.Trigger");

        scanner.next();
        scanner.next();

        assert_matches!(
            scanner.next(),
            Some(Err(TokenizerError::UnknownWord(word, _))) => {
                assert_eq!(word, "Trigger");
            }
        );
        assert_matches!(scanner.next(), None);
    }

    #[test]
    fn maximal_munch_test() {
        assert_matches!(
            Scanner::new("Accel").next(),
            Some(Err(TokenizerError::UnknownWord(_, _)))
        );
    }

    #[test]
    fn integer_out_of_range_test() {
        assert_matches!(
            Scanner::new("99999999999").next(),
            Some(Err(TokenizerError::IntegerOutOfRange(_, _)))
        );
    }

    #[test]
    fn restart_test() {
        let mut scanner = Scanner::new("Wiimote.A");
        let first: Vec<_> = scanner.by_ref().collect();

        scanner.restart();

        assert_eq!(scanner.collect::<Vec<_>>(), first);
    }
}
