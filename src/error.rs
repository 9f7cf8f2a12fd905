use indent_write::fmt::IndentWriter;
use nom::error::{ErrorKind as NomErrorKind, ParseError};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter, Write};

use crate::button::Device;
use crate::token::{AxisToken, Position, Spanned};
use crate::tokenizer::TokenizerError;

#[derive(Debug, PartialEq, Copy, Clone)]
pub enum Expectation {
    Keyword(&'static str),
    Symbol(char),
    Device,
    Button(Device),
    Event,
    Message,
    Integer,
}

impl Display for Expectation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            Expectation::Keyword(keyword) => write!(f, "{:?}", keyword),
            Expectation::Symbol(symbol) => write!(f, "{:?}", symbol),
            Expectation::Device => write!(f, "a device name"),
            Expectation::Button(device) => write!(f, "a {} button name", device),
            Expectation::Event => write!(f, "\"Press\" or \"Release\""),
            Expectation::Message => write!(f, "a message"),
            Expectation::Integer => write!(f, "an integer"),
        }
    }
}

#[derive(Debug)]
pub enum ErrorKind {
    Expected(Expectation),
    Nom(NomErrorKind),
    UnknownButton(String),
    MixedDevices(Device, Device),
    UnsupportedAxisEvent(AxisToken),
}

impl ErrorKind {
    /// Well-formed input the compiler still refuses.
    pub fn is_semantic(&self) -> bool {
        matches!(
            self,
            ErrorKind::UnknownButton(_)
                | ErrorKind::MixedDevices(_, _)
                | ErrorKind::UnsupportedAxisEvent(_)
        )
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Expected(expectation) => write!(f, "expected {}", expectation),
            ErrorKind::Nom(kind) => write!(f, "error in {:?}", kind),
            ErrorKind::UnknownButton(name) => write!(f, "unknown button {}", name),
            ErrorKind::MixedDevices(left, right) => {
                write!(f, "cannot combine {} and {} buttons", left, right)
            }
            ErrorKind::UnsupportedAxisEvent(axis) => {
                write!(f, "axis event {} is not supported", axis)
            }
        }
    }
}

#[derive(Debug)]
pub enum ParserError<I> {
    Base {
        location: I,
        kind: ErrorKind,
        child: Option<Box<Self>>,
    },
    Alt(Vec<Self>),
}

impl<I> ParserError<I> {
    pub fn map_location<J, F: Fn(I) -> J>(self, f: &F) -> ParserError<J> {
        match self {
            ParserError::Base {
                location,
                kind,
                child,
            } => ParserError::Base {
                location: f(location),
                kind,
                child: child.map(|child| Box::new(child.map_location(f))),
            },
            ParserError::Alt(siblings) => ParserError::Alt(
                siblings
                    .into_iter()
                    .map(|sibling| sibling.map_location(f))
                    .collect(),
            ),
        }
    }

    pub fn is_semantic(&self) -> bool {
        match self {
            ParserError::Base { kind, child, .. } => {
                kind.is_semantic() || child.as_ref().map_or(false, |child| child.is_semantic())
            }
            ParserError::Alt(siblings) => siblings.iter().any(ParserError::is_semantic),
        }
    }
}

impl<I: Display> Display for ParserError<I> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ParserError::Base {
                location,
                kind,
                child,
            } => {
                write!(f, "{} at {}", kind, location)?;

                if let Some(child) = child {
                    if let ParserError::Alt(ref siblings) = **child {
                        writeln!(f, " caused by one of:")?;

                        let mut f = IndentWriter::new("  ", f);

                        for (i, sibling) in siblings.iter().enumerate() {
                            write!(f, "{}", sibling)?;

                            if i != siblings.len() - 1 {
                                writeln!(f)?;
                            }
                        }
                    } else {
                        writeln!(f, " caused by:")?;
                        let mut f = IndentWriter::new("  ", f);
                        write!(f, "{}", child)?;
                    }
                }

                Ok(())
            }
            ParserError::Alt(siblings) => {
                writeln!(f, "one of:")?;

                let mut f = IndentWriter::new("  ", f);

                for (i, sibling) in siblings.iter().enumerate() {
                    write!(f, "{}", sibling)?;

                    if i != siblings.len() - 1 {
                        writeln!(f)?;
                    }
                }

                Ok(())
            }
        }
    }
}

impl<I: Debug + Display> Error for ParserError<I> {}

impl<I> ParseError<I> for ParserError<I> {
    fn from_error_kind(location: I, kind: NomErrorKind) -> Self {
        ParserError::Base {
            location,
            kind: ErrorKind::Nom(kind),
            child: None,
        }
    }

    fn append(location: I, kind: NomErrorKind, other: Self) -> Self {
        ParserError::Base {
            location,
            kind: ErrorKind::Nom(kind),
            child: Some(Box::new(other)),
        }
    }

    fn or(self, other: Self) -> Self {
        let siblings = match (self, other) {
            (ParserError::Alt(mut siblings1), ParserError::Alt(mut siblings2)) => {
                siblings2.append(&mut siblings1);
                siblings2
            }
            (ParserError::Alt(mut siblings), err) | (err, ParserError::Alt(mut siblings)) => {
                siblings.push(err);
                siblings
            }
            (err1, err2) => vec![err1, err2],
        };

        ParserError::Alt(siblings)
    }
}

/// Owned source location of a token, or of the end of input.
#[derive(Debug, PartialEq, Clone)]
pub struct Location {
    pub position: Position,
    pub lexeme: Option<String>,
}

impl Location {
    pub fn token(token: &Spanned<'_>) -> Self {
        Self {
            position: token.position,
            lexeme: Some(token.lexeme.to_string()),
        }
    }

    pub fn end(position: Position) -> Self {
        Self {
            position,
            lexeme: None,
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.lexeme {
            Some(lexeme) => write!(f, "{:?} ({})", lexeme, self.position),
            None => write!(f, "end of input ({})", self.position),
        }
    }
}

impl ParserError<Location> {
    /// The location the parser got furthest to before failing.
    pub fn furthest(&self) -> Option<&Location> {
        match self {
            ParserError::Base {
                location, child, ..
            } => match child.as_ref().and_then(|child| child.furthest()) {
                Some(deeper) if deeper.position > location.position => Some(deeper),
                _ => Some(location),
            },
            ParserError::Alt(siblings) => siblings
                .iter()
                .filter_map(ParserError::furthest)
                .max_by_key(|location| location.position),
        }
    }
}

#[derive(Debug, PartialEq, Copy, Clone)]
pub enum DiagnosticKind {
    Lexical,
    Syntax,
    Semantic,
}

impl Display for DiagnosticKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticKind::Lexical => write!(f, "lexical"),
            DiagnosticKind::Syntax => write!(f, "syntax"),
            DiagnosticKind::Semantic => write!(f, "semantic"),
        }
    }
}

/// A compile problem reported to the host.
#[derive(Debug, PartialEq, Clone)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub location: Location,
    pub message: String,
}

impl Diagnostic {
    pub fn position(&self) -> Position {
        self.location.position
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} error: {}", self.kind, self.message)
    }
}

impl Error for Diagnostic {}

impl From<ParserError<Location>> for Diagnostic {
    fn from(err: ParserError<Location>) -> Diagnostic {
        let kind = if err.is_semantic() {
            DiagnosticKind::Semantic
        } else {
            DiagnosticKind::Syntax
        };

        let location = err
            .furthest()
            .cloned()
            .unwrap_or_else(|| Location::end(Position::default()));

        Diagnostic {
            kind,
            location,
            message: err.to_string(),
        }
    }
}

impl From<TokenizerError> for Diagnostic {
    fn from(err: TokenizerError) -> Diagnostic {
        Diagnostic {
            kind: DiagnosticKind::Lexical,
            location: Location {
                position: err.position(),
                lexeme: Some(err.lexeme().to_string()),
            },
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use cool_asserts::assert_matches;

    fn location(line: usize, column: usize, lexeme: &str) -> Location {
        Location {
            position: Position::new(line, column),
            lexeme: Some(lexeme.to_string()),
        }
    }

    #[test]
    fn display_tree_test() {
        let err = ParserError::Base {
            location: location(1, 1, "Wiimote"),
            kind: ErrorKind::Nom(NomErrorKind::Alt),
            child: Some(Box::new(ParserError::Base {
                location: location(1, 8, "="),
                kind: ErrorKind::Expected(Expectation::Symbol('.')),
                child: None,
            })),
        };

        assert_eq!(
            err.to_string(),
            "error in Alt at \"Wiimote\" (line 1, column 1) caused by:\n  expected '.' at \"=\" (line 1, column 8)"
        );
    }

    #[test]
    fn furthest_test() {
        let err = ParserError::Alt(vec![
            ParserError::Base {
                location: location(2, 3, "("),
                kind: ErrorKind::Expected(Expectation::Device),
                child: None,
            },
            ParserError::Base {
                location: location(2, 1, "NOTE"),
                kind: ErrorKind::Expected(Expectation::Integer),
                child: None,
            },
        ]);

        assert_matches!(err.furthest(), Some(Location { position, .. }) => {
            assert_eq!(*position, Position::new(2, 3));
        });
    }

    #[test]
    fn error_kind_classes_test() {
        assert!(ErrorKind::UnknownButton("Wiimote.X".to_string()).is_semantic());
        assert!(ErrorKind::MixedDevices(Device::Wiimote, Device::Nunchuk).is_semantic());
        assert!(ErrorKind::UnsupportedAxisEvent(AxisToken::Acc).is_semantic());
        assert!(!ErrorKind::Expected(Expectation::Event).is_semantic());
        assert!(!ErrorKind::Nom(NomErrorKind::Alt).is_semantic());
    }

    #[test]
    fn semantic_kind_test() {
        let err = ParserError::Base {
            location: location(1, 1, "Wiimote"),
            kind: ErrorKind::UnknownButton("Wiimote.A".to_string()),
            child: None,
        };

        assert_matches!(
            Diagnostic::from(err),
            Diagnostic {
                kind: DiagnosticKind::Semantic,
                ..
            }
        );
    }

    #[test]
    fn syntax_kind_test() {
        let err = ParserError::Base {
            location: Location::end(Position::new(4, 1)),
            kind: ErrorKind::Expected(Expectation::Symbol('=')),
            child: None,
        };
        let diagnostic = Diagnostic::from(err);

        assert_eq!(diagnostic.kind, DiagnosticKind::Syntax);
        assert_eq!(diagnostic.position(), Position::new(4, 1));
        assert_eq!(
            diagnostic.to_string(),
            "syntax error: expected '=' at end of input (line 4, column 1)"
        );
    }
}
