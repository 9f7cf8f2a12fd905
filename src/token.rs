use core::convert::Into;
use std::fmt::{Display, Formatter};

use crate::binding::Transition;
use crate::button::Device;

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[derive(Debug, PartialEq, Copy, Clone)]
pub enum Token {
    Device(Device),
    Button(Device, &'static str),
    Axis(AxisToken),
    Event(Transition),
    Keyword(KeywordToken),
    Symbol(SymbolToken),
    Data(DataToken),
}

#[derive(Debug, PartialEq, Copy, Clone)]
pub enum AxisToken {
    Roll,
    Pitch,
    Acc,
}

impl Display for AxisToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AxisToken::Roll => write!(f, "Roll"),
            AxisToken::Pitch => write!(f, "Pitch"),
            AxisToken::Acc => write!(f, "Acc"),
        }
    }
}

impl Into<Token> for AxisToken {
    fn into(self) -> Token {
        Token::Axis(self)
    }
}

#[derive(Debug, PartialEq, Copy, Clone)]
pub enum KeywordToken {
    Note,
    ProgChg,
}

impl Into<Token> for KeywordToken {
    fn into(self) -> Token {
        Token::Keyword(self)
    }
}

#[derive(Debug, PartialEq, Copy, Clone)]
pub enum DataToken {
    Integer(u32),
}

impl Into<Token> for DataToken {
    fn into(self) -> Token {
        Token::Data(self)
    }
}

#[derive(Debug, PartialEq, Copy, Clone)]
pub enum SymbolToken {
    Dot,
    Comma,
    EqualSign,
    OpenParenthesis,
    CloseParenthesis,
    Plus,
    Minus,
}

impl Into<Token> for SymbolToken {
    fn into(self) -> Token {
        Token::Symbol(self)
    }
}

/// A token together with the text it was scanned from.
#[derive(Debug, PartialEq, Clone)]
pub struct Spanned<'a> {
    pub token: Token,
    pub lexeme: &'a str,
    pub position: Position,
}
