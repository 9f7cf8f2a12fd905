use nom::branch::alt;
use nom::combinator::cut;
use nom::sequence::{preceded, terminated, tuple};
use nom::Err;

use crate::button::{ButtonId, ButtonTable, MixedDevices};
use crate::error::{ErrorKind, ParserError};
use crate::keyword::{button_name, device};
use crate::parser::{TokenResult, Tokens};
use crate::registry::BindingRegistry;
use crate::symbol::{close_parenthesis, dot, open_parenthesis, plus};

/// `device '.' button_name`, translated through `table`.
pub fn button<'a>(table: &ButtonTable) -> impl FnMut(Tokens<'a>) -> TokenResult<'a, ButtonId> + '_ {
    move |input| {
        let (rest, family) = terminated(device, dot)(input)?;
        let (rest, name) = cut(button_name(family))(rest)?;

        match table.lookup(family, name) {
            Some(code) => Ok((rest, ButtonId::new(code))),
            None => Err(Err::Failure(ParserError::Base {
                location: input,
                kind: ErrorKind::UnknownButton(format!("{}.{}", family, name)),
                child: None,
            })),
        }
    }
}

/// `button | '(' chord '+' button ')'`
///
/// A bare button that is already registered resolves to the registered
/// identity.
pub fn chord<'a>(
    input: Tokens<'a>,
    table: &ButtonTable,
    registry: &BindingRegistry,
) -> TokenResult<'a, ButtonId> {
    let combined_parser = |input: Tokens<'a>| -> TokenResult<'a, ButtonId> {
        let content_parser = tuple((
            |input| chord(input, table, registry),
            plus,
            button(table),
        ));
        let (rest, (left, _, right)) = preceded(
            open_parenthesis,
            cut(terminated(content_parser, close_parenthesis)),
        )(input)?;

        match left.union(&right) {
            Ok(id) => Ok((rest, id)),
            Err(MixedDevices(left, right)) => Err(Err::Failure(ParserError::Base {
                location: input,
                kind: ErrorKind::MixedDevices(left, right),
                child: None,
            })),
        }
    };

    let single_parser = |input: Tokens<'a>| -> TokenResult<'a, ButtonId> {
        let (rest, id) = button(table)(input)?;

        match registry.get(&id) {
            Some((registered, _)) => Ok((rest, registered.clone())),
            None => Ok((rest, id)),
        }
    };

    alt((combined_parser, single_parser))(input)
}
