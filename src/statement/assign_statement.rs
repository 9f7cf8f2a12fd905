use nom::combinator::{cut, opt};
use nom::sequence::preceded;

use crate::binding::{Action, Transform, Transition};
use crate::button::ButtonId;
use crate::chord::chord;
use crate::command::command;
use crate::compiler::CompilerConfig;
use crate::keyword::event;
use crate::message::Message;
use crate::parser::{TokenResult, Tokens};
use crate::registry::BindingRegistry;
use crate::symbol::{dot, equal_sign};

/// A parsed `chord [ '.' event ] '=' command` statement, not yet applied.
#[derive(Debug, PartialEq, Clone)]
pub struct Assignment {
    pub button: ButtonId,
    pub transition: Option<Transition>,
    pub message: Message,
}

impl Assignment {
    /// Registers the button and stores the message on the side(s) it binds.
    ///
    /// Without an explicit transition the message becomes the press action
    /// and, if it can be reversed, its inverse becomes the release action.
    pub fn apply(self, registry: &mut BindingRegistry) {
        let binding = registry.lookup_or_insert(self.button);

        match self.transition {
            Some(transition) => binding.set_action(transition, Action::new(self.message)),
            None => {
                if self.message.is_reversible() {
                    binding.set_release(Action::with_transform(
                        self.message.clone(),
                        Transform::Inverse,
                    ));
                }

                binding.set_press(Action::new(self.message));
            }
        }
    }
}

pub fn assign_statement<'a, 'r>(
    config: &'r CompilerConfig,
    registry: &'r BindingRegistry,
) -> impl FnMut(Tokens<'a>) -> TokenResult<'a, Assignment> + 'r {
    move |input: Tokens<'a>| {
        let (input, button) = chord(input, &config.table, registry)?;
        let (input, transition) = opt(preceded(dot, cut(event)))(input)?;
        let (input, _) = cut(equal_sign)(input)?;
        let (input, message) = cut(command(config))(input)?;

        Ok((
            input,
            Assignment {
                button,
                transition,
                message,
            },
        ))
    }
}
