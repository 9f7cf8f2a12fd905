use std::fmt::{Display, Formatter};

use crate::message::{Message, NotReversible};

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Transition {
    Press,
    Release,
}

impl Display for Transition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Transition::Press => write!(f, "Press"),
            Transition::Release => write!(f, "Release"),
        }
    }
}

/// Applied to an action's message when the action fires.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Transform {
    Identity,
    Inverse,
    Step(i64),
}

impl Transform {
    pub fn apply(self, message: &Message) -> Result<Message, NotReversible> {
        match self {
            Transform::Identity => Ok(message.clone()),
            Transform::Inverse => message.inverse(),
            Transform::Step(step) => Ok(message.clone().stepped(step)),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Action {
    pub message: Message,
    pub transform: Transform,
}

impl Action {
    pub fn new(message: Message) -> Self {
        Self::with_transform(message, Transform::Identity)
    }

    pub fn with_transform(message: Message, transform: Transform) -> Self {
        Self { message, transform }
    }

    pub fn emit(&self) -> Result<Message, NotReversible> {
        self.transform.apply(&self.message)
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.transform {
            Transform::Identity => write!(f, "{}", self.message),
            Transform::Inverse => write!(f, "inverse {}", self.message),
            Transform::Step(step) => write!(f, "step {} {}", step, self.message),
        }
    }
}

/// The press and release actions bound to one button identity.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Binding {
    press: Option<Action>,
    release: Option<Action>,
}

impl Binding {
    pub fn press(&self) -> Option<&Action> {
        self.press.as_ref()
    }

    pub fn release(&self) -> Option<&Action> {
        self.release.as_ref()
    }

    pub fn action(&self, transition: Transition) -> Option<&Action> {
        match transition {
            Transition::Press => self.press(),
            Transition::Release => self.release(),
        }
    }

    pub fn set_press(&mut self, action: Action) {
        self.press = Some(action);
    }

    pub fn set_release(&mut self, action: Action) {
        self.release = Some(action);
    }

    pub fn set_action(&mut self, transition: Transition, action: Action) {
        match transition {
            Transition::Press => self.set_press(action),
            Transition::Release => self.set_release(action),
        }
    }

    /// The message to send for `transition`, or `None` when that side is unbound.
    pub fn emit(&self, transition: Transition) -> Option<Result<Message, NotReversible>> {
        self.action(transition).map(Action::emit)
    }
}

impl Display for Binding {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.press {
            Some(action) => write!(f, "Press {}", action)?,
            None => write!(f, "Press -")?,
        }

        match &self.release {
            Some(action) => write!(f, ", Release {}", action),
            None => write!(f, ", Release -"),
        }
    }
}
