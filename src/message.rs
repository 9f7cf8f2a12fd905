use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_NOTE_CHANNEL: u32 = 0;
pub const DEFAULT_PROGRAM: u32 = 1;

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum NoteState {
    On,
    Off,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Note {
    pub note: u32,
    pub velocity: u32,
    pub channel: u32,
    pub state: NoteState,
}

impl Note {
    pub fn new(note: u32, velocity: u32, channel: u32) -> Self {
        Self {
            note,
            velocity,
            channel,
            state: NoteState::On,
        }
    }

    pub fn inverse(self) -> Self {
        let state = match self.state {
            NoteState::On => NoteState::Off,
            NoteState::Off => NoteState::On,
        };

        Self { state, ..self }
    }
}

/// An outgoing control message.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Message {
    ProgramChange { program: u32 },
    Note(Note),
    /// A relative change of `base`'s first data value.
    Stepped { base: Box<Message>, step: i64 },
}

#[derive(Debug, PartialEq, Clone)]
pub struct NotReversible(pub Message);

impl Display for NotReversible {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} has no inverse", self.0)
    }
}

impl Error for NotReversible {}

impl Message {
    pub fn program_change(program: u32) -> Self {
        Message::ProgramChange { program }
    }

    pub fn note(note: u32, velocity: u32, channel: u32) -> Self {
        Message::Note(Note::new(note, velocity, channel))
    }

    pub fn stepped(self, step: i64) -> Self {
        Message::Stepped {
            base: Box::new(self),
            step,
        }
    }

    pub fn is_reversible(&self) -> bool {
        match self {
            Message::ProgramChange { .. } => false,
            Message::Note(_) => true,
            Message::Stepped { base, .. } => base.is_reversible(),
        }
    }

    pub fn inverse(&self) -> Result<Message, NotReversible> {
        match self {
            Message::Note(note) => Ok(Message::Note(note.inverse())),
            Message::Stepped { base, step } => Ok(base.inverse()?.stepped(*step)),
            Message::ProgramChange { .. } => Err(NotReversible(self.clone())),
        }
    }

    /// The value a step moves: program number or note number.
    pub fn data1(&self) -> u32 {
        match self {
            Message::ProgramChange { program } => *program,
            Message::Note(note) => note.note,
            Message::Stepped { base, .. } => base.data1(),
        }
    }

    /// The message a stepped action emits after firing `count` times.
    /// Non-stepped messages are returned unchanged.
    pub fn advanced(&self, count: i64) -> Message {
        match self {
            Message::Stepped { base, step } => {
                let offset = step.saturating_mul(count);
                let data1 = (i64::from(base.data1()))
                    .saturating_add(offset)
                    .max(0)
                    .min(i64::from(u32::MAX)) as u32;

                base.with_data1(data1)
            }
            message => message.clone(),
        }
    }

    fn with_data1(&self, data1: u32) -> Message {
        match self {
            Message::ProgramChange { .. } => Message::program_change(data1),
            Message::Note(note) => Message::Note(Note {
                note: data1,
                ..*note
            }),
            Message::Stepped { base, step } => base.with_data1(data1).stepped(*step),
        }
    }
}

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Message::ProgramChange { program } => write!(f, "PROG_CHG({})", program),
            Message::Note(note) => {
                let name = match note.state {
                    NoteState::On => "NOTE",
                    NoteState::Off => "NOTE_OFF",
                };

                write!(f, "{}({},{},{})", name, note.note, note.velocity, note.channel)
            }
            Message::Stepped { base, step } if *step < 0 => write!(f, "{}{}", base, step),
            Message::Stepped { base, step } => write!(f, "{}+{}", base, step),
        }
    }
}
