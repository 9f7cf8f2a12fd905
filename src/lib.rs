//! Compiler for a small language that binds Wii Remote and Nunchuk buttons to
//! MIDI messages.
//!
//! ```text
//! # play a note while A is held
//! Wiimote.A = NOTE(60, 100)
//! (Wiimote.Left + Wiimote.Right) = PROG_CHG(5)
//! Wiimote.Plus = PROG_CHG+
//! ```

pub mod binding;
pub mod button;
pub mod chord;
pub mod command;
pub mod compiler;
pub mod error;
pub mod keyword;
pub mod literal;
pub mod message;
pub mod parser;
pub mod registry;
pub mod statement;
pub mod symbol;
pub mod token;
pub mod tokenizer;

pub use binding::{Action, Binding, Transform, Transition};
pub use button::{ButtonCode, ButtonId, ButtonTable, Device, NunchukButton, WiimoteButton};
pub use compiler::{compile, Compilation, Compiler, CompilerConfig, Recovery};
pub use error::{Diagnostic, DiagnosticKind, Location};
pub use message::{Message, NotReversible, Note, NoteState};
pub use registry::BindingRegistry;
