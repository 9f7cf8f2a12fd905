use nom::Err;
use tracing::{debug, info, warn};

use crate::button::ButtonTable;
use crate::error::{Diagnostic, DiagnosticKind, Location};
use crate::message::{DEFAULT_NOTE_CHANNEL, DEFAULT_PROGRAM};
use crate::parser::Tokens;
use crate::registry::BindingRegistry;
use crate::statement::assign_statement::assign_statement;
use crate::token::{Position, Spanned, SymbolToken, Token};
use crate::tokenizer::Scanner;

/// What the compiler does after a statement fails to compile.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Recovery {
    /// Skip past the offending token to the next statement and carry on.
    Statement,
    /// Stop at the first syntax or semantic error.
    Abort,
}

impl Default for Recovery {
    fn default() -> Self {
        Recovery::Statement
    }
}

#[derive(Debug, Clone)]
pub struct CompilerConfig {
    pub table: ButtonTable,
    pub default_channel: u32,
    pub default_program: u32,
    pub recovery: Recovery,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            table: ButtonTable::default(),
            default_channel: DEFAULT_NOTE_CHANNEL,
            default_program: DEFAULT_PROGRAM,
            recovery: Recovery::default(),
        }
    }
}

impl CompilerConfig {
    pub fn with_table(self, table: ButtonTable) -> Self {
        Self { table, ..self }
    }

    pub fn with_default_channel(self, default_channel: u32) -> Self {
        Self {
            default_channel,
            ..self
        }
    }

    pub fn with_default_program(self, default_program: u32) -> Self {
        Self {
            default_program,
            ..self
        }
    }

    pub fn with_recovery(self, recovery: Recovery) -> Self {
        Self { recovery, ..self }
    }
}

/// The outcome of compiling one source unit.
#[derive(Debug, Clone)]
pub struct Compilation {
    pub registry: BindingRegistry,
    pub diagnostics: Vec<Diagnostic>,
}

impl Compilation {
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn into_result(self) -> Result<BindingRegistry, Vec<Diagnostic>> {
        if self.diagnostics.is_empty() {
            Ok(self.registry)
        } else {
            Err(self.diagnostics)
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Compiler {
    config: CompilerConfig,
}

impl Compiler {
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    pub fn compile(&self, text: &str) -> Compilation {
        let mut registry = BindingRegistry::new();
        let diagnostics = self.compile_into(text, &mut registry);

        Compilation {
            registry,
            diagnostics,
        }
    }

    /// Compiles `text` into an existing registry and returns its diagnostics,
    /// ordered by position.
    ///
    /// Statements are applied only once they parsed completely, so a failed
    /// statement leaves `registry` as it was.
    pub fn compile_into(&self, text: &str, registry: &mut BindingRegistry) -> Vec<Diagnostic> {
        let mut scanner = Scanner::new(text);
        let mut tokens = vec![];
        let mut diagnostics = vec![];

        for result in &mut scanner {
            match result {
                Ok(spanned) => tokens.push(spanned),
                Err(err) => {
                    warn!(position = %err.position(), "{}", err);
                    diagnostics.push(Diagnostic::from(err));
                }
            }
        }

        let end = scanner.position();
        let mut input: Tokens = &tokens;
        let mut statements = 0;

        while !input.is_empty() {
            let result = assign_statement(&self.config, registry)(input);

            let err = match result {
                Ok((rest, assignment)) => {
                    debug!(
                        button = %assignment.button,
                        transition = ?assignment.transition,
                        message = %assignment.message,
                        "bound button"
                    );

                    assignment.apply(registry);
                    statements += 1;
                    input = rest;
                    continue;
                }
                Err(Err::Error(err)) | Err(Err::Failure(err)) => err,
                Err(Err::Incomplete(_)) => {
                    let diagnostic = Diagnostic {
                        kind: DiagnosticKind::Syntax,
                        location: Location::end(end),
                        message: "unexpected end of input".to_string(),
                    };

                    warn!(position = %diagnostic.position(), "{}", diagnostic);
                    diagnostics.push(diagnostic);
                    break;
                }
            };

            let err = err.map_location(&|location: Tokens<'_>| match location.first() {
                Some(spanned) => Location::token(spanned),
                None => Location::end(end),
            });
            let diagnostic = Diagnostic::from(err);
            let failed_at = diagnostic.position();

            warn!(position = %failed_at, "{}", diagnostic);
            diagnostics.push(diagnostic);

            match self.config.recovery {
                Recovery::Statement => input = resync(input, failed_at),
                Recovery::Abort => break,
            }
        }

        diagnostics.sort_by_key(Diagnostic::position);

        info!(
            statements,
            diagnostics = diagnostics.len(),
            bindings = registry.len(),
            "compiled source"
        );

        diagnostics
    }
}

/// Compiles `text` with the default configuration.
pub fn compile(text: &str) -> Compilation {
    Compiler::default().compile(text)
}

/// Skips the failed statement at the head of `input` to the first token at or
/// after `failed_at` that can start a statement.
///
/// Parentheses opened from the offending token on are skipped as a whole, so
/// recovery never resumes inside the failed statement's chord.
fn resync<'a>(input: Tokens<'a>, failed_at: Position) -> Tokens<'a> {
    let offending = input
        .iter()
        .position(|spanned| spanned.position >= failed_at)
        .unwrap_or_else(|| input.len());
    let mut depth = 0usize;

    for index in offending..input.len() {
        if index > 0 && depth == 0 && starts_statement(&input[index..]) {
            return &input[index..];
        }

        match input[index].token {
            Token::Symbol(SymbolToken::OpenParenthesis) => depth += 1,
            Token::Symbol(SymbolToken::CloseParenthesis) => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    &input[input.len()..]
}

fn starts_statement(input: Tokens<'_>) -> bool {
    match input {
        [Spanned {
            token: Token::Device(_),
            ..
        }, ..] => true,
        [Spanned {
            token: Token::Symbol(SymbolToken::OpenParenthesis),
            ..
        }, next, ..] => matches!(
            next.token,
            Token::Device(_) | Token::Symbol(SymbolToken::OpenParenthesis)
        ),
        _ => false,
    }
}
