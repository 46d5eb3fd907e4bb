//! Front ends: batch file mode and the interactive REPL
//!
//! Both feed source through a [`LineAccumulator`] that groups physical lines
//! into evaluation units, then run each unit with [`run_unit`].

pub mod batch;
pub mod repl;

use std::io::Write;

use crate::lexer::tokenize_from_line;
use crate::parser::SExprParser;
use crate::runtime::LispEvaluator;

pub use batch::{run_batch, run_file};
pub use repl::{run_repl, ReplControl, ReplSession};

/// Options shared by both front ends
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Print each parsed form as JSON before evaluating it
    pub dump_ast: bool,
}

/// True for lines the drivers ignore: blank, or a `;` comment
pub fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with(';')
}

/// One evaluation unit and the source line it starts on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    pub text: String,
    pub line: usize,
}

impl SourceUnit {
    /// A unit that starts on line 1
    pub fn new(text: impl Into<String>) -> Self {
        SourceUnit {
            text: text.into(),
            line: 1,
        }
    }
}

/// Groups source lines into units with balanced parentheses
///
/// A unit is released as soon as the buffer holds at least as many `)` as
/// `(`. That covers balanced forms, bare atoms (no parentheses at all) and
/// stray closers, which then reach the parser and get reported instead of
/// swallowing every later line.
///
/// Lines keep their text and line breaks, so token positions in a unit map
/// back to the input. Comment and blank lines inside an open unit become
/// empty lines.
#[derive(Debug, Default)]
pub struct LineAccumulator {
    buffer: String,
    start_line: usize,
    lines_seen: usize,
    open: usize,
    close: usize,
}

impl LineAccumulator {
    /// Creates an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one physical line; returns a complete unit if one is ready
    pub fn push_line(&mut self, line: &str) -> Option<SourceUnit> {
        self.lines_seen += 1;
        let line = line.trim_end();

        if is_skippable(line) {
            if self.is_pending() {
                self.buffer.push('\n');
            }
            return None;
        }

        if self.is_pending() {
            self.buffer.push('\n');
        } else {
            self.start_line = self.lines_seen;
        }
        self.buffer.push_str(line);
        self.open += line.matches('(').count();
        self.close += line.matches(')').count();

        if self.close >= self.open {
            Some(self.take())
        } else {
            None
        }
    }

    /// True while an unbalanced unit is buffered
    pub fn is_pending(&self) -> bool {
        !self.buffer.trim().is_empty()
    }

    /// Drains whatever is buffered, balanced or not
    pub fn finish(&mut self) -> Option<SourceUnit> {
        if self.is_pending() {
            Some(self.take())
        } else {
            None
        }
    }

    /// Discards the buffered text
    pub fn clear(&mut self) {
        self.take();
    }

    fn take(&mut self) -> SourceUnit {
        self.open = 0;
        self.close = 0;
        SourceUnit {
            text: std::mem::take(&mut self.buffer),
            line: self.start_line,
        }
    }
}

/// Tokenizes, parses and evaluates every form of one unit, writing each
/// printable result on its own line.
///
/// The first parse or evaluation failure is reported as `Error: <message>`
/// and ends the unit; definitions made before it stay in effect.
pub fn run_unit<W: Write>(
    evaluator: &LispEvaluator,
    unit: &SourceUnit,
    out: &mut W,
    options: &RunOptions,
) -> anyhow::Result<()> {
    tracing::debug!(line = unit.line, unit = %unit.text.trim(), "evaluating unit");
    let mut parser = SExprParser::new(tokenize_from_line(&unit.text, unit.line));

    while !parser.is_at_end() {
        let expr = match parser.parse_expression() {
            Ok(expr) => expr,
            Err(err) => {
                writeln!(out, "Error: {}", err)?;
                break;
            }
        };

        if options.dump_ast {
            writeln!(out, "{}", serde_json::to_string(&expr)?)?;
        }

        match evaluator.evaluate(&expr, &evaluator.env) {
            Ok(value) if value.is_null() => {}
            Ok(value) => writeln!(out, "{}", value)?,
            Err(err) => {
                tracing::debug!(error = ?err, "evaluation failed");
                writeln!(out, "Error: {}", err)?;
                break;
            }
        }
    }

    Ok(())
}
