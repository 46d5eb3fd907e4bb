//! Interactive read-eval-print loop

use std::io::Write;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use super::{run_unit, LineAccumulator, RunOptions};
use crate::runtime::{LispEvaluator, Procedure};

const PROMPT: &str = "scheme> ";
const CONTINUATION_PROMPT: &str = "   ...> ";

const HELP: &str = "\
Commands:
  exit, :quit   leave the REPL
  :help         show this message
  :env          list global bindings
  Ctrl-C        drop an unfinished form, or leave at an empty prompt

Special forms: define, if, lambda, and, or";

/// What the terminal loop should do after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplControl {
    Continue,
    Exit,
}

/// REPL state independent of the terminal
pub struct ReplSession {
    evaluator: LispEvaluator,
    accumulator: LineAccumulator,
    options: RunOptions,
}

impl ReplSession {
    pub fn new(evaluator: LispEvaluator, options: RunOptions) -> Self {
        ReplSession {
            evaluator,
            accumulator: LineAccumulator::new(),
            options,
        }
    }

    /// Prompt for the next line; the continuation prompt while a form is open
    pub fn prompt(&self) -> &'static str {
        if self.accumulator.is_pending() {
            CONTINUATION_PROMPT
        } else {
            PROMPT
        }
    }

    /// Handles one line of input, writing any output to `out`
    ///
    /// Commands are only recognized at the start of a form, so a symbol
    /// named `exit` inside an open form is ordinary source.
    pub fn feed_line<W: Write>(&mut self, line: &str, out: &mut W) -> anyhow::Result<ReplControl> {
        if !self.accumulator.is_pending() {
            match line.trim() {
                "exit" | ":quit" => return Ok(ReplControl::Exit),
                ":help" => {
                    self.write_help(out)?;
                    return Ok(ReplControl::Continue);
                }
                ":env" => {
                    for (name, value) in self.evaluator.env.bindings() {
                        writeln!(out, "{} = {}", name, value)?;
                    }
                    return Ok(ReplControl::Continue);
                }
                _ => {}
            }
        }

        if let Some(unit) = self.accumulator.push_line(line) {
            run_unit(&self.evaluator, &unit, out, &self.options)?;
        }
        Ok(ReplControl::Continue)
    }

    /// Drops a partially entered form
    pub fn cancel(&mut self) {
        self.accumulator.clear();
    }

    /// Ctrl-C: cancels an open form, or exits from an idle prompt
    pub fn interrupt(&mut self) -> ReplControl {
        if self.accumulator.is_pending() {
            self.cancel();
            ReplControl::Continue
        } else {
            ReplControl::Exit
        }
    }

    fn write_help<W: Write>(&self, out: &mut W) -> anyhow::Result<()> {
        writeln!(out, "{}", HELP)?;
        writeln!(out, "Builtins:")?;
        for (name, value) in self.evaluator.env.bindings() {
            if let Some(Procedure::Builtin(tool)) = value.as_procedure() {
                writeln!(out, "  {:<4} {} ({} args)", name, tool.description(), tool.arity())?;
            }
        }
        Ok(())
    }
}

/// Runs the REPL on the controlling terminal until `exit`, EOF or Ctrl-C at
/// an empty prompt
pub fn run_repl(evaluator: LispEvaluator, options: RunOptions) -> anyhow::Result<()> {
    let mut session = ReplSession::new(evaluator, options);
    let mut rl = DefaultEditor::new()?;
    let stdout = std::io::stdout();

    println!("schemelet {} (type :help for commands)", crate::VERSION);

    loop {
        match rl.readline(session.prompt()) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }
                let mut out = stdout.lock();
                if session.feed_line(&line, &mut out)? == ReplControl::Exit {
                    break;
                }
                out.flush()?;
            }
            Err(ReadlineError::Interrupted) => {
                if session.interrupt() == ReplControl::Exit {
                    println!("Exiting...");
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                println!("Exiting...");
                break;
            }
            Err(err) => {
                tracing::error!(error = %err, "readline failed");
                return Err(err.into());
            }
        }
    }

    Ok(())
}
