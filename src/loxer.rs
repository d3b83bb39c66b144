use std::{
	fs::read_to_string,
	io::{BufRead, Stdout, Write},
	path::Path,
};

use anyhow::Context;
use tracing::{debug, info};

use crate::{
	Diagnostic, LoxError,
	cli::{EX_DATAERR, EX_SOFTWARE},
	error::interpreter::InterpreterError,
	interpreter::Interpreter,
	parser::Parser,
	scanner::Scanner,
};

/// What a single run of the pipeline produced.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Outcome {
	/// Scan and parse errors, in the order they were found.
	pub diagnostics:   Vec<Diagnostic>,
	/// The error that stopped execution, if any.
	pub runtime_error: Option<Diagnostic>,
}

impl Outcome {
	/// Whether the source had scan or parse errors, it is not run then.
	pub fn had_error(&self) -> bool { !self.diagnostics.is_empty() }

	pub fn had_runtime_error(&self) -> bool { self.runtime_error.is_some() }

	/// Process exit status for a script run with this outcome.
	pub fn exit_code(&self) -> u8 {
		if self.had_error() {
			EX_DATAERR
		} else if self.had_runtime_error() {
			EX_SOFTWARE
		} else {
			0
		}
	}

	/// Write every diagnostic to stderr.
	pub fn report(&self) {
		for diagnostic in self.diagnostics.iter().chain(&self.runtime_error) {
			eprintln!("{diagnostic}");
		}
	}
}

/// Loxer is the main struct for the Lox interpreter, it drives source text
/// through the scanner, the parser and the interpreter.
///
/// Variables declared by one run are visible to the next, which is what a
/// REPL session needs.
pub struct Loxer<W: Write = Stdout> {
	interpreter: Interpreter<W>,
}

impl Loxer<Stdout> {
	/// Create a Loxer printing to stdout.
	pub fn new() -> Self { Self::with_output(std::io::stdout()) }
}

impl Default for Loxer<Stdout> {
	fn default() -> Self { Self::new() }
}

impl<W: Write> Loxer<W> {
	/// Create a Loxer whose `print` statements write to `out`.
	pub fn with_output(out: W) -> Self { Self { interpreter: Interpreter::new(out) } }

	pub fn output(&self) -> &W { self.interpreter.out() }

	pub fn into_output(self) -> W { self.interpreter.into_out() }

	/// Read the whole file and run it.
	pub fn run_file<P: AsRef<Path>>(&mut self, path: P) -> Result<Outcome, LoxError> {
		let path = path.as_ref();
		let source =
			read_to_string(path).map_err(|source| LoxError::ReadScript { path: path.to_path_buf(), source })?;
		info!(path = %path.display(), bytes = source.len(), "running script");
		self.run(&source)
	}

	/// Run the REPL prompt until `input` ends. Errors in a line are reported
	/// and the next line is read.
	pub fn run_prompt<R: BufRead>(&mut self, mut input: R) -> Result<(), LoxError> {
		let mut line = String::new();
		loop {
			line.clear();
			let out = self.interpreter.out_mut();
			write!(out, "> ").and_then(|()| out.flush()).context("Failed write prompt")?;
			if input.read_line(&mut line).context("Failed read line")? == 0 {
				writeln!(self.interpreter.out_mut()).context("Failed write prompt")?;
				debug!("repl input ended");
				return Ok(());
			}
			self.run(&line)?.report();
		}
	}

	/// Run the given source code.
	///
	/// Nothing is executed when the source has scan or parse errors.
	pub fn run(&mut self, source: &str) -> Result<Outcome, LoxError> {
		let mut outcome = Outcome::default();

		let scanned = Scanner::new(source).scan_tokens()?;
		outcome.diagnostics.extend(scanned.errors.iter().map(Diagnostic::from));

		let parsed = Parser::new(scanned.tokens).parse()?;
		outcome.diagnostics.extend(parsed.errors.iter().map(Diagnostic::from));

		if outcome.had_error() {
			debug!(diagnostics = outcome.diagnostics.len(), "skipping execution");
			return Ok(outcome);
		}

		match self.interpreter.interpret_statements(&parsed.statements) {
			Ok(()) => {}
			Err(InterpreterError::RuntimeError(e)) => {
				debug!(error = %e, line = e.line(), "runtime error");
				outcome.runtime_error = Some(Diagnostic::from(&e));
			}
			Err(InterpreterError::InternalError(e)) => return Err(e.into()),
		}
		Ok(outcome)
	}
}
