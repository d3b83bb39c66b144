pub mod interpreter;
pub mod parser;
pub mod scanner;

use std::path::PathBuf;

use self::{interpreter::RuntimeError, parser::ParseError, scanner::ScanError};

/// LoxError is the top-level error type for the Lox compiler/interpreter.
///
/// Syntax and runtime errors in the user's program are not `LoxError`s, they
/// are reported as [`Diagnostic`]s in the run's [`Outcome`](crate::Outcome).
#[derive(thiserror::Error, Debug)]
pub enum LoxError {
	/// Internal compiler error, should never happen
	#[error("CompilerInternalError: {0}")]
	InternalError(#[from] anyhow::Error),
	/// The script file could not be read
	#[error("Failed read script {}: {source}", .path.display())]
	ReadScript { path: PathBuf, source: std::io::Error },
}

/// A line-tagged error report shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
	pub line:    usize,
	pub message: String,
}

impl Diagnostic {
	pub fn new(line: usize, message: impl Into<String>) -> Self { Self { line, message: message.into() } }
}

impl std::fmt::Display for Diagnostic {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "[line {}] Error : {}", self.line, self.message)
	}
}

impl From<&ScanError> for Diagnostic {
	fn from(error: &ScanError) -> Self { Self::new(error.line, error.r#type.to_string()) }
}

impl From<&ParseError> for Diagnostic {
	fn from(error: &ParseError) -> Self { Self::new(error.line, error.r#type.to_string()) }
}

impl From<&RuntimeError> for Diagnostic {
	fn from(error: &RuntimeError) -> Self { Self::new(error.line(), error.to_string()) }
}
