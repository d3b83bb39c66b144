/// Errors that can occur during interpretation
#[derive(thiserror::Error, Debug)]
pub enum InterpreterError {
	/// Internal interpreter error, e.g. the output sink failed
	#[error("{0}")]
	InternalError(#[from] anyhow::Error),
	/// An error in the running program, it stops the current run
	#[error(transparent)]
	RuntimeError(#[from] RuntimeError),
}

/// An error in the running program, tagged with the line of the token that
/// caused it.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
	#[error("Undefined variable '{name}'.")]
	UndefinedVariable { line: usize, name: String },
	/// Unary `-` on a non-number.
	#[error("Operand must be a number.")]
	OperandMustBeNumber { line: usize },
	/// Arithmetic or comparison on non-numbers.
	#[error("Operands must be numbers.")]
	OperandsMustBeNumbers { line: usize },
	#[error("Operands must be two numbers or include a string, got {left} and {right}.")]
	InvalidAddition { line: usize, left: &'static str, right: &'static str },
}

impl RuntimeError {
	pub fn line(&self) -> usize {
		use RuntimeError::*;
		match self {
			UndefinedVariable { line, .. }
			| OperandMustBeNumber { line }
			| OperandsMustBeNumbers { line }
			| InvalidAddition { line, .. } => *line,
		}
	}
}
