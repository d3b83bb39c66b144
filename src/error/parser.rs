/// Parser related errors
#[derive(thiserror::Error, Debug)]
pub enum ParserError {
	/// Internal compiler error, should never happen
	#[error("{0}")]
	InternalError(#[from] anyhow::Error),
	/// A syntax error, recovered from by synchronizing to the next statement
	#[error(transparent)]
	ParseError(#[from] ParseError),
}

/// A syntax error tagged with the line of the offending token.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("line {line}: {type}")]
pub struct ParseError {
	pub line:   usize,
	pub r#type: ParseErrorType,
}

impl ParseError {
	pub fn new(line: usize, r#type: ParseErrorType) -> Self { Self { line, r#type } }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorType {
	ExpectExpression,
	ExpectVariableName,
	/// Missing `;`, with what it should follow.
	ExpectSemicolon(&'static str),
	/// Missing `(`, with what it should follow.
	ExpectLeftParen(&'static str),
	/// Missing `)`, with what it should follow.
	ExpectRightParen(&'static str),
	ExpectRightBrace,
	InvalidAssignmentTarget,
}

impl std::fmt::Display for ParseErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use ParseErrorType::*;
		match self {
			ExpectExpression => write!(f, "Expect expression."),
			ExpectVariableName => write!(f, "Expect variable name."),
			ExpectSemicolon(after) => write!(f, "Expect ';' after {after}."),
			ExpectLeftParen(after) => write!(f, "Expect '(' after {after}."),
			ExpectRightParen(after) => write!(f, "Expect ')' after {after}."),
			ExpectRightBrace => write!(f, "Expect '}}' after block."),
			InvalidAssignmentTarget => write!(f, "Invalid assignment target."),
		}
	}
}
