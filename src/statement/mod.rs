//! There is no place in the grammar where both an expression and a statement
//! are allowed. The operands of, say, `+` are always expressions, never
//! statements. The body of a `while` loop is always a statement.

use crate::{parser::expression::Expression, scanner::Token};

/// A statement in the programming language.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Statement<'a> {
	/// An expression used as a statement, its value is discarded.
	Expression(Expression<'a>),
	/// A print statement.
	Print(Expression<'a>),
	/// A variable declaration statement.
	VarDeclaration {
		/// The token of the variable being declared.
		name_token:  Token<'a>,
		/// An optional initializer expression, the variable is `nil` without it.
		initializer: Option<Expression<'a>>,
	},
	/// A block of statements, run in its own scope.
	Block(Vec<Statement<'a>>),
	If {
		condition:   Expression<'a>,
		then_branch: Box<Statement<'a>>,
		else_branch: Option<Box<Statement<'a>>>,
	},
	While {
		condition: Expression<'a>,
		body:      Box<Statement<'a>>,
	},
}
