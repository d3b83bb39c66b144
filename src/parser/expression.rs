//! Expression AST nodes
//!
//! An `Expression` is a tree structure representing code like `-123 *
//! (45.67)` as nested nodes.

use Expression::*;
use LiteralValue::*;

use crate::scanner::{Literal as TokenLiteral, Token, TokenType};

/// Expression AST nodes
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expression<'a> {
	Literal(LiteralValue<'a>),
	Grouping(Box<Expression<'a>>),
	Unary { operator: Token<'a>, right: Box<Expression<'a>> },
	Binary { left: Box<Expression<'a>>, operator: Token<'a>, right: Box<Expression<'a>> },
	/// `and` / `or`, only evaluates `right` when `left` doesn't decide the result.
	Logical { left: Box<Expression<'a>>, operator: Token<'a>, right: Box<Expression<'a>> },
	Variable(Token<'a>),
	Assign { target: Token<'a>, value: Box<Expression<'a>> },
}

impl<'a> Expression<'a> {
	pub fn unary(operator: Token<'a>, right: Box<Self>) -> Box<Self> { Box::new(Unary { operator, right }) }

	pub fn binary(left: Box<Self>, operator: Token<'a>, right: Box<Self>) -> Box<Self> {
		Box::new(Binary { left, operator, right })
	}

	pub fn logical(left: Box<Self>, operator: Token<'a>, right: Box<Self>) -> Box<Self> {
		Box::new(Logical { left, operator, right })
	}

	pub fn grouping(expr: Box<Self>) -> Box<Self> { Box::new(Grouping(expr)) }

	pub fn assign(target: Token<'a>, value: Box<Self>) -> Box<Self> { Box::new(Assign { target, value }) }
}

/// Literal values in the AST
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum LiteralValue<'a> {
	Number(f64),
	StringLiteral(&'a str),
	Boolean(bool),
	Nil,
}

impl<'a> TryFrom<Token<'a>> for Expression<'a> {
	type Error = anyhow::Error;

	fn try_from(token: Token<'a>) -> Result<Self, Self::Error> {
		Ok(match (token.r#type, token.literal) {
			(TokenType::Number, Some(TokenLiteral::Number(n))) => Literal(Number(n)),
			(TokenType::String, Some(TokenLiteral::Str(s))) => Literal(StringLiteral(s)),
			(TokenType::True, _) => Literal(Boolean(true)),
			(TokenType::False, _) => Literal(Boolean(false)),
			(TokenType::Nil, _) => Literal(Nil),
			(TokenType::Identifier, _) => Variable(token),
			_ => anyhow::bail!("Cannot convert token {:?} to Expression", token),
		})
	}
}

impl std::fmt::Display for Expression<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Literal(lit) => write!(f, "{lit}"),
			Grouping(expression) => write!(f, "(group {expression})"),
			Unary { operator, right } => write!(f, "({} {right})", operator.lexeme),
			Binary { left, operator, right } => write!(f, "({} {left} {right})", operator.lexeme),
			Logical { left, operator, right } => write!(f, "({} {left} {right})", operator.lexeme),
			Variable(token) => write!(f, "{}", token.lexeme),
			Assign { target, value } => write!(f, "(= {} {value})", target.lexeme),
		}
	}
}

impl std::fmt::Display for LiteralValue<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Number(n) => write!(f, "{n}"),
			StringLiteral(s) => write!(f, "\"{s}\""),
			Boolean(b) => write!(f, "{b}"),
			Nil => write!(f, "nil"),
		}
	}
}
