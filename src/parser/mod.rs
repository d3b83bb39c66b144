//! The `Scanner` use `Lexical grammar`, implement `alphabet` as `Characters`,
//! `string` as `Lexme` or `Token`
//! The `Parser` use `Syntactic grammar`, implement `alphabet` as `Tokens`,
//! `string` as `Statement`
//!
//! |Name|Operators|Associates
//! --|--|--
//! Assignment|=|Right
//! Or|or|Left
//! And|and|Left
//! Equality|== !=|Left
//! Comparison|< > <= >=|Left
//! Term|+ -|Left
//! Factor|* /|Left
//! Unary|! -|Right
//!
//! Grammar:
//!
//! ``` BNF
//! program        → declaration* EOF ;
//! declaration    → varDecl | statement ;
//! varDecl        → "var" IDENTIFIER ( "=" expression )? ";" ;
//! statement      → ifStmt | whileStmt | printStmt | block | exprStmt ;
//! ifStmt         → "if" "(" expression ")" statement ( "else" statement )? ;
//! whileStmt      → "while" "(" expression ")" statement ;
//! block          → "{" declaration* "}" ;
//! printStmt      → "print" expression ";" ;
//! exprStmt       → expression ";" ;
//! expression     → assignment ;
//! assignment     → IDENTIFIER "=" assignment | logic_or ;
//! logic_or       → logic_and ( "or" logic_and )* ;
//! logic_and      → equality ( "and" equality )* ;
//! equality       → comparison ( ( "!=" | "==" ) comparison )* ;
//! comparison     → term ( ( ">" | ">=" | "<" | "<=" ) term )* ;
//! term           → factor ( ( "-" | "+" ) factor )* ;
//! factor         → unary ( ( "/" | "*" ) unary )* ;
//! unary          → ( "!" | "-" ) unary | primary ;
//! primary        → NUMBER | STRING | "true" | "false" | "nil" | "(" expression ")" | IDENTIFIER ;
//! ```
//!
//! A syntax error abandons the current top-level declaration only. The parser
//! records it, skips tokens until a statement boundary and keeps going, so a
//! single run reports as many syntax errors as it can.

pub(crate) mod expression;

use TokenType::*;
use anyhow::{Result, anyhow};
use tracing::debug;

use crate::{
	LoxError,
	error::parser::{ParseError, ParseErrorType, ParserError},
	parser::expression::Expression,
	scanner::{Token, TokenType},
	statement::Statement,
};

/// Statements of a whole program plus the syntax errors met while parsing it.
#[derive(Debug)]
pub(crate) struct Parsed<'a> {
	pub statements: Vec<Statement<'a>>,
	pub errors:     Vec<ParseError>,
}

pub(crate) struct Parser<'a> {
	/// The tokens to parse, ended by `Eof`.
	tokens:  Vec<Token<'a>>,
	current: usize,
	errors:  Vec<ParseError>,
}

impl<'a> Parser<'a> {
	pub fn new(tokens: Vec<Token<'a>>) -> Self { Self { tokens, current: 0, errors: Vec::new() } }

	/// Parse the whole program. Syntax errors never escape, they are collected
	/// in [`Parsed::errors`].
	pub fn parse(mut self) -> Result<Parsed<'a>, LoxError> {
		let mut statements = Vec::new();
		while !self.is_at_end()? {
			match self.declaration() {
				Ok(statement) => statements.push(statement),
				Err(ParserError::ParseError(e)) => {
					debug!(error = %e, "synchronizing after syntax error");
					self.errors.push(e);
					self.synchronize()?;
				}
				Err(ParserError::InternalError(e)) => return Err(e.into()),
			}
		}
		debug!(statements = statements.len(), errors = self.errors.len(), "parsed tokens");
		Ok(Parsed { statements, errors: self.errors })
	}

	fn declaration(&mut self) -> Result<Statement<'a>, ParserError> {
		if matches!(self.peek()?.r#type, Var) {
			self.advance()?;
			return self.var_declaration();
		}
		self.statement()
	}

	fn var_declaration(&mut self) -> Result<Statement<'a>, ParserError> {
		let name_token = self.consume(Identifier, ParseErrorType::ExpectVariableName)?;
		let initializer = if matches!(self.peek()?.r#type, Equal) {
			self.advance()?;
			Some(*self.expression()?)
		} else {
			None
		};
		self.consume(Semicolon, ParseErrorType::ExpectSemicolon("variable declaration"))?;
		Ok(Statement::VarDeclaration { name_token, initializer })
	}

	fn statement(&mut self) -> Result<Statement<'a>, ParserError> {
		match self.peek()?.r#type {
			If => {
				self.advance()?;
				self.if_statement()
			}
			While => {
				self.advance()?;
				self.while_statement()
			}
			Print => {
				self.advance()?;
				let value = self.expression()?;
				self.consume(Semicolon, ParseErrorType::ExpectSemicolon("value"))?;
				Ok(Statement::Print(*value))
			}
			LeftBrace => {
				self.advance()?;
				Ok(Statement::Block(self.block()?))
			}
			_ => {
				let expression = self.expression()?;
				self.consume(Semicolon, ParseErrorType::ExpectSemicolon("expression"))?;
				Ok(Statement::Expression(*expression))
			}
		}
	}

	fn if_statement(&mut self) -> Result<Statement<'a>, ParserError> {
		self.consume(LeftParen, ParseErrorType::ExpectLeftParen("'if'"))?;
		let condition = self.expression()?;
		self.consume(RightParen, ParseErrorType::ExpectRightParen("if condition"))?;

		let then_branch = Box::new(self.statement()?);
		let else_branch = if matches!(self.peek()?.r#type, Else) {
			self.advance()?;
			Some(Box::new(self.statement()?))
		} else {
			None
		};
		Ok(Statement::If { condition: *condition, then_branch, else_branch })
	}

	fn while_statement(&mut self) -> Result<Statement<'a>, ParserError> {
		self.consume(LeftParen, ParseErrorType::ExpectLeftParen("'while'"))?;
		let condition = self.expression()?;
		self.consume(RightParen, ParseErrorType::ExpectRightParen("condition"))?;
		let body = Box::new(self.statement()?);
		Ok(Statement::While { condition: *condition, body })
	}

	/// The statements of a block, the opening `{` is already consumed.
	fn block(&mut self) -> Result<Vec<Statement<'a>>, ParserError> {
		let mut statements = Vec::new();
		while !matches!(self.peek()?.r#type, RightBrace | Eof) {
			statements.push(self.declaration()?);
		}
		self.consume(RightBrace, ParseErrorType::ExpectRightBrace)?;
		Ok(statements)
	}

	fn expression(&mut self) -> Result<Box<Expression<'a>>, ParserError> { self.assignment() }

	/// Parse the left side as an ordinary expression, only a variable is a
	/// valid target once we see the `=`.
	fn assignment(&mut self) -> Result<Box<Expression<'a>>, ParserError> {
		let expression = self.or()?;
		if matches!(self.peek()?.r#type, Equal) {
			let equals = self.advance()?;
			let value = self.assignment()?;
			if let Expression::Variable(target) = *expression {
				return Ok(Expression::assign(target, value));
			}
			return Err(ParseError::new(equals.line, ParseErrorType::InvalidAssignmentTarget).into());
		}
		Ok(expression)
	}

	fn or(&mut self) -> Result<Box<Expression<'a>>, ParserError> {
		let mut expression = self.and()?;
		while matches!(self.peek()?.r#type, Or) {
			expression = Expression::logical(expression, self.advance()?, self.and()?)
		}
		Ok(expression)
	}

	fn and(&mut self) -> Result<Box<Expression<'a>>, ParserError> {
		let mut expression = self.equality()?;
		while matches!(self.peek()?.r#type, And) {
			expression = Expression::logical(expression, self.advance()?, self.equality()?)
		}
		Ok(expression)
	}

	/// Parse equality expressions.
	fn equality(&mut self) -> Result<Box<Expression<'a>>, ParserError> {
		let mut expression = self.comparison()?;
		while matches!(self.peek()?.r#type, BangEqual | EqualEqual) {
			expression = Expression::binary(expression, self.advance()?, self.comparison()?)
		}
		Ok(expression)
	}

	/// Parse comparison expressions.
	fn comparison(&mut self) -> Result<Box<Expression<'a>>, ParserError> {
		let mut expression = self.term()?;
		while matches!(self.peek()?.r#type, Greater | GreaterEqual | Less | LessEqual) {
			expression = Expression::binary(expression, self.advance()?, self.term()?)
		}
		Ok(expression)
	}

	/// Parse term expressions.
	fn term(&mut self) -> Result<Box<Expression<'a>>, ParserError> {
		let mut expression = self.factor()?;
		while matches!(self.peek()?.r#type, Minus | Plus) {
			expression = Expression::binary(expression, self.advance()?, self.factor()?)
		}
		Ok(expression)
	}

	/// Parse factor expressions.
	fn factor(&mut self) -> Result<Box<Expression<'a>>, ParserError> {
		let mut expression = self.unary()?;
		while matches!(self.peek()?.r#type, Slash | Star) {
			expression = Expression::binary(expression, self.advance()?, self.unary()?)
		}
		Ok(expression)
	}

	/// Parse unary expressions.
	fn unary(&mut self) -> Result<Box<Expression<'a>>, ParserError> {
		if matches!(self.peek()?.r#type, Bang | Minus) {
			return Ok(Expression::unary(self.advance()?, self.unary()?));
		}
		self.primary()
	}

	/// Parse primary expressions.
	fn primary(&mut self) -> Result<Box<Expression<'a>>, ParserError> {
		let token = self.peek()?;
		match token.r#type {
			False | True | Nil | Number | String | Identifier => {
				let token = self.advance()?;
				Ok(Box::new(token.try_into()?))
			}
			LeftParen => {
				self.advance()?; // consume '('
				let expr = self.expression()?;
				self.consume(RightParen, ParseErrorType::ExpectRightParen("expression"))?;
				Ok(Expression::grouping(expr))
			}
			_ => Err(ParseError::new(token.line, ParseErrorType::ExpectExpression).into()),
		}
	}

	/// Consume a token of the given type or fail with `error`.
	fn consume(&mut self, r#type: TokenType, error: ParseErrorType) -> Result<Token<'a>, ParserError> {
		let token = self.peek()?;
		if token.r#type == r#type {
			return Ok(self.advance()?);
		}
		Err(ParseError::new(token.line, error).into())
	}

	/// Return the current token and move past it, `Eof` is never passed.
	fn advance(&mut self) -> Result<Token<'a>> {
		let token = self.peek()?;
		if token.r#type != Eof {
			self.current += 1;
		}
		Ok(token)
	}

	/// Peek at the current token.
	fn peek(&self) -> Result<Token<'a>> {
		self.tokens.get(self.current).copied().ok_or_else(|| anyhow!("Unexpected end of token stream"))
	}

	fn is_at_end(&self) -> Result<bool> { Ok(self.peek()?.r#type == Eof) }

	/// Discard tokens until just past a `;` or right before a token that starts
	/// a statement.
	fn synchronize(&mut self) -> Result<()> {
		let mut previous = self.advance()?;
		while !self.is_at_end()? {
			if previous.r#type == Semicolon || self.peek()?.r#type.starts_statement() {
				return Ok(());
			}
			previous = self.advance()?;
		}
		Ok(())
	}
}
