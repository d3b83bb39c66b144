//! Lox tree-walking interpreter.
//!
//! The interpreter walks the statements produced by the parser, executing each
//! for its side effects and recursively evaluating expressions to runtime
//! values.
//!
//! # Expression Types
//!
//! - **Literals**: `nil`, booleans, numbers, strings
//! - **Unary**: `-` (negation), `!` (logical NOT)
//! - **Binary**: `+`, `-`, `*`, `/`, comparisons, equality
//! - **Logical**: `and`, `or`, short-circuiting
//! - **Grouping**: Parenthesized expressions
//! - **Variable** and **Assign**: reads and writes through the environment
//!
//! A runtime error stops the run, nothing is retried.

pub(crate) mod value;

use std::io::Write;

use Expression::*;
use anyhow::Context;
use value::Value;

use crate::{
	environment::Environment,
	error::interpreter::InterpreterError,
	parser::expression::Expression,
	scanner::TokenType,
	statement::Statement,
};

/// Interpreter that executes Lox statements, `print` writes to `out`.
///
/// Globals live as long as the interpreter, so a REPL session keeps its
/// variables between lines.
pub(crate) struct Interpreter<W: Write> {
	environment: Environment,
	out:         W,
}

impl<W: Write> Interpreter<W> {
	pub fn new(out: W) -> Self { Self { environment: Environment::new(), out } }

	pub fn out(&self) -> &W { &self.out }

	pub fn out_mut(&mut self) -> &mut W { &mut self.out }

	pub fn into_out(self) -> W { self.out }

	pub fn interpret_statements(&mut self, statements: &[Statement]) -> Result<(), InterpreterError> {
		for statement in statements {
			self.interpret_statement(statement)?;
		}
		Ok(())
	}

	fn interpret_statement(&mut self, statement: &Statement) -> Result<(), InterpreterError> {
		match statement {
			Statement::Expression(expression) => {
				self.evaluate(expression)?;
			}
			Statement::Print(expression) => {
				let value = self.evaluate(expression)?;
				writeln!(self.out, "{value}").context("Failed write print output")?;
			}
			Statement::VarDeclaration { name_token, initializer } => {
				let value = match initializer {
					Some(initializer) => self.evaluate(initializer)?,
					None => Value::Nil,
				};
				self.environment.define(name_token.lexeme, value);
			}
			Statement::Block(statements) => self.interpret_block(statements)?,
			Statement::If { condition, then_branch, else_branch } => {
				if self.evaluate(condition)?.is_truthy() {
					self.interpret_statement(then_branch)?
				} else if let Some(else_branch) = else_branch {
					self.interpret_statement(else_branch)?
				}
			}
			Statement::While { condition, body } => {
				while self.evaluate(condition)?.is_truthy() {
					self.interpret_statement(body)?;
				}
			}
		}
		Ok(())
	}

	/// Run the statements in a new scope, the enclosing scope is restored
	/// whether they succeed or fail.
	fn interpret_block(&mut self, statements: &[Statement]) -> Result<(), InterpreterError> {
		self.environment.push_scope();
		let result = self.interpret_statements(statements);
		self.environment.pop_scope();
		result
	}

	/// Evaluate the given expression and return its value.
	fn evaluate(&mut self, expr: &Expression) -> Result<Value, InterpreterError> {
		Ok(match expr {
			Literal(lit) => Value::from(lit),
			Grouping(inner) => self.evaluate(inner)?,
			Unary { operator, right } => self.evaluate(right)?.unary_op(operator)?,
			Binary { left, operator, right } => {
				let left_value = self.evaluate(left)?;
				let right_value = self.evaluate(right)?;
				left_value.binary_op(operator, &right_value)?
			}
			Logical { left, operator, right } => {
				let left_value = self.evaluate(left)?;
				let short_circuits = match operator.r#type {
					TokenType::Or => left_value.is_truthy(),
					_ => !left_value.is_truthy(),
				};
				if short_circuits { left_value } else { self.evaluate(right)? }
			}
			Variable(token) => self.environment.get(token)?.clone(),
			Assign { target, value } => {
				let value = self.evaluate(value)?;
				self.environment.assign(target, value.clone())?;
				value
			}
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{error::interpreter::RuntimeError, parser::Parser, scanner::Scanner};

	/// Run the source and return what it printed.
	fn run(input: &str) -> Result<String, RuntimeError> {
		let scanned = Scanner::new(input).scan_tokens().unwrap();
		let parsed = Parser::new(scanned.tokens).parse().unwrap();
		assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
		let mut interpreter = Interpreter::new(Vec::<u8>::new());
		match interpreter.interpret_statements(&parsed.statements) {
			Ok(()) => Ok(String::from_utf8(interpreter.into_out()).unwrap()),
			Err(InterpreterError::RuntimeError(e)) => Err(e),
			Err(InterpreterError::InternalError(e)) => panic!("internal error: {e}"),
		}
	}

	fn prints(input: &str, output: &str) { assert_eq!(run(input).unwrap(), output, "{input}") }

	#[test]
	fn print_values() {
		prints("print 1 + 1;", "2\n");
		prints("print 7 / 2;", "3.5\n");
		prints("print -(3);", "-3\n");
		prints("print \"a\" + 1;", "a1\n");
		prints("print 1 + \"a\";", "1a\n");
		prints("print nil;", "nil\n");
		prints("print !nil;", "true\n");
		prints("print 1 == 1.0;", "true\n");
		prints("print nil == false;", "false\n");
		prints("print \"\" == \"\";", "true\n");
	}

	#[test]
	fn variables() {
		prints("var x = 10; print x;", "10\n");
		prints("var x; print x;", "nil\n");
		prints("var x = 10; x = 20; print x;", "20\n");
		prints("var a; var b; a = b = 3; print a; print b;", "3\n3\n");
		prints("var a = 1; print a = 2;", "2\n");
		prints("var x = 1; var x = 2; print x;", "2\n");
	}

	#[test]
	fn scoping() {
		prints("var x = 1; { var x = 2; print x; } print x;", "2\n1\n");
		prints("var x = 1; { x = 2; } print x;", "2\n");
		prints(
			"var a = \"global\"; { var b = \"outer\"; { var c = \"inner\"; print a + b + c; } }",
			"globalouterinner\n",
		);
	}

	#[test]
	fn undefined_variable() {
		assert_eq!(run("x = 1;"), Err(RuntimeError::UndefinedVariable { line: 1, name: "x".to_string() }));
		assert_eq!(run("print y;"), Err(RuntimeError::UndefinedVariable { line: 1, name: "y".to_string() }));
		assert_eq!(
			run("{ var z = 1; }\nprint z;"),
			Err(RuntimeError::UndefinedVariable { line: 2, name: "z".to_string() })
		);
	}

	#[test]
	fn block_scope_is_released_on_error() {
		let scanned = Scanner::new("var x = 1; { var x = 2; print -\"no\"; }").scan_tokens().unwrap();
		let parsed = Parser::new(scanned.tokens).parse().unwrap();
		let mut interpreter = Interpreter::new(Vec::<u8>::new());
		assert!(interpreter.interpret_statements(&parsed.statements).is_err());
		assert_eq!(interpreter.environment.depth(), 1);

		let scanned = Scanner::new("print x;").scan_tokens().unwrap();
		let parsed = Parser::new(scanned.tokens).parse().unwrap();
		interpreter.interpret_statements(&parsed.statements).unwrap();
		assert_eq!(interpreter.out(), b"1\n");
	}

	#[test]
	fn short_circuit() {
		prints("print false and (1/0);", "false\n");
		prints("print true or (1/0);", "true\n");
		prints("print nil or \"default\";", "default\n");
		prints("print 1 and 2;", "2\n");
		prints("print 0 or 1;", "0\n");
		prints("var hit = false; false and (hit = true); print hit;", "false\n");
		prints("var hit = false; true or (hit = true); print hit;", "false\n");
		prints("var hit = false; true and (hit = true); print hit;", "true\n");
	}

	#[test]
	fn division_by_zero_is_not_an_error() {
		prints("print 1 / 0;\nprint \"after\";", "inf\nafter\n");
		prints("print -1 / 0;", "-inf\n");
		prints("print 0 / 0 == 0 / 0;", "false\n");
		prints("var n = 0 / 0; print n != n;", "true\n");
	}

	#[test]
	fn conditionals() {
		prints("if (true) print 1; else print 2;", "1\n");
		prints("if (nil) print 1; else print 2;", "2\n");
		prints("if (0) print \"zero is truthy\";", "zero is truthy\n");
		prints("if (\"\") print \"empty is truthy\";", "empty is truthy\n");
		prints("if (false) print 1;", "");
	}

	#[test]
	fn loops() {
		prints("while (false) print 1;", "");
		prints("var i = 0; while (i < 3) { print i; i = i + 1; }", "0\n1\n2\n");
		prints(
			"var a = 0; var b = 1; var n = 0; while (n < 8) { print a; var t = a + b; a = b; b = t; n = n + 1; }",
			"0\n1\n1\n2\n3\n5\n8\n13\n",
		);
	}

	#[test]
	fn type_errors() {
		assert_eq!(run("print -\"a\";"), Err(RuntimeError::OperandMustBeNumber { line: 1 }));
		assert_eq!(run("print 1 < \"a\";"), Err(RuntimeError::OperandsMustBeNumbers { line: 1 }));
		assert_eq!(run("print \"a\" * 2;"), Err(RuntimeError::OperandsMustBeNumbers { line: 1 }));
		assert_eq!(
			run("\nprint true + 1;"),
			Err(RuntimeError::InvalidAddition { line: 2, left: "boolean", right: "number" })
		);
	}

	#[test]
	fn left_operand_evaluates_first() {
		prints("var x = 1; print (x = 2) + x;", "4\n");
		// The failing left side stops before the right side runs.
		let error = run("var y = 0; (-nil) + (y = 1);").unwrap_err();
		assert_eq!(error, RuntimeError::OperandMustBeNumber { line: 1 });
	}

	#[test]
	fn output_stops_at_runtime_error() {
		let scanned = Scanner::new("print 1; print x; print 2;").scan_tokens().unwrap();
		let parsed = Parser::new(scanned.tokens).parse().unwrap();
		let mut interpreter = Interpreter::new(Vec::<u8>::new());
		assert!(interpreter.interpret_statements(&parsed.statements).is_err());
		assert_eq!(interpreter.out(), b"1\n");
	}
}
