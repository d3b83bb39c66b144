//! Variable storage as a stack of scope frames.
//!
//! The frame at index 0 holds the globals and lives as long as the
//! interpreter. Entering a block pushes a frame, leaving it pops that frame.
//! Lookups walk the frames from the innermost outward, so an inner
//! declaration shadows an outer one without touching it.

use std::collections::HashMap;

use tracing::trace;

use crate::{error::interpreter::RuntimeError, interpreter::value::Value, scanner::Token};

#[derive(Debug)]
pub(crate) struct Environment {
	/// Never empty.
	scopes: Vec<HashMap<String, Value>>,
}

impl Environment {
	pub fn new() -> Self { Self { scopes: vec![HashMap::new()] } }

	/// Number of frames, the globals included.
	pub fn depth(&self) -> usize { self.scopes.len() }

	/// Enter a new innermost scope.
	pub fn push_scope(&mut self) {
		self.scopes.push(HashMap::new());
		trace!(depth = self.depth(), "entered scope");
	}

	/// Leave the innermost scope, the global scope is never popped.
	pub fn pop_scope(&mut self) {
		if self.scopes.len() > 1 {
			self.scopes.pop();
		}
		trace!(depth = self.depth(), "left scope");
	}

	/// A variable statement doesn’t just define a new variable, it can also be
	/// used to redefine an existing variable in the same scope.
	pub fn define(&mut self, name: &str, value: Value) {
		if let Some(scope) = self.scopes.last_mut() {
			scope.insert(name.to_string(), value);
		}
	}

	pub fn get(&self, token: &Token) -> Result<&Value, RuntimeError> {
		self.scopes
			.iter()
			.rev()
			.find_map(|scope| scope.get(token.lexeme))
			.ok_or_else(|| undefined(token))
	}

	/// Assign a value to an existing variable in the innermost scope that has
	/// it.
	pub fn assign(&mut self, token: &Token, value: Value) -> Result<(), RuntimeError> {
		let slot = self
			.scopes
			.iter_mut()
			.rev()
			.find_map(|scope| scope.get_mut(token.lexeme))
			.ok_or_else(|| undefined(token))?;
		*slot = value;
		Ok(())
	}
}

fn undefined(token: &Token) -> RuntimeError {
	RuntimeError::UndefinedVariable { line: token.line, name: token.lexeme.to_string() }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::scanner::TokenType;

	fn name(lexeme: &str) -> Token<'_> { Token::new(TokenType::Identifier, lexeme, 4) }

	#[test]
	fn define_and_get() {
		let mut environment = Environment::new();
		environment.define("x", Value::Num(1.0));
		assert_eq!(environment.get(&name("x")), Ok(&Value::Num(1.0)));

		// Redefinition in the same scope replaces the value.
		environment.define("x", Value::Bool(true));
		assert_eq!(environment.get(&name("x")), Ok(&Value::Bool(true)));
	}

	#[test]
	fn undefined_variable() {
		let mut environment = Environment::new();
		let expected = RuntimeError::UndefinedVariable { line: 4, name: "missing".to_string() };
		assert_eq!(environment.get(&name("missing")), Err(expected.clone()));
		assert_eq!(environment.assign(&name("missing"), Value::Nil), Err(expected));
	}

	#[test]
	fn shadowing_leaves_outer_untouched() {
		let mut environment = Environment::new();
		environment.define("x", Value::Num(1.0));
		environment.push_scope();
		environment.define("x", Value::Num(2.0));
		assert_eq!(environment.get(&name("x")), Ok(&Value::Num(2.0)));
		environment.assign(&name("x"), Value::Num(3.0)).unwrap();
		environment.pop_scope();
		assert_eq!(environment.get(&name("x")), Ok(&Value::Num(1.0)));
	}

	#[test]
	fn assign_reaches_enclosing_scope() {
		let mut environment = Environment::new();
		environment.define("x", Value::Num(1.0));
		environment.push_scope();
		environment.push_scope();
		environment.assign(&name("x"), Value::Str("outer".to_string())).unwrap();
		assert_eq!(environment.depth(), 3);
		environment.pop_scope();
		environment.pop_scope();
		assert_eq!(environment.get(&name("x")), Ok(&Value::Str("outer".to_string())));
	}

	#[test]
	fn inner_declarations_end_with_their_scope() {
		let mut environment = Environment::new();
		environment.push_scope();
		environment.define("y", Value::Nil);
		environment.pop_scope();
		assert!(environment.get(&name("y")).is_err());

		// The global scope stays.
		environment.pop_scope();
		assert_eq!(environment.depth(), 1);
	}
}
