use std::fmt::Display;

use Value::*;

use crate::{
	error::interpreter::RuntimeError,
	parser::expression::LiteralValue,
	scanner::{Token, TokenType},
};

/// Value represents a runtime value in Lox.
///
/// Equality is structural, values of different kinds are never equal.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Value {
	Nil,
	Bool(bool),
	Num(f64),
	Str(String),
}

impl Display for Value {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Nil => write!(f, "nil"),
			Bool(b) => write!(f, "{b}"),
			// Integral numbers print without a fraction: `2`, not `2.0`.
			Num(n) => write!(f, "{n}"),
			Str(s) => write!(f, "{s}"),
		}
	}
}

impl From<&LiteralValue<'_>> for Value {
	fn from(literal: &LiteralValue<'_>) -> Self {
		match literal {
			LiteralValue::Nil => Nil,
			LiteralValue::Boolean(b) => Bool(*b),
			LiteralValue::Number(n) => Num(*n),
			LiteralValue::StringLiteral(s) => Str(s.to_string()),
		}
	}
}

impl Value {
	/// `false` and `nil` are falsy, everything else is truthy, `0` and `""`
	/// included.
	pub fn is_truthy(&self) -> bool { !matches!(self, Nil | Bool(false)) }

	/// Name of the value's kind, used in error messages.
	pub fn kind(&self) -> &'static str {
		match self {
			Nil => "nil",
			Bool(_) => "boolean",
			Num(_) => "number",
			Str(_) => "string",
		}
	}

	/// Performs a unary operation on this value.
	pub fn unary_op(&self, operator: &Token) -> Result<Value, RuntimeError> {
		match (operator.r#type, self) {
			(TokenType::Bang, v) => Ok(Bool(!v.is_truthy())),
			(TokenType::Minus, Num(n)) => Ok(Num(-n)),
			_ => Err(RuntimeError::OperandMustBeNumber { line: operator.line }),
		}
	}

	/// Performs a binary operation between two values.
	pub fn binary_op(&self, operator: &Token, right: &Self) -> Result<Value, RuntimeError> {
		use TokenType::*;

		let line = operator.line;
		match operator.r#type {
			EqualEqual => return Ok(Bool(self == right)),
			BangEqual => return Ok(Bool(self != right)),
			Plus => return self.plus(right, line),
			_ => {}
		}

		let (Num(l), Num(r)) = (self, right) else {
			return Err(RuntimeError::OperandsMustBeNumbers { line });
		};
		Ok(match operator.r#type {
			Minus => Num(l - r),
			Star => Num(l * r),
			// IEEE 754: `1 / 0` is `inf`, `0 / 0` is `NaN`.
			Slash => Num(l / r),
			Greater => Bool(l > r),
			GreaterEqual => Bool(l >= r),
			Less => Bool(l < r),
			LessEqual => Bool(l <= r),
			_ => return Err(RuntimeError::OperandsMustBeNumbers { line }),
		})
	}

	/// Adds two numbers, or concatenates when either side is a string.
	fn plus(&self, other: &Self, line: usize) -> Result<Value, RuntimeError> {
		match (self, other) {
			(Num(l), Num(r)) => Ok(Num(l + r)),
			(Str(_), _) | (_, Str(_)) => Ok(Str(format!("{self}{other}"))),
			_ => Err(RuntimeError::InvalidAddition { line, left: self.kind(), right: other.kind() }),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn operator(r#type: TokenType, lexeme: &str) -> Token<'_> { Token::new(r#type, lexeme, 1) }

	fn binary(left: Value, op: TokenType, right: Value) -> Result<Value, RuntimeError> {
		left.binary_op(&operator(op, "op"), &right)
	}

	#[test]
	fn truthiness() {
		assert!(!Nil.is_truthy());
		assert!(!Bool(false).is_truthy());
		assert!(Bool(true).is_truthy());
		assert!(Num(0.0).is_truthy());
		assert!(Str(String::new()).is_truthy());
	}

	#[test]
	fn display() {
		assert_eq!(Nil.to_string(), "nil");
		assert_eq!(Bool(true).to_string(), "true");
		assert_eq!(Num(2.0).to_string(), "2");
		assert_eq!(Num(-3.0).to_string(), "-3");
		assert_eq!(Num(2.5).to_string(), "2.5");
		assert_eq!(Str("hi".to_string()).to_string(), "hi");
	}

	#[test]
	fn plus() {
		use TokenType::Plus;
		assert_eq!(binary(Str("a".into()), Plus, Num(1.0)), Ok(Str("a1".into())));
		assert_eq!(binary(Num(1.0), Plus, Str("a".into())), Ok(Str("1a".into())));
		assert_eq!(binary(Str("a".into()), Plus, Nil), Ok(Str("anil".into())));
		assert_eq!(binary(Num(1.0), Plus, Num(1.0)), Ok(Num(2.0)));
		assert_eq!(
			binary(Bool(true), Plus, Num(1.0)),
			Err(RuntimeError::InvalidAddition { line: 1, left: "boolean", right: "number" })
		);
	}

	#[test]
	fn arithmetic_and_comparison() {
		use TokenType::{Greater, GreaterEqual, Less, LessEqual, Minus, Slash, Star};
		assert_eq!(binary(Num(5.0), Minus, Num(2.0)), Ok(Num(3.0)));
		assert_eq!(binary(Num(5.0), Star, Num(2.0)), Ok(Num(10.0)));
		assert_eq!(binary(Num(5.0), Slash, Num(2.0)), Ok(Num(2.5)));
		assert_eq!(binary(Num(1.0), Less, Num(2.0)), Ok(Bool(true)));
		assert_eq!(binary(Num(2.0), LessEqual, Num(2.0)), Ok(Bool(true)));
		assert_eq!(binary(Num(1.0), Greater, Num(2.0)), Ok(Bool(false)));
		assert_eq!(binary(Num(2.0), GreaterEqual, Num(3.0)), Ok(Bool(false)));
		assert_eq!(
			binary(Str("a".into()), Less, Str("b".into())),
			Err(RuntimeError::OperandsMustBeNumbers { line: 1 })
		);
		assert_eq!(binary(Nil, Minus, Num(1.0)), Err(RuntimeError::OperandsMustBeNumbers { line: 1 }));
	}

	#[test]
	fn division_by_zero_follows_ieee() {
		use TokenType::{EqualEqual, Slash};
		assert_eq!(binary(Num(1.0), Slash, Num(0.0)), Ok(Num(f64::INFINITY)));
		assert_eq!(binary(Num(-1.0), Slash, Num(0.0)), Ok(Num(f64::NEG_INFINITY)));
		let Ok(nan) = binary(Num(0.0), Slash, Num(0.0)) else { panic!("0 / 0 should not fail") };
		assert!(matches!(nan, Num(n) if n.is_nan()));
		assert_eq!(binary(nan.clone(), EqualEqual, nan), Ok(Bool(false)));
	}

	#[test]
	fn equality_across_kinds() {
		use TokenType::{BangEqual, EqualEqual};
		assert_eq!(binary(Nil, EqualEqual, Nil), Ok(Bool(true)));
		assert_eq!(binary(Nil, EqualEqual, Bool(false)), Ok(Bool(false)));
		assert_eq!(binary(Num(1.0), EqualEqual, Str("1".into())), Ok(Bool(false)));
		assert_eq!(binary(Str("a".into()), EqualEqual, Str("a".into())), Ok(Bool(true)));
		assert_eq!(binary(Num(1.0), BangEqual, Num(2.0)), Ok(Bool(true)));
	}

	#[test]
	fn unary() {
		assert_eq!(Num(3.0).unary_op(&operator(TokenType::Minus, "-")), Ok(Num(-3.0)));
		assert_eq!(Num(0.0).unary_op(&operator(TokenType::Bang, "!")), Ok(Bool(false)));
		assert_eq!(Nil.unary_op(&operator(TokenType::Bang, "!")), Ok(Bool(true)));
		assert_eq!(
			Str("x".into()).unary_op(&operator(TokenType::Minus, "-")),
			Err(RuntimeError::OperandMustBeNumber { line: 1 })
		);
	}
}
