//! # How bare text turns into running code
//!
//! User's source code: `var average = (min + max) / 2;`

//! ## Scanning
//!
//! Also known as `lexing` or `lexical analysis`, takes in the characters and
//! converts them into tokens. Single characters `(`, `,`, `.`, numbers `123`,
//! string literals `"hi!"`, identifiers `min` are all tokens.
//!
//! Whitespaces and comments are ignored. So the tokens are
//! `["var", "average", "=", "(", "min", "+", "max", ")", "/", "2", ";"]`.

//! ## Parsing
//!
//! Where our syntax gets `syntactic`. A `parser` builds a tree structure of
//! tokens -- `parse tree` or `abstract syntax tree` or `AST`. The `parser` also
//! report `syntax errors`.
//!
//! ``` markdown
//! average (Stmt.Var)
//! └── / (Expr.Binary)
//!     ├── (group) (Expr.Grouping)
//!     │   └── + (Expr.Binary)
//!     │       ├── min (Expr.Variable)
//!     │       └── max (Expr.Variable)
//!     └── 2 (Expr.Literal)
//! ```

//! ## Tree-walk interpreter
//!
//! Execute code right after parsing it to AST. Each statement runs for its
//! side effects, each expression is evaluated recursively to a value.
//! Variables live in a stack of scopes, a block pushes a scope on entry and
//! pops it on exit.

//! ## Errors
//!
//! Scan errors and syntax errors are collected and reported together, the
//! program only runs when there are none. A runtime error stops the program.
//! Every error is reported as `[line N] Error : message`.

pub mod cli;
mod environment;
mod error;
mod interpreter;
mod loxer;
mod parser;
mod scanner;
mod statement;

pub use error::{
	Diagnostic, LoxError,
	interpreter::RuntimeError,
	parser::{ParseError, ParseErrorType},
	scanner::{ScanError, ScanErrorType},
};
pub use loxer::{Loxer, Outcome};
