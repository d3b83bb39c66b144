/// A token produced by the scanner, the copying is lightweight
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Token<'a> {
	pub r#type:  TokenType,
	/// The exact slice of source text the token was scanned from.
	pub lexeme:  &'a str,
	/// Runtime value of `String` and `Number` tokens.
	pub literal: Option<Literal<'a>>,
	pub line:    usize,
}

impl<'a> Token<'a> {
	pub fn new(r#type: TokenType, lexeme: &'a str, line: usize) -> Self {
		Self { r#type, lexeme, literal: None, line }
	}

	pub fn with_literal(mut self, literal: Literal<'a>) -> Self {
		self.literal = Some(literal);
		self
	}
}

/// Literal value carried by a token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Literal<'a> {
	/// String contents without the surrounding quotes.
	Str(&'a str),
	Number(f64),
}

/// The different types of tokens in Lox
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum TokenType {
	/// Left parenthesis `(`.
	LeftParen,
	/// Right parenthesis `)`.
	RightParen,
	/// Left brace `{`.
	LeftBrace,
	/// Right brace `}`.
	RightBrace,
	/// Comma `,`.
	Comma,
	/// Dot `.`.
	Dot,
	/// Minus `-`.
	Minus,
	/// Plus `+`.
	Plus,
	/// Semicolon `;`.
	Semicolon,
	/// Slash `/`.
	Slash,
	/// Asterisk `*`.
	Star,
	/// Bang `!`.
	Bang,
	/// Bang equal `!=`.
	BangEqual,
	/// Equal `=`.
	Equal,
	/// Equal equal `==`.
	EqualEqual,
	/// Greater than `>`.
	Greater,
	/// Greater than or equal `>=`.
	GreaterEqual,
	/// Less than `<`.
	Less,
	/// Less than or equal `<=`.
	LessEqual,
	/// Identifier, e.g. variable name.
	Identifier,
	/// String literal, e.g. `"hello"`.
	String,
	/// Number literal, e.g. `123.45`.
	Number,
	/// Logical AND keyword.
	And,
	/// Class keyword.
	Class,
	/// Else keyword.
	Else,
	/// Boolean literal `false`.
	False,
	/// Function keyword.
	Fun,
	/// For loop keyword.
	For,
	/// If statement keyword.
	If,
	/// Nil literal (null equivalent).
	Nil,
	/// Logical OR keyword.
	Or,
	/// Print statement keyword.
	Print,
	/// Return statement keyword.
	Return,
	/// Super keyword (for inheritance).
	Super,
	/// This keyword (current instance reference).
	This,
	/// Boolean literal `true`.
	True,
	/// Variable declaration keyword.
	Var,
	/// While loop keyword.
	While,
	/// End of file/input.
	Eof,
}

impl TokenType {
	/// Reserved words are matched against the whole identifier text.
	pub fn keyword_or_identifier(value: &str) -> Self {
		match value {
			"and" => TokenType::And,
			"class" => TokenType::Class,
			"else" => TokenType::Else,
			"false" => TokenType::False,
			"for" => TokenType::For,
			"fun" => TokenType::Fun,
			"if" => TokenType::If,
			"nil" => TokenType::Nil,
			"or" => TokenType::Or,
			"print" => TokenType::Print,
			"return" => TokenType::Return,
			"super" => TokenType::Super,
			"this" => TokenType::This,
			"true" => TokenType::True,
			"var" => TokenType::Var,
			"while" => TokenType::While,
			_ => TokenType::Identifier,
		}
	}

	/// Tokens a statement can start with, used by the parser to resynchronize.
	pub fn starts_statement(&self) -> bool {
		use TokenType::*;
		matches!(self, Class | Fun | Var | For | If | While | Print | Return)
	}
}
