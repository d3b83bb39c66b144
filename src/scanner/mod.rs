//! Represents a lexical token in the Lox language.
//!
//! Keywords are part of the shape of the language’s grammar, so the parser
//! often has code like, “If the next token is `while` then do . . . ” That
//! means the parser wants to know not just that it has a lexeme for some
//! identifier, but that it has a reserved word, and which keyword it is.
//!
//! There are lexemes for literal values, numbers and strings. Since the scanner
//! has to walk each character in the literal to correctly identify it, it also
//! converts that textual representation to the value the interpreter will use
//! later.
//!
//! We can’t easily detect a `reserved word` until we’ve reached the end of what
//! might instead be an identifier, this is `maximal munch`.
//!
//! Scan errors don't stop the scanner: the offending characters are skipped,
//! the error is recorded and scanning goes on, so one run reports every
//! lexical error in the source.
mod token;

use std::{iter::Peekable, str::CharIndices};

use TokenType::*;
use anyhow::Context;
pub(crate) use token::*;
use tracing::debug;

use crate::{
	LoxError,
	error::scanner::{ScanError, ScanErrorType, ScannerError},
};

/// Tokens of a whole source plus the errors met while scanning it.
#[derive(Debug)]
pub(crate) struct Scanned<'a> {
	/// Always terminated by an `Eof` token.
	pub tokens: Vec<Token<'a>>,
	pub errors: Vec<ScanError>,
}

/// A scanner for Lox source code
pub(crate) struct Scanner<'a> {
	/// User input source code
	source:      &'a str,
	/// User input source code iterator
	source_iter: Peekable<CharIndices<'a>>,
	/// Points at the beginning of the current lexeme
	start:       usize,
	/// Points just past the character last consumed
	cursor:      usize,
	/// Tracks what source line `cursor` is on so we can produce tokens that know
	/// their location.
	line:        usize,
}

impl<'a> Scanner<'a> {
	pub fn new(source: &'a str) -> Self {
		let source_iter = source.char_indices().peekable();

		Self { source, source_iter, start: 0, cursor: 0, line: 1 }
	}

	/// Scan all tokens from the source code
	pub fn scan_tokens(mut self) -> Result<Scanned<'a>, LoxError> {
		let mut tokens = Vec::new();
		let mut errors = Vec::new();
		while let Some(&(index, _)) = self.source_iter.peek() {
			// We are at the beginning of the next lexeme.
			self.start = index;
			self.cursor = self.start;
			match self.scan_token() {
				Ok(Some(token)) => tokens.push(token),
				Ok(None) => {}
				Err(ScannerError::ScanError(e)) => errors.push(e),
				Err(ScannerError::InternalError(e)) => return Err(e.into()),
			}
		}
		tokens.push(Token::new(Eof, "", self.line));
		debug!(tokens = tokens.len(), errors = errors.len(), "scanned source");
		Ok(Scanned { tokens, errors })
	}

	/// Scan a single token from the source code, whitespace and comments give
	/// `None`.
	fn scan_token(&mut self) -> Result<Option<Token<'a>>, ScannerError> {
		let next_char = self.advance().context("Unexpected EOF")?;
		#[rustfmt::skip]
		let r#type = match next_char {
			'(' => LeftParen,
			')' => RightParen,
			'{' => LeftBrace,
			'}' => RightBrace,
			',' => Comma,
			'.' => Dot,
			'-' => Minus,
			'+' => Plus,
			';' => Semicolon,
			'*' => Star,
			'!' => if self.match_next('=') { BangEqual } else { Bang },
			'=' => if self.match_next('=') { EqualEqual } else { Equal },
			'<' => if self.match_next('=') { LessEqual } else { Less },
			'>' => if self.match_next('=') { GreaterEqual } else { Greater },
			'/' => if self.match_next('/') {
				while self.peek().is_some_and(|c| c != '\n') { self.advance(); }
				return Ok(None);
			} else { Slash },
			' ' | '\r' | '\t' => return Ok(None),
			'\n' => { self.line += 1; return Ok(None); }
			'"' => return self.string().map(Some),
			c if c.is_ascii_digit() => return self.number().map(Some),
			c if c.is_ascii_alphabetic() || c == '_' => self.identifier(),
			_ => return Err(ScanError::new(self.line, ScanErrorType::UnexpectedCharacter(next_char)).into()),
		};

		Ok(Some(Token::new(r#type, self.lexeme(), self.line)))
	}

	/// Match the next character if it is the expected one
	fn match_next(&mut self, expected: char) -> bool {
		matches!(self.peek(), Some(c) if c == expected && { self.advance(); true })
	}

	/// Advance to the next character
	fn advance(&mut self) -> Option<char> {
		let (i, c) = self.source_iter.next()?;
		self.cursor = i + c.len_utf8();
		Some(c)
	}

	/// Peek the current character
	fn peek(&mut self) -> Option<char> { self.source_iter.peek().map(|&(_, c)| c) }

	/// Peek the second character ahead
	fn peek_second(&self) -> Option<char> {
		let mut it = self.source_iter.clone();
		it.next()?;
		it.peek().map(|&(_, c)| c)
	}

	fn lexeme(&self) -> &'a str { &self.source[self.start..self.cursor] }

	/// Scan a string literal, the error is reported at the line the string
	/// starts on.
	fn string(&mut self) -> Result<Token<'a>, ScannerError> {
		let start_line = self.line;
		while let Some(c) = self.peek() {
			if c == '"' {
				break;
			}
			if c == '\n' {
				self.line += 1
			}
			self.advance();
		}

		self.peek().ok_or_else(|| ScanError::new(start_line, ScanErrorType::UnterminatedString))?;
		self.advance(); // The closing "
		let value = &self.source[self.start + 1..self.cursor - 1];
		Ok(Token::new(String, self.lexeme(), self.line).with_literal(Literal::Str(value)))
	}

	/// Scan a number literal
	fn number(&mut self) -> Result<Token<'a>, ScannerError> {
		while self.peek().is_some_and(|c| c.is_ascii_digit()) {
			self.advance();
		}

		// Look for a fractional part.
		if self.peek() == Some('.') && self.peek_second().is_some_and(|c| c.is_ascii_digit()) {
			self.advance(); // consume '.'
			while self.peek().is_some_and(|c| c.is_ascii_digit()) {
				self.advance();
			}
		}

		let lexeme = self.lexeme();
		let value = lexeme.parse().with_context(|| format!("Failed to parse number literal {lexeme}"))?;
		Ok(Token::new(Number, lexeme, self.line).with_literal(Literal::Number(value)))
	}

	/// Scan an identifier or keyword
	fn identifier(&mut self) -> TokenType {
		while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
			self.advance();
		}
		TokenType::keyword_or_identifier(self.lexeme())
	}
}
