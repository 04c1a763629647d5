//--> Imports <--

use std::{
	fmt,
	ops::Range,
};

use crate::ErrorKind;

use super::{
	Fault,
	LineResult as Result,
};

use logos::{
	Logos,
	SpannedIter,
};

//--> Constants <--

const MODE_DELIMITER: char = ',';

//--> Structs <--

#[derive(Clone, Debug)]
pub struct Token<'source> {
	pub inner: TokenInner,
	pub span: Range<usize>,
	pub source: &'source str,
}

/// The first token on a line, split into its mnemonic and the addressing mode written after the comma (if any).
#[derive(Clone, Debug)]
pub struct HeadToken<'source> {
	pub mnemonic: &'source str,
	pub mode: Option<&'source str>,
	pub span: Range<usize>,
	pub source: &'source str,
}

/// The tokens following the head token. Stops at the first comment.
pub struct Operands<'source> {
	tokens: SpannedIter<'source, TokenInner>,
	source: &'source str,
	finished: bool,
}

//--> Enums <--

#[derive(Clone, Copy, Debug, Logos, PartialEq)]
pub enum TokenInner {
	#[regex(r"#[^\n]*")]
	Comment,

	#[regex(r"[^ \t\r\n\f#][^ \t\r\n\f]*")]
	Word,

	#[error]
	#[regex(r"[ \t\r\n\f]+", logos::skip)]
	Error
}

//--> Functions <--

/// Splits one source line into its head token and the operand tokens after it.
///
/// Lines that are blank or start with a comment give `Ok(None)`.
pub(crate) fn tokenize(line_text: &str) -> Result<Option<(HeadToken<'_>, Operands<'_>)>> {
	let mut tokens = TokenInner::lexer(line_text).spanned();

	let (inner, span) = match tokens.next() {
		Some(token) => token,
		None => return Ok(None),
	};

	match inner {
		TokenInner::Comment => Ok(None),
		TokenInner::Word => {
			let head = HeadToken::split(span, line_text)?;
			Ok(Some((head, Operands { tokens, source: line_text, finished: false })))
		},
		TokenInner::Error => Err(Fault::new(span.clone(), ErrorKind::MalformedHeadToken(String::from(&line_text[span])))),
	}
}

impl<'source> Token<'source> {
	pub fn new(inner: TokenInner, span: Range<usize>, line_text: &'source str) -> Token<'source> {
		let source = &line_text[span.clone()];
		Token { inner, span, source }
	}
}

impl fmt::Display for Token<'_> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self.inner {
			TokenInner::Comment => write!(f, "a comment"),
			TokenInner::Word => write!(f, "'{}'", self.source),
			TokenInner::Error => write!(f, "unlexable text '{}'", self.source),
		}
	}
}

impl<'source> HeadToken<'source> {
	fn split(span: Range<usize>, line_text: &'source str) -> Result<HeadToken<'source>> {
		let source = &line_text[span.clone()];

		match source.split(MODE_DELIMITER).collect::<Vec<&str>>().as_slice() {
			[mnemonic] => Ok(HeadToken { mnemonic: *mnemonic, mode: None, span, source }),
			[mnemonic, mode] => Ok(HeadToken { mnemonic: *mnemonic, mode: Some(*mode), span, source }),
			_ => Err(Fault::new(span, ErrorKind::MalformedHeadToken(String::from(source)))),
		}
	}
}

impl<'source> Iterator for Operands<'source> {
	type Item = Token<'source>;

	fn next(&mut self) -> Option<Token<'source>> {
		if self.finished { return None }

		match self.tokens.next()? {
			(TokenInner::Comment, _) => {
				self.finished = true;
				None
			},
			(inner, span) => Some(Token::new(inner, span, self.source)),
		}
	}
}

//--> Unit Tests <--
