//--> Imports <--

use std::iter;

use crate::ErrorKind;

use super::{
	Fault,
	LineResult as Result,
	lexer::{
		HeadToken,
		Operands,
		Token,
		TokenInner,
	},
	opcodes::OpcodeTable,
	parser,
};

use log::trace;

//--> Functions <--

/// Produces the bytes for one line: the resolved opcode, then one byte per operand token.
///
/// The head token is resolved up front; operand tokens are only read as the caller pulls them.
/// The caller is expected to stop at the first error.
pub(crate) fn emit_line<'source>(table: &OpcodeTable, head: &HeadToken<'source>, operands: Operands<'source>) -> impl Iterator<Item = Result<u8>> + 'source {
	let opcode = parser::resolve_head(table, head);

	iter::once(opcode).chain(operands.map(|token| parse_operand(&token)))
}

/// Reads an operand token as a base-16 byte.
///
/// An optional sign and "0x" prefix are accepted, as are single underscores between digit groups ("1_0", "0x_1f").
pub(crate) fn parse_operand(token: &Token) -> Result<u8> {
	let malformed = || Fault::new(token.span.clone(), ErrorKind::MalformedOperand(String::from(token.source)));

	if token.inner != TokenInner::Word { return Err(malformed()) }

	let (negative, magnitude) = match token.source.strip_prefix('-') {
		Some(rest) => (true, rest),
		None => (false, token.source.strip_prefix('+').unwrap_or(token.source)),
	};

	let digits = match magnitude.strip_prefix("0x").or_else(|| magnitude.strip_prefix("0X")) {
		Some(rest) => rest.strip_prefix('_').unwrap_or(rest),
		None => magnitude,
	};

	let well_formed = digits.split('_').all(|group| !group.is_empty() && group.bytes().all(|b| b.is_ascii_hexdigit()));

	if !well_formed { return Err(malformed()) }

	match u8::from_str_radix(&digits.replace('_', ""), 16) {
		Ok(byte) if !negative || byte == 0 => {
			trace!("Token {} -> {:#04x}", token, byte);
			Ok(byte)
		},
		_ => Err(Fault::new(token.span.clone(), ErrorKind::ByteOutOfRange(String::from(token.source)))),
	}
}

//--> Unit Tests <--
