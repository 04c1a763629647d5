//--> Imports <--

use crate::ErrorKind;

use super::{
	Fault,
	LineResult as Result,
	lexer::HeadToken,
	mode::AddressingMode,
	opcodes::{
		Opcode,
		OpcodeTable,
	},
};

use log::trace;

//--> Functions <--

/// Resolves a head token to its opcode.
///
/// A head token without a mode is only accepted when the mnemonic has exactly one addressing mode in the table.
pub(crate) fn resolve_head(table: &OpcodeTable, head: &HeadToken) -> Result<Opcode> {
	if !table.contains(head.mnemonic) {
		return Err(Fault::new(head.span.clone(), ErrorKind::UnknownInstruction(String::from(head.mnemonic))));
	}

	let (mode, elided) = match head.mode {
		Some(text) => match AddressingMode::resolve(text) {
			Some(mode) => (Some(mode), false),
			None => return Err(Fault::new(head.span.clone(), ErrorKind::MalformedHeadToken(String::from(head.source)))),
		},
		None => (table.sole_mode(head.mnemonic), true),
	};

	let opcode = mode.and_then(|m| table.lookup(head.mnemonic, m));

	match (mode, opcode) {
		(Some(mode), Some(opcode)) => {
			trace!("Token {} -> {:#04x} ({} {}{})", head.source, opcode, head.mnemonic, mode, if elided { ", inferred" } else { "" });
			Ok(opcode)
		},
		_ => Err(Fault::new(head.span.clone(), ErrorKind::UnsupportedAddressingMode { mnemonic: String::from(head.mnemonic), mode }))
	}
}

//--> Unit Tests <--
