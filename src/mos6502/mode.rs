//--> Imports <--

use std::fmt;

//--> Enums <--

/// How an instruction locates its operand.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AddressingMode {
	Immediate,
	ZeroPage,
	ZeroPageX,
	ZeroPageY,
	Absolute,
	AbsoluteX,
	AbsoluteY,
	Indirect,
	IndirectX,
	IndirectY,
	Accumulator,
	Relative,
	Implied,
}

//--> Functions <--

impl AddressingMode {
	/// Every addressing mode, in table order.
	pub const ALL: [AddressingMode; 13] = [
		AddressingMode::Immediate,
		AddressingMode::ZeroPage,
		AddressingMode::ZeroPageX,
		AddressingMode::ZeroPageY,
		AddressingMode::Absolute,
		AddressingMode::AbsoluteX,
		AddressingMode::AbsoluteY,
		AddressingMode::Indirect,
		AddressingMode::IndirectX,
		AddressingMode::IndirectY,
		AddressingMode::Accumulator,
		AddressingMode::Relative,
		AddressingMode::Implied,
	];

	/// Maps a head token's mode text to an addressing mode.
	///
	/// Both the short aliases ("I", "ZX", ...) and the canonical spellings ("IMMED", "ZPAGE_X", ...) are accepted.
	/// ZEROPAGE_Y and INDIRECT have no short alias, so the canonical spelling is the only way to name them.
	/// Anything else yields `None`.
	pub fn resolve(text: &str) -> Option<AddressingMode> {
		match text {
			"I" => Some(AddressingMode::Immediate),
			"Z" => Some(AddressingMode::ZeroPage),
			"ZX" => Some(AddressingMode::ZeroPageX),
			"A" => Some(AddressingMode::Absolute),
			"AX" => Some(AddressingMode::AbsoluteX),
			"AY" => Some(AddressingMode::AbsoluteY),
			"IX" => Some(AddressingMode::IndirectX),
			"IY" => Some(AddressingMode::IndirectY),
			"ACM" => Some(AddressingMode::Accumulator),
			"R" => Some(AddressingMode::Relative),
			"IL" => Some(AddressingMode::Implied),
			_ => AddressingMode::ALL.iter().copied().find(|mode| mode.canonical() == text)
		}
	}

	/// The spelling used for this mode in source text and diagnostics.
	pub fn canonical(&self) -> &'static str {
		match self {
			AddressingMode::Immediate => "IMMED",
			AddressingMode::ZeroPage => "ZPAGE",
			AddressingMode::ZeroPageX => "ZPAGE_X",
			AddressingMode::ZeroPageY => "ZPAGE_Y",
			AddressingMode::Absolute => "ABS",
			AddressingMode::AbsoluteX => "ABS_X",
			AddressingMode::AbsoluteY => "ABS_Y",
			AddressingMode::Indirect => "INDIR",
			AddressingMode::IndirectX => "INDIR_X",
			AddressingMode::IndirectY => "INDIR_Y",
			AddressingMode::Accumulator => "ACCUM",
			AddressingMode::Relative => "REL",
			AddressingMode::Implied => "IMPL",
		}
	}
}

impl fmt::Display for AddressingMode {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", self.canonical())
	}
}

//--> Unit Tests <--

#[cfg(test)]
mod tests {
	use super::AddressingMode;

	const SHORTHANDS: [(&str, AddressingMode); 11] = [
		("I", AddressingMode::Immediate),
		("Z", AddressingMode::ZeroPage),
		("ZX", AddressingMode::ZeroPageX),
		("A", AddressingMode::Absolute),
		("AX", AddressingMode::AbsoluteX),
		("AY", AddressingMode::AbsoluteY),
		("IX", AddressingMode::IndirectX),
		("IY", AddressingMode::IndirectY),
		("ACM", AddressingMode::Accumulator),
		("R", AddressingMode::Relative),
		("IL", AddressingMode::Implied),
	];

	#[test]
	fn shorthands_resolve_to_their_modes() {
		for (text, mode) in SHORTHANDS {
			assert_eq!(AddressingMode::resolve(text), Some(mode), "shorthand {}", text);
		}
	}

	#[test]
	fn resolution_is_deterministic() {
		for (text, _) in SHORTHANDS {
			assert_eq!(AddressingMode::resolve(text), AddressingMode::resolve(text));
		}
	}

	#[test]
	fn canonical_spellings_pass_through() {
		for mode in AddressingMode::ALL {
			assert_eq!(AddressingMode::resolve(mode.canonical()), Some(mode));
		}

		assert_eq!(AddressingMode::resolve("ZPAGE_Y"), Some(AddressingMode::ZeroPageY));
		assert_eq!(AddressingMode::resolve("INDIR"), Some(AddressingMode::Indirect));
	}

	#[test]
	fn unknown_text_is_rejected() {
		assert_eq!(AddressingMode::resolve(""), None);
		assert_eq!(AddressingMode::resolve("i"), None);
		assert_eq!(AddressingMode::resolve("ZY"), None);
		assert_eq!(AddressingMode::resolve("IMMEDIATE"), None);
	}
}
