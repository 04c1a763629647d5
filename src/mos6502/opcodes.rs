//--> Imports <--

use std::collections::HashMap;

use super::mode::AddressingMode::{
	self,
	Absolute as ABS,
	AbsoluteX as ABS_X,
	AbsoluteY as ABS_Y,
	Accumulator as ACCUM,
	Immediate as IMMED,
	Implied as IMPL,
	Indirect as INDIR,
	IndirectX as INDIR_X,
	IndirectY as INDIR_Y,
	Relative as REL,
	ZeroPage as ZPAGE,
	ZeroPageX as ZPAGE_X,
	ZeroPageY as ZPAGE_Y,
};

//--> Type Aliases <--

pub type Opcode = u8;

pub type ModeMap = HashMap<AddressingMode, Opcode>;

//--> Structs <--

/// Maps (mnemonic, addressing mode) pairs to opcode bytes. Built once, read only afterwards.
pub struct OpcodeTable {
	instructions: HashMap<&'static str, ModeMap>,
}

//--> Constants <--

pub(super) static NES_OPCODES: &[(&str, &[(AddressingMode, Opcode)])] = &[
	("ADC", &[(IMMED, 0x69), (ZPAGE, 0x65), (ZPAGE_X, 0x75), (ABS, 0x6D), (ABS_X, 0x7D), (ABS_Y, 0x79), (INDIR_X, 0x61), (INDIR_Y, 0x71)]),
	("AND", &[(IMMED, 0x29), (ZPAGE, 0x25), (ZPAGE_X, 0x35), (ABS, 0x2D), (ABS_X, 0x3D), (ABS_Y, 0x39), (INDIR_X, 0x21), (INDIR_Y, 0x31)]),
	("ASL", &[(ACCUM, 0x0A), (ZPAGE, 0x06), (ZPAGE_X, 0x16), (ABS, 0x0E), (ABS_X, 0x1E)]),
	("BCC", &[(REL, 0x90)]),
	("BCS", &[(REL, 0xB0)]),
	("BEQ", &[(REL, 0xF0)]),
	("BIT", &[(ZPAGE, 0x24), (ABS, 0x2C)]),
	("BMI", &[(REL, 0x30)]),
	("BNE", &[(REL, 0xD0)]),
	("BPL", &[(REL, 0x10)]),
	("BRK", &[(IMPL, 0x00)]),
	("BVC", &[(REL, 0x50)]),
	("BVS", &[(REL, 0x70)]),
	("CLC", &[(IMPL, 0x18)]),
	("CLD", &[(IMPL, 0xD8)]),
	("CLI", &[(IMPL, 0x58)]),
	("CLV", &[(IMPL, 0xB8)]),
	("CMP", &[(IMMED, 0xC9), (ZPAGE, 0xC5), (ZPAGE_X, 0xD5), (ABS, 0xCD), (ABS_X, 0xDD), (ABS_Y, 0xD9), (INDIR_X, 0xC1), (INDIR_Y, 0xD1)]),
	("CPX", &[(IMMED, 0xE0), (ZPAGE, 0xE4), (ABS, 0xEC)]),
	("CPY", &[(IMMED, 0xC0), (ZPAGE, 0xC4), (ABS, 0xCC)]),
	("DEC", &[(ZPAGE, 0xC6), (ZPAGE_X, 0xD6), (ABS, 0xCE), (ABS_X, 0xDE)]),
	("DEX", &[(IMPL, 0xCA)]),
	("DEY", &[(IMPL, 0x88)]),
	("EOR", &[(IMMED, 0x49), (ZPAGE, 0x45), (ZPAGE_X, 0x55), (ABS, 0x4D), (ABS_X, 0x5D), (ABS_Y, 0x59), (INDIR_X, 0x41), (INDIR_Y, 0x51)]),
	("INC", &[(ZPAGE, 0xE6), (ZPAGE_X, 0xF6), (ABS, 0xEE), (ABS_X, 0xFE)]),
	("INX", &[(IMPL, 0xE8)]),
	("INY", &[(IMPL, 0xC8)]),
	("JMP", &[(ABS, 0x4C), (INDIR, 0x6C)]),
	("JSR", &[(ABS, 0x20)]),
	("LDA", &[(IMMED, 0xA9), (ZPAGE, 0xA5), (ZPAGE_X, 0xB5), (ABS, 0xAD), (ABS_X, 0xBD), (ABS_Y, 0xB9), (INDIR_X, 0xA1), (INDIR_Y, 0xB1)]),
	("LDX", &[(IMMED, 0xA2), (ZPAGE, 0xA6), (ZPAGE_Y, 0xB6), (ABS, 0xAE), (ABS_Y, 0xBE)]),
	("LDY", &[(IMMED, 0xA0), (ZPAGE, 0xA4), (ZPAGE_X, 0xB4), (ABS, 0xAC), (ABS_X, 0xBC)]),
	("LSR", &[(ACCUM, 0x4A), (ZPAGE, 0x46), (ZPAGE_X, 0x56), (ABS, 0x4E), (ABS_X, 0x5E)]),
	("NOP", &[(IMPL, 0xEA)]),
	("ORA", &[(IMMED, 0x09), (ZPAGE, 0x05), (ZPAGE_X, 0x15), (ABS, 0x0D), (ABS_X, 0x1D), (ABS_Y, 0x19), (INDIR_X, 0x01), (INDIR_Y, 0x11)]),
	("PHA", &[(IMPL, 0x48)]),
	("PHP", &[(IMPL, 0x08)]),
	("PLA", &[(IMPL, 0x68)]),
	("PLP", &[(IMPL, 0x28)]),
	("ROL", &[(ACCUM, 0x2A), (ZPAGE, 0x26), (ZPAGE_X, 0x36), (ABS, 0x2E), (ABS_X, 0x3E)]),
	("ROR", &[(ACCUM, 0x6A), (ZPAGE, 0x66), (ZPAGE_X, 0x76), (ABS, 0x6E), (ABS_X, 0x7E)]),
	("RTI", &[(IMPL, 0x40)]),
	("RTS", &[(IMPL, 0x60)]),
	("SBC", &[(IMMED, 0xE9), (ZPAGE, 0xE5), (ZPAGE_X, 0xF5), (ABS, 0xED), (ABS_X, 0xFD), (ABS_Y, 0xF9), (INDIR_X, 0xE1), (INDIR_Y, 0xF1)]),
	("SEC", &[(IMPL, 0x38)]),
	("SED", &[(IMPL, 0xF8)]),
	("SEI", &[(IMPL, 0x78)]),
	("STA", &[(ZPAGE, 0x85), (ZPAGE_X, 0x95), (ABS, 0x8D), (ABS_X, 0x9D), (ABS_Y, 0x99), (INDIR_X, 0x81), (INDIR_Y, 0x91)]),
	("STX", &[(ZPAGE, 0x86), (ZPAGE_Y, 0x96), (ABS, 0x8E)]),
	("STY", &[(ZPAGE, 0x84), (ZPAGE_X, 0x94), (ABS, 0x8C)]),
	("TAX", &[(IMPL, 0xAA)]),
	("TAY", &[(IMPL, 0xA8)]),
	("TSX", &[(IMPL, 0xBA)]),
	("TXA", &[(IMPL, 0x8A)]),
	("TXS", &[(IMPL, 0x9A)]),
	("TYA", &[(IMPL, 0x98)]),
];

//--> Functions <--

impl OpcodeTable {
	/// The documented NMOS 6502 instruction set, as run by the NES.
	pub fn nes() -> OpcodeTable { OpcodeTable::from_entries(NES_OPCODES) }

	pub fn from_entries(entries: &[(&'static str, &[(AddressingMode, Opcode)])]) -> OpcodeTable {
		let instructions = entries.iter()
			.map(|(mnemonic, modes)| (*mnemonic, modes.iter().copied().collect::<ModeMap>()))
			.collect();

		OpcodeTable { instructions }
	}

	pub fn contains(&self, mnemonic: &str) -> bool { self.instructions.contains_key(mnemonic) }

	pub fn lookup(&self, mnemonic: &str, mode: AddressingMode) -> Option<Opcode> {
		self.instructions.get(mnemonic)?.get(&mode).copied()
	}

	/// How many addressing modes the mnemonic supports. Zero for unknown mnemonics.
	pub fn mode_count(&self, mnemonic: &str) -> usize {
		self.instructions.get(mnemonic).map_or(0, |modes| modes.len())
	}

	/// The mnemonic's only addressing mode, if it has exactly one.
	pub fn sole_mode(&self, mnemonic: &str) -> Option<AddressingMode> {
		if self.mode_count(mnemonic) != 1 { return None }

		self.instructions.get(mnemonic)?.keys().next().copied()
	}
}

//--> Unit Tests <--

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn nes_table_covers_the_documented_instruction_set() {
		let table = OpcodeTable::nes();

		assert_eq!(table.instructions.len(), 56);
		assert_eq!(table.instructions.values().map(|modes| modes.len()).sum::<usize>(), 151);
	}

	#[test]
	fn opcodes_are_unique() {
		let table = OpcodeTable::nes();
		let mut seen = HashMap::new();

		for (mnemonic, modes) in &table.instructions {
			for (mode, opcode) in modes {
				if let Some(previous) = seen.insert(*opcode, (*mnemonic, *mode)) {
					panic!("opcode {:#04x} assigned to both {:?} and {:?}", opcode, previous, (mnemonic, mode));
				}
			}
		}
	}

	#[test]
	fn lookup_finds_known_pairs() {
		let table = OpcodeTable::nes();

		assert_eq!(table.lookup("LDA", IMMED), Some(0xA9));
		assert_eq!(table.lookup("ADC", ABS), Some(0x6D));
		assert_eq!(table.lookup("JMP", INDIR), Some(0x6C));
		assert_eq!(table.lookup("LDX", ZPAGE_Y), Some(0xB6));
		assert_eq!(table.lookup("LDA", ACCUM), None);
		assert_eq!(table.lookup("lda", IMMED), None);
		assert_eq!(table.lookup("FOO", IMMED), None);
	}

	#[test]
	fn sole_mode_only_for_single_entry_mnemonics() {
		let table = OpcodeTable::nes();

		assert_eq!(table.sole_mode("BRK"), Some(IMPL));
		assert_eq!(table.sole_mode("BEQ"), Some(REL));
		assert_eq!(table.sole_mode("JSR"), Some(ABS));
		assert_eq!(table.sole_mode("JMP"), None);
		assert_eq!(table.sole_mode("FOO"), None);
		assert_eq!(table.mode_count("LDA"), 8);
		assert_eq!(table.mode_count("FOO"), 0);
	}

	#[test]
	fn custom_tables_answer_the_same_queries() {
		const ENTRIES: &[(&str, &[(AddressingMode, Opcode)])] = &[("ONE", &[(ZPAGE, 0x01)]), ("TWO", &[(ZPAGE, 0x02), (ABS, 0x03)])];

		let table = OpcodeTable::from_entries(ENTRIES);

		assert!(table.contains("ONE"));
		assert!(!table.contains("BRK"));
		assert_eq!(table.sole_mode("ONE"), Some(ZPAGE));
		assert_eq!(table.sole_mode("TWO"), None);
		assert_eq!(table.lookup("TWO", ABS), Some(0x03));
	}
}
