//--> Imports <--

mod emit;

mod lexer;

pub mod mode;

pub mod opcodes;

mod parser;

use std::{
	fmt::Write as _,
	fs,
	io::{
		self,
		Write,
	},
	ops::Range,
	path::Path,
};

use crate::{
	Config,
	Error,
	ErrorKind,
};

use log::{
	debug,
	info,
};

use opcodes::OpcodeTable;

use tempfile::NamedTempFile;

//--> Type Aliases <--

pub(crate) type LineResult<T> = std::result::Result<T, Fault>;

pub(crate) type Result<T> = std::result::Result<T, Error>;

//--> Structs <--

/// An error found while handling a single line, before it is tied to a file and line number.
#[derive(Debug)]
pub(crate) struct Fault {
	pub span: Range<usize>,
	pub kind: ErrorKind,
}

/// Everything produced by a successful assembly.
#[derive(Debug, Default)]
pub(crate) struct Image {
	pub bytes: Vec<u8>,
	pub rows: Vec<Row>,
}

/// One instruction line and where its bytes landed in the image.
#[derive(Debug)]
pub(crate) struct Row {
	pub line: usize,
	pub offset: usize,
	pub len: usize,
	pub source: String,
}

//--> Functions <--

/// Assembles the configured input file and commits the image (and listing, if asked for).
///
/// Returns the number of bytes written. Nothing is written unless every line assembled.
pub(crate) fn assemble(config: &Config) -> Result<usize> {
	info!("{}: Assembling file...", config.input_path.display());

	let source = fs::read_to_string(&config.input_path).map_err(|err| io_error(&config.input_path, "read", err))?;

	let table = OpcodeTable::nes();
	let image = assemble_source(&table, &config.input_path, &source)?;

	// Nothing is renamed into place until every requested file is staged.
	let staged_image = stage(&config.output_path, &image.bytes)?;

	let staged_listing = match &config.listing_path {
		Some(listing_path) => Some((listing_path, stage(listing_path, image.listing().as_bytes())?)),
		None => None,
	};

	if let Some((listing_path, file)) = staged_listing {
		persist(listing_path, file)?;
		info!("{}: Wrote listing.", listing_path.display());
	}

	persist(&config.output_path, staged_image)?;
	info!("{}: Wrote {} bytes.", config.output_path.display(), image.bytes.len());

	Ok(image.bytes.len())
}

/// Translates source text into an image, line by line. Stops at the first error.
pub(crate) fn assemble_source(table: &OpcodeTable, path: &Path, source: &str) -> Result<Image> {
	let mut image = Image::default();

	for (index, line_text) in source.lines().enumerate() {
		let line_num = index + 1;
		let locate = |fault: Fault| fault.locate(path, line_num);

		debug!("{}: {}: Parsing line: {}", path.display(), line_num, line_text.trim());

		let (head, operands) = match lexer::tokenize(line_text).map_err(locate)? {
			Some(tokens) => tokens,
			None => continue,
		};

		let offset = image.bytes.len();

		for byte in emit::emit_line(table, &head, operands) {
			image.bytes.push(byte.map_err(locate)?);
		}

		image.rows.push(Row { line: line_num, offset, len: image.bytes.len() - offset, source: String::from(line_text.trim_end()) });
	}

	Ok(image)
}

/// Writes the contents to a temporary file beside the destination. Nothing is visible at `path` until it is persisted.
fn stage(path: &Path, contents: &[u8]) -> Result<NamedTempFile> {
	let directory = match path.parent() {
		Some(dir) if !dir.as_os_str().is_empty() => dir,
		_ => Path::new("."),
	};

	let mut file = tempfile::Builder::new()
		.prefix(".uasm")
		.tempfile_in(directory)
		.map_err(|err| io_error(path, "create", err))?;

	file.write_all(contents).map_err(|err| io_error(path, "write", err))?;

	Ok(file)
}

/// Renames a staged file over the destination.
fn persist(path: &Path, file: NamedTempFile) -> Result<()> {
	file.persist(path).map_err(|err| io_error(path, "write", err.error))?;

	Ok(())
}

fn io_error(path: &Path, action: &str, err: io::Error) -> Error {
	let message = match err.kind() {
		io::ErrorKind::NotFound => format!("Couldn't find the file."),
		io::ErrorKind::PermissionDenied => format!("Wasn't allowed to {} the file. (insufficient permissions)", action),
		io::ErrorKind::InvalidData => format!("File contained invalid data. (likely not UTF-8 text)"),
		_ => format!("Encountered unexpected I/O error while trying to {} the file: {}", action, err.kind()),
	};

	Error::new(path.to_path_buf(), None, None, ErrorKind::Io { message, source: err })
}

impl Fault {
	pub fn new(span: Range<usize>, kind: ErrorKind) -> Fault { Fault { span, kind } }

	pub fn locate(self, path: &Path, line_num: usize) -> Error {
		Error::new(path.to_path_buf(), Some(line_num), Some(self.span), self.kind)
	}
}

impl Image {
	/// Renders one row per instruction line: image offset, bytes, line number, source text.
	pub fn listing(&self) -> String {
		let mut listing = String::new();

		for row in &self.rows {
			let bytes = self.bytes[row.offset..row.offset + row.len].iter()
				.map(|b| format!("{:02X}", b))
				.collect::<Vec<String>>()
				.join(" ");

			// Writing to a String can't fail.
			let _ = writeln!(listing, "{:04X}  {:<12}{:>5}  {}", row.offset, bytes, row.line, row.source);
		}

		listing
	}
}

//--> Unit Tests <--

#[cfg(test)]
mod tests {
	use super::*;

	fn assemble_text(source: &str) -> Result<Vec<u8>> {
		assemble_source(&OpcodeTable::nes(), Path::new("test.uasm"), source).map(|image| image.bytes)
	}

	#[test]
	fn single_mode_elision() {
		assert_eq!(assemble_text("BRK").unwrap(), vec![0x00]);
	}

	#[test]
	fn immediate_load() {
		assert_eq!(assemble_text("LDA,I A9").unwrap(), vec![0xA9, 0xA9]);
	}

	#[test]
	fn absolute_add_with_two_operands() {
		assert_eq!(assemble_text("ADC,A 10 20").unwrap(), vec![0x6D, 0x10, 0x20]);
	}

	#[test]
	fn comment_only_source_is_empty() {
		assert!(assemble_text("# comment only").unwrap().is_empty());
		assert!(assemble_text("").unwrap().is_empty());
	}

	#[test]
	fn trailing_comment_is_excluded() {
		assert_eq!(assemble_text("ASL,Z 06 #trailing").unwrap(), vec![0x06, 0x06]);
	}

	#[test]
	fn unknown_instruction_aborts() {
		let err = assemble_text("FOO,I 01").unwrap_err();

		assert_eq!(err.line, Some(1));
		assert!(matches!(err.kind, ErrorKind::UnknownInstruction(_)));
	}

	#[test]
	fn skipped_lines_do_not_shift_later_bytes() {
		let plain = assemble_text("LDA,I 01\nSTA,Z 10\nRTS").unwrap();
		let padded = assemble_text("# setup\nLDA,I 01\n\n   \n# store it\nSTA,Z 10 # zero page\n\nRTS\n").unwrap();

		assert_eq!(plain, vec![0xA9, 0x01, 0x85, 0x10, 0x60]);
		assert_eq!(padded, plain);
	}

	#[test]
	fn crlf_line_endings_are_accepted() {
		assert_eq!(assemble_text("LDX,I 00\r\nINX\r\n").unwrap(), vec![0xA2, 0x00, 0xE8]);
	}

	#[test]
	fn first_error_stops_assembly() {
		let err = assemble_text("NOP\nLDA,I 100\nFOO\n").unwrap_err();

		assert_eq!(err.line, Some(2));
		assert_eq!(err.span, Some(6..9));
		assert!(matches!(err.kind, ErrorKind::ByteOutOfRange(ref t) if t == "100"));
	}

	#[test]
	fn malformed_operand_reports_its_line() {
		let err = assemble_text("NOP\n\nJSR 00 XY").unwrap_err();

		assert_eq!(err.line, Some(3));
		assert!(matches!(err.kind, ErrorKind::MalformedOperand(ref t) if t == "XY"));
	}

	#[test]
	fn every_table_entry_round_trips() {
		for (mnemonic, modes) in opcodes::NES_OPCODES.iter() {
			for (mode, opcode) in modes.iter() {
				let line = format!("{},{} 00 FF", mnemonic, mode.canonical());
				assert_eq!(assemble_text(&line).unwrap(), vec![*opcode, 0x00, 0xFF], "{}", line);
			}
		}
	}

	#[test]
	fn listing_has_one_row_per_instruction() {
		let image = assemble_source(&OpcodeTable::nes(), Path::new("test.uasm"), "# start\nLDA,I 01\nBRK\n").unwrap();

		assert_eq!(
			image.listing(),
			"0000  A9 01           2  LDA,I 01\n\
			0002  00              3  BRK\n"
		);
	}
}
