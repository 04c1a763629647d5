//--> Imports <--

// Handles assembly of UASM source targeting the 8-bit MOS 6502, as found in the NES.
mod mos6502;

use std::{
	fmt,
	io::{
		self,
		Write,
	},
	ops::Range,
	path::PathBuf,
	process,
};

use clap::Arg;

use mos6502::mode::AddressingMode;

//--> Constants <--

const OUTPUT_EXTENSION: &str = "nes";

const LOG_ENV: &str = "UASM_LOG";

//--> Structs <--

/// Everything a single assembler run needs to know, taken from the command line.
pub(crate) struct Config {
	pub verbose: bool,
	pub input_path: PathBuf,
	pub output_path: PathBuf,
	pub listing_path: Option<PathBuf>,
}

#[derive(Debug)]
pub(crate) struct Error {
	file: PathBuf,
	line: Option<usize>,
	span: Option<Range<usize>>,
	kind: ErrorKind,
}

//--> Enums <--

#[derive(Debug, thiserror::Error)]
pub(crate) enum ErrorKind {
	#[error("Token '{0}' should be an instruction, optionally followed by a comma and an addressing mode.")]
	MalformedHeadToken(String),

	#[error("Unrecognized instruction '{0}'.")]
	UnknownInstruction(String),

	#[error("Instruction '{mnemonic}' doesn't support addressing mode {}.", describe_mode(.mode))]
	UnsupportedAddressingMode {
		mnemonic: String,
		mode: Option<AddressingMode>,
	},

	#[error("Operand '{0}' isn't a hexadecimal number.")]
	MalformedOperand(String),

	#[error("Operand '{0}' doesn't fit in a byte.")]
	ByteOutOfRange(String),

	#[error("{message}")]
	Io {
		message: String,
		source: io::Error,
	},
}

//--> Functions <--

fn main() {
	let args = {
		clap::command!()
		.long_about(
			"The UASM Assembler (uasm) translates UASM source into a raw MOS 6502 binary image, as run by the NES.\n\n\
			Each line of UASM holds one instruction: a mnemonic, optionally followed by a comma and an addressing mode, \
			then zero or more operand bytes written in hexadecimal. Lines starting with '#' are comments.\n\n\
			The image is only written if every line assembles. By default it is placed next to the source, with a '.nes' extension."
		)
		.arg_required_else_help(true)
		.args([
			{
				Arg::new("verbose")
				.short('v')
				.long("verbose")
				.help("Tells the assembler to trace each line and token as it is assembled, rather than just outputting errors.")
			},
			{
				Arg::new("output")
				.short('o')
				.long("out")
				.value_name("OUTPATH")
				.value_parser(clap::value_parser!(PathBuf))
				.help("Specifies a custom path for the output binary. By default, the input path with a '.nes' extension is used.")
			},
			{
				Arg::new("listing")
				.short('l')
				.long("list")
				.value_name("LISTPATH")
				.value_parser(clap::value_parser!(PathBuf))
				.help("Specifies a path to generate a listing file at. By default, no listing file is generated.")
			},
			{
				Arg::new("infile")
				.value_name("INPATH")
				.value_parser(clap::value_parser!(PathBuf))
				.required(true)
				.help("Path to the UASM source file. Must exist.")
			}
		])
		.get_matches()
	};

	let verbose = args.contains_id("verbose");

	// This is a required argument, so unwrapping is okay here.
	let input_path = args.get_one::<PathBuf>("infile").unwrap().clone();

	let output_path = match args.get_one::<PathBuf>("output") {
		Some(path) => path.clone(),
		None => input_path.with_extension(OUTPUT_EXTENSION),
	};

	let listing_path = args.get_one::<PathBuf>("listing").cloned();

	let config = Config { verbose, input_path, output_path, listing_path };

	init_logging(config.verbose);

	if !config.input_path.is_file() {
		eprintln!("ERR: {}: The input path must point to an existing file.", config.input_path.display());
		process::exit(1);
	}

	if config.output_path == config.input_path || config.listing_path.as_ref() == Some(&config.input_path) {
		eprintln!("ERR: {}: Refusing to overwrite the input file with assembler output.", config.input_path.display());
		process::exit(1);
	}

	match mos6502::assemble(&config) {
		Ok(size) => {
			println!("INFO: Successfully assembled {} bytes.\nINFO: The binary was output at '{}'.", size, config.output_path.display());

			if let Some(path) = &config.listing_path {
				println!("INFO: The listing file was output at '{}'.", path.display());
			}
		},
		Err(err) => {
			eprintln!("{}", err);
			eprintln!("ERR: Failed to assemble '{}'. No output was written.", config.input_path.display());
			process::exit(2);
		}
	}
}

/// Routes `log` records to stderr as `LEVEL: message`. Verbose runs trace every line; `UASM_LOG` overrides either way.
fn init_logging(verbose: bool) {
	let env = env_logger::Env::default()
		.filter_or(LOG_ENV, if verbose { "trace" } else { "warn" });

	env_logger::Builder::from_env(env)
		.format(|buf, record| writeln!(buf, "{}: {}", record.level(), record.args()))
		.init();
}

fn describe_mode(mode: &Option<AddressingMode>) -> String {
	match mode {
		Some(mode) => format!("'{}'", mode),
		None => String::from("(none given, and more than one is possible)"),
	}
}

impl Error {
	pub fn new(file: PathBuf, line: Option<usize>, span: Option<Range<usize>>, kind: ErrorKind) -> Error {
		Error { file, line, span, kind }
	}
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self.line {
			Some(l) => match &self.span {
				Some(s) => write!(f, "ERR: {}: {}: {}..{}: {}", self.file.display(), l, s.start, s.end, self.kind),
				None => write!(f, "ERR: {}: {}: {}", self.file.display(), l, self.kind)
			},
			None => write!(f, "ERR: {}: {}", self.file.display(), self.kind)
		}
	}
}

//--> Unit Tests <--
