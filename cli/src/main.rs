use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use clap::{ArgAction, Parser, ValueEnum};
use kvtree::{ConvertOptions, EncodeOptions, LineSeparator, MalformedIndex, Tree};
use serde::Serialize;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "kvtree", version, about = "Convert key=value lines to JSON and back")]
struct Args {
    /// Input file path. Omit or use '-' to read from stdin.
    input: Option<String>,

    /// Output file path (prints to stdout if omitted).
    #[arg(short, long, value_name = "file")]
    output: Option<String>,

    /// Path delimiter inside keys (default: .).
    #[arg(long, value_name = "text", default_value = ".")]
    delimiter: String,

    /// Line separator: lf, crlf (default: host convention).
    #[arg(long = "line-separator", value_enum, value_name = "kind")]
    line_separator: Option<LineSeparatorArg>,

    /// How to treat segments like `name[0` or `name[x]`: literal, skip, reject.
    #[arg(long, value_enum, value_name = "mode", default_value_t = MalformedArg::Literal)]
    malformed: MalformedArg,

    /// Largest list index accepted in a key.
    #[arg(long = "max-index", value_name = "number")]
    max_index: Option<usize>,

    /// Indentation size of the JSON output, 0 for compact (default: 2).
    #[arg(long, value_name = "number", default_value_t = 2)]
    indent: usize,

    /// Read a JSON object and write key=value lines instead.
    #[arg(long)]
    flatten: bool,

    /// Ignore blank lines instead of rejecting them.
    #[arg(long = "no-strict", action = ArgAction::SetFalse, default_value_t = true)]
    strict: bool,

    /// Log progress to stderr (RUST_LOG overrides).
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LineSeparatorArg {
    Lf,
    Crlf,
}

impl From<LineSeparatorArg> for LineSeparator {
    fn from(value: LineSeparatorArg) -> Self {
        match value {
            LineSeparatorArg::Lf => LineSeparator::Lf,
            LineSeparatorArg::Crlf => LineSeparator::CrLf,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum MalformedArg {
    Literal,
    Skip,
    Reject,
}

impl From<MalformedArg> for MalformedIndex {
    fn from(value: MalformedArg) -> Self {
        match value {
            MalformedArg::Literal => MalformedIndex::Literal,
            MalformedArg::Skip => MalformedIndex::Skip,
            MalformedArg::Reject => MalformedIndex::Reject,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Convert,
    Flatten,
}

#[derive(Debug)]
enum InputSource {
    Stdin,
    File(String),
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);
    if let Err(err) = run(&args) {
        eprintln!("ERROR  {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let options = convert_options(args);
    let input_source = match args.input.as_deref() {
        None | Some("-") => InputSource::Stdin,
        Some(path) => InputSource::File(path.to_string()),
    };
    let mode = if args.flatten {
        Mode::Flatten
    } else {
        Mode::Convert
    };
    tracing::debug!(?mode, ?input_source, "starting");

    match mode {
        Mode::Convert => run_convert(args, &options, &input_source),
        Mode::Flatten => run_flatten(args, &options, &input_source),
    }
}

fn convert_options(args: &Args) -> ConvertOptions {
    let mut options = ConvertOptions::new()
        .with_delimiter(args.delimiter.as_str())
        .with_malformed_index(args.malformed.into())
        .with_strict(args.strict);
    if let Some(line_separator) = args.line_separator {
        options = options.with_line_separator(line_separator.into());
    }
    if let Some(max_index) = args.max_index {
        options = options.with_max_index(max_index);
    }
    options
}

fn run_convert(
    args: &Args,
    options: &ConvertOptions,
    input_source: &InputSource,
) -> Result<(), Box<dyn Error>> {
    let tree = match input_source {
        InputSource::Stdin => kvtree::convert_str_with_options(&read_stdin()?, options)?,
        InputSource::File(path) => kvtree::convert_file_with_options(path, options)?,
    };
    let output_target = OutputTarget::from_arg(args.output.as_deref());

    with_output_writer(output_target.path(), |writer| {
        write_json(writer, &tree, args.indent)
    })?;
    if let OutputTarget::File(path) = &output_target {
        report_status(Mode::Convert, input_source, path);
    }
    Ok(())
}

fn run_flatten(
    args: &Args,
    options: &ConvertOptions,
    input_source: &InputSource,
) -> Result<(), Box<dyn Error>> {
    let input = match input_source {
        InputSource::Stdin => read_stdin()?,
        InputSource::File(path) => fs::read_to_string(path)?,
    };
    let value: Value = serde_json::from_str(&input)?;
    let tree = Tree::from_value(value)?;
    let encoded = kvtree::to_string_with_options(&tree, &EncodeOptions::from(options))?;
    let output_target = OutputTarget::from_arg(args.output.as_deref());

    with_output_writer(output_target.path(), |writer| {
        writer.write_all(encoded.as_bytes())?;
        Ok(())
    })?;
    if let OutputTarget::File(path) = &output_target {
        report_status(Mode::Flatten, input_source, path);
    }
    Ok(())
}

fn read_stdin() -> Result<String, Box<dyn Error>> {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

#[derive(Clone, Debug)]
enum OutputTarget {
    Stdout,
    File(String),
}

impl OutputTarget {
    fn from_arg(output: Option<&str>) -> Self {
        match output {
            Some(path) if path != "-" => OutputTarget::File(path.to_string()),
            _ => OutputTarget::Stdout,
        }
    }

    fn path(&self) -> Option<&str> {
        match self {
            OutputTarget::Stdout => None,
            OutputTarget::File(path) => Some(path.as_str()),
        }
    }
}

fn with_output_writer<F>(path: Option<&str>, f: F) -> Result<(), Box<dyn Error>>
where
    F: FnOnce(&mut dyn Write) -> Result<(), Box<dyn Error>>,
{
    match path {
        Some(path) => {
            let mut file = fs::File::create(path)?;
            f(&mut file)
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            f(&mut handle)
        }
    }
}

fn write_json(writer: &mut dyn Write, tree: &Tree, indent: usize) -> Result<(), Box<dyn Error>> {
    if indent == 0 {
        serde_json::to_writer(writer, tree)?;
        return Ok(());
    }

    let indent_bytes = vec![b' '; indent];
    let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent_bytes);
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    tree.serialize(&mut serializer)?;
    Ok(())
}

fn report_status(mode: Mode, input_source: &InputSource, output_path: &str) {
    let input_label = match input_source {
        InputSource::Stdin => "stdin".to_string(),
        InputSource::File(path) => display_path(path),
    };
    let output_label = display_path(output_path);
    let verb = match mode {
        Mode::Convert => "Converted",
        Mode::Flatten => "Flattened",
    };
    println!("✔ {verb} {input_label} → {output_label}");
}

fn display_path(path: &str) -> String {
    let path = Path::new(path);
    let Ok(cwd) = std::env::current_dir() else {
        return path.to_string_lossy().into_owned();
    };
    match path.strip_prefix(&cwd) {
        Ok(rel) if path.is_absolute() => rel.to_string_lossy().into_owned(),
        _ => path.to_string_lossy().into_owned(),
    }
}
