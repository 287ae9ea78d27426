//! varlik-katalog CLI
//!
//! Converts a Varlık İşlem Fişi export into a catalog import file.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use varlik_katalog::{BatchSummary, ConverterBuilder, OutputFormat, ParsePolicy, SheetSelector};

/// Default number of rows shown by `--preview` without a value
const DEFAULT_PREVIEW_ROWS: &str = "10";

/// Convert a "Varlık İşlem Fişi" inventory export into a library catalog import sheet
#[derive(Parser, Debug)]
#[command(name = "varlik-katalog")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input file (XLSX, XLS, XLSB, ODS or CSV)
    input: PathBuf,

    /// Output file, `-` for stdout (defaults to `<input>_katalog.<ext>`)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (defaults to the output file extension, then xlsx)
    #[arg(short, long, value_enum, env = "VARLIK_KATALOG_FORMAT")]
    format: Option<FormatArg>,

    /// How ISBN and title are taken from `malzemeAdi`
    #[arg(short, long, value_enum, env = "VARLIK_KATALOG_POLICY", default_value_t = PolicyArg::Content)]
    policy: PolicyArg,

    /// Read the worksheet at this index (0-based)
    #[arg(long, conflicts_with = "sheet_name")]
    sheet_index: Option<usize>,

    /// Read the worksheet with this name
    #[arg(long)]
    sheet_name: Option<String>,

    /// Field delimiter for CSV input
    #[arg(short, long, default_value_t = ',')]
    delimiter: char,

    /// Worksheet name used in XLSX output
    #[arg(long, default_value = "Sheet1")]
    sheet_title: String,

    /// Print the first N converted rows as a Markdown table
    #[arg(long, value_name = "N", num_args = 0..=1, default_missing_value = DEFAULT_PREVIEW_ROWS)]
    preview: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Xlsx,
    Csv,
    Json,
    Markdown,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Xlsx => OutputFormat::Xlsx,
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Markdown => OutputFormat::Markdown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    /// Last part is the ISBN only if it has 10 or 13 digits
    Content,
    /// Last part is the ISBN, the one before it the title
    Positional,
}

impl From<PolicyArg> for ParsePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Content => ParsePolicy::ContentValidated,
            PolicyArg::Positional => ParsePolicy::Positional,
        }
    }
}

/// Where the converted file goes
enum Destination {
    Stdout,
    File(PathBuf),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logger(verbose: bool) {
    let default_filter = if verbose {
        "varlik_katalog=debug,info"
    } else {
        "varlik_katalog=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let format = resolve_format(cli);
    let destination = resolve_destination(cli, format);

    let converter = ConverterBuilder::new()
        .with_sheet_selector(sheet_selector(cli))
        .with_parse_policy(cli.policy.into())
        .with_csv_delimiter(cli.delimiter)
        .with_output_format(format)
        .with_output_sheet_name(cli.sheet_title.clone())
        .build()
        .context("Invalid options")?;

    let input = File::open(&cli.input)
        .with_context(|| format!("Failed to open {}", cli.input.display()))?;
    let records = converter
        .read_records(input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;
    let batch = converter
        .transform(&records)
        .with_context(|| format!("Cannot convert {}", cli.input.display()))?;

    // 変換結果を標準出力に書く場合、報告は標準エラーに回す
    let to_stderr = matches!(destination, Destination::Stdout);

    if let Some(limit) = cli.preview {
        let table = converter.preview(&batch.records, limit)?;
        report(&table, to_stderr)?;
    }

    match &destination {
        Destination::Stdout => {
            let stdout = io::stdout();
            converter
                .write_records(&batch.records, stdout.lock())
                .context("Failed to write to stdout")?;
        }
        Destination::File(path) => {
            debug!(path = %path.display(), "writing output file");
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            converter
                .write_records(&batch.records, file)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
    }

    report(&summary_line(&batch.summary, &destination), to_stderr)?;
    Ok(())
}

fn sheet_selector(cli: &Cli) -> SheetSelector {
    match (&cli.sheet_name, cli.sheet_index) {
        (Some(name), _) => SheetSelector::Name(name.clone()),
        (None, Some(index)) => SheetSelector::Index(index),
        (None, None) => SheetSelector::First,
    }
}

/// `--format`, then the output file extension, then XLSX
fn resolve_format(cli: &Cli) -> OutputFormat {
    if let Some(format) = cli.format {
        return format.into();
    }

    cli.output
        .as_deref()
        .and_then(Path::extension)
        .and_then(|ext| ext.to_str())
        .and_then(|ext| match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(OutputFormat::Csv),
            "json" => Some(OutputFormat::Json),
            "md" | "markdown" => Some(OutputFormat::Markdown),
            "xlsx" => Some(OutputFormat::Xlsx),
            _ => None,
        })
        .unwrap_or_default()
}

fn resolve_destination(cli: &Cli, format: OutputFormat) -> Destination {
    match &cli.output {
        Some(path) if path.as_os_str() == "-" => Destination::Stdout,
        Some(path) => Destination::File(path.clone()),
        None => Destination::File(default_output_path(&cli.input, format)),
    }
}

/// `<dir>/<stem>_katalog.<ext>`
fn default_output_path(input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{}_katalog.{}", stem, format.extension()))
}

fn summary_line(summary: &BatchSummary, destination: &Destination) -> String {
    let target = match destination {
        Destination::Stdout => "stdout".to_string(),
        Destination::File(path) => path.display().to_string(),
    };
    format!(
        "Converted {} records to {} ({} with ISBN, {} without title, {} prices defaulted to 0.00)",
        summary.records, target, summary.with_isbn, summary.without_title, summary.price_defaulted
    )
}

fn report(text: &str, to_stderr: bool) -> Result<()> {
    if to_stderr {
        let mut stderr = io::stderr().lock();
        writeln!(stderr, "{}", text.trim_end())?;
    } else {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", text.trim_end())?;
    }
    Ok(())
}
