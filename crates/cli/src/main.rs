// pgrid - translate Excel "XML Spreadsheet" clipboard payloads into grid
// assignments, headless

mod exit_codes;
mod util;

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info, warn};

use pastegrid_config::Settings;
use pastegrid_engine::{
    DateBasis, GridPasteTranslator, PasteOp, PasteOps, PasteOptions, PasteSummary, PasteTarget,
    TableExtent,
};
use pastegrid_io::{parse_payload, XmlDocument};

use exit_codes::{io_exit_code, paste_exit_code, EXIT_IO, EXIT_SUCCESS, EXIT_USAGE};
use util::{cell_name, escape_tsv, parse_anchor};

#[derive(Parser)]
#[command(name = "pgrid")]
#[command(about = "Translate Excel clipboard payloads (XML Spreadsheet) into grid assignments")]
#[command(version)]
struct Cli {
    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true, env = "PGRID_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a payload into set/clear operations
    #[command(after_help = "\
Examples:
  pgrid paste clip.xml
  pgrid paste clip.xml --at C5 --rows 100 --cols 26
  pgrid paste clip.xml --out tsv
  xclip -o -t 'XML Spreadsheet' | pgrid paste - --at 2,1")]
    Paste {
        /// Payload file (omit or - to read stdin)
        input: Option<PathBuf>,

        /// Anchor cell: A1-style or zero-based row,col
        #[arg(long, default_value = "A1")]
        at: String,

        /// Destination grid row count (default from settings)
        #[arg(long)]
        rows: Option<usize>,

        /// Destination grid column count (default from settings)
        #[arg(long)]
        cols: Option<usize>,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        out: OutputFormat,

        /// Zone DateTime cells are read in (default from settings)
        #[arg(long, value_enum)]
        date_basis: Option<BasisArg>,

        /// Suppress the summary on stderr
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Print the selection extent declared by the payload's table
    Extent {
        /// Payload file (omit or - to read stdin)
        input: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Tsv,
}

#[derive(Clone, Copy, ValueEnum)]
enum BasisArg {
    Utc,
    Local,
}

impl From<BasisArg> for DateBasis {
    fn from(arg: BasisArg) -> Self {
        match arg {
            BasisArg::Utc => DateBasis::Utc,
            BasisArg::Local => DateBasis::Local,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let path = cli.config.clone().unwrap_or_else(Settings::config_path);
    let (settings, load_error) = match Settings::read_from(&path) {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e)),
    };
    init_logging(&settings);
    if let Some(e) = load_error {
        warn!("{}: {e}; using default settings", path.display());
    }

    let result = match cli.command {
        Commands::Paste { input, at, rows, cols, out, date_basis, quiet } => {
            cmd_paste(&settings, input, &at, rows, cols, out, date_basis, quiet)
        }
        Commands::Extent { input } => cmd_extent(input),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            ExitCode::from(code)
        }
    }
}

fn init_logging(settings: &Settings) {
    let env = env_logger::Env::default().default_filter_or(settings.log.level.as_str());
    env_logger::Builder::from_env(env)
        .target(env_logger::Target::Stderr)
        .init();
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into() }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into() }
    }
}

impl From<pastegrid_io::IoError> for CliError {
    fn from(e: pastegrid_io::IoError) -> Self {
        Self { code: io_exit_code(&e), message: e.to_string() }
    }
}

impl From<pastegrid_engine::PasteError> for CliError {
    fn from(e: pastegrid_engine::PasteError) -> Self {
        debug!("paste aborted: {}", e.code());
        Self { code: paste_exit_code(&e), message: e.to_string() }
    }
}

/// Read the payload bytes from a file, or stdin for `None` / `-`.
fn read_input(input: Option<PathBuf>) -> Result<XmlDocument, CliError> {
    let bytes = match input {
        Some(path) if path.as_os_str() != "-" => {
            debug!("reading payload from {}", path.display());
            std::fs::read(&path)
                .map_err(|e| CliError::io(format!("{}: {}", path.display(), e)))?
        }
        _ => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .map_err(|e| CliError::io(format!("stdin: {}", e)))?;
            buf
        }
    };
    Ok(parse_payload(&bytes)?)
}

// ============================================================================
// paste
// ============================================================================

#[allow(clippy::too_many_arguments)]
fn cmd_paste(
    settings: &Settings,
    input: Option<PathBuf>,
    at: &str,
    rows: Option<usize>,
    cols: Option<usize>,
    out: OutputFormat,
    date_basis: Option<BasisArg>,
    quiet: bool,
) -> Result<(), CliError> {
    let (anchor_row, anchor_col) = parse_anchor(at).map_err(CliError::args)?;
    let grid_rows = rows.unwrap_or(settings.grid.rows);
    let grid_cols = cols.unwrap_or(settings.grid.cols);
    if grid_rows == 0 || grid_cols == 0 {
        return Err(CliError::args("--rows and --cols must be at least 1"));
    }
    let options = PasteOptions {
        date_basis: date_basis.map(DateBasis::from).unwrap_or(settings.dates.basis),
    };

    let doc = read_input(input)?;
    let target = PasteTarget::new(anchor_row, anchor_col, grid_rows, grid_cols);
    let mut ops = PasteOps::new();
    let summary = GridPasteTranslator::with_options(target, options).parse(&doc, &mut ops)?;
    info!("{:?}", summary);

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match out {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&ops)
                .map_err(|e| CliError::io(e.to_string()))?;
            writeln!(handle, "{}", json).map_err(|e| CliError::io(e.to_string()))?;
        }
        OutputFormat::Tsv => {
            for op in ops.ops() {
                writeln!(handle, "{}", tsv_line(op)).map_err(|e| CliError::io(e.to_string()))?;
            }
        }
    }

    if !quiet {
        eprintln!("{}", summary_line(&summary));
    }
    Ok(())
}

fn tsv_line(op: &PasteOp) -> String {
    match op {
        PasteOp::Set { row, col, value } => {
            format!("set\t{}\t{}", cell_name(*row, *col), escape_tsv(&value.raw_display()))
        }
        PasteOp::Clear { row, col } => format!("clear\t{}", cell_name(*row, *col)),
    }
}

fn summary_line(summary: &PasteSummary) -> String {
    let mut line = format!(
        "{} value{}, {} clear{}",
        summary.values,
        if summary.values == 1 { "" } else { "s" },
        summary.clears,
        if summary.clears == 1 { "" } else { "s" },
    );
    match summary.extent {
        Some(TableExtent { rows, cols }) => line.push_str(&format!(" (selection {}x{})", rows, cols)),
        None => line.push_str(" (no declared extent)"),
    }
    if summary.truncated_rows > 0 || summary.truncated_cells > 0 {
        line.push_str(&format!(
            "; clipped {} row{} and {} cell{} at the grid edge",
            summary.truncated_rows,
            if summary.truncated_rows == 1 { "" } else { "s" },
            summary.truncated_cells,
            if summary.truncated_cells == 1 { "" } else { "s" },
        ));
    }
    line
}

// ============================================================================
// extent
// ============================================================================

fn cmd_extent(input: Option<PathBuf>) -> Result<(), CliError> {
    let doc = read_input(input)?;
    let extent = TableExtent::read(&doc)?;
    let json = serde_json::to_string(&extent).map_err(|e| CliError::io(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pastegrid_engine::PasteValue;

    #[test]
    fn tsv_lines_use_a1_names() {
        let set = PasteOp::Set { row: 1, col: 2, value: PasteValue::Text("a\tb".into()) };
        assert_eq!(tsv_line(&set), "set\tC2\ta\\tb");

        let date = PasteOp::Set { row: 0, col: 0, value: PasteValue::DateMillis(1_433_116_800_000.0) };
        assert_eq!(tsv_line(&date), "set\tA1\t1433116800000");

        assert_eq!(tsv_line(&PasteOp::Clear { row: 0, col: 25 }), "clear\tZ1");
    }

    #[test]
    fn summary_mentions_extent_and_clipping() {
        let summary = PasteSummary {
            values: 1,
            clears: 2,
            rows: 1,
            truncated_rows: 1,
            truncated_cells: 0,
            extent: Some(TableExtent::new(3, 3)),
        };
        assert_eq!(
            summary_line(&summary),
            "1 value, 2 clears (selection 3x3); clipped 1 row and 0 cells at the grid edge"
        );
        assert_eq!(summary_line(&PasteSummary::default()), "0 values, 0 clears (no declared extent)");
    }
}
