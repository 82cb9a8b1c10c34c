//! pcibex-results CLI - turn a PCIbex results log into a CSV table
//!
//! Usage: `pcibex-results --input results.txt --output results.csv`

use clap::Parser;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use pcibex_results::{
    CorpusEncoder, ParseError, ParserConfig, ResultsProcessor, PARSER_VERSION, PRODUCER_NAME,
    SCHEMA_VERSION,
};

/// Parse a PCIbex results log into one tidy reading-time table
#[derive(Parser)]
#[command(name = "pcibex-results")]
#[command(version = PARSER_VERSION)]
#[command(about = "Preprocess a PCIbex results file", long_about = None)]
struct Cli {
    /// Input results file (use - for stdin)
    #[arg(short, long)]
    input: PathBuf,

    /// Output CSV file (use - for stdout)
    #[arg(short, long)]
    output: PathBuf,

    /// JSON file overriding parser settings
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pcibex_results=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), ResultsCliError> {
    let config = match &cli.config {
        Some(path) => ParserConfig::from_json(&fs::read_to_string(path)?)?,
        None => ParserConfig::default(),
    };

    let raw = read_input(&cli.input)?;

    let mut processor = ResultsProcessor::with_config(config);
    let corpus = processor.process(&raw)?;

    if corpus.tables.is_empty() {
        return Err(ResultsCliError::NoParticipants);
    }

    tracing::info!(
        producer = PRODUCER_NAME,
        schema = SCHEMA_VERSION,
        participants = corpus.tables.len(),
        rows = corpus.len(),
        output = %cli.output.display(),
        "writing corpus"
    );

    let encoder = CorpusEncoder::new();
    if is_stdio(&cli.output) {
        encoder.write(&corpus, io::stdout().lock())?;
    } else {
        // Encode fully before touching the output file
        let csv = encoder.encode_to_csv(&corpus)?;
        fs::write(&cli.output, csv)?;
    }

    Ok(())
}

fn is_stdio(path: &Path) -> bool {
    path.to_string_lossy() == "-"
}

fn read_input(input: &Path) -> Result<String, ResultsCliError> {
    if is_stdio(input) {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

// Error handling

#[derive(Debug)]
enum ResultsCliError {
    Io(io::Error),
    Parse(ParseError),
    NoParticipants,
}

impl From<io::Error> for ResultsCliError {
    fn from(e: io::Error) -> Self {
        ResultsCliError::Io(e)
    }
}

impl From<ParseError> for ResultsCliError {
    fn from(e: ParseError) -> Self {
        ResultsCliError::Parse(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<ResultsCliError> for CliError {
    fn from(e: ResultsCliError) -> Self {
        match e {
            ResultsCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check that the input exists and the output is writable".to_string()),
            },
            ResultsCliError::Parse(e @ ParseError::Structural { .. })
            | ResultsCliError::Parse(e @ ParseError::InvalidNumber { .. }) => CliError {
                code: "STRUCTURAL_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Ensure the input is an unmodified PCIbex results file".to_string()),
            },
            ResultsCliError::Parse(e @ ParseError::SchemaCollision(_)) => CliError {
                code: "SCHEMA_COLLISION".to_string(),
                message: e.to_string(),
                hint: Some("Rename the demographics question in the experiment".to_string()),
            },
            ResultsCliError::Parse(e @ ParseError::Config(_))
            | ResultsCliError::Parse(e @ ParseError::JsonError(_)) => CliError {
                code: "CONFIG_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check the --config JSON file".to_string()),
            },
            ResultsCliError::Parse(e) => CliError {
                code: "PARSE_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
            ResultsCliError::NoParticipants => CliError {
                code: "NO_PARTICIPANTS".to_string(),
                message: "No `# Results on ... GMT` header found in input".to_string(),
                hint: Some("Ensure the input is a PCIbex results file".to_string()),
            },
        }
    }
}
