use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use colored::Colorize;

use veriport_convert::LlmConverter;
use veriport_core::{
    extension_for_language, resolve_output_path, ConversionPipeline, ConversionResult,
    ConversionTask,
};
use veriport_llm::{credential_diagnostic, OpenAiModel};
use veriport_logging::{init_tracing, LogEvent, LogFormat, Logger};
use veriport_review::LlmReviewer;

mod config;

use config::ProjectConfig;

/// Input file missing or unreadable
const EXIT_INPUT: i32 = 2;
/// Output file could not be written after approval
const EXIT_WRITE: i32 = 3;
/// Converter/reviewer capability invocation failed
const EXIT_BACKEND: i32 = 4;

#[derive(Parser, Debug)]
#[command(
    name = "veriport",
    about = "Convert a source file into another language using a converter and reviewer with iterative refinement",
    version
)]
struct Cli {
    /// Path to the source code file to convert
    input: PathBuf,

    /// Target language name (default: python)
    #[arg(short = 'l', long = "target-lang")]
    target_lang: Option<String>,

    /// Override output file extension (e.g., py, js). If omitted,
    /// inferred from the target language.
    #[arg(long)]
    ext: Option<String>,

    /// Model name to use (default: gpt-5)
    #[arg(short, long)]
    model: Option<String>,

    /// Maximum number of conversion-review iterations (default: 3)
    #[arg(long)]
    max_iters: Option<usize>,

    /// Sampling temperature for the model (default: 0.2)
    #[arg(long)]
    temperature: Option<f32>,

    /// Enable verbose tracing output
    #[arg(short, long)]
    verbose: bool,

    /// Don't write files; print verdict and summary only
    #[arg(long)]
    dry_run: bool,

    /// Log output format
    #[arg(long, value_enum, default_value = "pretty")]
    log_format: LogFormatChoice,

    /// Output the final result as JSON on stdout
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatChoice {
    Pretty,
    Json,
    Compact,
}

impl From<LogFormatChoice> for LogFormat {
    fn from(choice: LogFormatChoice) -> Self {
        match choice {
            LogFormatChoice::Pretty => LogFormat::Pretty,
            LogFormatChoice::Json => LogFormat::Json,
            LogFormatChoice::Compact => LogFormat::Compact,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let code = run(cli).await;
    std::process::exit(code);
}

async fn run(cli: Cli) -> i32 {
    // Load .env before anything reads the environment
    let _ = dotenvy::dotenv();

    let log_format: LogFormat = cli.log_format.into();
    init_tracing(if cli.verbose { "debug" } else { "info" }, log_format);

    if let Some(warning) = credential_diagnostic() {
        eprintln!("{} {}", "warning:".bright_yellow().bold(), warning);
    }

    if !cli.input.is_file() {
        eprintln!(
            "{} Input not found: {}",
            "error:".bright_red().bold(),
            cli.input.display()
        );
        return EXIT_INPUT;
    }

    let original_code = match std::fs::read_to_string(&cli.input) {
        Ok(code) => code,
        Err(e) => {
            eprintln!(
                "{} Failed to read input file: {}",
                "error:".bright_red().bold(),
                e
            );
            return EXIT_INPUT;
        }
    };

    let working_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = match ProjectConfig::load(&working_dir) {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("{} {:#}", "error:".bright_red().bold(), e);
            return EXIT_INPUT;
        }
    };

    // CLI flags win over config file values, which win over defaults
    let target_language = cli
        .target_lang
        .clone()
        .or(config.target_language)
        .unwrap_or_else(|| "python".to_string());
    let target_ext = cli
        .ext
        .clone()
        .or(config.target_ext)
        .unwrap_or_else(|| extension_for_language(&target_language).to_string());
    let model_name = cli
        .model
        .clone()
        .or(config.model)
        .unwrap_or_else(|| "gpt-5".to_string());
    let temperature = cli.temperature.or(config.temperature).unwrap_or(0.2);
    let max_iters = cli.max_iters.or(config.max_iters).unwrap_or(3);

    let model = OpenAiModel::from_env(model_name, temperature);
    let converter = LlmConverter::new(&model);
    let reviewer = LlmReviewer::new(&model);
    let logger = Arc::new(Logger::new(log_format));

    let filename = cli
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.input.display().to_string());

    let task = ConversionTask {
        filename,
        original_code,
        target_language,
        max_attempts: max_iters,
    };

    let pipeline = ConversionPipeline::new(&converter, &reviewer, logger.clone());
    let result = match pipeline.run(&task).await {
        Ok(result) => result,
        Err(e) => {
            eprintln!(
                "{} Capability invocation failed: {}",
                "error:".bright_red().bold(),
                e
            );
            return EXIT_BACKEND;
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::warn!(error = %e, "Failed to serialize result"),
        }
    }

    finish(&cli, &logger, &result, &target_ext)
}

/// Persist the approved candidate (or report non-approval) and map the
/// outcome to a process exit code
fn finish(cli: &Cli, logger: &Logger, result: &ConversionResult, target_ext: &str) -> i32 {
    if result.approved {
        if let Some(candidate) = &result.candidate {
            let out_path = resolve_output_path(&cli.input, target_ext);

            if cli.dry_run {
                println!("Approved. Would write output to: {}", out_path.display());
                println!("Attempts: {}", result.attempt);
                return 0;
            }

            if let Err(e) = std::fs::write(&out_path, candidate) {
                eprintln!(
                    "{} Failed to write output file: {}",
                    "error:".bright_red().bold(),
                    e
                );
                return EXIT_WRITE;
            }

            logger.log(&LogEvent::OutputWritten {
                path: out_path.clone(),
                bytes: candidate.len(),
            });
            println!("Conversion approved after {} attempt(s)", result.attempt);
            println!("Wrote: {}", out_path.display());
            return 0;
        }
    }

    eprintln!(
        "Conversion not approved after {} attempt(s).",
        result.attempt
    );
    if let Some(feedback) = &result.feedback {
        eprintln!("Last reviewer feedback follows:\n{}", feedback.trim());
    }
    result.exit_code()
}
