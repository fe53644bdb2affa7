use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Structured log events for the conversion refinement loop
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LogEvent {
    RunStarted {
        filename: String,
        target_language: String,
        max_attempts: usize,
    },
    AttemptStarted {
        attempt: usize,
        max_attempts: usize,
    },
    ConverterCompleted {
        attempt: usize,
        candidate_lines: usize,
        duration_secs: f64,
    },
    ReviewerStarted {
        attempt: usize,
    },
    ReviewerCompleted {
        attempt: usize,
        verdict: String,
        duration_secs: f64,
    },
    Approved {
        attempt: usize,
    },
    AttemptsExhausted {
        attempts: usize,
    },
    OutputWritten {
        path: PathBuf,
        bytes: usize,
    },
}

impl LogEvent {
    /// Add a timestamp to serialize with the event
    fn with_timestamp(&self) -> serde_json::Value {
        let mut value = serde_json::to_value(self).unwrap_or_default();
        if let Some(obj) = value.as_object_mut() {
            obj.insert(
                "timestamp".to_string(),
                serde_json::Value::String(chrono::Utc::now().to_rfc3339()),
            );
        }
        value
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format with colors
    #[default]
    Pretty,
    /// JSON lines format for machine consumption
    Json,
    /// Compact single-line format
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            "compact" => Ok(LogFormat::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// Logger for pipeline events - handles console output and optional
/// file logging
pub struct Logger {
    format: LogFormat,
    file_writer: Option<Mutex<File>>,
}

impl Logger {
    pub fn new(format: LogFormat) -> Self {
        Self {
            format,
            file_writer: None,
        }
    }

    /// Create a logger with file output in addition to console
    pub fn with_file(format: LogFormat, log_path: &Path) -> std::io::Result<Self> {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        Ok(Self {
            format,
            file_writer: Some(Mutex::new(file)),
        })
    }

    pub fn log(&self, event: &LogEvent) {
        // File sink is always JSON lines
        if let Some(ref writer) = self.file_writer {
            if let Ok(mut file) = writer.lock() {
                let json = event.with_timestamp();
                let _ = writeln!(file, "{}", json);
            }
        }

        match self.format {
            LogFormat::Json => self.log_json(event),
            LogFormat::Pretty => self.log_pretty(event),
            LogFormat::Compact => self.log_compact(event),
        }
    }

    fn log_json(&self, event: &LogEvent) {
        if let Ok(json) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{}", json);
        }
    }

    fn log_pretty(&self, event: &LogEvent) {
        let mut stderr = std::io::stderr();
        match event {
            LogEvent::RunStarted {
                filename,
                target_language,
                max_attempts,
            } => {
                let _ = writeln!(stderr);
                let _ = writeln!(stderr, "{}", "veriport".bold().bright_white());
                let _ = writeln!(
                    stderr,
                    "  {} {} {} {} ({} {})",
                    "Converting".dimmed(),
                    filename.bright_white(),
                    "to".dimmed(),
                    target_language.bright_white(),
                    "max attempts:".dimmed(),
                    max_attempts
                );
                let _ = writeln!(stderr);
            }
            LogEvent::AttemptStarted {
                attempt,
                max_attempts,
            } => {
                let _ = writeln!(
                    stderr,
                    "{} {}",
                    "▶".bright_cyan(),
                    format!("ATTEMPT {}/{}", attempt, max_attempts)
                        .bright_cyan()
                        .bold()
                );
            }
            LogEvent::ConverterCompleted {
                candidate_lines,
                duration_secs,
                ..
            } => {
                let _ = writeln!(
                    stderr,
                    "    {} Converter produced {} {} ({:.1}s)",
                    "✓".bright_green(),
                    candidate_lines,
                    if *candidate_lines == 1 { "line" } else { "lines" },
                    duration_secs
                );
            }
            LogEvent::ReviewerStarted { .. } => {
                let _ = writeln!(
                    stderr,
                    "  {} {}",
                    "▶".bright_magenta(),
                    "REVIEW".bright_magenta().bold()
                );
            }
            LogEvent::ReviewerCompleted {
                verdict,
                duration_secs,
                ..
            } => {
                let styled = if verdict == "approve" {
                    format!("✓ Verdict: {}", verdict).bright_green().to_string()
                } else if verdict.is_empty() {
                    "→ Verdict: (unparsable, treated as revise)"
                        .bright_yellow()
                        .to_string()
                } else {
                    format!("→ Verdict: {}", verdict).bright_yellow().to_string()
                };
                let _ = writeln!(stderr, "    {} ({:.1}s)", styled, duration_secs);
                let _ = writeln!(stderr);
            }
            LogEvent::Approved { attempt } => {
                let _ = writeln!(
                    stderr,
                    "{} Approved on attempt {}",
                    "✓".bright_green(),
                    attempt
                );
            }
            LogEvent::AttemptsExhausted { attempts } => {
                let _ = writeln!(
                    stderr,
                    "{} Not approved after {} attempt(s)",
                    "⚠".bright_yellow(),
                    attempts
                );
            }
            LogEvent::OutputWritten { path, bytes } => {
                let _ = writeln!(
                    stderr,
                    "{} Wrote {} ({} bytes)",
                    "✓".bright_green(),
                    path.display(),
                    bytes
                );
            }
        }
    }

    fn log_compact(&self, event: &LogEvent) {
        let mut stderr = std::io::stderr();
        let timestamp = chrono::Utc::now().format("%H:%M:%S");
        let msg = match event {
            LogEvent::RunStarted {
                filename,
                max_attempts,
                ..
            } => format!("[{}] run:start {} n={}", timestamp, filename, max_attempts),
            LogEvent::AttemptStarted {
                attempt,
                max_attempts,
            } => format!("[{}] attempt:{}/{}", timestamp, attempt, max_attempts),
            LogEvent::ConverterCompleted {
                attempt,
                candidate_lines,
                duration_secs,
            } => format!(
                "[{}] convert:done:{} {}l {:.1}s",
                timestamp, attempt, candidate_lines, duration_secs
            ),
            LogEvent::ReviewerStarted { attempt } => {
                format!("[{}] review:start:{}", timestamp, attempt)
            }
            LogEvent::ReviewerCompleted {
                attempt,
                verdict,
                duration_secs,
            } => format!(
                "[{}] review:done:{} verdict={} {:.1}s",
                timestamp,
                attempt,
                if verdict.is_empty() { "-" } else { verdict },
                duration_secs
            ),
            LogEvent::Approved { attempt } => format!("[{}] approved:{}", timestamp, attempt),
            LogEvent::AttemptsExhausted { attempts } => {
                format!("[{}] exhausted:{}", timestamp, attempts)
            }
            LogEvent::OutputWritten { path, bytes } => {
                format!("[{}] wrote:{} {}b", timestamp, path.display(), bytes)
            }
        };
        let _ = writeln!(stderr, "{}", msg);
    }
}
