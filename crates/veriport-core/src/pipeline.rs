use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use veriport_convert::{ConversionRequest, Converter};
use veriport_logging::{LogEvent, Logger};
use veriport_review::{extract_verdict, ReviewRequest, Reviewer};

use crate::error::PipelineError;
use crate::outcome::ConversionResult;
use crate::state::RunPhase;

/// One file-conversion job
#[derive(Debug, Clone)]
pub struct ConversionTask {
    /// Source file name shown to both capabilities
    pub filename: String,
    /// Full original source text
    pub original_code: String,
    /// Target language name (e.g., "python")
    pub target_language: String,
    /// Iteration budget; clamped to at least 1
    pub max_attempts: usize,
}

/// Orchestrates the conversion refinement loop
pub struct ConversionPipeline<'a> {
    converter: &'a dyn Converter,
    reviewer: &'a dyn Reviewer,
    logger: Arc<Logger>,
}

impl<'a> ConversionPipeline<'a> {
    pub fn new(converter: &'a dyn Converter, reviewer: &'a dyn Reviewer, logger: Arc<Logger>) -> Self {
        Self {
            converter,
            reviewer,
            logger,
        }
    }

    /// Run the refinement loop until approval or attempt exhaustion.
    ///
    /// One converter call then one reviewer call per attempt, strictly
    /// sequential. Capability failures propagate immediately; they are
    /// never folded into a `ConversionResult`. An unapproving or even
    /// unparsable review is a normal revise outcome, not an error.
    pub async fn run(&self, task: &ConversionTask) -> Result<ConversionResult, PipelineError> {
        let max_attempts = task.max_attempts.max(1);

        self.logger.log(&LogEvent::RunStarted {
            filename: task.filename.clone(),
            target_language: task.target_language.clone(),
            max_attempts,
        });

        let mut phase = RunPhase::Pending;
        let mut previous_candidate = String::new();
        let mut previous_feedback = String::new();

        for attempt in 1..=max_attempts {
            self.logger.log(&LogEvent::AttemptStarted {
                attempt,
                max_attempts,
            });

            let request = ConversionRequest {
                filename: task.filename.clone(),
                target_language: task.target_language.clone(),
                original_code: task.original_code.clone(),
                previous_candidate: previous_candidate.clone(),
                review_feedback: previous_feedback.clone(),
            };

            let started = Instant::now();
            let candidate = self.converter.convert(&request).await?;
            phase = phase.candidate_produced();
            debug!(attempt, phase = %phase, candidate_len = candidate.len(), "Candidate produced");

            self.logger.log(&LogEvent::ConverterCompleted {
                attempt,
                candidate_lines: candidate.lines().count(),
                duration_secs: started.elapsed().as_secs_f64(),
            });

            self.logger.log(&LogEvent::ReviewerStarted { attempt });

            let review_request = ReviewRequest {
                filename: task.filename.clone(),
                target_language: task.target_language.clone(),
                original_code: task.original_code.clone(),
                candidate: candidate.clone(),
            };

            let started = Instant::now();
            let payload = self.reviewer.review(&review_request).await?;
            phase = phase.reviewed();

            let verdict = extract_verdict(&payload);
            self.logger.log(&LogEvent::ReviewerCompleted {
                attempt,
                verdict: verdict.normalized_verdict(),
                duration_secs: started.elapsed().as_secs_f64(),
            });

            let approved = verdict.is_approve();
            phase = phase.resolved(approved, attempt < max_attempts);
            debug!(attempt, phase = %phase, "Attempt resolved");

            if approved {
                self.logger.log(&LogEvent::Approved { attempt });
                let normalized = verdict.normalized_verdict();
                return Ok(ConversionResult::approved_at(
                    attempt,
                    candidate,
                    verdict.feedback,
                    normalized,
                ));
            }

            // Carry the candidate forward; fall back to the raw payload
            // text when no feedback field could be extracted.
            previous_candidate = candidate;
            previous_feedback = if verdict.feedback.is_empty() {
                payload.raw_text()
            } else {
                verdict.feedback
            };
            phase = phase.next_attempt();
        }

        self.logger.log(&LogEvent::AttemptsExhausted {
            attempts: max_attempts,
        });

        Ok(ConversionResult::exhausted(
            max_attempts,
            previous_candidate,
            previous_feedback,
        ))
    }
}
