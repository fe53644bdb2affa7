use thiserror::Error;

use veriport_convert::ConvertError;
use veriport_review::ReviewError;

/// Fatal pipeline failures.
///
/// A reviewer that answers but does not approve is not an error; these
/// are capability invocation failures (transport, auth) that abort the
/// whole run with no partial result.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Converter invocation failed: {0}")]
    Converter(#[from] ConvertError),

    #[error("Reviewer invocation failed: {0}")]
    Reviewer(#[from] ReviewError),
}
