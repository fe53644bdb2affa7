mod error;
mod outcome;
mod paths;
mod pipeline;
mod state;

pub use error::PipelineError;
pub use outcome::ConversionResult;
pub use paths::{extension_for_language, resolve_output_path};
pub use pipeline::{ConversionPipeline, ConversionTask};
pub use state::RunPhase;
