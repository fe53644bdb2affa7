mod converter;
mod prompts;

pub use converter::{ConvertError, ConversionRequest, Converter, LlmConverter};
pub use prompts::ConverterPrompts;
