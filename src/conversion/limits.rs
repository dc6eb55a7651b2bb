use crate::conversion::config::ConversionConfig;
use crate::error::{ConversionError, ConversionErrorKind, ConversionResult};
use crate::input::InputFile;

/// Reject an input whose blob exceeds the configured limit before it is
/// handed to the codec.
pub fn check_input_size(input: &InputFile, config: &ConversionConfig) -> ConversionResult<()> {
    if input.len() > config.max_input_size {
        return Err(ConversionError::conversion(
            ConversionErrorKind::InputTooLarge {
                size: input.len(),
                limit: config.max_input_size,
            },
        ));
    }

    Ok(())
}
