//! Output file naming

use crate::conversion::config::TargetFormat;
use crate::input::filter::HEIC_EXTENSIONS;

/// Derive the output name for a converted input.
///
/// A trailing `.heic`/`.heif` (any case) is replaced by the target
/// extension. Names without one get the extension appended.
pub fn derive_output_name(input_name: &str, target: TargetFormat) -> String {
    let stem = strip_heic_suffix(input_name).unwrap_or(input_name);
    format!("{}.{}", stem, target.extension())
}

/// Return the name without its HEIC/HEIF suffix, if it has one
fn strip_heic_suffix(name: &str) -> Option<&str> {
    let (stem, ext) = name.rsplit_once('.')?;
    HEIC_EXTENSIONS
        .iter()
        .any(|known| ext.eq_ignore_ascii_case(known))
        .then_some(stem)
}
