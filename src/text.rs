//! Input normalization shared by both scanners.

const BOM: char = '\u{feff}';

/// Remove a leading byte-order mark, if any.
pub fn strip_bom(input: &str) -> &str {
    input.strip_prefix(BOM).unwrap_or(input)
}

/// Strip the BOM and drop carriage returns so CRLF input reads as LF.
pub fn normalize(input: &str) -> String {
    strip_bom(input).replace('\r', "")
}
