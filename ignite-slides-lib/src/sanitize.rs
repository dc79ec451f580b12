/// Turn arbitrary text into a filesystem-safe token.
///
/// Leading/trailing whitespace is trimmed, every interior run of whitespace
/// collapses to a single underscore, and any remaining character outside
/// `[A-Za-z0-9_.-]` is dropped. Total and pure; empty input yields empty
/// output, callers substitute a fallback where one is needed.
pub fn sanitize_filename(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut pending_separator = false;
    for c in value.trim().chars() {
        if c.is_whitespace() {
            pending_separator = true;
            continue;
        }
        if pending_separator {
            out.push('_');
            pending_separator = false;
        }
        if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
            out.push(c);
        }
    }
    out
}
