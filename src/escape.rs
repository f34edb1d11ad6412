/// Escapes text for a FFMETADATA `key=value` line.
///
/// `=`, `;`, `#`, `\` and newline each get a single backslash in front.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        if matches!(c, '=' | ';' | '#' | '\\' | '\n') {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    escaped
}
