//! Command-line splitting.
//!
//! This is not a shell parser. The line is split on literal spaces and
//! tokens belonging to one quoted phrase are glued back together, which
//! covers the common `grep -r 'some phrase' .` case and nothing more.

use tracing::warn;

/// Split a raw command line into an argument vector.
///
/// Backslash-newline continuations are removed first. Only the ASCII space
/// character separates tokens, so tabs stay inside arguments and repeated
/// spaces produce empty arguments.
///
/// A token holding exactly one quote character opens a span that runs until
/// a later token holding exactly one copy of the same quote. Everything in
/// between is joined with single spaces, the opening quote character is
/// removed throughout, and the result becomes a single argument. A span that
/// is never closed is dropped.
///
/// ```
/// use shell_exec::split_command_line;
///
/// let argv = split_command_line(r#"grep -r "some text with spaces" ."#);
/// assert_eq!(argv, ["grep", "-r", "some text with spaces", "."]);
/// ```
pub fn split_command_line(command: &str) -> Vec<String> {
    let joined = command.replace("\\\n", "");
    let mut argv = Vec::new();
    // Open span: accumulated text and the quote character that opened it.
    let mut span: Option<(String, char)> = None;

    for part in joined.split(' ') {
        let quotes = part.chars().filter(|c| matches!(c, '\'' | '"')).count();

        match span.take() {
            None if quotes == 1 => {
                let quote = if part.contains('"') { '"' } else { '\'' };
                span = Some((part.to_string(), quote));
            }
            None => argv.push(part.to_string()),
            Some((mut buffer, quote)) => {
                buffer.push(' ');
                buffer.push_str(part);
                if quotes == 1 && part.contains(quote) {
                    argv.push(buffer.replace(quote, ""));
                } else {
                    span = Some((buffer, quote));
                }
            }
        }
    }

    if let Some((buffer, quote)) = span {
        warn!(
            "discarding unterminated {} quoted argument: {}",
            quote, buffer
        );
    }

    argv
}
