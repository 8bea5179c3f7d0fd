//! Line splitting for captured output.

/// Split multi-line text into its lines.
///
/// Line terminators (`\n`, or `\r\n`) are removed and a final trailing
/// newline does not produce an empty last element. Empty lines in the
/// middle are kept.
///
/// ```
/// use shell_exec::split_lines;
///
/// assert_eq!(split_lines("one\ntwo\nthree\n"), ["one", "two", "three"]);
/// ```
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_newline() {
        assert_eq!(split_lines("one\ntwo\nthree\n"), ["one", "two", "three"]);
    }

    #[test]
    fn test_no_trailing_newline() {
        assert_eq!(split_lines("one\ntwo"), ["one", "two"]);
    }

    #[test]
    fn test_crlf() {
        assert_eq!(split_lines("a\r\nb\r\n"), ["a", "b"]);
    }

    #[test]
    fn test_empty_lines_kept() {
        assert_eq!(split_lines("a\n\nb\n"), ["a", "", "b"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(split_lines("").is_empty());
        assert_eq!(split_lines("\n"), [""]);
    }
}
