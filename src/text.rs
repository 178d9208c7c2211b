/// Normalizes extracted text: trims the ends and collapses runs of two or
/// more consecutive newlines into exactly two. Single newlines and all other
/// whitespace are left untouched.
pub fn clean_text(text: &str) -> String {
    let text = text.trim();
    let mut result = String::with_capacity(text.len());
    let mut pending_newlines = 0usize;

    for ch in text.chars() {
        if ch == '\n' {
            pending_newlines += 1;
            continue;
        }
        if pending_newlines > 0 {
            result.push('\n');
            if pending_newlines > 1 {
                result.push('\n');
            }
            pending_newlines = 0;
        }
        result.push(ch);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(clean_text("  hello world \n"), "hello world");
    }

    #[test]
    fn collapses_newline_runs_to_two() {
        assert_eq!(clean_text("a\n\n\n\nb\n\nc"), "a\n\nb\n\nc");
    }

    #[test]
    fn preserves_single_newlines() {
        assert_eq!(clean_text("line one\nline two"), "line one\nline two");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(clean_text("   \n\n  "), "");
    }

    #[test]
    fn cleaning_is_idempotent() {
        let inputs = ["  a\n\n\nb  ", "plain", "\n\nx\ny\n\n\n\nz\n"];
        for input in inputs {
            let once = clean_text(input);
            assert_eq!(clean_text(&once), once);
        }
    }
}
