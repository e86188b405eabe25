/// Normalise user text before it reaches a prompt.
///
/// Strips non-printable characters, collapses every whitespace run
/// (including newlines and tabs) to a single space, and trims the ends.
/// The function is idempotent.
pub fn sanitize_question(text: &str) -> String {
    let printable: String = text
        .chars()
        .filter(|c| c.is_whitespace() || !(c.is_control() || is_invisible(*c)))
        .collect();

    printable.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Zero-width and byte-order-mark characters that render as nothing.
fn is_invisible(c: char) -> bool {
    matches!(c, '\u{200B}'..='\u{200D}' | '\u{2060}' | '\u{FEFF}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_collapses() {
        assert_eq!(
            sanitize_question("  How   many\n\n days\tdo I get?  "),
            "How many days do I get?"
        );
    }

    #[test]
    fn test_strips_control_characters() {
        assert_eq!(
            sanitize_question("What\u{0007} is\u{0000} the\u{200B} policy?"),
            "What is the policy?"
        );
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "  plain text ",
            "tabs\tand\nnewlines\r\n",
            "\u{FEFF}bom and \u{00A0}nbsp",
            "already clean",
            "",
            "ünïcödé  wörds",
        ];
        for input in inputs {
            let once = sanitize_question(input);
            assert_eq!(sanitize_question(&once), once, "not idempotent: {:?}", input);
        }
    }
}
