//! International Morse code character table and text translation.

use alloc::string::String;

/// Token emitted into a pattern for a word boundary.
///
/// A word gap totals 7 dits; the renderer emits the 3-dit character gap
/// plus 4 extra dits when it sees this token.
pub const WORD_SPACE: char = '/';

/// Look up the dot/dash pattern for a single character.
///
/// Case-insensitive. Returns `None` for characters with no Morse
/// representation; those are dropped from transmissions.
pub const fn char_to_morse(c: char) -> Option<&'static str> {
    match c.to_ascii_uppercase() {
        'A' => Some(".-"),
        'B' => Some("-..."),
        'C' => Some("-.-."),
        'D' => Some("-.."),
        'E' => Some("."),
        'F' => Some("..-."),
        'G' => Some("--."),
        'H' => Some("...."),
        'I' => Some(".."),
        'J' => Some(".---"),
        'K' => Some("-.-"),
        'L' => Some(".-.."),
        'M' => Some("--"),
        'N' => Some("-."),
        'O' => Some("---"),
        'P' => Some(".--."),
        'Q' => Some("--.-"),
        'R' => Some(".-."),
        'S' => Some("..."),
        'T' => Some("-"),
        'U' => Some("..-"),
        'V' => Some("...-"),
        'W' => Some(".--"),
        'X' => Some("-..-"),
        'Y' => Some("-.--"),
        'Z' => Some("--.."),
        '0' => Some("-----"),
        '1' => Some(".----"),
        '2' => Some("..---"),
        '3' => Some("...--"),
        '4' => Some("....-"),
        '5' => Some("....."),
        '6' => Some("-...."),
        '7' => Some("--..."),
        '8' => Some("---.."),
        '9' => Some("----."),
        '/' => Some("-..-."),
        '?' => Some("..--.."),
        '.' => Some(".-.-.-"),
        ',' => Some("--..--"),
        '=' => Some("-...-"),
        '-' => Some("-....-"),
        '(' => Some("-.--."),
        ')' => Some("-.--.-"),
        '@' => Some(".--.-."),
        _ => None,
    }
}

/// Translate text into a Morse pattern string.
///
/// Character patterns are separated by a single space; input spaces
/// collapse into one [`WORD_SPACE`] token. Unsupported characters are
/// silently dropped, so the result may be empty even for non-empty input.
pub fn text_to_morse(text: &str) -> String {
    let mut pattern = String::new();
    let mut pending_word_space = false;

    for c in text.chars() {
        if c == ' ' {
            // Only meaningful between mapped characters
            if !pattern.is_empty() {
                pending_word_space = true;
            }
            continue;
        }
        let Some(code) = char_to_morse(c) else {
            continue;
        };
        if pending_word_space {
            pattern.push(' ');
            pattern.push(WORD_SPACE);
            pending_word_space = false;
        }
        if !pattern.is_empty() {
            pattern.push(' ');
        }
        pattern.push_str(code);
    }

    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sos_translates() {
        assert_eq!(text_to_morse("SOS"), "... --- ...");
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(text_to_morse("sos"), text_to_morse("SOS"));
        assert_eq!(char_to_morse('a'), char_to_morse('A'));
    }

    #[test]
    fn empty_input_yields_empty_pattern() {
        assert_eq!(text_to_morse(""), "");
    }

    #[test]
    fn unsupported_characters_dropped() {
        assert_eq!(text_to_morse("#$%"), "");
        assert_eq!(text_to_morse("S#O$S"), "... --- ...");
    }

    #[test]
    fn space_becomes_word_token() {
        assert_eq!(text_to_morse("E E"), ". / .");
    }

    #[test]
    fn multiple_spaces_collapse() {
        assert_eq!(text_to_morse("E   E"), ". / .");
    }

    #[test]
    fn leading_and_trailing_spaces_ignored() {
        assert_eq!(text_to_morse("  SOS  "), "... --- ...");
    }

    #[test]
    fn punctuation_set_supported() {
        for c in ['/', '?', '.', ',', '=', '-', '(', ')', '@'] {
            assert!(char_to_morse(c).is_some(), "missing pattern for {:?}", c);
        }
    }

    #[test]
    fn digits_supported() {
        assert_eq!(text_to_morse("73"), "--... ...--");
    }

    #[test]
    fn callsign_with_slash() {
        assert_eq!(text_to_morse("W1AW/4"), ".-- .---- .- .-- -..-. ....-");
    }

    #[test]
    fn space_next_to_dropped_character_does_not_duplicate_token() {
        // '#' contributes nothing, so only one word gap remains
        assert_eq!(text_to_morse("E # E"), ". / .");
    }
}
