//! Shell-style argument tokenizer.
//!
//! This crate splits a single input line into argument tokens the way an
//! interactive shell would, handling single quotes, double quotes, and
//! backslash escapes. It is the front half of the `helmsman` command
//! toolkit, but has no dependency on it and can be used on its own.
//!
//! # Example
//!
//! ```rust
//! use helmsman_splitter::split_args;
//!
//! let args = split_args("copy 'my file.txt' dest").unwrap();
//! assert_eq!(args, vec!["copy", "my file.txt", "dest"]);
//!
//! // A quoted empty string is a real argument.
//! let args = split_args("set name ''").unwrap();
//! assert_eq!(args, vec!["set", "name", ""]);
//! ```
//!
//! # Splitting Rules
//!
//! The input is scanned left to right, one character at a time:
//!
//! - Whitespace outside any quote ends the current token; runs of
//!   whitespace collapse to a single separator.
//! - A backslash escapes the next character (`\r`, `\n`, `\t` map to
//!   CR/LF/TAB, anything else is taken literally). The backslash itself
//!   never appears in the output. Escapes work inside quotes too.
//! - `'...'` and `"..."` delimit quoted regions. Inside single quotes a
//!   double quote is literal content, and vice versa.
//! - Adjacent quoted and unquoted runs with no whitespace between them
//!   join into a single token: `'mixed'quoted` is one argument.
//!
//! An unterminated quote is an error reporting the position and delimiter
//! of the last quote that was opened.

use thiserror::Error;

/// Error returned when the input ends inside a quoted region.
///
/// Carries the character index and delimiter of the last opening quote
/// seen. When several quotes are left open, the last one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unmatched quote delimiter '{delimiter}' at index {index}")]
pub struct UnmatchedQuote {
    /// Character index of the opening quote (not a byte offset).
    pub index: usize,
    /// The quote character that was never closed: `'` or `"`.
    pub delimiter: char,
}

/// Splits one raw input line into argument tokens.
///
/// Returns the tokens in order, or [`UnmatchedQuote`] if the input ends
/// inside a quoted region.
///
/// Tokens are emitted when whitespace is reached outside any quote, and
/// once more at end of input for a pending token. A token that is empty
/// but was explicitly opened by a quote (`''` or `""`) is emitted as an
/// empty string; pure trailing whitespace emits nothing.
pub fn split_args(input: &str) -> Result<Vec<String>, UnmatchedQuote> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut escaped = false;
    let mut in_single = false;
    let mut in_double = false;
    let mut last_quote: Option<(usize, char)> = None;
    // Set when a quote opens the token, so that `''` still emits one
    // (empty) argument.
    let mut force_emit = false;

    for (index, ch) in input.chars().enumerate() {
        // Whitespace wins over everything else, including an armed escape:
        // an escaped space outside quotes still terminates the token and
        // the escape carries over to the next character.
        if ch.is_whitespace() && !in_single && !in_double {
            if !current.is_empty() || force_emit {
                args.push(std::mem::take(&mut current));
            }
            force_emit = false;
            continue;
        }

        if escaped {
            current.push(match ch {
                'r' => '\r',
                'n' => '\n',
                't' => '\t',
                other => other,
            });
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == '\'' {
            if in_single {
                in_single = false;
            } else if in_double {
                current.push(ch);
            } else {
                in_single = true;
                last_quote = Some((index, ch));
                force_emit = true;
            }
        } else if ch == '"' {
            if in_double {
                in_double = false;
            } else if in_single {
                current.push(ch);
            } else {
                in_double = true;
                last_quote = Some((index, ch));
                force_emit = true;
            }
        } else {
            current.push(ch);
        }
    }

    if in_single || in_double {
        match last_quote {
            Some((index, delimiter)) => return Err(UnmatchedQuote { index, delimiter }),
            None => unreachable!("a quote state implies an opening quote was seen"),
        }
    }

    if !current.is_empty() || force_emit {
        args.push(current);
    }

    Ok(args)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    // Plain words: no whitespace, quotes, or backslashes.
    fn plain_word() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9._=/-]{1,12}"
    }

    // Quotable content: anything but the delimiters and backslash.
    fn quotable() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9 .,!?:;=-]{0,30}"
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn plain_words_split_like_whitespace(words in prop::collection::vec(plain_word(), 0..8)) {
            let input = words.join(" ");
            prop_assert_eq!(split_args(&input).unwrap(), words);
        }

        #[test]
        fn single_quoted_content_is_one_token(content in quotable()) {
            let input = format!("'{}'", content);
            prop_assert_eq!(split_args(&input).unwrap(), vec![content]);
        }

        #[test]
        fn double_quoted_content_is_one_token(content in quotable()) {
            let input = format!("\"{}\"", content);
            prop_assert_eq!(split_args(&input).unwrap(), vec![content]);
        }

        #[test]
        fn quoting_a_word_changes_nothing(word in plain_word()) {
            let plain = split_args(&word).unwrap();
            let quoted = split_args(&format!("'{}'", word)).unwrap();
            prop_assert_eq!(plain, quoted);
        }

        #[test]
        fn surrounding_whitespace_is_irrelevant(words in prop::collection::vec(plain_word(), 0..6)) {
            let tight = words.join(" ");
            let loose = format!("   {}   ", words.join("     "));
            prop_assert_eq!(split_args(&tight).unwrap(), split_args(&loose).unwrap());
        }

        #[test]
        fn unterminated_quote_always_errors(word in plain_word()) {
            let input = format!("{} 'tail", word);
            let err = split_args(&input).unwrap_err();
            prop_assert_eq!(err.delimiter, '\'');
        }
    }
}
