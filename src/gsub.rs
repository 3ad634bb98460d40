// gsub.rs - Global substitution with capture-group references.
//
// Replacement syntax is Ruby's String#gsub: `\\` is a literal backslash,
// `\N` references capture group N, `\k<name>` references a named group.
// References to groups the pattern does not have render literally, the
// same way Ruby leaves them.

use memchr::memchr;

use crate::error::Error;
use crate::regex::{Regex, SearchResult};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    Group(usize),
    NamedGroup(String),
}

impl Regex {
    /// Return a copy of `input` with every non-overlapping match replaced.
    ///
    /// # Examples
    ///
    /// ```
    /// use rigoni::prelude::*;
    ///
    /// rigoni::initialize(&[Encoding::utf8()]).unwrap();
    ///
    /// let re = Regex::new("(?<vowel>[aeiou])").unwrap();
    /// assert_eq!(re.gsub("hello", "{\\k<vowel>}").unwrap(), "h{e}ll{o}");
    /// ```
    pub fn gsub(&self, input: &str, replacement: &str) -> Result<String, Error> {
        let tokens = tokenize(replacement)?;
        let mut out = String::with_capacity(input.len());
        let mut copied = 0;
        let mut pos = 0;
        while pos <= input.len() {
            let Some(result) = self.search_from(input, pos)? else {
                break;
            };
            let (start, end) = (result.start(), result.end());
            out.push_str(input.get(copied..start).ok_or_else(|| {
                Error::internal(format!(
                    "replacement region [{copied}:{start}] out of bounds"
                ))
            })?);
            render(&result, &tokens, &mut out);
            copied = end;
            pos = if start == end {
                // zero-width match: step one character so the scan advances
                let step = input
                    .get(end..)
                    .and_then(|rest| rest.chars().next())
                    .map_or(1, char::len_utf8);
                end + step
            } else {
                end
            };
        }
        out.push_str(input.get(copied..).unwrap_or(""));
        Ok(out)
    }
}

/// Check a replacement string without applying it. Lets callers that
/// accept replacement strings from configuration reject bad ones up
/// front, before any input arrives.
pub fn validate_replacement(replacement: &str) -> Result<(), Error> {
    tokenize(replacement).map(|_| ())
}

fn render(result: &SearchResult, tokens: &[Token], out: &mut String) {
    for token in tokens {
        match token {
            Token::Literal(text) => out.push_str(text),
            Token::Group(n) => match result.group(*n) {
                Ok(text) => out.push_str(text),
                Err(_) => {
                    out.push('\\');
                    out.push_str(&n.to_string());
                }
            },
            Token::NamedGroup(name) => match result.named_group(name) {
                Ok(text) => out.push_str(text),
                Err(_) => {
                    out.push_str("\\k<");
                    out.push_str(name);
                    out.push('>');
                }
            },
        }
    }
}

fn tokenize(replacement: &str) -> Result<Vec<Token>, Error> {
    let bytes = replacement.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        match memchr(b'\\', &bytes[pos..]) {
            None => {
                tokens.push(Token::Literal(replacement[pos..].to_string()));
                break;
            }
            Some(n) => {
                if n > 0 {
                    tokens.push(Token::Literal(replacement[pos..pos + n].to_string()));
                    pos += n;
                }
                pos = parse_escape(replacement, pos, &mut tokens)?;
            }
        }
    }
    Ok(tokens)
}

/// Parse the escape starting at `pos` (which holds a backslash); push
/// the token and return the position past it.
fn parse_escape(replacement: &str, pos: usize, tokens: &mut Vec<Token>) -> Result<usize, Error> {
    let bytes = replacement.as_bytes();
    let Some(&next) = bytes.get(pos + 1) else {
        return Err(Error::replacement("invalid escape sequence"));
    };
    match next {
        b'\\' => {
            tokens.push(Token::Literal(String::from("\\")));
            Ok(pos + 2)
        }
        b'0'..=b'9' => {
            let mut end = pos + 1;
            let mut number = 0usize;
            while let Some(&digit) = bytes.get(end) {
                if !digit.is_ascii_digit() {
                    break;
                }
                number = number
                    .saturating_mul(10)
                    .saturating_add((digit - b'0') as usize);
                end += 1;
            }
            tokens.push(Token::Group(number));
            Ok(end)
        }
        b'k' => {
            if bytes.get(pos + 2) != Some(&b'<') {
                return Err(Error::replacement("invalid escape sequence"));
            }
            let name_start = pos + 3;
            let close = memchr(b'>', &bytes[name_start..])
                .ok_or_else(|| Error::replacement("invalid escape sequence"))?;
            if close == 0 {
                return Err(Error::replacement("invalid escape sequence"));
            }
            let name = &replacement[name_start..name_start + close];
            tokens.push(Token::NamedGroup(name.to_string()));
            Ok(name_start + close + 1)
        }
        _ => Err(Error::replacement("invalid escape sequence")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_mixed() {
        let tokens = tokenize("hello\\k<bb>\\k<a>\\\\\\0z").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Literal(String::from("hello")),
                Token::NamedGroup(String::from("bb")),
                Token::NamedGroup(String::from("a")),
                Token::Literal(String::from("\\")),
                Token::Group(0),
                Token::Literal(String::from("z")),
            ]
        );
    }

    #[test]
    fn tokenize_multi_digit_group() {
        let tokens = tokenize("\\12x\\3").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Group(12),
                Token::Literal(String::from("x")),
                Token::Group(3),
            ]
        );
    }

    #[test]
    fn tokenize_plain_text() {
        let tokens = tokenize("no escapes here").unwrap();
        assert_eq!(tokens, vec![Token::Literal(String::from("no escapes here"))]);
    }

    #[test]
    fn tokenize_empty() {
        assert_eq!(tokenize("").unwrap(), vec![]);
    }

    #[test]
    fn tokenize_invalid_escapes() {
        for replacement in ["trailing\\", "\\x", "\\k", "\\kx", "\\k<>", "\\k<open"] {
            let err = tokenize(replacement).unwrap_err();
            assert!(
                matches!(err, Error::Replacement { .. }),
                "{replacement:?} should be rejected, got {err:?}"
            );
        }
    }

    #[test]
    fn validate_matches_tokenize() {
        assert!(validate_replacement("a\\1b\\k<name>c").is_ok());
        assert!(validate_replacement("bad\\q").is_err());
    }
}
