// gsub_test.rs - Integration tests for global substitution.

use rigoni::prelude::*;

fn init() {
    rigoni::initialize(&[Encoding::utf8()]).unwrap();
}

#[test]
fn gsub_table() {
    init();
    for (input, pattern, replacement, expected) in [
        // Examples from Ruby's gsub doc:
        // https://ruby-doc.org/core-2.1.4/String.html#method-i-gsub
        ("hello", "[aeiou]", "*", "h*ll*"),
        ("hello", "([aeiou])", "<\\1>", "h<e>ll<o>"),
        ("hello", "(?<foo>[aeiou])", "{\\k<foo>}", "h{e}ll{o}"),
        // Other cases
        ("abaabca", "b(?!a)", ".", "abaa.ca"),
        ("aaaaa", "aa", "..", "....a"),
        ("", ".", "*", ""),
        ("abc", "x+", "*", "abc"),
        // Zero-width matches, same behavior as Ruby:
        // "abc".gsub(/.*/, ".")  => ".."
        ("abc", ".*", ".", ".."),
        // "abc".gsub(/.*?/, ".") => ".a.b.c."
        ("abc", ".*?", ".", ".a.b.c."),
    ] {
        let re = Regex::new(pattern).unwrap();
        let result = re.gsub(input, replacement).unwrap();
        assert_eq!(
            result, expected,
            "input {input:?}, pattern {pattern:?}, replacement {replacement:?}"
        );
    }
}

#[test]
fn gsub_multibyte_input() {
    init();
    let re = Regex::new("l+").unwrap();
    assert_eq!(re.gsub("hällö wörld", "L").unwrap(), "häLö wörLd");
    let re = Regex::new("[äöü]").unwrap();
    assert_eq!(re.gsub("hällö", "(\\0)").unwrap(), "h(ä)ll(ö)");
}

#[test]
fn unknown_references_render_literally() {
    init();
    let re = Regex::new("(?<first>a+)").unwrap();
    assert_eq!(re.gsub("xaax", "[\\k<first>]").unwrap(), "x[aa]x");
    assert_eq!(re.gsub("xaax", "[\\k<other>]").unwrap(), "x[\\k<other>]x");
    assert_eq!(re.gsub("xaax", "[\\7]").unwrap(), "x[\\7]x");
}

#[test]
fn invalid_replacement_rejected() {
    init();
    let re = Regex::new("a").unwrap();
    for replacement in ["bad\\", "\\q", "\\k<", "\\k<>"] {
        let err = re.gsub("aaa", replacement).unwrap_err();
        assert!(
            matches!(err, Error::Replacement { .. }),
            "replacement {replacement:?}: got {err:?}"
        );
    }
}

#[test]
fn validate_replacement_standalone() {
    assert!(validate_replacement("plain").is_ok());
    assert!(validate_replacement("\\1 and \\k<name>").is_ok());
    assert!(validate_replacement("broken\\k").is_err());
}
