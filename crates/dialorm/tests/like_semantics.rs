//! Evaluate rendered LIKE / equality literals against sample text.

use dialorm::{Dialect, DialectConfig, FilterOp, Term, Value, mysql};
use regex::Regex;

/// Lex the single-quoted literal starting at `sql`, MySQL rules.
fn lex_literal(sql: &str, backslash_escapes: bool) -> (String, &str) {
    let body = sql.strip_prefix('\'').expect("literal must start with a quote");
    let mut chars = body.char_indices().peekable();
    let mut value = String::new();
    while let Some((i, ch)) = chars.next() {
        match ch {
            '\\' if backslash_escapes => match chars.next().map(|(_, c)| c) {
                Some('n') => value.push('\n'),
                Some('r') => value.push('\r'),
                Some('0') => value.push('\0'),
                Some('Z') => value.push('\x1a'),
                Some(c @ ('%' | '_')) => {
                    value.push('\\');
                    value.push(c);
                }
                Some(c) => value.push(c),
                None => panic!("dangling backslash"),
            },
            '\'' if chars.peek().map(|(_, c)| *c) == Some('\'') => {
                chars.next();
                value.push('\'');
            }
            '\'' => return (value, &body[i + 1..]),
            c => value.push(c),
        }
    }
    panic!("unterminated literal: {sql}");
}

/// Translate a LIKE pattern with `\` as escape into an anchored regex.
fn like_regex(pattern: &str, case_insensitive: bool) -> Regex {
    let mut re = String::from(if case_insensitive { "(?si)^" } else { "(?s)^" });
    let mut chars = pattern.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                let next = chars.next().expect("escape at end of pattern");
                re.push_str(&regex::escape(&next.to_string()));
            }
            '%' => re.push_str(".*"),
            '_' => re.push('.'),
            c => re.push_str(&regex::escape(&c.to_string())),
        }
    }
    re.push('$');
    Regex::new(&re).unwrap()
}

/// Render a MySQL LIKE filter and return a matcher for it.
fn mysql_like(op: FilterOp, needle: &str, backslash_escapes: bool) -> Regex {
    let r = DialectConfig::new(Dialect::MySql)
        .with_backslash_escapes(backslash_escapes)
        .renderer();
    let build = dialorm::MYSQL_FILTER_OVERRIDES.get(op).unwrap();
    let sql = r.criterion(&build(Term::field("name").unwrap(), &Value::from(needle)));
    let (prefix, insensitive) = match op {
        FilterOp::Contains | FilterOp::StartsWith | FilterOp::EndsWith => {
            ("CAST(`name` AS CHAR) LIKE ", false)
        }
        _ => ("UPPER(CAST(`name` AS CHAR)) LIKE UPPER(", true),
    };
    let literal = sql.strip_prefix(prefix).unwrap_or_else(|| panic!("{sql}"));
    let (pattern, rest) = lex_literal(literal, backslash_escapes);
    assert_eq!(rest, if insensitive { ")" } else { "" }, "{sql}");
    like_regex(&pattern, insensitive)
}

#[test]
fn contains_percent_matches_literally() {
    for backslashes in [true, false] {
        let m = mysql_like(FilterOp::Contains, "100%", backslashes);
        assert!(m.is_match("100%"));
        assert!(m.is_match("only 100% cotton"));
        assert!(!m.is_match("1000"));
        assert!(!m.is_match("100"));
        assert!(!m.is_match("10%"));
    }
}

#[test]
fn underscore_and_backslash_match_literally() {
    for backslashes in [true, false] {
        let m = mysql_like(FilterOp::StartsWith, r"a_b\", backslashes);
        assert!(m.is_match(r"a_b\c"));
        assert!(!m.is_match(r"axb\c"));
        assert!(!m.is_match("a_bc"));

        let m = mysql_like(FilterOp::EndsWith, ".txt", backslashes);
        assert!(m.is_match("notes.txt"));
        assert!(!m.is_match("notes.txt.bak"));
    }
}

#[test]
fn insensitive_variants_ignore_case() {
    let m = mysql_like(FilterOp::InsensitiveContains, "AbC", true);
    assert!(m.is_match("xxabcxx"));
    assert!(m.is_match("ABC"));
    assert!(!m.is_match("ab c"));

    let m = mysql_like(FilterOp::InsensitiveStartsWith, "it's", true);
    assert!(m.is_match("IT'S here"));
    assert!(!m.is_match("its"));
}

#[test]
fn insensitive_exact_matches_any_case() {
    let r = Dialect::MySql.renderer();
    let c = mysql::mysql_insensitive_exact(Term::field("name").unwrap(), &Value::from("AbC"));
    let sql = r.criterion(&c);
    let literal = sql
        .strip_prefix("UPPER(CAST(`name` AS CHAR))=UPPER(")
        .unwrap();
    let (value, rest) = lex_literal(literal, true);
    assert_eq!(rest, ")");
    for candidate in ["abc", "ABC", "aBc"] {
        assert_eq!(candidate.to_uppercase(), value.to_uppercase());
    }
    assert_ne!("abd".to_uppercase(), value.to_uppercase());
}

#[test]
fn default_like_matches_literally() {
    let r = Dialect::Postgres.renderer();
    let c = dialorm::filters::contains(Term::field("name").unwrap(), &Value::from("5_%"));
    let sql = r.criterion(&c);
    let pattern = sql
        .strip_prefix(r#"CAST("name" AS VARCHAR) LIKE '"#)
        .and_then(|s| s.strip_suffix(r"' ESCAPE '\'"))
        .unwrap();
    let m = like_regex(pattern, false);
    assert!(m.is_match("a 5_% b"));
    assert!(!m.is_match("a 55% b"));
}
