//! Structural SQL text matching.
//!
//! The engine renders its statements with formatting we do not control, so a
//! statement is recognized by comparing its text to a reference shape while
//! ignoring whitespace and character case entirely. Whitespace is elided, not
//! collapsed: `"SELECT  *FROM t"` and `"select * from t"` are equal, while
//! `"SELECT * FRM t"` matches neither.

use std::hash::{Hash, Hasher};

/// The whitespace set skipped by every comparison: space, tab, newline,
/// carriage return, form feed and vertical tab.
fn is_sql_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\u{000c}' | '\u{000b}')
}

/// Single-character case fold used for all comparisons and hashing.
fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Whether two statement texts are structurally equal: after deleting every
/// whitespace character from both and case-folding, the remaining character
/// sequences are identical.
pub fn equals(a: &str, b: &str) -> bool {
    let mut a = a.chars().filter(|c| !is_sql_whitespace(*c));
    let mut b = b.chars().filter(|c| !is_sql_whitespace(*c));

    loop {
        match (a.next(), b.next()) {
            (None, None) => return true,
            (Some(x), Some(y)) if fold(x) == fold(y) => {}
            _ => return false,
        }
    }
}

/// Whether `text` contains `shape` at any offset under structural comparison.
///
/// Walks both strings forward from each candidate start offset, independently
/// skipping whitespace in each and comparing non-whitespace characters
/// case-insensitively; on the first mismatch the walk restarts at the offset
/// after the candidate start. The match is confirmed once all of `shape`
/// (ignoring its trailing whitespace) has been consumed.
pub fn contains(text: &str, shape: &str) -> bool {
    let text: Vec<char> = text.chars().collect();
    let shape: Vec<char> = shape.chars().collect();

    // Index just past the last non-whitespace character of the shape.
    let shape_end = shape
        .iter()
        .rposition(|c| !is_sql_whitespace(*c))
        .map_or(0, |i| i + 1);
    if shape_end == 0 {
        return true;
    }

    let mut index_text = 0;
    let mut index_shape = 0;
    let mut match_start = 0;

    while index_text < text.len() {
        if index_shape == 0 {
            match_start = index_text;
        }

        let char_text = text[index_text];
        if is_sql_whitespace(char_text) {
            index_text += 1;
            continue;
        }

        let char_shape = shape[index_shape];
        if is_sql_whitespace(char_shape) {
            index_shape += 1;
            continue;
        }

        if fold(char_text) != fold(char_shape) {
            index_text = match_start + 1;
            index_shape = 0;
            continue;
        }

        index_text += 1;
        index_shape += 1;

        if index_shape == shape_end {
            return true;
        }
    }

    false
}

/// Whether `text` starts with `shape` under structural comparison.
///
/// Fails on the first non-whitespace mismatch before the shape is exhausted;
/// succeeds even with trailing content in `text` once the shape (ignoring its
/// trailing whitespace) is fully consumed.
pub fn starts_with(text: &str, shape: &str) -> bool {
    let mut text = text.chars().filter(|c| !is_sql_whitespace(*c));
    let mut shape = shape.chars().filter(|c| !is_sql_whitespace(*c));

    loop {
        match shape.next() {
            None => return true,
            Some(char_shape) => match text.next() {
                Some(char_text) if fold(char_text) == fold(char_shape) => {}
                _ => return false,
            },
        }
    }
}

/// Whitespace-stripped, case-folded polynomial hash, consistent with
/// [`equals`]: structurally equal texts always hash identically.
pub fn folded_hash(text: &str) -> u64 {
    text.chars()
        .filter(|c| !is_sql_whitespace(*c))
        .fold(17u64, |hash, c| {
            hash.wrapping_mul(31).wrapping_add(fold(c) as u64)
        })
}

/// A statement text usable as a key in equality-based containers, with
/// `PartialEq` and `Hash` backed by the structural primitives above.
#[derive(Debug, Clone)]
pub struct SqlText(String);

impl SqlText {
    pub fn new(text: impl Into<String>) -> Self {
        SqlText(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SqlText {
    fn from(text: &str) -> Self {
        SqlText::new(text)
    }
}

impl PartialEq for SqlText {
    fn eq(&self, other: &Self) -> bool {
        equals(&self.0, &other.0)
    }
}

impl Eq for SqlText {}

impl Hash for SqlText {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(folded_hash(&self.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn equals_ignores_whitespace_and_case() {
        assert!(equals("SELECT  *FROM t", "select * from t"));
        assert!(equals("SELECT\n*\nFROM\tt", "select * from t"));
        assert!(equals("", ""));
        assert!(equals("  \t\r\n", ""));
        assert!(equals("a", "\u{000b}A\u{000c}"));
    }

    #[test]
    fn equals_rejects_different_texts() {
        assert!(!equals("SELECT * FROM t", "SELECT * FRM t"));
        assert!(!equals("SELECT * FROM t", "SELECT * FROM t2"));
        assert!(!equals("a b", "a b c"));
        assert!(!equals("", "x"));
    }

    #[test]
    fn contains_finds_shape_at_any_offset() {
        assert!(contains("select * from t", "SELECT  *FROM t"));
        assert!(contains("SELECT\n*\nFROM\tt", "SELECT  *FROM t"));
        assert!(contains("prefix SELECT * FROM t suffix", "select*from t"));
        assert!(!contains("SELECT * FRM t", "SELECT  *FROM t"));
    }

    #[test]
    fn contains_backtracks_over_partial_matches() {
        // "aab" must not be rejected just because the first 'a' starts a
        // partial match of "ab".
        assert!(contains("aab", "ab"));
        assert!(contains("xx aa ab yy", "a a b"));
        assert!(!contains("aa", "ab"));
    }

    #[test]
    fn contains_with_empty_shape_is_vacuous() {
        assert!(contains("anything", ""));
        assert!(contains("", " \n"));
    }

    #[test]
    fn starts_with_is_anchored() {
        assert!(starts_with("SELECT * FROM t WHERE x", "select\t* from t"));
        assert!(starts_with("abc", "A B C "));
        assert!(!starts_with("xSELECT * FROM t", "SELECT"));
        assert!(!starts_with("SELEC", "SELECT"));
        assert!(starts_with("anything", ""));
    }

    #[test]
    fn sql_text_keys_match_structurally() {
        use std::collections::HashMap;

        let mut map: HashMap<SqlText, u32> = HashMap::new();
        let _ = map.insert(SqlText::new("SELECT *\nFROM \"T\""), 1);
        assert_eq!(map.get(&SqlText::new("select * from \"t\"")), Some(&1));
        assert_eq!(map.get(&SqlText::new("select * from \"u\"")), None);
    }

    fn strip_fold(s: &str) -> String {
        s.chars()
            .filter(|c| !is_sql_whitespace(*c))
            .map(fold)
            .collect()
    }

    proptest! {
        #[test]
        fn equals_matches_stripped_folded_comparison(a in ".{0,40}", b in ".{0,40}") {
            prop_assert_eq!(equals(&a, &b), strip_fold(&a) == strip_fold(&b));
        }

        #[test]
        fn equal_texts_hash_identically(s in ".{0,40}", pad in "[ \t\r\n]{0,6}") {
            let respaced = format!("{pad}{}{pad}", s.to_uppercase());
            if equals(&s, &respaced) {
                prop_assert_eq!(folded_hash(&s), folded_hash(&respaced));
            }
        }

        #[test]
        fn contains_accepts_padded_shape(s in "[a-zA-Z0-9*().,=@\"]{1,20}", prefix in ".{0,10}", suffix in ".{0,10}") {
            let text = format!("{prefix} {s} {suffix}");
            prop_assert!(contains(&text, &s));
        }
    }
}
