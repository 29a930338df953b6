//! Lenient parsing of weighted participant entries.
//!
//! Input is free text, one candidate per line, in the form
//! `<name>*<positive integer>`. The parser is deliberately forgiving:
//! lines that do not match are dropped silently, never reported, because
//! the input is re-parsed on every keystroke of a live editing session and
//! partial lines must not raise errors.

use serde::{Deserialize, Serialize};

/// The character separating a name from its weight.
pub const SEPARATOR: char = '*';

/// One parsed participant: a non-empty name and a positive weight.
///
/// Duplicate names are allowed and kept as distinct entries; weight is a
/// chance count, not a probability, so an entry with weight `n` receives
/// `n` tokens in the drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Display name, trimmed of surrounding whitespace.
    pub name: String,
    /// Number of chances (tokens) this entry receives. Always > 0.
    pub weight: u32,
}

impl Entry {
    /// Creates an entry. Callers are expected to uphold the non-empty-name
    /// and positive-weight invariants; [`parse_entries`] always does.
    #[must_use]
    pub fn new(name: &str, weight: u32) -> Self {
        Self {
            name: name.to_string(),
            weight,
        }
    }
}

/// Parses raw text into an ordered entry list.
///
/// A line is accepted when splitting at its *last* `*` yields a digits-only
/// tail that parses to a weight greater than zero, and a name that is
/// non-empty after trimming. Everything else — blank lines, missing
/// separators, zero or negative weights, numeric overflow — is dropped
/// without comment. Order and duplicates are preserved, and parsing the
/// same text twice yields the same result.
///
/// # Example
///
/// ```
/// use marblefall_core::parse_entries;
///
/// let entries = parse_entries("alice*2\njunk line\n  bob  *1");
/// assert_eq!(entries.len(), 2);
/// assert_eq!(entries[0].name, "alice");
/// assert_eq!(entries[0].weight, 2);
/// assert_eq!(entries[1].name, "bob");
/// ```
#[must_use]
pub fn parse_entries(input: &str) -> Vec<Entry> {
    input.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<Entry> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let (raw_name, raw_weight) = line.rsplit_once(SEPARATOR)?;

    if raw_weight.is_empty() || !raw_weight.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    // Digits-only strings can still overflow u32; treat that as malformed.
    let weight: u32 = raw_weight.parse().ok()?;
    if weight == 0 {
        return None;
    }

    let name = raw_name.trim();
    if name.is_empty() {
        return None;
    }

    Some(Entry::new(name, weight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_well_formed_lines_in_order() {
        let entries = parse_entries("A*2\nB*1");
        assert_eq!(entries, vec![Entry::new("A", 2), Entry::new("B", 1)]);
    }

    #[test]
    fn trims_name_whitespace() {
        let entries = parse_entries("  abc  *5");
        assert_eq!(entries, vec![Entry::new("abc", 5)]);
    }

    #[test]
    fn drops_malformed_lines() {
        for bad in ["", "justname", "name*0", "name*-3", "name*", "*5", "  *5", "name*1.5"] {
            assert!(parse_entries(bad).is_empty(), "accepted {bad:?}");
        }
    }

    #[test]
    fn splits_at_last_separator() {
        // A name may itself contain the separator character.
        let entries = parse_entries("a*b*3");
        assert_eq!(entries, vec![Entry::new("a*b", 3)]);
    }

    #[test]
    fn keeps_duplicates_distinct() {
        let entries = parse_entries("same*1\nsame*2");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].weight, 1);
        assert_eq!(entries[1].weight, 2);
    }

    #[test]
    fn ignores_weight_overflow() {
        assert!(parse_entries("big*4294967296").is_empty());
        assert_eq!(parse_entries("big*4294967295").len(), 1);
    }

    #[test]
    fn handles_crlf_line_endings() {
        let entries = parse_entries("a*1\r\nb*2\r\n");
        assert_eq!(entries, vec![Entry::new("a", 1), Entry::new("b", 2)]);
    }

    #[test]
    fn rejects_signed_weights() {
        assert!(parse_entries("name*+3").is_empty());
    }

    #[test]
    fn non_ascii_names_are_fine() {
        let entries = parse_entries("짱구*5\n짱아*10");
        assert_eq!(entries[0], Entry::new("짱구", 5));
        assert_eq!(entries[1], Entry::new("짱아", 10));
    }

    proptest! {
        #[test]
        fn parsing_is_idempotent(input in "\\PC*") {
            let once = parse_entries(&input);
            let twice = parse_entries(&input);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn all_parsed_entries_uphold_invariants(input in "\\PC*") {
            for entry in parse_entries(&input) {
                prop_assert!(entry.weight > 0);
                prop_assert!(!entry.name.is_empty());
                prop_assert_eq!(entry.name.trim(), entry.name.as_str());
            }
        }

        #[test]
        fn well_formed_lines_always_parse(name in "[a-z가-힣]{1,8}", weight in 1u32..10_000) {
            let input = format!("{name}{SEPARATOR}{weight}");
            let entries = parse_entries(&input);
            prop_assert_eq!(entries, vec![Entry::new(&name, weight)]);
        }
    }
}
