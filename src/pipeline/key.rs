//! Citation key generation
//!
//! A key is the first author's surname, lower-cased, followed by the year as
//! given. Keys are not unique on their own; [`KeyAllocator`] can add a suffix
//! to repeats.

use std::collections::HashMap;

const UNKNOWN_AUTHOR: &str = "unknown";

/// Generate a citation key from an author list and a year.
///
/// The author list is split on commas; the last whitespace-separated token of
/// the first segment is the surname. `"Smith, John"` and `"John Smith, Ann Lee"`
/// both give `smith`.
pub fn generate_key(authors: &str, year: &str) -> String {
    let first = authors.split(',').next().unwrap_or("");
    let surname = first.split_whitespace().last().unwrap_or(UNKNOWN_AUTHOR);
    format!("{}{}", surname.to_lowercase(), year)
}

/// What to do when two records produce the same key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyPolicy {
    /// Keep keys as generated, duplicates included
    #[default]
    Duplicate,
    /// Append `a`, `b`, ... to the second and later occurrences
    Suffix,
}

/// Tracks issued keys for one conversion run
#[derive(Debug, Default)]
pub struct KeyAllocator {
    policy: KeyPolicy,
    seen: HashMap<String, usize>,
    collisions: usize,
}

impl KeyAllocator {
    pub fn new(policy: KeyPolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    /// Register `key` and return the key to emit.
    pub fn allocate(&mut self, key: String) -> String {
        let count = self.seen.entry(key.clone()).or_insert(0);
        *count += 1;
        let repeats = *count - 1;
        if repeats == 0 {
            return key;
        }

        self.collisions += 1;
        match self.policy {
            KeyPolicy::Duplicate => key,
            KeyPolicy::Suffix => {
                let mut candidate = format!("{}{}", key, suffix(repeats));
                // A suffixed key can clash with a plain key seen earlier
                // ("smith2021" + "a" vs a real "smith2021a").
                let mut n = repeats;
                while self.seen.contains_key(&candidate) {
                    n += 1;
                    candidate = format!("{}{}", key, suffix(n));
                }
                self.seen.insert(candidate.clone(), 1);
                candidate
            }
        }
    }

    /// Number of keys that repeated an earlier one
    pub fn collisions(&self) -> usize {
        self.collisions
    }
}

/// Letter suffix for the n-th repeat: `a`..`z`, then `aa`, `ab`, ...
fn suffix(mut n: usize) -> String {
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(char::from(b'a' + (n % 26) as u8));
        n /= 26;
    }
    letters.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surname_before_comma() {
        assert_eq!(generate_key("Smith, John", "2021"), "smith2021");
    }

    #[test]
    fn test_last_token_of_first_author() {
        assert_eq!(generate_key("John Q. Public, Ann Lee", "1999"), "public1999");
    }

    #[test]
    fn test_empty_author_falls_back_to_unknown() {
        assert_eq!(generate_key("", "2020"), "unknown2020");
        assert_eq!(generate_key("   ", "2020"), "unknown2020");
        assert_eq!(generate_key(", Lee", ""), "unknown");
    }

    #[test]
    fn test_year_is_kept_verbatim() {
        assert_eq!(generate_key("Doe", "n.d."), "doen.d.");
        assert_eq!(generate_key("DOE", "In Press"), "doeIn Press");
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(
            generate_key("Müller, K", "2001"),
            generate_key("Müller, K", "2001")
        );
    }

    #[test]
    fn test_duplicate_policy_keeps_keys() {
        let mut keys = KeyAllocator::new(KeyPolicy::Duplicate);
        assert_eq!(keys.allocate("smith2021".into()), "smith2021");
        assert_eq!(keys.allocate("smith2021".into()), "smith2021");
        assert_eq!(keys.collisions(), 1);
    }

    #[test]
    fn test_suffix_policy_disambiguates() {
        let mut keys = KeyAllocator::new(KeyPolicy::Suffix);
        assert_eq!(keys.allocate("smith2021".into()), "smith2021");
        assert_eq!(keys.allocate("smith2021".into()), "smith2021a");
        assert_eq!(keys.allocate("smith2021".into()), "smith2021b");
        assert_eq!(keys.allocate("lee2020".into()), "lee2020");
        assert_eq!(keys.collisions(), 2);
    }

    #[test]
    fn test_suffix_skips_existing_plain_key() {
        let mut keys = KeyAllocator::new(KeyPolicy::Suffix);
        keys.allocate("smith2021a".into());
        keys.allocate("smith2021".into());
        assert_eq!(keys.allocate("smith2021".into()), "smith2021b");
    }

    #[test]
    fn test_suffix_past_alphabet_stays_alphabetic() {
        assert_eq!(suffix(1), "a");
        assert_eq!(suffix(26), "z");
        assert_eq!(suffix(27), "aa");
        assert_eq!(suffix(28), "ab");
        assert_eq!(suffix(52), "az");
        assert_eq!(suffix(53), "ba");
    }

    #[test]
    fn test_many_repeats_never_touch_the_year() {
        let mut keys = KeyAllocator::new(KeyPolicy::Suffix);
        let emitted: Vec<String> = (0..28).map(|_| keys.allocate("smith2021".into())).collect();
        assert_eq!(emitted[26], "smith2021z");
        assert_eq!(emitted[27], "smith2021aa");
        assert!(emitted.iter().all(|k| !k["smith2021".len()..].contains(char::is_numeric)));
    }
}
